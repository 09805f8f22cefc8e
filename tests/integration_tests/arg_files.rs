// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests on reading and writing argument files.

use std::io::Write;

use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, obsplan};

#[test]
fn test_riseset_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&args_file).unwrap();
    f.write_all(
        indoc! {r#"
            site = "mk"
            ra = "12:34:56"
            dec = "-43:21:00"
            date = "2019-05-01T00:00:00 UTC"
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    let cmd = obsplan()
        .args(["riseset", "--args-file", &format!("{}", args_file.display())])
        .ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Site = MeerKAT"), "{stdout}");
    assert!(stdout.contains("Rise Time (LST) = 6:01:"), "{stdout}");
}

#[test]
fn test_cli_overrides_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.json");
    std::fs::write(
        &args_file,
        r#"{ "site": "mk", "ra": "12:34:56", "dec": "-43:21:00" }"#,
    )
    .unwrap();

    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "riseset", "pks", "12:34:56", "-43:21:00",
            "--args-file", &format!("{}", args_file.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Site = Parkes Observatory"), "{stdout}");
}

#[test]
fn test_save_toml_round_trip() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens",
            "--radius", "1.0",
            "--gallos", "medium",
            "--dry-run",
            "--save-toml", &format!("{}", saved.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&saved).unwrap();
    assert!(contents.contains("radius = 1.0"), "{contents}");
    assert!(contents.contains("gallos = \"medium\""), "{contents}");

    let cmd = obsplan()
        .args([
            "sens",
            "--args-file",
            &format!("{}", saved.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("Sub-array of 44 dishes"), "{stderr}");
}

#[test]
fn test_unsupported_arg_file_type() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.yaml");
    std::fs::write(&args_file, "site: mk\n").unwrap();

    let cmd = obsplan()
        .args(["riseset", "--args-file", &format!("{}", args_file.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("toml, json"), "{stderr}");
}
