// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{get_cmd_output, obsplan};

#[test]
fn test_meerkat_rise_set() {
    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "riseset", "mk", "12:34:56", "-43:21:00",
            "--date", "2019-05-01T00:00:00 UTC",
        ])
        .ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "{stdout}");
    assert_eq!(lines[0], "Site = MeerKAT");
    assert_eq!(lines[1], "Long,Lat = 21:24:40.0 -30:43:16.0");
    assert_eq!(lines[2], "Target Coordinates = 12:34:56.00 -43:21:00.0");
    assert!(lines[3].starts_with("Rise Time (LST) = 6:01:"), "{}", lines[3]);
    assert!(lines[4].starts_with("Set Time (LST) = 19:10:"), "{}", lines[4]);
}

#[test]
fn test_utc_lines() {
    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "riseset", "vla", "5:35:17", "-5:23:28",
            "--date", "2022-01-01T00:00:00 UTC",
            "--utc",
        ])
        .ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Site = Very Large Array"), "{stdout}");
    assert!(stdout.contains("Current LST at Site = "), "{stdout}");
    assert!(stdout.contains("Rise Time (UTC) = 2022-01-0"), "{stdout}");
    assert!(stdout.contains("Set Time (MJD) = 5958"), "{stdout}");
}

#[test]
fn test_never_rises() {
    let cmd = obsplan()
        .args(["riseset", "pks", "0:00:00", "60:00:00"])
        .ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("never rises"), "{stdout}");
    assert!(!stdout.contains("Rise Time"), "{stdout}");
}

#[test]
fn test_unknown_site() {
    let cmd = obsplan()
        .args(["riseset", "atca", "12:34:56", "-43:21:00"])
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&cmd.get_output().stderr).to_string();
    assert!(stderr.contains("Unknown site 'atca'"), "{stderr}");
    assert!(stderr.contains("meerkat"), "{stderr}");
    assert!(stderr.contains("--list-sites"), "{stderr}");
}

#[test]
fn test_bad_declination() {
    let cmd = obsplan()
        .args(["riseset", "mk", "12:34:56", "-43:61:00"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("-43:61:00"), "{stderr}");
}

#[test]
fn test_missing_positionals() {
    let cmd = obsplan().args(["riseset", "mk"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("USAGE"), "{stderr}");
}

#[test]
fn test_list_sites() {
    let cmd = obsplan().args(["riseset", "--list-sites"]).ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout.lines().count(), 13, "{stdout}");
    for name in ["Jodrell Bank", "Parkes Observatory", "LOFAR Superterp", "MeerKAT"] {
        assert!(stdout.contains(name), "{name} missing from {stdout}");
    }
}

#[test]
fn test_rise_set_alias() {
    let cmd = obsplan()
        .args(["rise-set", "gmrt", "0", "0", "--date", "2021-06-01T00:00:00 UTC"])
        .ok();
    assert!(cmd.is_ok(), "rise-set failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.starts_with("Site = The Giant Metrewave Radio Telescope"));
}
