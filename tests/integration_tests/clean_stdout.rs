// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure log messages never end up in the output of a successful
//! command, even when verbose.

use tempfile::TempDir;

use crate::{get_cmd_output, obsplan, table_rows};

#[test]
fn test_riseset_stdout_is_the_report() {
    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "riseset", "-vv", "lofar", "0:00:00", "30:00:00",
            "--date", "2020-01-01T00:00:00 UTC",
        ])
        .ok();
    assert!(cmd.is_ok(), "riseset failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "{stdout}");
    assert_eq!(lines[0], "Site = LOFAR Superterp");
    // Extra lines are logged at debug level.
    assert!(stderr.contains("Current LST at Site"), "{stderr}");
    assert!(!stdout.contains("Current LST at Site"), "{stdout}");
}

#[test]
fn test_sens_stdout_is_the_table() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let table = tmp_dir.path().join("mk.txt");

    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens", "-vv",
            "--nelements", "30",
            "--nfreqs", "20",
            "-o", "file",
            "--table-file", &format!("{}", table.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    // Panics if anything but table rows were printed.
    let rows = table_rows(&stdout);
    assert!(!rows.is_empty());
    assert!(stderr.contains("Sensitivity set up"), "{stderr}");
    assert!(stderr.contains("only 28 will be used"), "{stderr}");
}
