// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, obsplan, table_rows};

#[test]
fn test_table_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let table = tmp_dir.path().join("mk.txt");

    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens",
            "-o", "file",
            "--table-file", &format!("{}", table.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Wrote"), "{stderr}");

    let printed = table_rows(&stdout);
    let written = table_rows(&std::fs::read_to_string(&table).unwrap());
    assert!(!written.is_empty());
    assert_eq!(printed, written);
    // Frequencies increase, and none are outside of the receiver bands.
    for pair in written.windows(2) {
        assert!(pair[0].0 < pair[1].0);
    }
    for (f, g) in written {
        assert!((0.544..=3.5).contains(&f), "{f}");
        assert!(g > 0.0);
    }
    // No plots.
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_subarray_table_is_smaller() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let full = tmp_dir.path().join("full.txt");
    let sub = tmp_dir.path().join("sub.txt");

    for (file, extra) in [(&full, vec![]), (&sub, vec!["--radius", "0.5"])] {
        let mut args = vec![
            "sens".to_string(),
            "-o".to_string(),
            "file".to_string(),
            "--table-file".to_string(),
            file.display().to_string(),
        ];
        args.extend(extra.into_iter().map(|s| s.to_string()));
        let cmd = obsplan().args(&args).ok();
        assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    }

    let full = table_rows(&std::fs::read_to_string(full).unwrap());
    let sub = table_rows(&std::fs::read_to_string(sub).unwrap());
    assert_eq!(full.len(), sub.len());
    // 34 dishes are within 500 m, rounded down to 32.
    for ((_, g_full), (_, g_sub)) in full.into_iter().zip(sub) {
        approx::assert_relative_eq!(g_sub / g_full, 32.0 / 64.0, max_relative = 1e-4);
    }
}

#[test]
fn test_rounding_warning() {
    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens", "--nelements", "30",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("only 28 will be used"), "{stderr}");
    assert!(stderr.contains("Considering a radius of"), "{stderr}");
    assert!(stderr.contains("Dry run"), "{stderr}");
    assert!(stdout.is_empty(), "{stdout}");
}

#[test]
fn test_bad_zenith() {
    let cmd = obsplan().args(["sens", "--zenith", "95"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("95"), "{stderr}");
}

#[test]
fn test_bad_gallos() {
    let cmd = obsplan().args(["sens", "--gallos", "huge"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("huge"), "{stderr}");
    assert!(stderr.contains("low, medium, high"), "{stderr}");
}

#[test]
fn test_impossible_zenith_warns() {
    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens",
            "--glgb", "0", "90",
            "--zenith", "10",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("is impossible"), "{stderr}");
}

#[test]
fn test_too_many_elements() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let table = tmp_dir.path().join("mk.txt");

    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens", "--nelements", "100",
            "-o", "file",
            "--table-file", &format!("{}", table.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("100"), "{stderr}");
    assert!(stderr.contains("64"), "{stderr}");
    assert!(stdout.is_empty(), "{stdout}");
    assert!(!table.exists());
}

#[cfg(feature = "plotting")]
#[test]
fn test_plots_outside_the_receiver_bands() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = obsplan()
        .args([
            "sens",
            "--fmin", "5", "--fmax", "50", "--nfreqs", "10",
            "--plot-dir", &format!("{}", tmp_dir.path().display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "sens failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("No receiver covers 5 to 50 GHz"), "{stderr}");
    assert!(tmp_dir.path().join("aeff.png").exists());
    assert!(tmp_dir.path().join("gain_single_dish_kb.png").exists());
    assert!(!tmp_dir.path().join("tsys.png").exists());
}

#[cfg(not(feature = "plotting"))]
#[test]
fn test_plots_need_feature() {
    let cmd = obsplan().args(["sens", "-o", "plot"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("plotting"), "{stderr}");
}
