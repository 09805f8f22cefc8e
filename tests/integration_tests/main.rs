// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod arg_files;
mod clean_stdout;
mod riseset;
mod sens;

use std::{process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn obsplan() -> Command {
    Command::cargo_bin("obsplan").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Parse a sensitivity table. Every line must be a (frequency, sensitivity)
/// row.
fn table_rows(s: &str) -> Vec<(f64, f64)> {
    s.lines()
        .map(|l| {
            let cols: Vec<f64> = l
                .split_whitespace()
                .map(|c| c.parse().unwrap_or_else(|_| panic!("not a table row: '{l}'")))
                .collect();
            assert_eq!(cols.len(), 2, "not a table row: '{l}'");
            (cols[0], cols[1])
        })
        .collect()
}
