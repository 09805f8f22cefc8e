// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SexagesimalError {
    #[error("Got an empty string where a sexagesimal angle was expected")]
    Empty,

    /// Between one and three colon-separated fields are expected.
    #[error("Expected between 1 and 3 colon-separated fields, but got {count}: '{input}'")]
    WrongFieldCount { input: String, count: usize },

    #[error("Couldn't parse '{field}' in '{input}' as a number")]
    BadField { input: String, field: String },

    #[error("The {which} field of '{input}' must be in the range [0, 60), but got {value}")]
    OutOfRange {
        input: String,
        which: &'static str,
        value: f64,
    },
}
