// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with array configurations and sub-arrays.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArrayConfigError {
    #[error("{source_name} line {line}: expected 4 columns (index, name, east, north), but found {found}")]
    TooFewColumns {
        source_name: String,
        line: usize,
        found: usize,
    },

    #[error("{source_name} line {line}: couldn't parse '{value}' as a position in metres")]
    BadPosition {
        source_name: String,
        line: usize,
        value: String,
    },

    #[error("{source_name} contains no antennas")]
    NoAntennas { source_name: String },

    #[error("Couldn't read array configuration {}: {err}", file.display())]
    Read {
        file: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum SubArrayError {
    #[error("The number of elements must be at least 1")]
    ZeroElements,

    #[error("Asked for the inner {requested} elements, but the array only has {available}")]
    TooManyElements { requested: usize, available: usize },

    #[error("The sub-array radius must be positive, but got {0} km")]
    BadRadius(f64),

    #[error("No dishes are within {0} km of the array centre")]
    NoDishesWithinRadius(f64),

    #[error("Only {selected} dishes were selected, but the beamformer adds dishes in groups of {group}")]
    TooFewForBeamformer { selected: usize, group: usize },
}
