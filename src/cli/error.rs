// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all obsplan-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::{riseset::RisesetArgsError, sens::SensArgsError};
use crate::{
    array_config::{ArrayConfigError, SubArrayError},
    plotting::PlotError,
    sensitivity::SensitivityError,
    sexagesimal::SexagesimalError,
};

/// The *only* publicly visible error from obsplan. Where it helps, the message
/// carries a hint on how to fix the problem.
#[derive(Error, Debug)]
pub enum ObsplanError {
    /// An error related to the choice of observatory.
    #[error("{0}\n\nRun 'obsplan riseset --list-sites' to see the known sites.")]
    Site(String),

    /// An error related to coordinates given by the user.
    #[error("{0}\n\nRight ascensions are given in hours and declinations in degrees, e.g. '12:34:56.7 -43:21:00'.")]
    Coordinates(String),

    /// An error related to times given by the user.
    #[error("{0}\n\nDates are given like '2024-05-01T12:00:00 UTC'.")]
    Date(String),

    /// An error related to sensitivity models.
    #[error("{0}")]
    Sensitivity(String),

    /// An error related to array configuration files.
    #[error("{0}\n\nArray configuration files have one dish per line, with whitespace-separated columns: index, name, east (m), north (m).")]
    ArrayConfig(String),

    /// An error related to choosing a sub-array.
    #[error("{0}\n\nThe sub-array is the innermost --nelements dishes, cut down to those within --radius km of the array centre if that is smaller.")]
    SubArray(String),

    /// An error related to plotting.
    #[error("{0}")]
    Plot(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files use the same names as the long command-line options, with '_' instead of '-'.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<RisesetArgsError> for ObsplanError {
    fn from(e: RisesetArgsError) -> Self {
        let s = e.to_string();
        match e {
            RisesetArgsError::UnknownSite(_) | RisesetArgsError::NoSite => Self::Site(s),
            RisesetArgsError::NoTarget
            | RisesetArgsError::BadRa { .. }
            | RisesetArgsError::BadDec { .. }
            | RisesetArgsError::RaOutOfRange(_)
            | RisesetArgsError::DecOutOfRange(_) => Self::Coordinates(s),
            RisesetArgsError::BadDate { .. } | RisesetArgsError::Now(_) => Self::Date(s),
            RisesetArgsError::SitePosition(e) => Self::from(e),
        }
    }
}

impl From<SensArgsError> for ObsplanError {
    fn from(e: SensArgsError) -> Self {
        let s = e.to_string();
        match e {
            SensArgsError::BadPercentile { .. }
            | SensArgsError::BadOutput(_)
            | SensArgsError::BadGlgb(_) => Self::Generic(s),
            SensArgsError::Sensitivity(e) => Self::from(e),
            SensArgsError::ArrayConfig(e) => Self::from(e),
            SensArgsError::SubArray(e) => Self::from(e),
            SensArgsError::Plot(e) => Self::from(e),
            SensArgsError::SitePosition(e) => Self::from(e),
            SensArgsError::IO(e) => Self::from(e),
        }
    }
}

// Library code errors.

impl From<SexagesimalError> for ObsplanError {
    fn from(e: SexagesimalError) -> Self {
        Self::Coordinates(e.to_string())
    }
}

impl From<SensitivityError> for ObsplanError {
    fn from(e: SensitivityError) -> Self {
        Self::Sensitivity(e.to_string())
    }
}

impl From<ArrayConfigError> for ObsplanError {
    fn from(e: ArrayConfigError) -> Self {
        let s = e.to_string();
        match e {
            ArrayConfigError::Read { .. } => Self::Generic(s),
            ArrayConfigError::TooFewColumns { .. }
            | ArrayConfigError::BadPosition { .. }
            | ArrayConfigError::NoAntennas { .. } => Self::ArrayConfig(s),
        }
    }
}

impl From<SubArrayError> for ObsplanError {
    fn from(e: SubArrayError) -> Self {
        Self::SubArray(e.to_string())
    }
}

impl From<PlotError> for ObsplanError {
    fn from(e: PlotError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<std::io::Error> for ObsplanError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
