// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with sensitivity models.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SensitivityError {
    #[error("Zenith angle {0}° is not in the range [0, 90)")]
    ZenithOutOfRange(f64),

    #[error("Frequency range {fmin} to {fmax} GHz is invalid; both must be positive and the minimum less than the maximum")]
    BadFrequencyRange { fmin: f64, fmax: f64 },

    #[error("At least 2 frequencies are needed for a sensitivity curve, but {0} were requested")]
    TooFewFrequencies(usize),
}
