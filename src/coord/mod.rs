// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinate types. Equatorial, horizontal and geodetic coordinates come
//! from `marlu`; Galactic coordinates are handled here.

pub mod galactic;

// Re-exports.
pub use galactic::galactic_to_equatorial;
pub use marlu::{AzEl, LatLngHeight, RADec};

/// The smallest zenith angle a source at declination `dec` reaches (i.e. at
/// upper culmination) for an observer at `latitude` \[radians\].
pub fn min_zenith_angle(dec: f64, latitude: f64) -> f64 {
    (dec - latitude).abs()
}
