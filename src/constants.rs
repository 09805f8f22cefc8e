// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.
//!
//! All constants *must* be double precision.

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Ratio of the length of a solar day to a sidereal day.
pub const SIDEREAL_RATE: f64 = 1.002_737_909_350_795;

/// Planck's constant divided by Boltzmann's constant \[s K\]
pub const H_OVER_K: f64 = 4.8e-11;

/// Boltzmann's constant in radio-astronomy units \[Jy m^2 K^-1\]
pub const KB_JY: f64 = 1380.0;

/// Speed of light \[metres/second\]
pub const VEL_C: f64 = 299_792_458.0;

/// Temperature of the cosmic microwave background \[K\]
pub const T_CMB: f64 = 2.73;

/// The default atmospheric pressure used for refraction \[millibar\]
pub const DEFAULT_PRESSURE_MBAR: f64 = 1010.0;

/// The default air temperature used for refraction \[degrees Celsius\]
pub const DEFAULT_TEMPERATURE_C: f64 = 15.0;

// MeerKAT things.

/// The number of dishes in the full MeerKAT array.
pub const MEERKAT_NUM_DISHES: usize = 64;

/// The distance from the array centre that encloses the entire MeerKAT array
/// \[km\]
pub const MEERKAT_FULL_RADIUS_KM: f64 = 4.2;

/// The beamformer adds dishes in groups of this size.
pub const BEAMFORMER_GROUP_SIZE: usize = 4;

/// MeerKAT dish diameter \[metres\]
pub const MEERKAT_DISH_DIAMETER_M: f64 = 13.5;

// Frequency grid defaults.

/// The lowest frequency on the default sensitivity grid \[GHz\]
pub const DEFAULT_FREQ_MIN_GHZ: f64 = 0.35;

/// The highest frequency on the default sensitivity grid \[GHz\]
pub const DEFAULT_FREQ_MAX_GHZ: f64 = 50.0;

/// The number of log-spaced frequencies on the default sensitivity grid.
pub const DEFAULT_NUM_FREQS: usize = 200;
