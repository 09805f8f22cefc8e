// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observation-planning tools for radio astronomy: rise/set sidereal times of
//! fixed targets at named observatories, and MeerKAT sensitivity curves.

pub mod array_config;
mod cli;
pub mod constants;
pub mod coord;
pub mod plotting;
pub mod riseset;
pub mod sensitivity;
pub mod sexagesimal;
pub mod sites;

// Re-exports.
pub use array_config::{select_subarray, ArrayLayout, SubArray};
pub use cli::{Obsplan, ObsplanError};
pub use coord::{AzEl, LatLngHeight, RADec};
pub use riseset::{compute_rise_set, Observer, RiseSet};
pub use sensitivity::{DishModel, FrequencyGrid, Percentile, SensitivityModel, SkyConditions};
pub use sites::Site;
