// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Array configurations (where the dishes are) and the selection of sub-arrays.

An array configuration file has one dish per line with whitespace-separated
columns: an index, the dish name, and its east and north offsets from the
array centre in metres. Any further columns are ignored, as are blank lines
and lines starting with `#`.
 */

mod error;

pub use error::{ArrayConfigError, SubArrayError};

use std::path::Path;

use log::{debug, trace};

use crate::constants::{BEAMFORMER_GROUP_SIZE, MEERKAT_FULL_RADIUS_KM};

const MEERKAT_LAYOUT: &str = include_str!("../../configuration/MK_dist_metres.txt");

#[derive(Debug, Clone, PartialEq)]
pub struct Antenna {
    pub name: String,
    /// \[metres\]
    pub east_m: f64,
    /// \[metres\]
    pub north_m: f64,
}

impl Antenna {
    /// Distance from the array centre \[km\].
    pub fn distance_km(&self) -> f64 {
        0.001 * self.east_m.hypot(self.north_m)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLayout {
    pub antennas: Vec<Antenna>,
}

impl ArrayLayout {
    /// The 64-dish MeerKAT array.
    pub fn meerkat() -> Result<ArrayLayout, ArrayConfigError> {
        Self::parse(MEERKAT_LAYOUT, "built-in MeerKAT layout")
    }

    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<ArrayLayout, ArrayConfigError> {
        let file = file.as_ref();
        let contents = std::fs::read_to_string(file).map_err(|err| ArrayConfigError::Read {
            file: file.to_path_buf(),
            err,
        })?;
        Self::parse(&contents, &file.display().to_string())
    }

    /// Parse the contents of an array configuration. `source_name` is only
    /// used in error messages.
    pub fn parse(contents: &str, source_name: &str) -> Result<ArrayLayout, ArrayConfigError> {
        let mut antennas = vec![];
        for (i_line, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 4 {
                return Err(ArrayConfigError::TooFewColumns {
                    source_name: source_name.to_string(),
                    line: i_line + 1,
                    found: columns.len(),
                });
            }
            let position = |value: &str| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ArrayConfigError::BadPosition {
                        source_name: source_name.to_string(),
                        line: i_line + 1,
                        value: value.to_string(),
                    })
            };
            antennas.push(Antenna {
                name: columns[1].to_string(),
                east_m: position(columns[2])?,
                north_m: position(columns[3])?,
            });
        }

        if antennas.is_empty() {
            return Err(ArrayConfigError::NoAntennas {
                source_name: source_name.to_string(),
            });
        }
        trace!("Read {} antennas from {source_name}", antennas.len());
        Ok(ArrayLayout { antennas })
    }

    pub fn len(&self) -> usize {
        self.antennas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }

    /// Do these arguments ask for less than the whole array?
    pub fn wants_subarray(&self, radius_km: f64, nelements: usize) -> bool {
        radius_km < MEERKAT_FULL_RADIUS_KM || nelements < self.len()
    }
}

/// The dishes chosen for a sub-array, innermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct SubArray {
    pub antennas: Vec<Antenna>,
    /// How many dishes satisfied the radius and element constraints before
    /// rounding for the beamformer.
    pub num_candidates: usize,
    /// The distance of the outermost candidate dish from the array centre,
    /// before rounding for the beamformer \[km\].
    pub candidate_radius_km: f64,
    /// The distance of the outermost used dish from the array centre \[km\].
    pub outer_radius_km: f64,
}

impl SubArray {
    pub fn len(&self) -> usize {
        self.antennas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }

    /// Were dishes dropped so that the beamformer could use them?
    pub fn was_rounded(&self) -> bool {
        self.num_candidates != self.antennas.len()
    }
}

/// Choose the dishes of a sub-array. The innermost `nelements` dishes are
/// used, unless `radius_km` is smaller than the whole array and cuts that
/// selection short, in which case every dish inside `radius_km` is used. The
/// count is then rounded down to a multiple of the beamformer group size.
pub fn select_subarray(
    layout: &ArrayLayout,
    radius_km: f64,
    nelements: usize,
) -> Result<SubArray, SubArrayError> {
    if nelements == 0 {
        return Err(SubArrayError::ZeroElements);
    }
    if nelements > layout.len() {
        return Err(SubArrayError::TooManyElements {
            requested: nelements,
            available: layout.len(),
        });
    }
    if radius_km.is_nan() || radius_km <= 0.0 {
        return Err(SubArrayError::BadRadius(radius_km));
    }

    let mut sorted: Vec<(f64, &Antenna)> = layout
        .antennas
        .iter()
        .map(|a| (a.distance_km(), a))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut selected = &sorted[..nelements];
    if radius_km < MEERKAT_FULL_RADIUS_KM && radius_km < selected[nelements - 1].0 {
        let num_within = sorted.iter().take_while(|(d, _)| *d < radius_km).count();
        selected = &sorted[..num_within];
    }
    if selected.is_empty() {
        return Err(SubArrayError::NoDishesWithinRadius(radius_km));
    }
    let num_candidates = selected.len();
    let candidate_radius_km = selected[num_candidates - 1].0;
    debug!("{num_candidates} dishes are within {candidate_radius_km:.1} km");

    let num_used = (num_candidates / BEAMFORMER_GROUP_SIZE) * BEAMFORMER_GROUP_SIZE;
    if num_used == 0 {
        return Err(SubArrayError::TooFewForBeamformer {
            selected: num_candidates,
            group: BEAMFORMER_GROUP_SIZE,
        });
    }
    let used = &selected[..num_used];

    Ok(SubArray {
        antennas: used.iter().map(|(_, a)| (*a).clone()).collect(),
        num_candidates,
        candidate_radius_km,
        outer_radius_km: used[num_used - 1].0,
    })
}
