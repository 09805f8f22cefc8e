// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contributions of the sky to the system temperature.

use strum_macros::{Display, EnumIter, EnumString};

use super::SensitivityError;
use crate::constants::{H_OVER_K, T_CMB};

/// Physical temperature of the atmosphere \[K\]
const T_ATM_PHYS: f64 = 275.0;

/// Spectral index of Galactic synchrotron emission.
const GAL_SPECTRAL_INDEX: f64 = -2.75;

/// Which percentile of a distribution to use: the 10th, 50th or 90th.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Percentile {
    Low,
    Medium,
    High,
}

impl Percentile {
    pub fn percentile(self) -> u8 {
        match self {
            Percentile::Low => 10,
            Percentile::Medium => 50,
            Percentile::High => 90,
        }
    }

    /// The Galactic brightness temperature at 408 MHz along a line of sight
    /// at this percentile of the whole sky \[K\].
    pub fn t408(self) -> f64 {
        match self {
            Percentile::Low => 17.1,
            Percentile::Medium => 25.2,
            Percentile::High => 54.8,
        }
    }

    /// Precipitable water vapour at this percentile of site conditions
    /// \[mm\].
    pub fn pwv_mm(self) -> f64 {
        match self {
            Percentile::Low => 5.0,
            Percentile::Medium => 10.0,
            Percentile::High => 20.0,
        }
    }
}

/// Galactic synchrotron temperature \[K\] at a frequency \[GHz\].
pub fn tgal(freq_ghz: f64, gal: Percentile) -> f64 {
    gal.t408() * (freq_ghz / 0.408).powf(GAL_SPECTRAL_INDEX)
}

/// Brightness temperature of the CMB \[K\] at a frequency \[GHz\].
pub fn tcmb(freq_ghz: f64) -> f64 {
    let hf_over_k = H_OVER_K * freq_ghz * 1e9;
    hf_over_k / ((hf_over_k / T_CMB).exp() - 1.0)
}

/// Zenith opacity at a frequency \[GHz\] for an amount of precipitable water
/// vapour \[mm\]. The dry term is the low-frequency wing of the 60 GHz oxygen
/// complex; the wet term is the 22.235 GHz water line plus continuum.
pub fn zenith_opacity(freq_ghz: f64, pwv_mm: f64) -> f64 {
    let f2 = freq_ghz * freq_ghz;
    let dry = 0.0071 + 2.0e-4 * f2 / ((60.0 - freq_ghz).powi(2) / 100.0 + 1.0);
    let gamma2 = 3.0 * 3.0;
    let wet = 1.7e-6 * f2 + 0.0121 * gamma2 / ((freq_ghz - 22.235).powi(2) + gamma2);
    dry + pwv_mm * wet
}

/// Plane-parallel airmass at a zenith angle \[degrees\].
pub fn airmass(zenith_deg: f64) -> f64 {
    1.0 / zenith_deg.to_radians().cos()
}

/// Atmospheric emission \[K\] at a frequency \[GHz\].
pub fn tatm(freq_ghz: f64, pwv_mm: f64, zenith_deg: f64) -> f64 {
    let tau = zenith_opacity(freq_ghz, pwv_mm) * airmass(zenith_deg);
    T_ATM_PHYS * (1.0 - (-tau).exp())
}

/// The sky that the dish is looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyConditions {
    /// How bright the Galaxy is along the line of sight.
    pub gal: Percentile,
    /// How wet the atmosphere is.
    pub pwv: Percentile,
    /// \[degrees\]
    pub zenith_deg: f64,
}

impl SkyConditions {
    pub fn new(
        gal: Percentile,
        pwv: Percentile,
        zenith_deg: f64,
    ) -> Result<SkyConditions, SensitivityError> {
        if !(0.0..90.0).contains(&zenith_deg) {
            return Err(SensitivityError::ZenithOutOfRange(zenith_deg));
        }
        Ok(SkyConditions {
            gal,
            pwv,
            zenith_deg,
        })
    }
}
