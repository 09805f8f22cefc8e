// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Sensitivity of dishes and arrays of dishes as a function of frequency.

The figure of merit is the gain, expressed either as Aeff/Tsys \[m^2/K\]
(depends on where the telescope is looking) or as Aeff/2kB \[K/Jy\]. The
system temperature is the sum of the receiver, spillover, Galactic, CMB and
atmospheric temperatures. Frequencies are always in GHz.
 */

mod dish;
mod error;
mod sky;
#[cfg(test)]
mod tests;

pub use dish::{DishModel, Receiver};
pub use error::SensitivityError;
pub use sky::{airmass, tatm, tcmb, tgal, zenith_opacity, Percentile, SkyConditions};

use std::io::Write;

use crate::constants::{DEFAULT_FREQ_MAX_GHZ, DEFAULT_FREQ_MIN_GHZ, DEFAULT_NUM_FREQS, KB_JY};

/// Logarithmically-spaced frequencies \[GHz\].
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    freqs_ghz: Vec<f64>,
}

impl FrequencyGrid {
    /// `num` frequencies from `fmin` to `fmax` (inclusive), evenly spaced in
    /// log space.
    pub fn log_spaced(fmin: f64, fmax: f64, num: usize) -> Result<FrequencyGrid, SensitivityError> {
        if !(fmin.is_finite() && fmax.is_finite() && fmin > 0.0 && fmin < fmax) {
            return Err(SensitivityError::BadFrequencyRange { fmin, fmax });
        }
        if num < 2 {
            return Err(SensitivityError::TooFewFrequencies(num));
        }
        Ok(Self::log_spaced_inner(fmin, fmax, num))
    }

    fn log_spaced_inner(fmin: f64, fmax: f64, num: usize) -> FrequencyGrid {
        let (log_min, log_max) = (fmin.log10(), fmax.log10());
        let step = (log_max - log_min) / (num - 1) as f64;
        let mut freqs_ghz: Vec<f64> = (0..num)
            .map(|i| 10_f64.powf(log_min + step * i as f64))
            .collect();
        // Don't let floating-point error move the end points.
        freqs_ghz[0] = fmin;
        freqs_ghz[num - 1] = fmax;
        FrequencyGrid { freqs_ghz }
    }

    pub fn freqs(&self) -> &[f64] {
        &self.freqs_ghz
    }

    pub fn len(&self) -> usize {
        self.freqs_ghz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs_ghz.is_empty()
    }
}

impl Default for FrequencyGrid {
    /// 200 frequencies between 0.35 and 50 GHz.
    fn default() -> Self {
        Self::log_spaced_inner(DEFAULT_FREQ_MIN_GHZ, DEFAULT_FREQ_MAX_GHZ, DEFAULT_NUM_FREQS)
    }
}

/// The temperatures that make up Tsys \[K\].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsysComponents {
    pub trcv: f64,
    pub tspill: f64,
    pub tgal: f64,
    pub tcmb: f64,
    pub tatm: f64,
}

impl TsysComponents {
    pub fn tsky(&self) -> f64 {
        self.tgal + self.tcmb + self.tatm
    }

    pub fn total(&self) -> f64 {
        self.trcv + self.tspill + self.tsky()
    }
}

/// The sensitivity at a single frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityPoint {
    /// \[GHz\]
    pub freq_ghz: f64,
    /// Effective area of one dish \[m^2\]
    pub aeff: f64,
    /// `None` when no receiver covers the frequency.
    pub tsys: Option<TsysComponents>,
    /// Single-dish gain \[m^2/K\]
    pub aeff_over_tsys: Option<f64>,
    /// Single-dish gain \[K/Jy\]
    pub aeff_over_2kb: f64,
    /// The number of dishes in the array.
    pub num_dishes: usize,
    /// Array gain \[m^2/K\]
    pub array_aeff_over_tsys: Option<f64>,
    /// Array gain \[K/Jy\]
    pub array_aeff_over_2kb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityModel {
    pub dish: DishModel,
    pub sky: SkyConditions,
}

impl SensitivityModel {
    pub fn new(dish: DishModel, sky: SkyConditions) -> SensitivityModel {
        SensitivityModel { dish, sky }
    }

    /// The parts of the system temperature at a frequency \[GHz\]. `None` if
    /// the dish has no receiver there.
    pub fn tsys_components(&self, freq_ghz: f64) -> Option<TsysComponents> {
        let trcv = self.dish.trcv(freq_ghz)?;
        Some(TsysComponents {
            trcv,
            tspill: self.dish.tspill(self.sky.zenith_deg),
            tgal: tgal(freq_ghz, self.sky.gal),
            tcmb: tcmb(freq_ghz),
            tatm: tatm(freq_ghz, self.sky.pwv.pwv_mm(), self.sky.zenith_deg),
        })
    }

    pub fn tsys(&self, freq_ghz: f64) -> Option<f64> {
        self.tsys_components(freq_ghz).map(|c| c.total())
    }

    /// The sensitivity of `num_dishes` dishes at one frequency \[GHz\].
    pub fn point(&self, freq_ghz: f64, num_dishes: usize) -> SensitivityPoint {
        let aeff = self.dish.aeff(freq_ghz);
        let tsys = self.tsys_components(freq_ghz);
        let aeff_over_tsys = tsys.map(|t| aeff / t.total());
        let aeff_over_2kb = aeff / (2.0 * KB_JY);
        let n = num_dishes as f64;
        SensitivityPoint {
            freq_ghz,
            aeff,
            tsys,
            aeff_over_tsys,
            aeff_over_2kb,
            num_dishes,
            array_aeff_over_tsys: aeff_over_tsys.map(|g| n * g),
            array_aeff_over_2kb: n * aeff_over_2kb,
        }
    }

    /// The sensitivity of `num_dishes` dishes over a grid of frequencies.
    pub fn curves(&self, grid: &FrequencyGrid, num_dishes: usize) -> Vec<SensitivityPoint> {
        grid.freqs()
            .iter()
            .map(|&f| self.point(f, num_dishes))
            .collect()
    }
}

/// Write a two-column table of frequency \[GHz\] and array Aeff/Tsys
/// \[m^2/K\]. Frequencies without a receiver are left out.
pub fn write_table<W: Write>(points: &[SensitivityPoint], mut w: W) -> std::io::Result<()> {
    for p in points {
        if let Some(gain) = p.array_aeff_over_tsys {
            writeln!(w, "{:.6} {:.6}", p.freq_ghz, gain)?;
        }
    }
    w.flush()
}
