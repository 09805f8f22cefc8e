// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Models of a single dish: collecting area, receivers and spillover.

use crate::constants::{MEERKAT_DISH_DIAMETER_M, PI, VEL_C};

/// A receiver covering a band of frequencies. Its noise temperature is
/// modelled as `t_min + scale * |f - f_min_noise|^power`.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: &'static str,
    /// \[GHz\]
    pub freq_min_ghz: f64,
    /// \[GHz\]
    pub freq_max_ghz: f64,
    /// The lowest receiver temperature \[K\]
    pub t_min: f64,
    /// The frequency at which the receiver is quietest \[GHz\]
    pub f_min_noise_ghz: f64,
    pub scale: f64,
    pub power: f64,
}

impl Receiver {
    /// Does this receiver cover the frequency \[GHz\]?
    pub fn covers(&self, freq_ghz: f64) -> bool {
        (self.freq_min_ghz..=self.freq_max_ghz).contains(&freq_ghz)
    }

    /// The receiver temperature \[K\] at a frequency \[GHz\]. The band limits
    /// aren't checked.
    pub fn trcv(&self, freq_ghz: f64) -> f64 {
        self.t_min + self.scale * (freq_ghz - self.f_min_noise_ghz).abs().powf(self.power)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DishModel {
    pub name: &'static str,
    /// \[metres\]
    pub diameter_m: f64,
    /// Aperture efficiency of a perfect surface well above the diffraction
    /// limit.
    pub eta0: f64,
    /// RMS surface error \[millimetres\]
    pub surface_rms_mm: f64,
    /// Below around this frequency the dish is too small (in wavelengths) to
    /// illuminate efficiently \[GHz\].
    pub diffraction_freq_ghz: f64,
    /// Spillover temperature at the zenith \[K\]
    pub spill_zenith_k: f64,
    /// Spillover temperature at a zenith angle of 60 degrees \[K\]
    pub spill_60_k: f64,
    pub receivers: Vec<Receiver>,
}

impl DishModel {
    /// A 13.5 m MeerKAT dish with its UHF-, L- and S-band receivers.
    pub fn meerkat() -> DishModel {
        DishModel {
            name: "MeerKAT",
            diameter_m: MEERKAT_DISH_DIAMETER_M,
            eta0: 0.8,
            surface_rms_mm: 0.48,
            diffraction_freq_ghz: 0.3,
            spill_zenith_k: 4.0,
            spill_60_k: 8.0,
            receivers: vec![
                Receiver {
                    name: "UHF",
                    freq_min_ghz: 0.544,
                    freq_max_ghz: 1.088,
                    t_min: 8.0,
                    f_min_noise_ghz: 0.8,
                    scale: 10.0,
                    power: 1.5,
                },
                Receiver {
                    name: "L",
                    freq_min_ghz: 0.856,
                    freq_max_ghz: 1.712,
                    t_min: 7.5,
                    f_min_noise_ghz: 1.65,
                    scale: 6.8,
                    power: 1.5,
                },
                Receiver {
                    name: "S",
                    freq_min_ghz: 1.75,
                    freq_max_ghz: 3.5,
                    t_min: 15.0,
                    f_min_noise_ghz: 2.6,
                    scale: 4.0,
                    power: 2.0,
                },
            ],
        }
    }

    /// The physical area of the aperture \[m^2\]
    pub fn geometric_area(&self) -> f64 {
        PI * (self.diameter_m / 2.0).powi(2)
    }

    /// The aperture efficiency at a frequency \[GHz\], including the Ruze
    /// surface loss and the low-frequency illumination loss.
    pub fn aperture_efficiency(&self, freq_ghz: f64) -> f64 {
        let wavelength_mm = VEL_C / (freq_ghz * 1e9) * 1e3;
        let ruze = (-(4.0 * PI * self.surface_rms_mm / wavelength_mm).powi(2)).exp();
        let illumination = 1.0 - (-(freq_ghz / self.diffraction_freq_ghz).powi(2)).exp();
        self.eta0 * ruze * illumination
    }

    /// Effective collecting area \[m^2\] at a frequency \[GHz\].
    pub fn aeff(&self, freq_ghz: f64) -> f64 {
        self.aperture_efficiency(freq_ghz) * self.geometric_area()
    }

    /// The quietest receiver that covers this frequency, if any.
    pub fn receiver_at(&self, freq_ghz: f64) -> Option<&Receiver> {
        self.receivers
            .iter()
            .filter(|r| r.covers(freq_ghz))
            .min_by(|a, b| a.trcv(freq_ghz).total_cmp(&b.trcv(freq_ghz)))
    }

    /// The receiver temperature \[K\] at a frequency \[GHz\]. `None` if no
    /// receiver covers it.
    pub fn trcv(&self, freq_ghz: f64) -> Option<f64> {
        self.receiver_at(freq_ghz).map(|r| r.trcv(freq_ghz))
    }

    /// Spillover temperature \[K\] at a zenith angle \[degrees\].
    pub fn tspill(&self, zenith_deg: f64) -> f64 {
        let x = zenith_deg / 60.0;
        self.spill_zenith_k + (self.spill_60_k - self.spill_zenith_k) * x * x
    }
}
