// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rise and set times of fixed celestial targets.
//!
//! A target "rises" when its refracted (apparent) altitude climbs through the
//! observer's horizon. Target coordinates are J2000; rather than precessing
//! the target, the observer's sidereal time and latitude are precessed into
//! the J2000 frame. Because a fixed target's hour angle at rise/set doesn't
//! depend on the date, the rise and set local sidereal times follow directly
//! from the semi-diurnal arc; the UTC instants are then the next times the
//! local sidereal time reaches those values.


use hifitime::{Duration, Epoch, Unit};
use log::trace;
use marlu::{
    precession::{get_lmst, precess_time},
    AzEl, LatLngHeight, RADec,
};

use crate::constants::{SIDEREAL_RATE, TAU};

/// Somewhere on the Earth that targets rise and set for.
#[derive(Debug, Clone)]
pub struct Observer {
    pub name: String,
    pub position: LatLngHeight,
    /// The apparent altitude a target must reach to count as risen
    /// \[degrees\].
    pub horizon_deg: f64,
    /// Atmospheric pressure used for refraction \[millibar\]. Zero disables
    /// refraction.
    pub pressure_mbar: f64,
    /// Air temperature used for refraction \[degrees Celsius\].
    pub temperature_c: f64,
}

impl Observer {
    /// The geometric (unrefracted) altitude of the horizon \[radians\].
    pub fn geometric_horizon(&self) -> f64 {
        (self.horizon_deg - self.horizon_refraction(self.horizon_deg)).to_radians()
    }

    /// Refraction \[degrees\] at an apparent altitude \[degrees\] in this
    /// observer's atmosphere.
    pub fn horizon_refraction(&self, apparent_alt_deg: f64) -> f64 {
        refraction_deg(apparent_alt_deg, self.pressure_mbar, self.temperature_c)
    }

    /// The local mean sidereal time at `epoch` \[radians\]. UT1 is taken to
    /// be UTC.
    pub fn lmst(&self, epoch: Epoch) -> f64 {
        get_lmst(self.position.longitude_rad, epoch, dut1())
    }

    /// The geometric position of a J2000 target on the sky at `epoch`.
    pub fn azel(&self, target: RADec, epoch: Epoch) -> AzEl {
        let info = precess_time(
            self.position.longitude_rad,
            self.position.latitude_rad,
            target,
            epoch,
            dut1(),
        );
        target
            .to_hadec(info.lmst_j2000)
            .to_azel(info.array_latitude_j2000)
    }
}

/// The difference between UT1 and UTC is always less than a second, which
/// is far below what rise/set times need.
fn dut1() -> Duration {
    Duration::from_seconds(0.0)
}

/// Atmospheric refraction \[degrees\] for an apparent altitude \[degrees\],
/// using Bennett's formula scaled to the given pressure and temperature.
pub fn refraction_deg(apparent_alt_deg: f64, pressure_mbar: f64, temperature_c: f64) -> f64 {
    if pressure_mbar <= 0.0 {
        return 0.0;
    }
    // Keep the tangent finite for horizons well below zero.
    let h = apparent_alt_deg.max(-1.0);
    let r_arcmin = 1.0 / (h + 7.31 / (h + 4.4)).to_radians().tan();
    let scale = (pressure_mbar / 1010.0) * (283.0 / (273.0 + temperature_c));
    (r_arcmin * scale / 60.0).max(0.0)
}

/// The rise and set of a target that does both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetTimes {
    /// The local sidereal time of rising \[radians\]
    pub rise_lst: f64,
    /// The local sidereal time of setting \[radians\]
    pub set_lst: f64,
    /// The local sidereal time of transit, i.e. the RA of date \[radians\]
    pub transit_lst: f64,
    /// The next time the target rises.
    pub next_rise: Epoch,
    /// The next time the target sets.
    pub next_set: Epoch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSet {
    Events(RiseSetTimes),

    /// The target never gets above the horizon.
    NeverRises,

    /// The target never gets below the horizon.
    AlwaysUp,
}

/// Compute when a J2000 `target` next rises and sets for `observer`, on or
/// after `epoch`.
pub fn compute_rise_set(observer: &Observer, target: RADec, epoch: Epoch) -> RiseSet {
    let info = precess_time(
        observer.position.longitude_rad,
        observer.position.latitude_rad,
        target,
        epoch,
        dut1(),
    );
    let phi = info.array_latitude_j2000;
    let h0 = observer.geometric_horizon();
    trace!(
        "LMST {}°, J2000 LMST {}°, J2000 latitude {}°, geometric horizon {}°",
        info.lmst.to_degrees(),
        info.lmst_j2000.to_degrees(),
        phi.to_degrees(),
        h0.to_degrees()
    );

    let (s_phi, c_phi) = phi.sin_cos();
    let (s_dec, c_dec) = target.dec.sin_cos();
    let denominator = c_phi * c_dec;
    // At a pole (of the Earth or the sky) the altitude never changes.
    if denominator.abs() < 1e-12 {
        return if s_phi * s_dec > h0.sin() {
            RiseSet::AlwaysUp
        } else {
            RiseSet::NeverRises
        };
    }

    let cos_ha0 = (h0.sin() - s_phi * s_dec) / denominator;
    if cos_ha0 > 1.0 {
        return RiseSet::NeverRises;
    }
    if cos_ha0 < -1.0 {
        return RiseSet::AlwaysUp;
    }
    let ha0 = cos_ha0.acos();
    trace!("Semi-diurnal arc: {}°", ha0.to_degrees());

    // The hour angle is the same in both frames, so the LST of date at
    // transit is the current LST minus the current hour angle.
    let ha_now = info.lmst_j2000 - target.ra;
    let lst_now = info.lmst;
    let transit_lst = (lst_now - ha_now).rem_euclid(TAU);
    let rise_lst = (transit_lst - ha0).rem_euclid(TAU);
    let set_lst = (transit_lst + ha0).rem_euclid(TAU);

    RiseSet::Events(RiseSetTimes {
        rise_lst,
        set_lst,
        transit_lst,
        next_rise: next_lst_occurrence(epoch, lst_now, rise_lst),
        next_set: next_lst_occurrence(epoch, lst_now, set_lst),
    })
}

/// The first time on or after `epoch` (where the LST is `lst_now`) that the
/// local sidereal time equals `target_lst`.
fn next_lst_occurrence(epoch: Epoch, lst_now: f64, target_lst: f64) -> Epoch {
    let sidereal_radians = (target_lst - lst_now).rem_euclid(TAU);
    let solar_days = sidereal_radians / TAU / SIDEREAL_RATE;
    epoch + Unit::Day * solar_days
}
