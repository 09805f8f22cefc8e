// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Galactic coordinates.

use std::f64::consts::TAU;

use marlu::RADec;

/// J2000 right ascension of the north Galactic pole \[degrees\]
const NGP_RA_DEG: f64 = 192.85948;
/// J2000 declination of the north Galactic pole \[degrees\]
const NGP_DEC_DEG: f64 = 27.12825;
/// Galactic longitude of the north celestial pole \[degrees\]
const NCP_L_DEG: f64 = 122.93192;

/// Convert Galactic (l, b) \[degrees\] to J2000 equatorial coordinates.
pub fn galactic_to_equatorial(l_deg: f64, b_deg: f64) -> RADec {
    let (s_b, c_b) = b_deg.to_radians().sin_cos();
    let (s_dg, c_dg) = NGP_DEC_DEG.to_radians().sin_cos();
    let (s_dl, c_dl) = (NCP_L_DEG - l_deg).to_radians().sin_cos();

    let s_dec = s_b * s_dg + c_b * c_dg * c_dl;
    let y = c_b * s_dl;
    let x = s_b * c_dg - c_b * s_dg * c_dl;

    RADec::from_radians(
        (NGP_RA_DEG.to_radians() + y.atan2(x)).rem_euclid(TAU),
        s_dec.clamp(-1.0, 1.0).asin(),
    )
}
