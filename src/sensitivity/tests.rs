// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use approx::assert_abs_diff_eq;
use strum::IntoEnumIterator;

use super::*;

fn default_model() -> SensitivityModel {
    SensitivityModel::new(
        DishModel::meerkat(),
        SkyConditions::new(Percentile::Low, Percentile::Low, 0.0).unwrap(),
    )
}

#[test]
fn test_percentile_parsing() {
    assert_eq!(Percentile::from_str("low"), Ok(Percentile::Low));
    assert_eq!(Percentile::from_str("medium"), Ok(Percentile::Medium));
    assert_eq!(Percentile::from_str("HIGH"), Ok(Percentile::High));
    assert!(Percentile::from_str("extreme").is_err());
    assert_eq!(Percentile::Medium.to_string(), "medium");
    assert_eq!(
        Percentile::iter().map(|p| p.percentile()).collect::<Vec<_>>(),
        vec![10, 50, 90]
    );
}

#[test]
fn test_percentile_values() {
    assert_abs_diff_eq!(Percentile::Low.t408(), 17.1);
    assert_abs_diff_eq!(Percentile::High.t408(), 54.8);
    assert_abs_diff_eq!(Percentile::Low.pwv_mm(), 5.0);
    assert_abs_diff_eq!(Percentile::High.pwv_mm(), 20.0);
}

#[test]
fn test_aeff() {
    let dish = DishModel::meerkat();
    assert_abs_diff_eq!(dish.geometric_area(), 143.138, epsilon = 1e-3);
    // L band: close to the full efficiency.
    let aeff = dish.aeff(1.4);
    assert!(aeff > 0.75 * dish.geometric_area(), "{aeff}");
    assert!(aeff < 0.8 * dish.geometric_area(), "{aeff}");
    // The surface hurts at high frequencies and illumination at low ones.
    assert!(dish.aeff(50.0) < 0.5 * aeff);
    assert!(dish.aeff(0.35) < dish.aeff(0.6));
}

#[test]
fn test_receiver_bands() {
    let dish = DishModel::meerkat();
    assert_eq!(dish.receiver_at(0.6).map(|r| r.name), Some("UHF"));
    assert_eq!(dish.receiver_at(1.4).map(|r| r.name), Some("L"));
    assert_eq!(dish.receiver_at(3.0).map(|r| r.name), Some("S"));
    // Gaps.
    for f in [0.35, 0.5, 1.73, 3.6, 10.0] {
        assert!(dish.receiver_at(f).is_none(), "{f}");
        assert!(dish.trcv(f).is_none(), "{f}");
    }
}

#[test]
fn test_overlapping_receivers_use_the_quietest() {
    let dish = DishModel::meerkat();
    for f in [0.86, 0.9, 1.0, 1.08] {
        let uhf = dish.receivers[0].trcv(f);
        let l = dish.receivers[1].trcv(f);
        assert!(dish.receivers[0].covers(f) && dish.receivers[1].covers(f));
        assert_abs_diff_eq!(dish.trcv(f).unwrap(), uhf.min(l));
    }
}

#[test]
fn test_spillover() {
    let dish = DishModel::meerkat();
    assert_abs_diff_eq!(dish.tspill(0.0), 4.0);
    assert_abs_diff_eq!(dish.tspill(60.0), 8.0);
    assert!(dish.tspill(30.0) > 4.0 && dish.tspill(30.0) < 8.0);
}

#[test]
fn test_sky_temperatures() {
    assert_abs_diff_eq!(tgal(0.408, Percentile::Low), 17.1, epsilon = 1e-12);
    assert_abs_diff_eq!(
        tgal(0.816, Percentile::Medium),
        25.2 * 2_f64.powf(-2.75),
        epsilon = 1e-12
    );
    // Close to 2.73 K at low frequencies, falling off in the Wien tail.
    assert_abs_diff_eq!(tcmb(1.0), 2.706, epsilon = 1e-3);
    assert!(tcmb(50.0) < tcmb(1.0));
    // The 22 GHz water line.
    assert!(zenith_opacity(22.235, 5.0) > zenith_opacity(15.0, 5.0));
    assert!(zenith_opacity(22.235, 20.0) > zenith_opacity(22.235, 5.0));
    // A few kelvin at L band.
    let t = tatm(1.4, 5.0, 0.0);
    assert!(t > 1.5 && t < 3.0, "{t}");
    assert!(tatm(1.4, 5.0, 60.0) > t);
    assert_abs_diff_eq!(airmass(60.0), 2.0, epsilon = 1e-12);
}

#[test]
fn test_zenith_range() {
    assert!(SkyConditions::new(Percentile::Low, Percentile::Low, 0.0).is_ok());
    assert!(SkyConditions::new(Percentile::Low, Percentile::Low, 89.9).is_ok());
    assert_eq!(
        SkyConditions::new(Percentile::Low, Percentile::Low, 90.0),
        Err(SensitivityError::ZenithOutOfRange(90.0))
    );
    assert!(SkyConditions::new(Percentile::Low, Percentile::Low, -1.0).is_err());
    assert!(SkyConditions::new(Percentile::Low, Percentile::Low, f64::NAN).is_err());
}

#[test]
fn test_tsys_at_l_band() {
    let model = default_model();
    let c = model.tsys_components(1.4).unwrap();
    assert_abs_diff_eq!(c.trcv, 7.5 + 6.8 * 0.25_f64.powf(1.5), epsilon = 1e-12);
    assert_abs_diff_eq!(c.tspill, 4.0);
    assert_abs_diff_eq!(c.total(), c.trcv + c.tspill + c.tsky());
    let tsys = model.tsys(1.4).unwrap();
    assert!(tsys > 15.0 && tsys < 22.0, "{tsys}");

    assert!(model.tsys(5.0).is_none());
}

#[test]
fn test_worse_conditions_raise_tsys() {
    let low = default_model();
    let high = SensitivityModel::new(
        DishModel::meerkat(),
        SkyConditions::new(Percentile::High, Percentile::High, 45.0).unwrap(),
    );
    for f in [0.6, 1.0, 1.4, 2.5] {
        assert!(high.tsys(f).unwrap() > low.tsys(f).unwrap(), "{f}");
    }
}

#[test]
fn test_frequency_grid() {
    let grid = FrequencyGrid::default();
    assert_eq!(grid.len(), 200);
    assert_eq!(grid.freqs()[0], 0.35);
    assert_eq!(grid.freqs()[199], 50.0);
    assert!(grid.freqs().windows(2).all(|w| w[0] < w[1]));
    // Constant ratio between neighbours.
    let ratio = grid.freqs()[1] / grid.freqs()[0];
    assert_abs_diff_eq!(grid.freqs()[100] / grid.freqs()[99], ratio, epsilon = 1e-12);

    let grid = FrequencyGrid::log_spaced(1.0, 100.0, 3).unwrap();
    assert_abs_diff_eq!(grid.freqs()[1], 10.0, epsilon = 1e-12);
}

#[test]
fn test_bad_frequency_grids() {
    assert_eq!(
        FrequencyGrid::log_spaced(2.0, 1.0, 10),
        Err(SensitivityError::BadFrequencyRange {
            fmin: 2.0,
            fmax: 1.0
        })
    );
    assert!(FrequencyGrid::log_spaced(0.0, 1.0, 10).is_err());
    assert!(FrequencyGrid::log_spaced(1.0, f64::INFINITY, 10).is_err());
    assert_eq!(
        FrequencyGrid::log_spaced(1.0, 2.0, 1),
        Err(SensitivityError::TooFewFrequencies(1))
    );
}

#[test]
fn test_curves_scale_with_dishes() {
    let model = default_model();
    let grid = FrequencyGrid::default();
    let curves = model.curves(&grid, 64);
    assert_eq!(curves.len(), grid.len());

    for p in &curves {
        assert_eq!(p.num_dishes, 64);
        assert_abs_diff_eq!(p.array_aeff_over_2kb, 64.0 * p.aeff_over_2kb);
        assert_abs_diff_eq!(p.aeff_over_2kb, p.aeff / 2760.0);
        match (p.aeff_over_tsys, p.array_aeff_over_tsys, p.tsys) {
            (Some(g), Some(array_g), Some(t)) => {
                assert_abs_diff_eq!(g, p.aeff / t.total());
                assert_abs_diff_eq!(array_g, 64.0 * g, epsilon = 1e-9);
            }
            (None, None, None) => assert!(model.dish.receiver_at(p.freq_ghz).is_none()),
            other => panic!("Inconsistent point at {} GHz: {other:?}", p.freq_ghz),
        }
    }
    // Some frequencies are covered, and some aren't.
    assert!(curves.iter().any(|p| p.aeff_over_tsys.is_some()));
    assert!(curves.iter().any(|p| p.aeff_over_tsys.is_none()));
}

#[test]
fn test_write_table() {
    let model = default_model();
    let grid = FrequencyGrid::log_spaced(0.5, 2.0, 5).unwrap();
    let curves = model.curves(&grid, 60);
    let mut out = vec![];
    write_table(&curves, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    // 0.5 GHz has no receiver.
    let covered = curves
        .iter()
        .filter(|p| p.array_aeff_over_tsys.is_some())
        .count();
    assert_eq!(lines.len(), covered);
    assert!(covered < curves.len());

    let fields: Vec<f64> = lines[0]
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(fields.len(), 2);
    assert!(fields[0] > 0.5);
    assert!(fields[1] > 0.0);
}
