// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to plot sensitivity curves.

mod error;

pub use error::PlotError;

use std::path::{Path, PathBuf};

use crate::sensitivity::SensitivityPoint;

/// The curves of a sub-array, if one was selected.
#[derive(Debug, Clone, Copy)]
pub struct SubArrayCurves<'a> {
    /// The radius that was asked for \[km\].
    pub radius_km: f64,
    pub num_dishes: usize,
    pub points: &'a [SensitivityPoint],
}

/// Write all of the sensitivity plots as PNGs into `dir`, returning the paths
/// of the files written. `full_array` holds the single-dish and whole-array
/// numbers.
#[cfg(not(feature = "plotting"))]
pub fn plot_sensitivity(
    _dir: &Path,
    _full_array: &[SensitivityPoint],
    _subarray: Option<SubArrayCurves>,
) -> Result<Vec<PathBuf>, PlotError> {
    // Plotting is optional, because the font-rendering dependencies are
    // sometimes not available.
    Err(PlotError::NoPlottingFeature)
}

/// Write all of the sensitivity plots as PNGs into `dir`, returning the paths
/// of the files written. `full_array` holds the single-dish and whole-array
/// numbers.
#[cfg(feature = "plotting")]
pub fn plot_sensitivity(
    dir: &Path,
    full_array: &[SensitivityPoint],
    subarray: Option<SubArrayCurves>,
) -> Result<Vec<PathBuf>, PlotError> {
    plotting::plot_sensitivity(dir, full_array, subarray)
}

#[cfg(feature = "plotting")]
mod plotting {
    use std::ops::Range;

    use log::{debug, warn};
    use plotters::{coord::ranged1d::ValueFormatter, prelude::*};

    use super::*;

    /// The number of X pixels on the plots.
    const X_PIXELS: u32 = 1600;
    /// The number of Y pixels on the plots.
    const Y_PIXELS: u32 = 1000;

    lazy_static::lazy_static! {
        static ref COLOURS: [RGBColor; 6] = [
            BLUE,
            RED,
            RGBColor(0, 150, 0),
            MAGENTA,
            RGBColor(230, 140, 0),
            CYAN,
        ];
    }

    /// A labelled curve. Frequencies without a value are drawn as gaps.
    pub(super) struct Curve {
        pub(super) label: String,
        pub(super) points: Vec<(f64, Option<f64>)>,
    }

    impl Curve {
        fn new<F>(label: &str, points: &[SensitivityPoint], f: F) -> Curve
        where
            F: Fn(&SensitivityPoint) -> Option<f64>,
        {
            Curve {
                label: label.to_string(),
                points: points.iter().map(|p| (p.freq_ghz, f(p))).collect(),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(super) enum YScale {
        Linear,
        Log,
    }

    pub(super) fn plot_sensitivity(
        dir: &Path,
        full_array: &[SensitivityPoint],
        subarray: Option<SubArrayCurves>,
    ) -> Result<Vec<PathBuf>, PlotError> {
        std::fs::create_dir_all(dir).map_err(|err| PlotError::CreateDir {
            dir: dir.to_path_buf(),
            err,
        })?;
        let num_dishes = full_array.first().map(|p| p.num_dishes).unwrap_or(0);

        let mut plots = vec![
            (
                "aeff.png",
                "Effective area - single dish".to_string(),
                "Aeff (m^2)",
                YScale::Linear,
                vec![Curve::new("Aeff", full_array, |p| Some(p.aeff))],
            ),
            (
                "tsys.png",
                "System temperature".to_string(),
                "Temperature (K)",
                YScale::Log,
                vec![
                    Curve::new("Tsys", full_array, |p| p.tsys.map(|t| t.total())),
                    Curve::new("Trcv", full_array, |p| p.tsys.map(|t| t.trcv)),
                    Curve::new("Tspill", full_array, |p| p.tsys.map(|t| t.tspill)),
                    Curve::new("Tgal", full_array, |p| p.tsys.map(|t| t.tgal)),
                    Curve::new("Tcmb", full_array, |p| p.tsys.map(|t| t.tcmb)),
                    Curve::new("Tatm", full_array, |p| p.tsys.map(|t| t.tatm)),
                ],
            ),
            (
                "gain_single_dish_tsys.png",
                "Gain - single dish".to_string(),
                "Aeff/Tsys (m^2/K)",
                YScale::Linear,
                vec![Curve::new("Aeff/Tsys", full_array, |p| p.aeff_over_tsys)],
            ),
            (
                "gain_single_dish_kb.png",
                "Gain - single dish".to_string(),
                "Aeff/(2*kB) (K/Jy)",
                YScale::Linear,
                vec![Curve::new("Aeff/(2*kB)", full_array, |p| {
                    Some(p.aeff_over_2kb)
                })],
            ),
            (
                "gain_array.png",
                format!("Gain - entire array ({num_dishes} dishes)"),
                "Aeff/Tsys (m^2/K)",
                YScale::Log,
                vec![Curve::new("N*Aeff/Tsys", full_array, |p| {
                    p.array_aeff_over_tsys
                })],
            ),
        ];
        if let Some(sub) = subarray {
            plots.push((
                "gain_subarray_tsys.png",
                format!(
                    "Gain - subarray radius {:.1} km - {} dishes",
                    sub.radius_km, sub.num_dishes
                ),
                "Aeff/Tsys (m^2/K)",
                YScale::Log,
                vec![Curve::new("N*Aeff/Tsys", sub.points, |p| {
                    p.array_aeff_over_tsys
                })],
            ));
            plots.push((
                "gain_subarray_kb.png",
                format!(
                    "Gain - subarray radius {:.1} km - {} dishes",
                    sub.radius_km, sub.num_dishes
                ),
                "Aeff/(2*kB) (K/Jy)",
                YScale::Log,
                vec![Curve::new("N*Aeff/(2*kB)", sub.points, |p| {
                    Some(p.array_aeff_over_2kb)
                })],
            ));
        }

        let mut written = Vec::with_capacity(plots.len());
        for (filename, title, y_desc, y_scale, curves) in plots {
            let file = dir.join(filename);
            // Frequencies without a receiver have no Tsys, so a range outside
            // every band leaves some plots empty.
            if value_range(&curves, y_scale).is_none() {
                warn!(
                    "No frequency has a receiver, so '{title}' would be empty; not writing {}",
                    file.display()
                );
                continue;
            }
            debug!("Plotting '{title}' to {}", file.display());
            plot_curves(&file, &title, y_desc, y_scale, &curves)?;
            written.push(file);
        }
        Ok(written)
    }

    /// Plot curves against frequency (on a log axis) into a PNG.
    pub(super) fn plot_curves(
        file: &Path,
        title: &str,
        y_desc: &str,
        y_scale: YScale,
        curves: &[Curve],
    ) -> Result<(), PlotError> {
        let (x_range, y_range) = match (freq_range(curves), value_range(curves, y_scale)) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err(PlotError::NoData(file.to_path_buf())),
        };
        let draw_err = |e: &dyn std::fmt::Display| PlotError::Draw {
            file: file.to_path_buf(),
            msg: e.to_string(),
        };

        let root_area = BitMapBackend::new(file, (X_PIXELS, Y_PIXELS)).into_drawing_area();
        root_area.fill(&WHITE).map_err(|e| draw_err(&e))?;
        let mut builder = ChartBuilder::on(&root_area);
        builder
            .caption(title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90);

        let x_spec = x_range.log_scale();
        match y_scale {
            YScale::Linear => {
                let chart = builder
                    .build_cartesian_2d(x_spec, y_range)
                    .map_err(|e| draw_err(&e))?;
                draw_into(chart, y_desc, curves).map_err(|e| draw_err(&e))?;
            }
            YScale::Log => {
                let chart = builder
                    .build_cartesian_2d(x_spec, y_range.log_scale())
                    .map_err(|e| draw_err(&e))?;
                draw_into(chart, y_desc, curves).map_err(|e| draw_err(&e))?;
            }
        }

        root_area.present().map_err(|e| draw_err(&e))?;
        Ok(())
    }

    fn draw_into<'a, DB, X, Y>(
        mut chart: ChartContext<'a, DB, Cartesian2d<X, Y>>,
        y_desc: &str,
        curves: &[Curve],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
    where
        DB: DrawingBackend + 'a,
        X: Ranged<ValueType = f64> + ValueFormatter<f64>,
        Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        chart
            .configure_mesh()
            .x_desc("Frequency (GHz)")
            .y_desc(y_desc)
            .label_style(("sans-serif", 24))
            .draw()?;

        for (curve, colour) in curves.iter().zip(COLOURS.iter().cycle()) {
            let style = colour.stroke_width(3);
            for (i_segment, segment) in segments(&curve.points).into_iter().enumerate() {
                let anno = chart.draw_series(LineSeries::new(segment, style))?;
                // Only label one segment of each curve.
                if i_segment == 0 {
                    anno.label(curve.label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 30, y)], style)
                    });
                }
            }
        }

        if curves.len() > 1 {
            chart
                .configure_series_labels()
                .label_font(("sans-serif", 24))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
        Ok(())
    }

    /// Split a curve into runs of consecutive points that have values.
    /// Non-finite values also break the curve.
    pub(super) fn segments(points: &[(f64, Option<f64>)]) -> Vec<Vec<(f64, f64)>> {
        let mut segments = vec![];
        let mut current = vec![];
        for &(x, y) in points {
            match y.filter(|y| y.is_finite()) {
                Some(y) => current.push((x, y)),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn freq_range(curves: &[Curve]) -> Option<Range<f64>> {
        let mut freqs = curves
            .iter()
            .flat_map(|c| c.points.iter().map(|(x, _)| *x))
            .filter(|x| x.is_finite() && *x > 0.0);
        let first = freqs.next()?;
        let (min, max) = freqs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
        Some(min..max)
    }

    /// The y-axis range that shows every value, with a little room above and
    /// below. `None` if there's nothing to show.
    pub(super) fn value_range(curves: &[Curve], y_scale: YScale) -> Option<Range<f64>> {
        let mut values = curves
            .iter()
            .flat_map(|c| c.points.iter().filter_map(|(_, y)| *y))
            .filter(|y| y.is_finite())
            // Non-positive values can't be shown on a log axis.
            .filter(|y| y_scale == YScale::Linear || *y > 0.0);
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));

        let range = match y_scale {
            YScale::Linear => {
                let lo = min.min(0.0);
                let hi = if max > lo { max * 1.1 } else { lo + 1.0 };
                lo..hi
            }
            YScale::Log => {
                let hi = if max > min { max * 2.0 } else { max * 10.0 };
                (min / 2.0)..hi
            }
        };
        Some(range)
    }

}
