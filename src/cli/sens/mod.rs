// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use clap::Parser;
use hifitime::Epoch;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::common::{SetupReport, ARG_FILE_HELP};
use crate::{
    array_config::{select_subarray, ArrayConfigError, ArrayLayout, SubArray, SubArrayError},
    constants::{
        DEFAULT_FREQ_MAX_GHZ, DEFAULT_FREQ_MIN_GHZ, DEFAULT_NUM_FREQS, MEERKAT_FULL_RADIUS_KM,
    },
    coord::{galactic_to_equatorial, min_zenith_angle},
    plotting::{plot_sensitivity, PlotError, SubArrayCurves},
    riseset::{compute_rise_set, RiseSet},
    sensitivity::{
        write_table, DishModel, FrequencyGrid, Percentile, SensitivityError, SensitivityModel,
        SkyConditions,
    },
    sexagesimal::SexagesimalError,
    sites::Site,
    ObsplanError,
};

const DEFAULT_TABLE_FILE: &str = "sensitivity.txt";

lazy_static::lazy_static! {
    static ref PERCENTILES_COMMA_SEPARATED: String = Percentile::iter().join(", ");

    static ref OUTPUT_MODES_COMMA_SEPARATED: String = OutputMode::iter().join(", ");

    static ref GALLOS_HELP: String =
        format!("The percentile of the Galactic contribution to the sky temperature along the line of sight (10th, 50th or 90th). Supported values: {}. Default: low", *PERCENTILES_COMMA_SEPARATED);

    static ref PWV_HELP: String =
        format!("The percentile of the precipitable water vapour (5, 10 or 20 mm), which sets the atmospheric opacity and temperature. Supported values: {}. Default: low", *PERCENTILES_COMMA_SEPARATED);

    static ref OUTPUT_HELP: String =
        format!("What to produce. Supported values: {}. Default: plot", *OUTPUT_MODES_COMMA_SEPARATED);

    static ref RADIUS_HELP: String =
        format!("Only use dishes within this distance of the array centre [km]. Default: {MEERKAT_FULL_RADIUS_KM} (the whole array)");

    static ref FREQ_HELP: String =
        format!("The frequency range of the curves [GHz]. Default: {DEFAULT_FREQ_MIN_GHZ} to {DEFAULT_FREQ_MAX_GHZ}");
}

/// What the sens subcommand produces. The table is always printed.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub(super) enum OutputMode {
    /// PNG plots.
    Plot,
    /// A text table.
    File,
    Both,
}

impl OutputMode {
    fn plots(self) -> bool {
        matches!(self, OutputMode::Plot | OutputMode::Both)
    }

    fn writes_table(self) -> bool {
        matches!(self, OutputMode::File | OutputMode::Both)
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SensArgs {
    #[clap(name = "ARGUMENTS_FILE", long = "args-file", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(long, help = RADIUS_HELP.as_str(), help_heading = "ARRAY")]
    pub(super) radius: Option<f64>,

    /// Only use the innermost N dishes. Default: all of them
    #[clap(long, value_name = "N", help_heading = "ARRAY")]
    pub(super) nelements: Option<usize>,

    /// Read the array layout from this file instead of using the built-in
    /// MeerKAT layout.
    #[clap(long, help_heading = "ARRAY", parse(from_os_str))]
    pub(super) array_config: Option<PathBuf>,

    /// The Galactic longitude and latitude of the target [degrees]. If given,
    /// the zenith angle is checked against what MeerKAT can reach.
    #[clap(
        long,
        number_of_values = 2,
        value_names = &["GL", "GB"],
        allow_hyphen_values = true,
        help_heading = "SKY"
    )]
    pub(super) glgb: Option<Vec<f64>>,

    #[clap(long, help = GALLOS_HELP.as_str(), help_heading = "SKY")]
    pub(super) gallos: Option<String>,

    #[clap(long, help = PWV_HELP.as_str(), help_heading = "SKY")]
    pub(super) pwv: Option<String>,

    /// The zenith angle of the observation [degrees]. Default: 0
    #[clap(long, help_heading = "SKY")]
    pub(super) zenith: Option<f64>,

    #[clap(long, help = FREQ_HELP.as_str(), help_heading = "FREQUENCIES")]
    pub(super) fmin: Option<f64>,

    #[clap(long, help = FREQ_HELP.as_str(), help_heading = "FREQUENCIES")]
    pub(super) fmax: Option<f64>,

    /// The number of log-spaced frequencies. Default: 200
    #[clap(long, help_heading = "FREQUENCIES")]
    pub(super) nfreqs: Option<usize>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT")]
    pub(super) output: Option<String>,

    /// The directory to write plots into. Default: the current directory
    #[clap(long, help_heading = "OUTPUT", parse(from_os_str))]
    pub(super) plot_dir: Option<PathBuf>,

    /// The file to write the table into. Default: sensitivity.txt
    #[clap(long, help_heading = "OUTPUT", parse(from_os_str))]
    pub(super) table_file: Option<PathBuf>,
}

impl SensArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<SensArgs, ObsplanError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let SensArgs {
                args_file: _,
                radius,
                nelements,
                array_config,
                glgb,
                gallos,
                pwv,
                zenith,
                fmin,
                fmax,
                nfreqs,
                output,
                plot_dir,
                table_file,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(SensArgs {
                args_file: None,
                radius: cli_args.radius.or(radius),
                nelements: cli_args.nelements.or(nelements),
                array_config: cli_args.array_config.or(array_config),
                glgb: cli_args.glgb.or(glgb),
                gallos: cli_args.gallos.or(gallos),
                pwv: cli_args.pwv.or(pwv),
                zenith: cli_args.zenith.or(zenith),
                fmin: cli_args.fmin.or(fmin),
                fmax: cli_args.fmax.or(fmax),
                nfreqs: cli_args.nfreqs.or(nfreqs),
                output: cli_args.output.or(output),
                plot_dir: cli_args.plot_dir.or(plot_dir),
                table_file: cli_args.table_file.or(table_file),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<SensParams, SensArgsError> {
        trace!("{:#?}", self);

        let Self {
            args_file: _,
            radius,
            nelements,
            array_config,
            glgb,
            gallos,
            pwv,
            zenith,
            fmin,
            fmax,
            nfreqs,
            output,
            plot_dir,
            table_file,
        } = self;

        let mut report = SetupReport::new("Sensitivity set up");

        // The array.
        let (layout, layout_source) = match array_config {
            Some(file) => {
                let layout = ArrayLayout::from_file(&file)?;
                (layout, file.display().to_string())
            }
            None => (ArrayLayout::meerkat()?, "the built-in MeerKAT layout".to_string()),
        };
        report.push_line(format!("{} dishes from {layout_source}", layout.len()));

        let radius_km = radius.unwrap_or(MEERKAT_FULL_RADIUS_KM);
        let nelements = nelements.unwrap_or(layout.len());
        // Asking for more dishes than there are must reach the selection so
        // that it can complain.
        let subarray = if nelements > layout.len() || layout.wants_subarray(radius_km, nelements)
        {
            let subarray = select_subarray(&layout, radius_km, nelements)?;
            report.push_block(subarray_summary(&subarray));
            if subarray.was_rounded() {
                report.warn_block(vec![
                    format!(
                        "There are {} dishes within that radius",
                        subarray.num_candidates
                    )
                    .into(),
                    format!(
                        "But the beamformer adds dishes in fours, so only {} will be used",
                        subarray.len()
                    )
                    .into(),
                ]);
            }
            Some(subarray)
        } else {
            None
        };

        // The sky.
        let gal = parse_percentile("gallos", gallos)?;
        let pwv = parse_percentile("pwv", pwv)?;
        let zenith_deg = zenith.unwrap_or(0.0);
        let sky = SkyConditions::new(gal, pwv, zenith_deg)?;
        report.push_block(vec![
            format!(
                "Galactic background: {gal} ({}th percentile, T408 = {} K)",
                gal.percentile(),
                gal.t408()
            )
            .into(),
            format!("PWV: {pwv} ({} mm)", pwv.pwv_mm()).into(),
            format!("Zenith angle: {zenith_deg}°").into(),
        ]);

        if let Some(glgb) = glgb {
            let (gl, gb) = match glgb.as_slice() {
                [gl, gb] => (*gl, *gb),
                _ => return Err(SensArgsError::BadGlgb(glgb.len())),
            };
            report.push_line(format!("Target at Galactic (l, b) = ({gl}°, {gb}°)"));
            for w in zenith_warnings(gl, gb, zenith_deg)? {
                report.warn_line(w);
            }
        }

        // The frequencies.
        let grid = FrequencyGrid::log_spaced(
            fmin.unwrap_or(DEFAULT_FREQ_MIN_GHZ),
            fmax.unwrap_or(DEFAULT_FREQ_MAX_GHZ),
            nfreqs.unwrap_or(DEFAULT_NUM_FREQS),
        )?;
        report.push_line(format!(
            "{} log-spaced frequencies from {} to {} GHz",
            grid.len(),
            grid.freqs()[0],
            grid.freqs()[grid.len() - 1]
        ));
        let dish = DishModel::meerkat();
        if let Some(w) = no_receiver_warning(&dish, &grid) {
            report.warn_line(w);
        }

        // The outputs.
        let output = match output {
            Some(s) => OutputMode::from_str(&s.to_lowercase())
                .map_err(|_| SensArgsError::BadOutput(s))?,
            None => OutputMode::Plot,
        };
        let plot_dir = plot_dir.unwrap_or_else(|| PathBuf::from("."));
        let table_file = table_file.unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_FILE));
        let mut outputs: Vec<Cow<'static, str>> = vec![];
        if output.plots() {
            outputs.push(format!("Plots into {}", plot_dir.display()).into());
        }
        if output.writes_table() {
            outputs.push(format!("Table into {}", table_file.display()).into());
        }
        report.push_block(outputs);
        report.log();

        Ok(SensParams {
            model: SensitivityModel::new(dish, sky),
            grid,
            num_dishes: layout.len(),
            radius_km,
            subarray,
            output,
            plot_dir,
            table_file,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ObsplanError> {
        debug!("Converting arguments into parameters");
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

fn parse_percentile(arg: &'static str, input: Option<String>) -> Result<Percentile, SensArgsError> {
    match input {
        None => Ok(Percentile::Low),
        Some(s) => Percentile::from_str(&s).map_err(|_| SensArgsError::BadPercentile { arg, input: s }),
    }
}

fn subarray_summary(subarray: &SubArray) -> Vec<Cow<'static, str>> {
    vec![
        // The radius that the dishes were chosen from, before any were dropped
        // for the beamformer.
        format!("Considering a radius of {:.1} km", subarray.candidate_radius_km).into(),
        format!("Sub-array of {} dishes", subarray.len()).into(),
    ]
}

/// A warning if none of the frequencies can be observed with the dish's
/// receivers; the table is then empty and only the Aeff plots are made.
fn no_receiver_warning(dish: &DishModel, grid: &FrequencyGrid) -> Option<String> {
    if grid.freqs().iter().any(|&f| dish.receiver_at(f).is_some()) {
        return None;
    }
    let bands = dish
        .receivers
        .iter()
        .map(|r| format!("{} ({}-{} GHz)", r.name, r.freq_min_ghz, r.freq_max_ghz))
        .join(", ");
    Some(format!(
        "No receiver covers {} to {} GHz, so there is no Tsys there. Available: {bands}",
        grid.freqs()[0],
        grid.freqs()[grid.len() - 1]
    ))
}

/// Check that MeerKAT can actually look at a target at Galactic coordinates
/// (`gl_deg`, `gb_deg`) with a zenith angle of `zenith_deg`. Any problems are
/// returned as messages.
fn zenith_warnings(
    gl_deg: f64,
    gb_deg: f64,
    zenith_deg: f64,
) -> Result<Vec<String>, SexagesimalError> {
    let observer = Site::MeerKat.observer()?;
    let target = galactic_to_equatorial(gl_deg, gb_deg);
    let mut warnings = vec![];

    // Galactic coordinates are J2000, so there's no precession at this epoch.
    let j2000 = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
    if compute_rise_set(&observer, target, j2000) == RiseSet::NeverRises {
        warnings.push(format!(
            "The target at (l, b) = ({gl_deg}°, {gb_deg}°) never rises above MeerKAT's {}° horizon",
            observer.horizon_deg
        ));
        return Ok(warnings);
    }

    let min_zenith = min_zenith_angle(target.dec, observer.position.latitude_rad).to_degrees();
    if zenith_deg < min_zenith {
        warnings.push(format!(
            "A zenith angle of {zenith_deg}° is impossible; the target at (l, b) = ({gl_deg}°, {gb_deg}°) gets no closer than {min_zenith:.2}° to MeerKAT's zenith"
        ));
    }
    if zenith_deg > 90.0 - observer.horizon_deg {
        warnings.push(format!(
            "A zenith angle of {zenith_deg}° is below MeerKAT's {}° horizon",
            observer.horizon_deg
        ));
    }
    Ok(warnings)
}

struct SensParams {
    model: SensitivityModel,
    grid: FrequencyGrid,
    /// The number of dishes in the whole array.
    num_dishes: usize,
    /// The radius the user asked for \[km\].
    radius_km: f64,
    subarray: Option<SubArray>,
    output: OutputMode,
    plot_dir: PathBuf,
    table_file: PathBuf,
}

impl SensParams {
    /// The number of dishes used for the table.
    fn table_dishes(&self) -> usize {
        self.subarray
            .as_ref()
            .map(|s| s.len())
            .unwrap_or(self.num_dishes)
    }

    fn run(&self) -> Result<(), SensArgsError> {
        let full_array = self.model.curves(&self.grid, self.num_dishes);
        let subarray_points = self
            .subarray
            .as_ref()
            .map(|s| self.model.curves(&self.grid, s.len()));
        let table = subarray_points.as_deref().unwrap_or(&full_array);
        debug!("Tabulating sensitivity for {} dishes", self.table_dishes());

        {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_table(table, &mut lock)?;
            lock.flush()?;
        }

        if self.output.writes_table() {
            let mut f = BufWriter::new(File::create(&self.table_file)?);
            write_table(table, &mut f)?;
            f.flush()?;
            info!("Wrote {}", self.table_file.display());
        }

        if self.output.plots() {
            let subarray = match (&self.subarray, &subarray_points) {
                (Some(s), Some(points)) => Some(SubArrayCurves {
                    radius_km: self.radius_km,
                    num_dishes: s.len(),
                    points,
                }),
                _ => None,
            };
            for file in plot_sensitivity(&self.plot_dir, &full_array, subarray)? {
                info!("Wrote {}", file.display());
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum SensArgsError {
    #[error("Invalid --{arg} value '{input}'. Supported values: {}", *PERCENTILES_COMMA_SEPARATED)]
    BadPercentile { arg: &'static str, input: String },

    #[error("Invalid output '{0}'. Supported values: {}", *OUTPUT_MODES_COMMA_SEPARATED)]
    BadOutput(String),

    #[error("--glgb needs exactly 2 values (Galactic longitude and latitude), but {0} were given")]
    BadGlgb(usize),

    #[error(transparent)]
    Sensitivity(#[from] SensitivityError),

    #[error(transparent)]
    ArrayConfig(#[from] ArrayConfigError),

    #[error(transparent)]
    SubArray(#[from] SubArrayError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Bad built-in site position: {0}")]
    SitePosition(#[from] SexagesimalError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
