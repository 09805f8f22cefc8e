// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use hifitime::Epoch;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use super::common::ARG_FILE_HELP;
use crate::{
    coord::RADec,
    riseset::{compute_rise_set, Observer, RiseSet},
    sexagesimal::{degrees_to_dms, degrees_to_hms, parse_degrees, parse_hours, SexagesimalError},
    sites::{Site, SITE_ALIASES_COMMA_SEPARATED},
    ObsplanError,
};

lazy_static::lazy_static! {
    static ref SITE_HELP: String =
        format!("The observatory. Supported sites: {}", *SITE_ALIASES_COMMA_SEPARATED);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct RisesetArgs {
    #[clap(name = "ARGUMENTS_FILE", long = "args-file", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(
        name = "SITE",
        help = SITE_HELP.as_str(),
        required_unless_present_any = &["ARGUMENTS_FILE", "LIST_SITES"]
    )]
    pub(super) site: Option<String>,

    /// The J2000 right ascension of the target in hours, e.g. 12:34:56.7
    #[clap(
        name = "RA",
        allow_hyphen_values = true,
        required_unless_present_any = &["ARGUMENTS_FILE", "LIST_SITES"]
    )]
    pub(super) ra: Option<String>,

    /// The J2000 declination of the target in degrees, e.g. -43:21:00
    #[clap(
        name = "DEC",
        allow_hyphen_values = true,
        required_unless_present_any = &["ARGUMENTS_FILE", "LIST_SITES"]
    )]
    pub(super) dec: Option<String>,

    /// Find the next rise and set after this time instead of now, e.g.
    /// "2024-05-01T12:00:00 UTC".
    #[clap(long)]
    pub(super) date: Option<String>,

    /// Also print the current LST and the UTC and MJD of the next rise and
    /// set.
    #[clap(long)]
    #[serde(default)]
    pub(super) utc: bool,

    /// Print the known observatories and exit.
    #[clap(long = "list-sites", name = "LIST_SITES")]
    #[serde(default)]
    pub(super) list_sites: bool,
}

impl RisesetArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<RisesetArgs, ObsplanError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let RisesetArgs {
                args_file: _,
                site,
                ra,
                dec,
                date,
                utc,
                list_sites,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(RisesetArgs {
                args_file: None,
                site: cli_args.site.or(site),
                ra: cli_args.ra.or(ra),
                dec: cli_args.dec.or(dec),
                date: cli_args.date.or(date),
                utc: cli_args.utc || utc,
                list_sites: cli_args.list_sites || list_sites,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<RisesetParams, RisesetArgsError> {
        trace!("{:#?}", self);

        let Self {
            args_file: _,
            site,
            ra,
            dec,
            date,
            utc,
            list_sites: _,
        } = self;

        let site = site.ok_or(RisesetArgsError::NoSite)?;
        let site = Site::from_alias(&site).ok_or(RisesetArgsError::UnknownSite(site))?;
        let observer = site.observer()?;

        let (ra, dec) = match (ra, dec) {
            (Some(ra), Some(dec)) => (ra, dec),
            _ => return Err(RisesetArgsError::NoTarget),
        };
        let ra_deg =
            parse_hours(&ra).map_err(|err| RisesetArgsError::BadRa { input: ra, err })?;
        if !(0.0..360.0).contains(&ra_deg) {
            return Err(RisesetArgsError::RaOutOfRange(ra_deg / 15.0));
        }
        let dec_deg =
            parse_degrees(&dec).map_err(|err| RisesetArgsError::BadDec { input: dec, err })?;
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(RisesetArgsError::DecOutOfRange(dec_deg));
        }

        let epoch = match date {
            Some(date) => Epoch::from_str(date.trim()).map_err(|e| RisesetArgsError::BadDate {
                input: date,
                err: e.to_string(),
            })?,
            None => Epoch::now().map_err(|e| RisesetArgsError::Now(e.to_string()))?,
        };

        Ok(RisesetParams {
            site,
            observer,
            target: RADec::from_degrees(ra_deg, dec_deg),
            epoch,
            print_utc: utc,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ObsplanError> {
        if self.list_sites {
            for line in site_listing()? {
                println!("{line}");
            }
            return Ok(());
        }

        debug!("Converting arguments into parameters");
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let (report, extra) = params.report();
        for line in report {
            println!("{line}");
        }
        for line in extra {
            if params.print_utc {
                println!("{line}");
            } else {
                debug!("{line}");
            }
        }
        Ok(())
    }
}

/// One line per known observatory.
fn site_listing() -> Result<Vec<String>, SexagesimalError> {
    Site::iter()
        .map(|site| {
            let pos = site.position()?;
            Ok(format!(
                "{:<28} {:<40} long {:>13} lat {:>12} horizon {}°",
                site.aliases().join(", "),
                site.name(),
                degrees_to_dms(pos.longitude_rad.to_degrees()),
                degrees_to_dms(pos.latitude_rad.to_degrees()),
                site.horizon_deg(),
            ))
        })
        .collect()
}

struct RisesetParams {
    site: Site,
    observer: Observer,
    /// J2000
    target: RADec,
    /// Events are found after this time.
    epoch: Epoch,
    print_utc: bool,
}

impl RisesetParams {
    /// The lines of the rise/set report, and extra lines about the times
    /// in UTC.
    fn report(&self) -> (Vec<String>, Vec<String>) {
        let pos = &self.observer.position;
        let mut report = vec![
            format!("Site = {}", self.site.name()),
            format!(
                "Long,Lat = {} {}",
                degrees_to_dms(pos.longitude_rad.to_degrees()),
                degrees_to_dms(pos.latitude_rad.to_degrees())
            ),
            format!(
                "Target Coordinates = {} {}",
                degrees_to_hms(self.target.ra.to_degrees()),
                degrees_to_dms(self.target.dec.to_degrees())
            ),
        ];

        let lst_now = self.observer.lmst(self.epoch);
        let mut extra = vec![format!(
            "Current LST at Site = {}",
            degrees_to_hms(lst_now.to_degrees())
        )];

        match compute_rise_set(&self.observer, self.target, self.epoch) {
            RiseSet::Events(times) => {
                report.push(format!(
                    "Rise Time (LST) = {}",
                    degrees_to_hms(times.rise_lst.to_degrees())
                ));
                report.push(format!(
                    "Set Time (LST) = {}",
                    degrees_to_hms(times.set_lst.to_degrees())
                ));
                extra.push(format!("Rise Time (UTC) = {}", times.next_rise));
                extra.push(format!(
                    "Rise Time (MJD) = {:.6}",
                    times.next_rise.to_mjd_utc_days()
                ));
                extra.push(format!("Set Time (UTC) = {}", times.next_set));
                extra.push(format!(
                    "Set Time (MJD) = {:.6}",
                    times.next_set.to_mjd_utc_days()
                ));
            }
            RiseSet::NeverRises => report.push(format!(
                "Target never rises above the {}° horizon",
                self.observer.horizon_deg
            )),
            RiseSet::AlwaysUp => report.push(format!(
                "Target never sets below the {}° horizon",
                self.observer.horizon_deg
            )),
        }

        (report, extra)
    }
}

#[derive(Error, Debug)]
pub(super) enum RisesetArgsError {
    #[error("No site was specified")]
    NoSite,

    #[error("Unknown site '{0}'. Supported sites: {}", *SITE_ALIASES_COMMA_SEPARATED)]
    UnknownSite(String),

    #[error("The target's right ascension and declination must both be specified")]
    NoTarget,

    #[error("Couldn't parse right ascension '{input}': {err}")]
    BadRa {
        input: String,
        err: SexagesimalError,
    },

    #[error("Couldn't parse declination '{input}': {err}")]
    BadDec {
        input: String,
        err: SexagesimalError,
    },

    #[error("Right ascension {0} hours is not in the range [0, 24)")]
    RaOutOfRange(f64),

    #[error("Declination {0}° is not in the range [-90, 90]")]
    DecOutOfRange(f64),

    #[error("Couldn't parse date '{input}': {err}")]
    BadDate { input: String, err: String },

    #[error("Couldn't get the current time: {0}")]
    Now(String),

    #[error("Bad built-in site position: {0}")]
    SitePosition(#[from] SexagesimalError),
}
