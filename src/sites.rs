// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observatories that rise/set times can be computed for.
//!
//! Coordinates are the ones astronomers have always typed for these sites;
//! they're good to an arcsecond or so, which is far better than rise/set
//! times need.

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::{
    constants::{DEFAULT_PRESSURE_MBAR, DEFAULT_TEMPERATURE_C},
    coord::LatLngHeight,
    riseset::Observer,
    sexagesimal::{parse_degrees, SexagesimalError},
};

lazy_static::lazy_static! {
    /// All site aliases, for help texts and error messages.
    pub static ref SITE_ALIASES_COMMA_SEPARATED: String =
        Site::iter().flat_map(|s| s.aliases().iter()).join(", ");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Site {
    JodrellBank,
    Birr,
    Effelsberg,
    Sardinia,
    Westerbork,
    Nancay,
    GreenBank,
    Parkes,
    Arecibo,
    Vla,
    Gmrt,
    Lofar,
    MeerKat,
}

/// The static description of a site, exactly as it is typed.
struct SiteEntry {
    site: Site,
    aliases: &'static [&'static str],
    name: &'static str,
    longitude: &'static str,
    latitude: &'static str,
    elevation_m: f64,
    horizon_deg: f64,
}

/// Indexed by [`Site`] discriminant.
static SITE_TABLE: [SiteEntry; 13] = [
    SiteEntry {
        site: Site::JodrellBank,
        aliases: &["jbo", "jodrell"],
        name: "Jodrell Bank",
        longitude: "-2.30715",
        latitude: "53.23700",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Birr,
        aliases: &["birr", "Birr", "I-LOFAR", "ilofar"],
        name: "Birr",
        longitude: "-7.9133",
        latitude: "53.0914",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Effelsberg,
        aliases: &["eff", "effelsberg"],
        name: "Effelsberg",
        longitude: "6:52:58",
        latitude: "50:31:29",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Sardinia,
        aliases: &["srt", "sardinia"],
        name: "Sardinia Radio Telescope",
        longitude: "9:14:43",
        latitude: "39:29:35",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Westerbork,
        aliases: &["wsrt", "westerbork"],
        name: "Westerbork Synthesis Radio Telescope",
        longitude: "6:36:12",
        latitude: "52:54:53",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Nancay,
        aliases: &["nancay"],
        name: "Nancay Radio Telescope",
        longitude: "2:12",
        latitude: "47:23",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::GreenBank,
        aliases: &["gbt"],
        name: "Green Bank Telescope",
        longitude: "-79:50:23",
        latitude: "38:25:59",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Parkes,
        aliases: &["pks", "parkes"],
        name: "Parkes Observatory",
        longitude: "148:15:46.51",
        latitude: "-32:59:52.01",
        elevation_m: 0.0,
        horizon_deg: 30.25,
    },
    SiteEntry {
        site: Site::Arecibo,
        aliases: &["arecibo"],
        name: "Arecibo",
        longitude: "-66:45:10",
        latitude: "18:20:39",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Vla,
        aliases: &["vla"],
        name: "Very Large Array",
        longitude: "-107.61835",
        latitude: "34.078967",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Gmrt,
        aliases: &["gmrt"],
        name: "The Giant Metrewave Radio Telescope",
        longitude: "74:02:59.07",
        latitude: "19:05:47.46",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    SiteEntry {
        site: Site::Lofar,
        aliases: &["lofar"],
        name: "LOFAR Superterp",
        longitude: "6:52:08.18",
        latitude: "52:54:31.55",
        elevation_m: 0.0,
        horizon_deg: 0.0,
    },
    // The SKA1 level 0 science requirements put the MeerKAT dishes' elevation
    // limit at 15 degrees.
    SiteEntry {
        site: Site::MeerKat,
        aliases: &["mk", "MK", "meerkat", "MeerKAT"],
        name: "MeerKAT",
        longitude: "21:24:40",
        latitude: "-30:43:16",
        elevation_m: 0.0,
        horizon_deg: 15.0,
    },
];

impl Site {
    fn entry(self) -> &'static SiteEntry {
        &SITE_TABLE[self as usize]
    }

    /// Find the site that has this alias. Aliases are case sensitive.
    pub fn from_alias(alias: &str) -> Option<Site> {
        Site::iter().find(|s| s.aliases().iter().any(|&a| a == alias))
    }

    pub fn aliases(self) -> &'static [&'static str] {
        self.entry().aliases
    }

    /// The full name of the site.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// The minimum elevation a target must reach to be "up" \[degrees\].
    pub fn horizon_deg(self) -> f64 {
        self.entry().horizon_deg
    }

    /// The site's position on the Earth.
    pub fn position(self) -> Result<LatLngHeight, SexagesimalError> {
        let entry = self.entry();
        Ok(LatLngHeight {
            longitude_rad: parse_degrees(entry.longitude)?.to_radians(),
            latitude_rad: parse_degrees(entry.latitude)?.to_radians(),
            height_metres: entry.elevation_m,
        })
    }

    /// Make an [`Observer`] at this site with standard atmospheric
    /// conditions.
    pub fn observer(self) -> Result<Observer, SexagesimalError> {
        Ok(Observer {
            name: self.name().to_string(),
            position: self.position()?,
            horizon_deg: self.horizon_deg(),
            pressure_mbar: DEFAULT_PRESSURE_MBAR,
            temperature_c: DEFAULT_TEMPERATURE_C,
        })
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
