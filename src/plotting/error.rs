// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(feature = "plotting")]
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("obsplan was not compiled with the \"plotting\" feature.\nUse '-o file' to get the sensitivity table, or compile obsplan from source with this feature to make plots.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("Couldn't create the plot directory {}: {err}", dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[cfg(feature = "plotting")]
    #[error("Nothing to plot in {}; no frequency has a receiver", .0.display())]
    NoData(PathBuf),

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library while drawing {}: {msg}", file.display())]
    Draw { file: PathBuf, msg: String },
}
