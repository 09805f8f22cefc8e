// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;

fn main() {
    // Run obsplan, only to capture any errors. Error messages are already
    // formatted for the user; print them to stderr and exit unsuccessfully.
    if let Err(e) = obsplan::Obsplan::parse().run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
