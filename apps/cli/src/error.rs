// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Faults the CLI reports before or around a build.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: bridge-lite-cli [INPUT] [OUTPUT]: {0}")]
    Usage(String),

    #[error("cannot read project {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project document: {0}")]
    Project(#[from] serde_json::Error),

    #[error("invalid alignment: {0}")]
    Alignment(#[from] bridge_lite_geometry::Error),
}
