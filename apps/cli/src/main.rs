// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge-Lite CLI - build a bridge geometry model from a project file.
//!
//! Reads a project document (`{ alignment, library, bridge }`) from a file or
//! standard input and writes the model snapshot as JSON to a file or standard
//! output.
//!
//! # Usage
//!
//! ```text
//! bridge-lite-cli [INPUT] [OUTPUT]
//! ```
//!
//! `-` selects standard input or output. Arguments override the
//! `BRIDGE_LITE_INPUT` and `BRIDGE_LITE_OUTPUT` environment variables; see
//! [`config::Config`] for the rest. Logs go to standard error, filtered by
//! `RUST_LOG`.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;

mod config;
mod error;
mod project;

use config::Config;
use error::CliError;
use project::Project;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().with_args(std::env::args().skip(1))?;
    init_logging(config.log_json);

    tracing::info!(
        input = ?config.input,
        output = ?config.output,
        tolerance = config.tolerance,
        max_skew_degrees = config.max_skew_degrees,
        "Starting Bridge-Lite CLI"
    );

    let json = read_input(config.input.as_deref())?;
    let project = Project::from_json(&json)?;
    let snapshot = project.build(&config.build_config())?;

    let rendered =
        serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
    write_output(config.output.as_deref(), &rendered)?;

    tracing::info!(
        supports = snapshot.supports.len(),
        girder_lines = snapshot.girder_lines.len(),
        "Wrote geometry model snapshot"
    );
    Ok(())
}

fn init_logging(json: bool) {
    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bridge_lite_layout=debug".into());
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .pretty()
            .init();
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(json)
        }
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}
