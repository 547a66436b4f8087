// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables and arguments.

use std::path::PathBuf;

use bridge_lite_core::BuildConfig;

use crate::error::CliError;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Project file to read. Standard input when absent or `-`.
    pub input: Option<PathBuf>,
    /// Snapshot file to write. Standard output when absent or `-`.
    pub output: Option<PathBuf>,
    /// Length tolerance for the build.
    pub tolerance: f64,
    /// Largest support skew accepted, in degrees.
    pub max_skew_degrees: f64,
    /// Emit logs as JSON lines instead of pretty text.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = BuildConfig::default();
        Self {
            input: path_var("BRIDGE_LITE_INPUT"),
            output: path_var("BRIDGE_LITE_OUTPUT"),
            tolerance: std::env::var("BRIDGE_LITE_TOLERANCE")
                .unwrap_or_else(|_| defaults.tolerance.to_string())
                .parse()
                .unwrap_or(defaults.tolerance),
            max_skew_degrees: std::env::var("BRIDGE_LITE_MAX_SKEW")
                .unwrap_or_else(|_| defaults.max_skew_degrees.to_string())
                .parse()
                .unwrap_or(defaults.max_skew_degrees),
            log_json: std::env::var("BRIDGE_LITE_LOG_JSON")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Positional `[INPUT] [OUTPUT]` arguments override the environment.
    pub fn with_args<I>(mut self, args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = args.into_iter();
        if let Some(input) = positional.next() {
            self.input = stdio_path(input);
        }
        if let Some(output) = positional.next() {
            self.output = stdio_path(output);
        }
        if let Some(extra) = positional.next() {
            return Err(CliError::Usage(format!("unexpected argument {extra:?}")));
        }
        Ok(self)
    }

    /// Numerical settings for the geometry build.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            tolerance: self.tolerance,
            max_skew_degrees: self.max_skew_degrees,
            ..BuildConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().and_then(stdio_path)
}

/// `-` and empty strings select standard input/output.
fn stdio_path(arg: String) -> Option<PathBuf> {
    match arg.trim() {
        "" | "-" => None,
        path => Some(PathBuf::from(path)),
    }
}
