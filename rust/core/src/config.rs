// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build configuration.

/// Numerical settings for a geometry build.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Length tolerance, also used as the sine threshold for parallel lines.
    pub tolerance: f64,
    /// Largest support skew accepted, in degrees.
    pub max_skew_degrees: f64,
    /// Fail when a resolved girder point falls outside its support's extent.
    pub check_support_extents: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_skew_degrees: 85.0,
            check_support_extents: true,
        }
    }
}
