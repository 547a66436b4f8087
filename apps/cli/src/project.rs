// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project documents: an alignment, a section library and a bridge.

use anyhow::Context;
use bridge_lite_core::{BridgeDescription, BuildConfig, SectionLibrary};
use bridge_lite_geometry::AlignmentDescription;
use bridge_lite_layout::{build_bridge_geometry_model, ModelSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Everything one build needs, as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub alignment: AlignmentDescription,
    #[serde(default)]
    pub library: SectionLibrary,
    pub bridge: BridgeDescription,
}

impl Project {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the geometry model and take its snapshot.
    pub fn build(&self, config: &BuildConfig) -> anyhow::Result<ModelSnapshot> {
        let alignment = self.alignment.build().map_err(CliError::from)?;
        let model = build_bridge_geometry_model(&self.bridge, &self.library, alignment, config)
            .context("failed to build the bridge geometry model")?;
        Ok(model.snapshot())
    }
}
