// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of a geometry model.
//!
//! A snapshot is a plain, self-contained record of the model's support lines
//! and girder lines for consumers outside Rust. It does not carry the
//! alignment, so a model cannot be rebuilt from it.

use bridge_lite_core::{GirderLineId, SupportId};
use bridge_lite_geometry::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::girder::{GirderEnd, GirderLine};
use crate::model::BridgeGeometryModel;
use crate::strategy::LayoutStrategy;
use crate::support::SupportLine;

/// Serializable representation of a whole model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub strategy: LayoutStrategy,
    pub max_skew_degrees: f64,
    pub supports: Vec<SupportSnapshot>,
    pub girder_lines: Vec<GirderLineSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSnapshot {
    pub id: SupportId,
    pub station: f64,
    /// Survey azimuth of the heading, degrees clockwise from north.
    pub azimuth_degrees: f64,
    pub skew_degrees: f64,
    pub left_end_offset: f64,
    pub width: f64,
    pub left_end: [f64; 2],
    pub right_end: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GirderPointSnapshot {
    pub support: SupportId,
    pub point: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GirderEndSnapshot {
    pub bearing: [f64; 2],
    pub end: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GirderLineSnapshot {
    pub id: GirderLineId,
    pub length: f64,
    pub points: Vec<GirderPointSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<GirderEndSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<GirderEndSnapshot>,
}

fn xy(p: Point2<f64>) -> [f64; 2] {
    [p.x, p.y]
}

impl From<&SupportLine> for SupportSnapshot {
    fn from(line: &SupportLine) -> Self {
        Self {
            id: line.id,
            station: line.station,
            azimuth_degrees: line.heading.azimuth().to_degrees(),
            skew_degrees: line.skew().to_degrees(),
            left_end_offset: line.left_end_offset,
            width: line.width,
            left_end: xy(line.left_end()),
            right_end: xy(line.right_end()),
        }
    }
}

impl From<&GirderEnd> for GirderEndSnapshot {
    fn from(end: &GirderEnd) -> Self {
        Self {
            bearing: xy(end.bearing_point),
            end: xy(end.end_point),
        }
    }
}

impl BridgeGeometryModel {
    /// Plain-data copy of the model.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            strategy: self.strategy(),
            max_skew_degrees: self.max_skew().to_degrees(),
            supports: self.support_lines().map(SupportSnapshot::from).collect(),
            girder_lines: self
                .girder_lines()
                .map(|line| self.girder_line_snapshot(line))
                .collect(),
        }
    }

    /// Serializes the model snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    fn girder_line_snapshot(&self, line: &GirderLine) -> GirderLineSnapshot {
        // End points are omitted when the girder runs along its support
        let ends = self.girder_end_points(line.id).ok();
        GirderLineSnapshot {
            id: line.id,
            length: line.length(),
            points: line
                .points()
                .iter()
                .map(|p| GirderPointSnapshot {
                    support: p.support,
                    point: xy(p.point),
                })
                .collect(),
            start: ends.as_ref().map(|e| GirderEndSnapshot::from(&e.start)),
            end: ends.as_ref().map(|e| GirderEndSnapshot::from(&e.end)),
        }
    }
}

impl ModelSnapshot {
    /// Deserializes a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}
