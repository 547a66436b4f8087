// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Girder-to-support connection geometry for one support face.

/// How a bearing offset is measured from the support line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BearingOffsetMeasure {
    AlongGirder,
    NormalToSupport,
}

/// How the girder end distance is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndDistanceMeasure {
    FromBearingAlongGirder,
    FromBearingNormalToSupport,
    FromSupportAlongGirder,
    FromSupportNormalToSupport,
}

impl EndDistanceMeasure {
    pub fn from_bearing(self) -> bool {
        matches!(
            self,
            EndDistanceMeasure::FromBearingAlongGirder
                | EndDistanceMeasure::FromBearingNormalToSupport
        )
    }

    pub fn along_girder(self) -> bool {
        matches!(
            self,
            EndDistanceMeasure::FromBearingAlongGirder | EndDistanceMeasure::FromSupportAlongGirder
        )
    }
}

/// Bearing offset and end distance at one support face.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionGeometry {
    pub bearing_offset: f64,
    pub bearing_offset_measure: BearingOffsetMeasure,
    pub end_distance: f64,
    pub end_distance_measure: EndDistanceMeasure,
}

impl ConnectionGeometry {
    pub fn new(
        bearing_offset: f64,
        bearing_offset_measure: BearingOffsetMeasure,
        end_distance: f64,
        end_distance_measure: EndDistanceMeasure,
    ) -> Self {
        Self {
            bearing_offset,
            bearing_offset_measure,
            end_distance,
            end_distance_measure,
        }
    }
}

impl Default for ConnectionGeometry {
    /// Bearing on the support line, girder ending at the bearing.
    fn default() -> Self {
        Self::new(
            0.0,
            BearingOffsetMeasure::NormalToSupport,
            0.0,
            EndDistanceMeasure::FromBearingNormalToSupport,
        )
    }
}
