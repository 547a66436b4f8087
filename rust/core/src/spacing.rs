// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Girder spacing records and their measurement conventions.

use smallvec::SmallVec;

/// Spacing magnitudes, one per adjacent girder pair.
pub type Spacings = SmallVec<[f64; 8]>;

/// Bridge-wide girder spacing type.
///
/// Selects between a single spacing for the whole bridge and per-support
/// spacing, and whether spacing values are centerline pitches or clear joint
/// openings between adjacent girders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GirderSpacingType {
    /// One centerline spacing for the whole bridge.
    Uniform,
    /// One joint spacing for the whole bridge, adjacent girders.
    UniformAdjacent,
    /// Centerline spacing given at each support.
    General,
    /// Joint spacing given at each support, adjacent girders.
    GeneralAdjacent,
    /// Adjacent girders with a constant joint for the whole bridge.
    ConstantAdjacent,
}

impl GirderSpacingType {
    /// True when one spacing record applies to the whole bridge.
    pub fn is_uniform(self) -> bool {
        matches!(
            self,
            GirderSpacingType::Uniform
                | GirderSpacingType::UniformAdjacent
                | GirderSpacingType::ConstantAdjacent
        )
    }

    /// True when spacing values are clear joint openings.
    pub fn is_joint(self) -> bool {
        matches!(
            self,
            GirderSpacingType::UniformAdjacent
                | GirderSpacingType::GeneralAdjacent
                | GirderSpacingType::ConstantAdjacent
        )
    }
}

/// Where along the girder the spacing is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MeasurementLocation {
    /// At the support centerline.
    AtSupport,
    /// At the centerline of bearing.
    AtBearing,
}

/// The direction spacing and offsets are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MeasurementDirection {
    /// Normal to the alignment.
    NormalToAlignment,
    /// Along the support (or bearing) line.
    AlongSupport,
}

/// Measurement convention of a spacing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementFrame {
    pub location: MeasurementLocation,
    pub direction: MeasurementDirection,
}

impl MeasurementFrame {
    pub const fn new(location: MeasurementLocation, direction: MeasurementDirection) -> Self {
        Self {
            location,
            direction,
        }
    }

    /// Normal to the alignment, at the support centerline.
    pub const fn normal_at_support() -> Self {
        Self::new(MeasurementLocation::AtSupport, MeasurementDirection::NormalToAlignment)
    }

    pub fn is_along_support(&self) -> bool {
        self.direction == MeasurementDirection::AlongSupport
    }
}

impl Default for MeasurementFrame {
    fn default() -> Self {
        Self::normal_at_support()
    }
}

/// The girder the reference offset locates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReferenceGirder {
    /// The centroid of the girder group.
    Center,
    /// A specific girder, counted from the left.
    Index(usize),
}

/// What the reference offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReferenceOffsetType {
    /// From the alignment.
    Alignment,
    /// From the bridge line (alignment shifted by the bridge alignment offset).
    BridgeLine,
}

/// Girder placement at one support face.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GirderSpacing {
    pub reference_girder: ReferenceGirder,
    /// Offset of the reference girder, positive to the right.
    pub reference_offset: f64,
    pub reference_offset_type: ReferenceOffsetType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: MeasurementFrame,
    pub spacings: Spacings,
}

impl GirderSpacing {
    /// Spacing centered on the alignment, measured normal to it at the support.
    pub fn centered(spacings: impl IntoIterator<Item = f64>) -> Self {
        Self {
            reference_girder: ReferenceGirder::Center,
            reference_offset: 0.0,
            reference_offset_type: ReferenceOffsetType::Alignment,
            frame: MeasurementFrame::default(),
            spacings: spacings.into_iter().collect(),
        }
    }

    /// `girder_count` girders at a constant pitch, centered on the alignment.
    pub fn uniform(girder_count: usize, pitch: f64) -> Self {
        Self::centered(std::iter::repeat(pitch).take(girder_count.saturating_sub(1)))
    }

    pub fn with_frame(mut self, frame: MeasurementFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_reference(
        mut self,
        girder: ReferenceGirder,
        offset: f64,
        offset_type: ReferenceOffsetType,
    ) -> Self {
        self.reference_girder = girder;
        self.reference_offset = offset;
        self.reference_offset_type = offset_type;
        self
    }

    /// Number of girders this record places.
    pub fn girder_count(&self) -> usize {
        self.spacings.len() + 1
    }
}
