// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry model builds.

use bridge_lite_core::{Face, GirderLineId, GroupIndex, SupportId};

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a geometry model build. No partial model is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The description failed validation or a lookup.
    #[error(transparent)]
    Description(#[from] bridge_lite_core::Error),

    /// A support's orientation string could not be parsed.
    #[error("{support} has an invalid orientation: {source}")]
    InvalidOrientation {
        support: SupportId,
        #[source]
        source: bridge_lite_geometry::Error,
    },

    /// Lines that must intersect are parallel, or a point falls off its support.
    #[error("{support}: geometry resolution failed: {step}")]
    GeometryResolution { support: SupportId, step: String },

    /// A spacing magnitude is negative once joint widths are added.
    #[error("{support}: spacing {index} is negative ({value})")]
    NegativeSpacing {
        support: SupportId,
        index: usize,
        value: f64,
    },

    /// A spacing places a different number of girders than its group has.
    #[error("{support} {face:?} face: spacing places {found} girders but {group} has {expected}")]
    SpacingGroupMismatch {
        support: SupportId,
        face: Face,
        group: GroupIndex,
        expected: usize,
        found: usize,
    },

    /// The reference girder index is outside the group.
    #[error("{support}: reference girder {index} is outside a group of {count} girders")]
    ReferenceGirderOutOfRange {
        support: SupportId,
        index: usize,
        count: usize,
    },

    /// No face spacing and no bridge spacing to fall back on.
    #[error("{support} {face:?} face: no girder spacing is available")]
    MissingSpacing { support: SupportId, face: Face },

    /// A continuous-segment temporary support cannot be placed.
    #[error("{support}: cannot resolve continuous segment: {reason}")]
    UnresolvableSplice { support: SupportId, reason: String },

    /// Supports depend on each other's layout in a cycle.
    #[error("support layout dependencies form a cycle through {0:?}")]
    ResolutionCycle(Vec<SupportId>),

    /// The spacing type cannot be laid out with the given description.
    #[error("unsupported spacing configuration: {0}")]
    UnsupportedSpacingType(String),

    /// A temporary support lies in no girder group.
    #[error("{0} is not inside any girder group")]
    NoFramingGroup(SupportId),

    /// A girder line has fewer than two distinct points.
    #[error("{id}: {reason}")]
    InvalidGirderLine { id: GirderLineId, reason: &'static str },

    #[error("{0} is not in the model")]
    UnknownSupport(SupportId),

    #[error("{0} is not in the model")]
    UnknownGirderLine(GirderLineId),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
