// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bridge-Lite Layout
//!
//! Turns a declarative bridge description into a plan geometry model:
//! positioned support lines for every pier and temporary support, and a girder
//! line for every segment of every girder.
//!
//! Girder spacing may be authored at the support or at the bearing line,
//! normal to the alignment or along the support, as centre-to-centre spacing
//! or as the joint between adjacent girders. The [`resolver`] converts each
//! spacing into points on its support's centerline; [`piers`] and
//! [`temporary`] size the supports; [`strategy`] connects the girder points.
//!
//! The entry point is [`build_bridge_geometry_model`]. The returned
//! [`BridgeGeometryModel`] is immutable and owns its entities in slot maps
//! keyed by the types in [`keys`].

pub mod builder;
pub mod context;
pub mod error;
pub mod girder;
pub mod keys;
pub mod model;
pub mod order;
pub mod piers;
pub mod resolver;
pub mod snapshot;
pub mod strategy;
pub mod support;
pub mod temporary;

#[cfg(test)]
mod fixtures;

pub use builder::build_bridge_geometry_model;
pub use context::{BuildContext, SupportFrame};
pub use error::{Error, Result};
pub use girder::{GirderEnd, GirderEndPoints, GirderLine, GirderLinePoint};
pub use keys::{GirderLineKey, SupportLineKey};
pub use model::BridgeGeometryModel;
pub use resolver::{resolve_spacing, ResolvedSpacing, SpacingRequest};
pub use snapshot::{
    GirderEndSnapshot, GirderLineSnapshot, GirderPointSnapshot, ModelSnapshot, SupportSnapshot,
};
pub use strategy::LayoutStrategy;
pub use support::{SupportConnections, SupportLine};
