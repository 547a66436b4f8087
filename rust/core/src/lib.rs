// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bridge-Lite Core
//!
//! The declarative bridge description that geometry layout consumes: piers
//! and abutments, temporary supports, girder groups and their segments, and
//! the girder spacing records attached to each support face.
//!
//! Nothing here computes geometry. The description is validated, then handed
//! to `bridge-lite-layout`, which turns it into positioned support lines and
//! girder lines.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for every description type

pub mod config;
pub mod connection;
pub mod description;
pub mod error;
pub mod ids;
pub mod library;
pub mod spacing;

pub use config::BuildConfig;
pub use connection::{BearingOffsetMeasure, ConnectionGeometry, EndDistanceMeasure};
pub use description::{
    BridgeDescription, ColumnLayout, GirderGroupDescription, PierDescription, PierFace,
    PierModel, TemporarySupportDescription, TemporarySupportKind,
};
pub use error::{Error, Result};
pub use ids::{
    Face, GirderLineId, GroupIndex, PierIndex, SegmentRef, SupportId, TemporarySupportIndex,
};
pub use library::SectionLibrary;
pub use spacing::{
    GirderSpacing, GirderSpacingType, MeasurementDirection, MeasurementFrame,
    MeasurementLocation, ReferenceGirder, ReferenceOffsetType, Spacings,
};
