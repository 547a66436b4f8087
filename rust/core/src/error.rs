// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for bridge description lookups and validation.

use thiserror::Error;

use crate::ids::{GroupIndex, PierIndex, TemporarySupportIndex};

/// Result type alias for description operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Faults in the bridge description itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0} does not exist")]
    UnknownPier(PierIndex),

    #[error("{0} does not exist")]
    UnknownTemporarySupport(TemporarySupportIndex),

    #[error("{0} does not exist")]
    UnknownGroup(GroupIndex),

    #[error("segment {segment} does not exist in {group}")]
    UnknownSegment { group: GroupIndex, segment: usize },

    #[error("section {0:?} is not in the girder library")]
    UnknownSection(String),

    #[error("invalid bridge description: {0}")]
    InvalidDescription(String),
}
