// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifiers for bridge components.
//!
//! Piers and temporary supports live in separate identity spaces; both are
//! indexed in station order. [`SupportId`] names either kind.

use std::fmt;

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub usize);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

index_type!(
    /// Index of a pier (abutments included) in station order.
    PierIndex,
    "Pier"
);
index_type!(
    /// Index of a temporary support in station order.
    TemporarySupportIndex,
    "Temporary support"
);
index_type!(
    /// Index of a girder group.
    GroupIndex,
    "Group"
);

/// A pier or a temporary support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "index", rename_all = "snake_case"))]
pub enum SupportId {
    Pier(PierIndex),
    TemporarySupport(TemporarySupportIndex),
}

impl SupportId {
    pub fn pier(index: usize) -> Self {
        SupportId::Pier(PierIndex(index))
    }

    pub fn temporary_support(index: usize) -> Self {
        SupportId::TemporarySupport(TemporarySupportIndex(index))
    }
}

impl fmt::Display for SupportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportId::Pier(p) => p.fmt(f),
            SupportId::TemporarySupport(t) => t.fmt(f),
        }
    }
}

impl From<PierIndex> for SupportId {
    fn from(p: PierIndex) -> Self {
        SupportId::Pier(p)
    }
}

impl From<TemporarySupportIndex> for SupportId {
    fn from(t: TemporarySupportIndex) -> Self {
        SupportId::TemporarySupport(t)
    }
}

/// Which side of a pier a face is on, looking ahead on station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Face {
    Back,
    Ahead,
}

/// A segment within a girder group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentRef {
    pub group: GroupIndex,
    pub segment: usize,
}

/// Identity of one girder line: a girder within a group, for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GirderLineId {
    pub group: GroupIndex,
    pub girder: usize,
    pub segment: usize,
}

impl GirderLineId {
    pub fn new(group: usize, girder: usize, segment: usize) -> Self {
        Self {
            group: GroupIndex(group),
            girder,
            segment,
        }
    }
}

impl fmt::Display for GirderLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "girder {} segment {} of group {}",
            self.girder, self.segment, self.group.0
        )
    }
}
