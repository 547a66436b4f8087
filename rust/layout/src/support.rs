// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Support lines: positioned pier and temporary support centerlines.

use bridge_lite_core::{ConnectionGeometry, Face, SupportId};
use bridge_lite_geometry::{Direction, Line2d, Point2};

use crate::context::SupportFrame;

/// Connection geometry carried by a support line, unchanged from the
/// description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupportConnections {
    /// A face is present only where a span meets the pier.
    Pier {
        back: Option<ConnectionGeometry>,
        ahead: Option<ConnectionGeometry>,
    },
    /// Temporary supports have a single connection for both sides.
    TemporarySupport(ConnectionGeometry),
}

impl SupportConnections {
    pub fn at(&self, face: Face) -> Option<ConnectionGeometry> {
        match (*self, face) {
            (SupportConnections::Pier { back, .. }, Face::Back) => back,
            (SupportConnections::Pier { ahead, .. }, Face::Ahead) => ahead,
            (SupportConnections::TemporarySupport(c), _) => Some(c),
        }
    }
}

/// A pier or temporary support centerline in plan.
///
/// Offsets along the line are measured from the alignment point at the
/// support station, positive to the right of the alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportLine {
    pub id: SupportId,
    pub station: f64,
    /// Alignment point at the support station.
    pub origin: Point2<f64>,
    /// Direction of the centerline, pointing right.
    pub heading: Direction,
    skew: f64,
    /// Offset of the left end from the alignment.
    pub left_end_offset: f64,
    pub width: f64,
    pub connections: SupportConnections,
}

impl SupportLine {
    pub(crate) fn new(
        frame: &SupportFrame,
        left_end_offset: f64,
        width: f64,
        connections: SupportConnections,
    ) -> Self {
        Self {
            id: frame.id,
            station: frame.station,
            origin: frame.origin,
            heading: frame.heading,
            skew: frame.skew,
            left_end_offset,
            width,
            connections,
        }
    }

    pub fn line(&self) -> Line2d {
        Line2d::new(self.origin, self.heading)
    }

    /// Point at `offset` from the alignment along the centerline.
    pub fn point_at(&self, offset: f64) -> Point2<f64> {
        self.line().point_at(offset)
    }

    pub fn left_end(&self) -> Point2<f64> {
        self.point_at(self.left_end_offset)
    }

    pub fn right_end(&self) -> Point2<f64> {
        self.point_at(self.left_end_offset + self.width)
    }

    /// Signed angle from the alignment normal to the heading, radians,
    /// counter-clockwise positive.
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Offset of the projection of `p` onto the centerline.
    pub fn offset_of(&self, p: &Point2<f64>) -> f64 {
        self.line().parameter_of(p)
    }

    /// Whether `offset` lies between the ends, within `tolerance`.
    pub fn contains(&self, offset: f64, tolerance: f64) -> bool {
        offset >= self.left_end_offset - tolerance
            && offset <= self.left_end_offset + self.width + tolerance
    }

    pub fn connection(&self, face: Face) -> Option<ConnectionGeometry> {
        self.connections.at(face)
    }
}
