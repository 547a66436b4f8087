// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Girder lines: the plan path of one girder segment across its supports.

use bridge_lite_core::{
    BearingOffsetMeasure, ConnectionGeometry, GirderLineId, MeasurementFrame, SupportId,
};
use bridge_lite_geometry::{Direction, Point2, Vector2};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::support::SupportLine;

/// Where a girder line crosses a support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GirderLinePoint {
    pub support: SupportId,
    pub point: Point2<f64>,
}

/// One girder segment, from its start support to its end support, through
/// every support it passes over in station order.
#[derive(Debug, Clone, PartialEq)]
pub struct GirderLine {
    pub id: GirderLineId,
    points: SmallVec<[GirderLinePoint; 4]>,
    direction: Direction,
    /// Frame the spacing at the start support was measured in.
    pub start_frame: MeasurementFrame,
    /// Frame the spacing at the end support was measured in.
    pub end_frame: MeasurementFrame,
}

impl GirderLine {
    pub(crate) fn new(
        id: GirderLineId,
        points: SmallVec<[GirderLinePoint; 4]>,
        start_frame: MeasurementFrame,
        end_frame: MeasurementFrame,
    ) -> Result<Self> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(Error::InvalidGirderLine {
                id,
                reason: "girder line has no points",
            });
        };
        if points.len() < 2 {
            return Err(Error::InvalidGirderLine {
                id,
                reason: "girder line needs at least two points",
            });
        }
        let direction = Direction::from_vector(&(last.point - first.point)).ok_or(
            Error::InvalidGirderLine {
                id,
                reason: "girder line starts and ends at the same point",
            },
        )?;
        Ok(Self {
            id,
            points,
            direction,
            start_frame,
            end_frame,
        })
    }

    pub fn points(&self) -> &[GirderLinePoint] {
        &self.points
    }

    pub fn start(&self) -> &GirderLinePoint {
        &self.points[0]
    }

    pub fn end(&self) -> &GirderLinePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn start_support(&self) -> SupportId {
        self.start().support
    }

    pub fn end_support(&self) -> SupportId {
        self.end().support
    }

    /// Direction of the chord from start to end.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Length of the path through every point.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].point - w[0].point).norm())
            .sum()
    }

    /// Point at `distance` along the path from the start. Distances outside
    /// the path extend its first or last leg.
    pub fn point_at(&self, distance: f64) -> Point2<f64> {
        let mut remaining = distance;
        let legs = self.points.len() - 1;
        for (i, w) in self.points.windows(2).enumerate() {
            let leg = w[1].point - w[0].point;
            let len = leg.norm();
            if remaining <= len || i + 1 == legs {
                if len == 0.0 {
                    return w[0].point;
                }
                return w[0].point + leg * (remaining / len);
            }
            remaining -= len;
        }
        self.end().point
    }

    /// Unit vector from the start point along the first leg.
    pub(crate) fn start_tangent(&self) -> Option<Vector2<f64>> {
        (self.points[1].point - self.points[0].point).try_normalize(0.0)
    }

    /// Unit vector from the end point back along the last leg.
    pub(crate) fn end_tangent(&self) -> Option<Vector2<f64>> {
        let n = self.points.len();
        (self.points[n - 2].point - self.points[n - 1].point).try_normalize(0.0)
    }
}

/// Support, bearing and girder end points at one end of a girder line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GirderEnd {
    pub support: SupportId,
    /// Girder line intersection with the support centerline.
    pub support_point: Point2<f64>,
    pub bearing_point: Point2<f64>,
    pub end_point: Point2<f64>,
}

/// Both ends of a girder line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GirderEndPoints {
    pub start: GirderEnd,
    pub end: GirderEnd,
}

/// Bearing and end points from the support point, walking `into_span`.
pub(crate) fn girder_end(
    support: &SupportLine,
    support_point: Point2<f64>,
    into_span: Vector2<f64>,
    connection: ConnectionGeometry,
    tolerance: f64,
) -> Result<GirderEnd> {
    let support_normal = support.heading.left_normal().to_vector();
    let cos_phi = into_span.dot(&support_normal).abs();
    if cos_phi < tolerance {
        return Err(Error::GeometryResolution {
            support: support.id,
            step: "girder runs parallel to the support".to_string(),
        });
    }

    let bearing = match connection.bearing_offset_measure {
        BearingOffsetMeasure::AlongGirder => connection.bearing_offset,
        BearingOffsetMeasure::NormalToSupport => connection.bearing_offset / cos_phi,
    };
    let end_distance = if connection.end_distance_measure.along_girder() {
        connection.end_distance
    } else {
        connection.end_distance / cos_phi
    };
    let end = if connection.end_distance_measure.from_bearing() {
        bearing - end_distance
    } else {
        end_distance
    };

    Ok(GirderEnd {
        support: support.id,
        support_point,
        bearing_point: support_point + into_span * bearing,
        end_point: support_point + into_span * end,
    })
}
