// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Girder spacing resolution.
//!
//! A [`GirderSpacing`] is authored in whatever frame the designer measured it
//! in: at the support or at the bearing line, normal to the alignment or along
//! the support. Resolution turns it into girder points on the support
//! centerline.
//!
//! The steps, for one support face:
//!
//! 1. Pick the measurement station. At a bearing line it is the support
//!    station shifted by the bearing offset projected onto the alignment.
//! 2. Take the skew between the support heading and the alignment normal at
//!    that station.
//! 3. Inflate joint spacings by the flanking girder half-widths and lay the
//!    girder offsets out from the reference girder.
//! 4. For offsets measured normal to the alignment, intersect a line parallel
//!    to the alignment with the bearing line. The parameter along the bearing
//!    line carries over to the support centerline, which is parallel to it.

use bridge_lite_core::{
    BearingOffsetMeasure, Face, GirderSpacing, GroupIndex, MeasurementDirection,
    MeasurementFrame, MeasurementLocation, ReferenceGirder, ReferenceOffsetType, Spacings,
    SupportId,
};
use bridge_lite_geometry::{Direction, Line2d, Point2};

use crate::context::{BuildContext, SupportFrame};
use crate::error::{Error, Result};

/// One spacing to resolve: where it applies and which group it places.
#[derive(Debug, Clone, Copy)]
pub struct SpacingRequest<'s> {
    pub support: SupportId,
    pub face: Face,
    pub group: GroupIndex,
    pub spacing: &'s GirderSpacing,
}

/// Girder positions on one support face.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpacing {
    pub support: SupportId,
    pub face: Face,
    pub frame: MeasurementFrame,
    pub measurement_station: f64,
    /// Cosine of the skew between the support and the alignment normal at
    /// the measurement station.
    pub cos_skew: f64,
    /// Girder offsets along the support centerline from the alignment, left
    /// to right.
    pub offsets: Spacings,
    /// Girder points on the support centerline.
    pub points: Vec<Point2<f64>>,
    /// Where each girder crosses the line the spacing was measured on.
    pub measurement_points: Vec<Point2<f64>>,
    /// Top width of each girder.
    pub widths: Spacings,
}

impl ResolvedSpacing {
    pub fn girder_count(&self) -> usize {
        self.points.len()
    }

    /// Out-to-out extent of the exterior girders along the support, as
    /// `(left_end_offset, width)`. Girder widths are measured square to the
    /// girder and widen by `1 / cos(skew)` along a skewed support.
    pub fn extent(&self) -> (f64, f64) {
        let (Some(first), Some(last)) = (self.offsets.first(), self.offsets.last()) else {
            return (0.0, 0.0);
        };
        let scale = 1.0 / self.cos_skew.abs();
        let half_left = self.widths.first().copied().unwrap_or(0.0) / 2.0 * scale;
        let half_right = self.widths.last().copied().unwrap_or(0.0) / 2.0 * scale;
        let left = first - half_left;
        (left, last + half_right - left)
    }
}

/// The line a spacing is measured on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MeasurementLine {
    pub station: f64,
    /// Alignment point at `station`.
    pub origin: Point2<f64>,
    /// Alignment normal at `station`.
    pub normal: Direction,
    /// Cosine of the angle between the support heading and `normal`.
    pub cos_skew: f64,
}

/// Girder points at a support face, with the girder count checked against the
/// group.
pub fn resolve_spacing(
    ctx: &BuildContext<'_>,
    request: &SpacingRequest<'_>,
) -> Result<ResolvedSpacing> {
    let group = ctx.description.group(request.group)?;
    let found = request.spacing.girder_count();
    if found != group.girder_count() {
        return Err(Error::SpacingGroupMismatch {
            support: request.support,
            face: request.face,
            group: request.group,
            expected: group.girder_count(),
            found,
        });
    }

    let widths = ctx.girder_widths(group)?;
    let support = ctx.frame(request.support)?;
    let frame = request.spacing.frame;
    let line = measurement_line(ctx, support, request.face, frame.location)?;
    let offsets = girder_offsets(ctx, request.support, request.spacing, &widths, line.cos_skew)?;
    let (offsets, points, measurement_points) =
        locate(ctx, support, &line, frame.direction, &offsets)?;

    tracing::trace!(
        support = %request.support,
        face = ?request.face,
        girders = found,
        station = line.station,
        "Resolved girder spacing"
    );

    Ok(ResolvedSpacing {
        support: request.support,
        face: request.face,
        frame,
        measurement_station: line.station,
        cos_skew: line.cos_skew,
        offsets,
        points,
        measurement_points,
        widths,
    })
}

/// Station and skew of the line a spacing is measured on.
pub(crate) fn measurement_line(
    ctx: &BuildContext<'_>,
    support: &SupportFrame,
    face: Face,
    location: MeasurementLocation,
) -> Result<MeasurementLine> {
    let station = match location {
        MeasurementLocation::AtSupport => support.station,
        MeasurementLocation::AtBearing => {
            let connection = ctx.description.connection_at(support.id, face)?;
            let along = match connection.bearing_offset_measure {
                BearingOffsetMeasure::AlongGirder => connection.bearing_offset,
                BearingOffsetMeasure::NormalToSupport => {
                    connection.bearing_offset / support.cos_skew()
                }
            };
            match (support.id, face) {
                (SupportId::Pier(_), Face::Back) => support.station - along,
                _ => support.station + along,
            }
        }
    };

    let normal = ctx.alignment.normal(station);
    let cos_skew = support.heading.cos_to(normal);
    if cos_skew.abs() < ctx.tolerance() {
        return Err(Error::GeometryResolution {
            support: support.id,
            step: format!("support is parallel to the alignment at station {station}"),
        });
    }

    Ok(MeasurementLine {
        station,
        origin: ctx.alignment.point_at(station, 0.0),
        normal,
        cos_skew,
    })
}

/// Offsets of each girder from the alignment, measured in the spacing's own
/// direction. `cos_skew` only matters for bridge-line references measured
/// along the support.
pub(crate) fn girder_offsets(
    ctx: &BuildContext<'_>,
    support: SupportId,
    spacing: &GirderSpacing,
    widths: &[f64],
    cos_skew: f64,
) -> Result<Spacings> {
    let mut magnitudes = spacing.spacings.clone();
    if ctx.is_joint_spacing() {
        for (i, s) in magnitudes.iter_mut().enumerate() {
            *s += (widths[i] + widths[i + 1]) / 2.0;
        }
    }
    if let Some((index, &value)) = magnitudes.iter().enumerate().find(|(_, s)| **s < 0.0) {
        return Err(Error::NegativeSpacing {
            support,
            index,
            value,
        });
    }

    let count = magnitudes.len() + 1;
    let to_reference = match spacing.reference_girder {
        ReferenceGirder::Center => magnitudes.iter().sum::<f64>() / 2.0,
        ReferenceGirder::Index(index) if index < count => magnitudes[..index].iter().sum::<f64>(),
        ReferenceGirder::Index(index) => {
            return Err(Error::ReferenceGirderOutOfRange {
                support,
                index,
                count,
            })
        }
    };

    let mut left = spacing.reference_offset - to_reference;
    if spacing.reference_offset_type == ReferenceOffsetType::BridgeLine {
        let offset = ctx.description.alignment_offset;
        left += if spacing.frame.is_along_support() {
            offset / cos_skew
        } else {
            offset
        };
    }

    let mut offsets = Spacings::with_capacity(count);
    offsets.push(left);
    let mut running = left;
    for s in &magnitudes {
        running += s;
        offsets.push(running);
    }
    Ok(offsets)
}

/// Carry measured offsets onto the support centerline.
///
/// Returns the offsets along the support, the centerline points and the
/// points on the measurement line.
pub(crate) fn locate(
    ctx: &BuildContext<'_>,
    support: &SupportFrame,
    line: &MeasurementLine,
    direction: MeasurementDirection,
    measured: &[f64],
) -> Result<(Spacings, Vec<Point2<f64>>, Vec<Point2<f64>>)> {
    let bearing_line = Line2d::new(line.origin, support.heading);
    let centerline = support.line();

    let mut offsets = Spacings::with_capacity(measured.len());
    let mut points = Vec::with_capacity(measured.len());
    let mut measurement_points = Vec::with_capacity(measured.len());

    for &offset in measured {
        let (along, on_line) = match direction {
            MeasurementDirection::AlongSupport => (offset, bearing_line.point_at(offset)),
            MeasurementDirection::NormalToAlignment => {
                let foot = line.origin + line.normal.to_vector() * offset;
                let construction = Line2d::new(foot, line.normal.left_normal());
                let hit = construction
                    .intersect(&bearing_line, ctx.tolerance())
                    .ok_or_else(|| Error::GeometryResolution {
                        support: support.id,
                        step: format!("girder at offset {offset} does not cross the support"),
                    })?;
                (bearing_line.parameter_of(&hit), hit)
            }
        };
        offsets.push(along);
        points.push(centerline.point_at(along));
        measurement_points.push(on_line);
    }

    Ok((offsets, points, measurement_points))
}
