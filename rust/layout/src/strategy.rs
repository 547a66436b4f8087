// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Girder line layout.
//!
//! Two strategies produce the same girder lines for a uniformly spaced
//! bridge:
//!
//! - **Uniform** lays one family of construction lines parallel to the
//!   alignment from a single global pitch and reference offset, then cuts each
//!   segment at its end supports.
//! - **General** resolves the spacing at every segment boundary and connects
//!   the girder points of the boundaries pairwise.
//!
//! Either way a segment's path is the straight chord between its end points,
//! with a point recorded wherever it crosses an intermediate support.

use bridge_lite_core::{Face, GirderLineId, GirderSpacing, GroupIndex, MeasurementFrame, SupportId};
use bridge_lite_geometry::{Line2d, Point2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::girder::{GirderLine, GirderLinePoint};
use crate::resolver::{
    girder_offsets, locate, measurement_line, resolve_spacing, ResolvedSpacing, SpacingRequest,
};
use crate::support::SupportLine;

/// How girder lines were laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    Uniform,
    General,
}

/// Girder points at one end of every girder in a group.
#[derive(Debug, Clone)]
struct SegmentEnd {
    frame: MeasurementFrame,
    points: Vec<Point2<f64>>,
}

impl From<ResolvedSpacing> for SegmentEnd {
    fn from(resolved: ResolvedSpacing) -> Self {
        Self {
            frame: resolved.frame,
            points: resolved.points,
        }
    }
}

/// Choose the uniform fast path when the whole bridge shares one spacing.
pub fn select_strategy(ctx: &BuildContext<'_>) -> Result<LayoutStrategy> {
    let description = ctx.description;
    let general = |reason: &str| -> Result<LayoutStrategy> {
        tracing::debug!(reason, "Using general girder layout");
        Ok(LayoutStrategy::General)
    };

    if !description.spacing_type.is_uniform() {
        return general("spacing type is not uniform");
    }
    let Some(spacing) = description.bridge_spacing.as_ref() else {
        return Err(Error::UnsupportedSpacingType(format!(
            "{:?} spacing requires a bridge spacing",
            description.spacing_type
        )));
    };

    let Some(first) = description.groups.first() else {
        return general("bridge has no girder groups");
    };
    if description
        .groups
        .iter()
        .any(|g| g.girder_count() != first.girder_count())
    {
        return general("girder count varies between groups");
    }
    if spacing.girder_count() != first.girder_count() {
        return general("bridge spacing does not match the group girder count");
    }
    let Some(section) = first.girders.first() else {
        return general("group has no girders");
    };
    if description
        .groups
        .iter()
        .flat_map(|g| g.girders.iter())
        .any(|s| s != section)
    {
        return general("girder sections differ");
    }
    if !single_pitch(spacing, ctx.tolerance()) {
        return general("bridge spacing has more than one pitch");
    }

    if spacing.frame.is_along_support() {
        return general("bridge spacing is measured along the support");
    }

    tracing::debug!("Using uniform girder layout");
    Ok(LayoutStrategy::Uniform)
}

/// Lay out every girder line, group by group, girder by girder, segment by
/// segment.
pub fn layout_girder_lines(
    ctx: &BuildContext<'_>,
    supports: &FxHashMap<SupportId, SupportLine>,
    strategy: LayoutStrategy,
) -> Result<Vec<GirderLine>> {
    let mut ends: FxHashMap<(SupportId, Face), SegmentEnd> = FxHashMap::default();
    let mut lines = Vec::new();

    let uniform_offsets = match strategy {
        LayoutStrategy::Uniform => Some(uniform_offsets(ctx)?),
        LayoutStrategy::General => None,
    };

    for group in ctx.description.group_ids() {
        let girder_count = ctx.description.group(group)?.girder_count();
        for (segment, (start, end)) in segments(ctx, group)?.into_iter().enumerate() {
            for (support, face) in [(start, Face::Ahead), (end, Face::Back)] {
                if ends.contains_key(&(support, face)) {
                    continue;
                }
                let resolved = match &uniform_offsets {
                    Some(offsets) => uniform_end(ctx, support, face, offsets)?,
                    None => general_end(ctx, support, face, group)?,
                };
                ends.insert((support, face), resolved);
            }
            let first = ends
                .get(&(start, Face::Ahead))
                .ok_or(Error::UnknownSupport(start))?;
            let last = ends
                .get(&(end, Face::Back))
                .ok_or(Error::UnknownSupport(end))?;
            if first.points.len() != girder_count || last.points.len() != girder_count {
                let (support, face, found) = if first.points.len() != girder_count {
                    (start, Face::Ahead, first.points.len())
                } else {
                    (end, Face::Back, last.points.len())
                };
                return Err(Error::SpacingGroupMismatch {
                    support,
                    face,
                    group,
                    expected: girder_count,
                    found,
                });
            }

            let passed = passed_supports(ctx, supports, start, end)?;
            for girder in 0..girder_count {
                let id = GirderLineId {
                    group,
                    girder,
                    segment,
                };
                let points = girder_path(
                    ctx,
                    (start, first.points[girder]),
                    (end, last.points[girder]),
                    &passed,
                )?;
                lines.push(GirderLine::new(id, points, first.frame, last.frame)?);
            }
        }
    }

    lines.sort_by_key(|line| line.id);
    tracing::debug!(
        strategy = ?strategy,
        girder_lines = lines.len(),
        "Laid out girder lines"
    );
    Ok(lines)
}

/// Start and end support of every segment of a group.
fn segments(
    ctx: &BuildContext<'_>,
    group: GroupIndex,
) -> Result<Vec<(SupportId, SupportId)>> {
    let boundaries = ctx.description.boundaries(group)?;
    Ok(boundaries.windows(2).map(|w| (w[0], w[1])).collect())
}

fn single_pitch(spacing: &GirderSpacing, tolerance: f64) -> bool {
    match spacing.spacings.first() {
        Some(pitch) => spacing
            .spacings
            .iter()
            .all(|s| (s - pitch).abs() <= tolerance),
        None => true,
    }
}

/// Construction line offsets from the alignment, normal to it.
fn uniform_offsets(ctx: &BuildContext<'_>) -> Result<SmallVec<[f64; 8]>> {
    let spacing = ctx.description.bridge_spacing.as_ref().ok_or_else(|| {
        Error::UnsupportedSpacingType("uniform layout requires a bridge spacing".to_string())
    })?;
    let group = ctx.description.group(GroupIndex(0))?;
    let widths = ctx.girder_widths(group)?;
    girder_offsets(
        ctx,
        SupportId::Pier(group.start_pier),
        spacing,
        &widths,
        1.0,
    )
}

fn uniform_end(
    ctx: &BuildContext<'_>,
    support: SupportId,
    face: Face,
    offsets: &[f64],
) -> Result<SegmentEnd> {
    let frame = ctx
        .description
        .bridge_spacing
        .as_ref()
        .map(|s| s.frame)
        .ok_or_else(|| {
            Error::UnsupportedSpacingType("uniform layout requires a bridge spacing".to_string())
        })?;
    let support_frame = ctx.frame(support)?;
    let line = measurement_line(ctx, support_frame, face, frame.location)?;
    let (_, points, _) = locate(ctx, support_frame, &line, frame.direction, offsets)?;
    Ok(SegmentEnd { frame, points })
}

fn general_end(
    ctx: &BuildContext<'_>,
    support: SupportId,
    face: Face,
    group: GroupIndex,
) -> Result<SegmentEnd> {
    let spacing = ctx
        .description
        .spacing_at(support, face)?
        .ok_or(Error::MissingSpacing { support, face })?;
    let resolved = resolve_spacing(
        ctx,
        &SpacingRequest {
            support,
            face,
            group,
            spacing,
        },
    )?;
    Ok(resolved.into())
}

/// Support lines strictly between two segment ends, in station order.
fn passed_supports<'s>(
    ctx: &BuildContext<'_>,
    supports: &'s FxHashMap<SupportId, SupportLine>,
    start: SupportId,
    end: SupportId,
) -> Result<Vec<&'s SupportLine>> {
    let from = ctx.frame(start)?.station;
    let to = ctx.frame(end)?.station;
    ctx.description
        .supports_between(from, to)
        .into_iter()
        .map(|id| supports.get(&id).ok_or(Error::UnknownSupport(id)))
        .collect()
}

/// Chord from `start` to `end`, cut by every passed support.
fn girder_path(
    ctx: &BuildContext<'_>,
    start: (SupportId, Point2<f64>),
    end: (SupportId, Point2<f64>),
    passed: &[&SupportLine],
) -> Result<SmallVec<[GirderLinePoint; 4]>> {
    let mut points: SmallVec<[GirderLinePoint; 4]> = smallvec![GirderLinePoint {
        support: start.0,
        point: start.1,
    }];

    if !passed.is_empty() {
        let chord = Line2d::through(start.1, end.1).ok_or_else(|| Error::GeometryResolution {
            support: start.0,
            step: format!("girder segment to {} has zero length", end.0),
        })?;
        for support in passed {
            let point = chord
                .intersect(&support.line(), ctx.tolerance())
                .ok_or_else(|| Error::GeometryResolution {
                    support: support.id,
                    step: "girder chord runs parallel to the support".to_string(),
                })?;
            points.push(GirderLinePoint {
                support: support.id,
                point,
            });
        }
    }

    points.push(GirderLinePoint {
        support: end.0,
        point: end.1,
    });
    Ok(points)
}
