// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temporary support layout.
//!
//! An independent temporary support is sized like an idealized pier with a
//! single face. A temporary support under a continuous segment has no spacing
//! of its own: its width and left end offset are interpolated by station
//! between the two supports bounding the segment.

use bridge_lite_core::{
    Face, SegmentRef, SupportId, TemporarySupportIndex, TemporarySupportKind,
};
use rustc_hash::FxHashMap;

use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::resolver::{resolve_spacing, SpacingRequest};
use crate::support::{SupportConnections, SupportLine};

/// Support line of a temporary support. `laid_out` must already hold the
/// supports bounding a continuous segment.
pub fn layout_temporary_support(
    ctx: &BuildContext<'_>,
    ts: TemporarySupportIndex,
    laid_out: &FxHashMap<SupportId, SupportLine>,
) -> Result<SupportLine> {
    let description = ctx.description.temporary_support(ts)?;
    let id = SupportId::TemporarySupport(ts);
    let frame = ctx.frame(id)?;

    let (left_end_offset, width) = match &description.kind {
        TemporarySupportKind::Independent { .. } => {
            let group = ctx
                .description
                .group_at_station(frame.station)
                .ok_or(Error::NoFramingGroup(id))?;
            let spacing = ctx
                .description
                .temporary_support_spacing(ts)?
                .ok_or(Error::MissingSpacing {
                    support: id,
                    face: Face::Ahead,
                })?;
            let resolved = resolve_spacing(
                ctx,
                &SpacingRequest {
                    support: id,
                    face: Face::Ahead,
                    group,
                    spacing,
                },
            )?;
            resolved.extent()
        }
        TemporarySupportKind::ContinuousSegment { segment } => {
            interpolated_extent(ctx, id, frame.station, *segment, laid_out)?
        }
    };

    tracing::trace!(support = %id, left_end_offset, width, "Laid out temporary support");
    Ok(SupportLine::new(
        frame,
        left_end_offset,
        width,
        SupportConnections::TemporarySupport(description.connection),
    ))
}

fn interpolated_extent(
    ctx: &BuildContext<'_>,
    id: SupportId,
    station: f64,
    segment: SegmentRef,
    laid_out: &FxHashMap<SupportId, SupportLine>,
) -> Result<(f64, f64)> {
    let splice = |reason: String| Error::UnresolvableSplice {
        support: id,
        reason,
    };

    let (start, end) = ctx
        .description
        .segment_ends(segment)
        .map_err(|e| splice(e.to_string()))?;
    let a = laid_out
        .get(&start)
        .ok_or_else(|| splice(format!("{start} is not laid out")))?;
    let b = laid_out
        .get(&end)
        .ok_or_else(|| splice(format!("{end} is not laid out")))?;

    let span = b.station - a.station;
    if span.abs() < ctx.tolerance() {
        return Err(splice(format!(
            "{start} and {end} share station {}",
            a.station
        )));
    }
    let fraction = (station - a.station) / span;
    if !(0.0..=1.0).contains(&fraction) {
        return Err(splice(format!(
            "station {station} is outside the segment from {} to {}",
            a.station, b.station
        )));
    }

    let lerp = |from: f64, to: f64| from + (to - from) * fraction;
    Ok((
        lerp(a.left_end_offset, b.left_end_offset),
        lerp(a.width, b.width),
    ))
}
