// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pier layout.

use bridge_lite_core::{ColumnLayout, Face, PierIndex, PierModel, ReferenceOffsetType, SupportId};

use crate::context::{BuildContext, SupportFrame};
use crate::error::{Error, Result};
use crate::resolver::{resolve_spacing, SpacingRequest};
use crate::support::{SupportConnections, SupportLine};

/// Support line of a pier or abutment.
pub fn layout_pier(ctx: &BuildContext<'_>, pier: PierIndex) -> Result<SupportLine> {
    let description = ctx.description.pier(pier)?;
    let frame = ctx.frame(SupportId::Pier(pier))?;

    let (left_end_offset, width) = match &description.model {
        PierModel::Physical(columns) => physical_extent(ctx, frame, columns),
        PierModel::Idealized => idealized_extent(ctx, pier, frame)?,
    };
    let connections = SupportConnections::Pier {
        back: description.back.as_ref().map(|f| f.connection),
        ahead: description.ahead.as_ref().map(|f| f.connection),
    };

    tracing::trace!(support = %frame.id, left_end_offset, width, "Laid out pier");
    Ok(SupportLine::new(frame, left_end_offset, width, connections))
}

/// Cap extent from the column layout, measured along the pier.
fn physical_extent(
    ctx: &BuildContext<'_>,
    frame: &SupportFrame,
    columns: &ColumnLayout,
) -> (f64, f64) {
    let mut reference = columns.reference_offset;
    if columns.reference_offset_type == ReferenceOffsetType::BridgeLine {
        reference += ctx.description.alignment_offset / frame.cos_skew();
    }
    (reference - columns.left_end_to_reference(), columns.width())
}

/// Out-to-out girder extent of the wider face.
fn idealized_extent(
    ctx: &BuildContext<'_>,
    pier: PierIndex,
    frame: &SupportFrame,
) -> Result<(f64, f64)> {
    let (back, ahead) = ctx.description.framing_groups(pier);
    let mut widest: Option<(f64, f64)> = None;

    for (face, group) in [(Face::Back, back), (Face::Ahead, ahead)] {
        let Some(group) = group else {
            continue;
        };
        let spacing = ctx
            .description
            .pier_spacing(pier, face)?
            .ok_or(Error::MissingSpacing {
                support: frame.id,
                face,
            })?;
        let resolved = resolve_spacing(
            ctx,
            &SpacingRequest {
                support: frame.id,
                face,
                group,
                spacing,
            },
        )?;
        let extent = resolved.extent();
        if widest.map_or(true, |(_, width)| extent.1 > width) {
            widest = Some(extent);
        }
    }

    Ok(widest.unwrap_or((0.0, 0.0)))
}
