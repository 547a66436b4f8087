// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry model construction.
//!
//! The build runs in a fixed order:
//!
//! 1. validate the description and compute every support frame
//! 2. lay out support lines in dependency order
//! 3. pick a girder layout strategy and lay out girder lines
//! 4. check girder ends against physical pier caps
//!
//! Any fault aborts the build; no partial model is returned.

use std::sync::Arc;

use bridge_lite_core::{BridgeDescription, BuildConfig, PierModel, SectionLibrary, SupportId};
use bridge_lite_geometry::Alignment;
use rustc_hash::FxHashMap;

use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::girder::GirderLine;
use crate::model::BridgeGeometryModel;
use crate::order::resolution_order;
use crate::piers::layout_pier;
use crate::strategy::{layout_girder_lines, select_strategy};
use crate::support::SupportLine;
use crate::temporary::layout_temporary_support;

/// Build the plan geometry of a bridge.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use bridge_lite_core::{
///     BridgeDescription, BuildConfig, GirderGroupDescription, GirderSpacing,
///     GirderSpacingType, PierDescription, PierFace, SectionLibrary,
/// };
/// use bridge_lite_geometry::{Direction, Point2, StraightAlignment};
/// use bridge_lite_layout::build_bridge_geometry_model;
///
/// let face = || PierFace::with_spacing(GirderSpacing::uniform(4, 8.0));
/// let mut bridge = BridgeDescription::new(GirderSpacingType::Uniform);
/// bridge.bridge_spacing = Some(GirderSpacing::uniform(4, 8.0));
/// bridge.piers = vec![
///     PierDescription::new(0.0, "NORMAL").with_ahead(face()),
///     PierDescription::new(100.0, "NORMAL").with_back(face()),
/// ];
/// bridge.groups = vec![GirderGroupDescription::of_section(0, 1, "W", 4)];
///
/// let library = SectionLibrary::new().with_section("W", 4.0);
/// let alignment = Arc::new(StraightAlignment::new(Point2::origin(), Direction::NORTH, 0.0));
///
/// let model =
///     build_bridge_geometry_model(&bridge, &library, alignment, &BuildConfig::default()).unwrap();
/// assert_eq!(model.girder_line_count(), 4);
/// ```
pub fn build_bridge_geometry_model(
    description: &BridgeDescription,
    library: &SectionLibrary,
    alignment: Arc<dyn Alignment>,
    config: &BuildConfig,
) -> Result<BridgeGeometryModel> {
    tracing::info!(
        piers = description.piers.len(),
        temporary_supports = description.temporary_supports.len(),
        groups = description.groups.len(),
        spacing_type = ?description.spacing_type,
        "Building bridge geometry model"
    );

    description.validate()?;
    let ctx = BuildContext::new(description, library, alignment.as_ref(), config)?;

    let order = resolution_order(description)?;
    let mut supports: FxHashMap<SupportId, SupportLine> = FxHashMap::default();
    for id in order {
        let line = match id {
            SupportId::Pier(pier) => layout_pier(&ctx, pier)?,
            SupportId::TemporarySupport(ts) => layout_temporary_support(&ctx, ts, &supports)?,
        };
        supports.insert(id, line);
    }
    tracing::debug!(supports = supports.len(), "Laid out support lines");

    let strategy = select_strategy(&ctx)?;
    let girder_lines = layout_girder_lines(&ctx, &supports, strategy)?;
    if config.check_support_extents {
        check_pier_caps(&ctx, &supports, &girder_lines)?;
    }

    let mut support_lines: Vec<SupportLine> = supports.into_values().collect();
    support_lines.sort_by(|a, b| a.station.total_cmp(&b.station).then(a.id.cmp(&b.id)));

    let mut model = BridgeGeometryModel::new(
        Arc::clone(&alignment),
        strategy,
        ctx.max_skew(),
        config.tolerance,
    );
    for line in support_lines {
        model.insert_support(line);
    }
    for line in girder_lines {
        model.insert_girder_line(line)?;
    }

    tracing::info!(
        supports = model.support_count(),
        girder_lines = model.girder_line_count(),
        strategy = ?strategy,
        max_skew_degrees = model.max_skew().to_degrees(),
        "Bridge geometry model complete"
    );
    Ok(model)
}

/// A pier given by a column layout must carry every girder ending on it.
fn check_pier_caps(
    ctx: &BuildContext<'_>,
    supports: &FxHashMap<SupportId, SupportLine>,
    girder_lines: &[GirderLine],
) -> Result<()> {
    for line in girder_lines {
        for end in [line.start(), line.end()] {
            let SupportId::Pier(pier) = end.support else {
                continue;
            };
            if !matches!(ctx.description.pier(pier)?.model, PierModel::Physical(_)) {
                continue;
            }
            let support = supports
                .get(&end.support)
                .ok_or(Error::UnknownSupport(end.support))?;
            let offset = support.offset_of(&end.point);
            let tolerance = ctx.tolerance() * (1.0 + support.width.abs());
            if !support.contains(offset, tolerance) {
                return Err(Error::GeometryResolution {
                    support: support.id,
                    step: format!(
                        "{} bears at offset {offset:.4}, outside the cap from {:.4} to {:.4}",
                        line.id,
                        support.left_end_offset,
                        support.left_end_offset + support.width
                    ),
                });
            }
        }
    }
    Ok(())
}
