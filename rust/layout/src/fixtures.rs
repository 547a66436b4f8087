// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures for unit tests.

use bridge_lite_core::{
    BridgeDescription, BuildConfig, GirderGroupDescription, GirderSpacing, GirderSpacingType,
    PierDescription, PierFace, SectionLibrary,
};
use bridge_lite_geometry::{Direction, Point2, StraightAlignment};

use crate::context::BuildContext;

/// Alignment running north from the origin, station 0 at the origin.
pub(crate) fn north() -> StraightAlignment {
    StraightAlignment::new(Point2::origin(), Direction::NORTH, 0.0)
}

pub(crate) fn library() -> SectionLibrary {
    SectionLibrary::new()
        .with_section("W", 4.0)
        .with_section("WIDE", 6.0)
}

/// Square piers at stations 0, 100 and 200 carrying two groups of four `W`
/// girders at a pitch of 8.
pub(crate) fn two_span(spacing_type: GirderSpacingType) -> BridgeDescription {
    let face = || PierFace::with_spacing(GirderSpacing::uniform(4, 8.0));
    let mut bridge = BridgeDescription::new(spacing_type);
    bridge.bridge_spacing = Some(GirderSpacing::uniform(4, 8.0));
    bridge.piers = vec![
        PierDescription::new(0.0, "NORMAL").with_ahead(face()),
        PierDescription::new(100.0, "NORMAL")
            .with_back(face())
            .with_ahead(face()),
        PierDescription::new(200.0, "NORMAL").with_back(face()),
    ];
    bridge.groups = vec![
        GirderGroupDescription::of_section(0, 1, "W", 4),
        GirderGroupDescription::of_section(1, 2, "W", 4),
    ];
    bridge
}

/// Run `f` against a context for `bridge` on the north alignment.
pub(crate) fn with_context<R>(
    bridge: &BridgeDescription,
    f: impl FnOnce(&BuildContext<'_>) -> R,
) -> R {
    let library = library();
    let alignment = north();
    let config = BuildConfig::default();
    let ctx = BuildContext::new(bridge, &library, &alignment, &config).unwrap();
    f(&ctx)
}
