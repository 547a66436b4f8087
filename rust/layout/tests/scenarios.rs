// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use approx::assert_relative_eq;
use bridge_lite_core::{
    BearingOffsetMeasure, BridgeDescription, BuildConfig, ColumnLayout, ConnectionGeometry,
    EndDistanceMeasure, GirderGroupDescription, GirderLineId, GirderSpacing, GirderSpacingType,
    GroupIndex, MeasurementDirection, MeasurementFrame, MeasurementLocation, PierDescription,
    PierFace, PierIndex, PierModel, ReferenceOffsetType, SectionLibrary, SegmentRef, SupportId,
    TemporarySupportDescription, TemporarySupportIndex,
};
use bridge_lite_geometry::{Alignment, CircularAlignment, Direction, Point2, StraightAlignment};
use bridge_lite_layout::{
    build_bridge_geometry_model, BridgeGeometryModel, Error, GirderLine, LayoutStrategy,
    ModelSnapshot,
};

fn north() -> Arc<dyn Alignment> {
    Arc::new(StraightAlignment::new(Point2::origin(), Direction::NORTH, 0.0))
}

fn library() -> SectionLibrary {
    SectionLibrary::new().with_section("W", 4.0)
}

fn face(spacing: &GirderSpacing) -> PierFace {
    PierFace::with_spacing(spacing.clone())
}

/// Two square piers 100 apart, four girders at a pitch of 8.
fn simple_span(spacing_type: GirderSpacingType) -> BridgeDescription {
    let spacing = GirderSpacing::uniform(4, 8.0);
    let mut bridge = BridgeDescription::new(spacing_type);
    bridge.bridge_spacing = Some(spacing.clone());
    bridge.piers = vec![
        PierDescription::new(0.0, "NORMAL").with_ahead(face(&spacing)),
        PierDescription::new(100.0, "NORMAL").with_back(face(&spacing)),
    ];
    bridge.groups = vec![GirderGroupDescription::of_section(0, 1, "W", 4)];
    bridge
}

/// Three piers, the middle one skewed, one group continuous over the middle
/// pier. The group breaks at an independent temporary support at 150 and a
/// continuous-segment temporary support sits at 50.
fn spliced(spacing_type: GirderSpacingType) -> BridgeDescription {
    let spacing = GirderSpacing::uniform(4, 8.0);
    let mut bridge = BridgeDescription::new(spacing_type);
    bridge.bridge_spacing = Some(spacing.clone());
    bridge.piers = vec![
        PierDescription::new(0.0, "NORMAL").with_ahead(face(&spacing)),
        PierDescription::new(100.0, "10 00 00 L")
            .with_back(face(&spacing))
            .with_ahead(face(&spacing)),
        PierDescription::new(200.0, "NORMAL").with_back(face(&spacing)),
    ];
    bridge.temporary_supports = vec![
        TemporarySupportDescription::continuous(
            50.0,
            "NORMAL",
            SegmentRef {
                group: GroupIndex(0),
                segment: 0,
            },
        ),
        TemporarySupportDescription::independent(150.0, "5 00 00 R", Some(spacing)),
    ];
    bridge.groups = vec![GirderGroupDescription::of_section(0, 2, "W", 4)
        .with_segment_boundaries(vec![SupportId::temporary_support(1)])];
    bridge
}

fn build(bridge: &BridgeDescription) -> Result<BridgeGeometryModel, Error> {
    build_bridge_geometry_model(bridge, &library(), north(), &BuildConfig::default())
}

fn girder(model: &BridgeGeometryModel, group: usize, index: usize, segment: usize) -> &GirderLine {
    model
        .girder_line(GirderLineId::new(group, index, segment))
        .unwrap()
}

#[test]
fn square_span_places_girders_about_the_alignment() {
    let model = build(&simple_span(GirderSpacingType::Uniform)).unwrap();
    assert_eq!(model.strategy(), LayoutStrategy::Uniform);
    assert_eq!(model.girder_line_count(), 4);

    let g0 = girder(&model, 0, 0, 0);
    assert_relative_eq!(g0.start().point, Point2::new(-12.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(g0.end().point, Point2::new(-12.0, 100.0), epsilon = 1e-9);

    let g3 = girder(&model, 0, 3, 0);
    assert_relative_eq!(g3.start().point, Point2::new(12.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(g3.end().point, Point2::new(12.0, 100.0), epsilon = 1e-9);
    assert_relative_eq!(g3.length(), 100.0, epsilon = 1e-9);
    assert_eq!(g3.start_support(), SupportId::pier(0));
    assert_eq!(g3.end_support(), SupportId::pier(1));

    let pier = model.pier_line(PierIndex(0)).unwrap();
    assert_relative_eq!(pier.width, 28.0, epsilon = 1e-9);
    assert_relative_eq!(pier.left_end(), Point2::new(-14.0, 0.0), epsilon = 1e-9);
}

#[test]
fn builds_are_deterministic() {
    let bridge = spliced(GirderSpacingType::General);
    let a = build(&bridge).unwrap().snapshot();
    let b = build(&bridge).unwrap().snapshot();

    assert_eq!(a.supports.len(), b.supports.len());
    assert_eq!(a.girder_lines.len(), b.girder_lines.len());
    for (x, y) in a.girder_lines.iter().zip(&b.girder_lines) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.points.len(), y.points.len());
        for (p, q) in x.points.iter().zip(&y.points) {
            assert_eq!(p.support, q.support);
            assert_relative_eq!(p.point[0], q.point[0], epsilon = 1e-9);
            assert_relative_eq!(p.point[1], q.point[1], epsilon = 1e-9);
        }
    }
}

#[test]
fn every_girder_crosses_every_support_it_spans() {
    let model = build(&spliced(GirderSpacingType::General)).unwrap();

    // 4 girders, 2 segments each
    assert_eq!(model.girder_line_count(), 8);
    assert_eq!(model.support_count(), 5);

    for g in 0..4 {
        let first = girder(&model, 0, g, 0);
        let supports: Vec<SupportId> = first.points().iter().map(|p| p.support).collect();
        assert_eq!(
            supports,
            vec![
                SupportId::pier(0),
                SupportId::temporary_support(0),
                SupportId::pier(1),
                SupportId::temporary_support(1),
            ]
        );
        let second = girder(&model, 0, g, 1);
        assert_eq!(second.points().len(), 2);
        assert_eq!(second.start_support(), SupportId::temporary_support(1));
        assert_eq!(second.end_support(), SupportId::pier(2));
    }

    // Intermediate points lie on their support lines
    let pier = model.pier_line(PierIndex(1)).unwrap();
    for line in model.girder_lines_in_group(GroupIndex(0)) {
        for point in line.points() {
            if point.support == SupportId::pier(1) {
                let offset = pier.offset_of(&point.point);
                assert_relative_eq!(pier.point_at(offset), point.point, epsilon = 1e-9);
            }
        }
    }

    let stations: Vec<f64> = model.support_lines().map(|s| s.station).collect();
    assert_eq!(stations, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
}

#[test]
fn uniform_and_general_layouts_agree() {
    let at_bearing = MeasurementFrame::new(
        MeasurementLocation::AtBearing,
        MeasurementDirection::NormalToAlignment,
    );
    let connection = ConnectionGeometry::new(
        1.5,
        BearingOffsetMeasure::NormalToSupport,
        0.5,
        EndDistanceMeasure::FromBearingAlongGirder,
    );
    let describe = |spacing_type| {
        let mut bridge = spliced(spacing_type);
        let spacing = GirderSpacing::uniform(4, 8.0).with_frame(at_bearing);
        bridge.bridge_spacing = Some(spacing.clone());
        for pier in &mut bridge.piers {
            for f in [pier.back.as_mut(), pier.ahead.as_mut()].into_iter().flatten() {
                *f = PierFace::new(Some(spacing.clone()), connection);
            }
        }
        bridge.temporary_supports[1] =
            TemporarySupportDescription::independent(150.0, "5 00 00 R", Some(spacing));
        bridge
    };

    let uniform = build(&describe(GirderSpacingType::Uniform)).unwrap();
    let general = build(&describe(GirderSpacingType::General)).unwrap();
    assert_eq!(uniform.strategy(), LayoutStrategy::Uniform);
    assert_eq!(general.strategy(), LayoutStrategy::General);

    assert_eq!(uniform.girder_line_count(), general.girder_line_count());
    for (u, g) in uniform.girder_lines().zip(general.girder_lines()) {
        assert_eq!(u.id, g.id);
        assert_relative_eq!(u.start().point, g.start().point, epsilon = 1e-9);
        assert_relative_eq!(u.end().point, g.end().point, epsilon = 1e-9);
    }
}

#[test]
fn uniform_supports_are_sized_from_the_bridge_spacing() {
    let mut bridge = spliced(GirderSpacingType::Uniform);
    let narrow = GirderSpacing::uniform(4, 4.0);
    for pier in &mut bridge.piers {
        for f in [pier.back.as_mut(), pier.ahead.as_mut()].into_iter().flatten() {
            f.spacing = Some(narrow.clone());
        }
    }
    bridge.temporary_supports[1] =
        TemporarySupportDescription::independent(150.0, "NORMAL", Some(narrow));

    let model = build(&bridge).unwrap();
    assert_eq!(model.strategy(), LayoutStrategy::Uniform);

    let pier = model.pier_line(PierIndex(0)).unwrap();
    assert_relative_eq!(pier.left_end_offset, -14.0, epsilon = 1e-9);
    assert_relative_eq!(pier.width, 28.0, epsilon = 1e-9);
    let ts = model
        .temporary_support_line(TemporarySupportIndex(1))
        .unwrap();
    assert_relative_eq!(ts.width, 28.0, epsilon = 1e-9);

    // Every girder point lies within the support it sits on
    for line in model.girder_lines() {
        for point in line.points() {
            let support = model.support_line(point.support).unwrap();
            let offset = support.offset_of(&point.point);
            assert!(offset >= support.left_end_offset - 1e-9);
            assert!(offset <= support.left_end_offset + support.width + 1e-9);
        }
    }
    assert_relative_eq!(girder(&model, 0, 0, 0).start().point.x, -12.0, epsilon = 1e-9);
}

#[test]
fn zero_skew_frames_are_interchangeable() {
    let along = MeasurementFrame::new(
        MeasurementLocation::AtSupport,
        MeasurementDirection::AlongSupport,
    );
    let normal = build(&simple_span(GirderSpacingType::General)).unwrap();

    let mut bridge = simple_span(GirderSpacingType::General);
    let spacing = GirderSpacing::uniform(4, 8.0).with_frame(along);
    bridge.piers[0].ahead = Some(face(&spacing));
    bridge.piers[1].back = Some(face(&spacing));
    let along_support = build(&bridge).unwrap();

    for (a, b) in normal.girder_lines().zip(along_support.girder_lines()) {
        assert_relative_eq!(a.start().point, b.start().point, epsilon = 1e-12);
        assert_relative_eq!(a.end().point, b.end().point, epsilon = 1e-12);
    }
}

#[test]
fn joint_spacing_adds_girder_width() {
    let joint = GirderSpacing::uniform(4, 1.0);
    let mut bridge = simple_span(GirderSpacingType::UniformAdjacent);
    bridge.bridge_spacing = Some(joint.clone());
    bridge.piers[0].ahead = Some(face(&joint));
    bridge.piers[1].back = Some(face(&joint));

    let model = build(&bridge).unwrap();
    for g in 0..3 {
        let a = girder(&model, 0, g, 0).start().point;
        let b = girder(&model, 0, g + 1, 0).start().point;
        assert_relative_eq!((b - a).norm(), 1.0 + 4.0, epsilon = 1e-9);
    }
}

#[test]
fn continuous_support_width_is_interpolated() {
    let narrow = GirderSpacing::uniform(4, 8.0);
    let wide = GirderSpacing::uniform(4, 10.0);
    let mut bridge = simple_span(GirderSpacingType::General);
    bridge.piers[0].ahead = Some(face(&narrow));
    bridge.piers[1].back = Some(face(&wide));
    bridge.temporary_supports = vec![TemporarySupportDescription::continuous(
        50.0,
        "NORMAL",
        SegmentRef {
            group: GroupIndex(0),
            segment: 0,
        },
    )];

    let model = build(&bridge).unwrap();
    let w1 = model.pier_line(PierIndex(0)).unwrap().width;
    let w2 = model.pier_line(PierIndex(1)).unwrap().width;
    let ts = model
        .temporary_support_line(TemporarySupportIndex(0))
        .unwrap();
    assert_relative_eq!(ts.width, (w1 + w2) / 2.0, epsilon = 1e-9);
    assert_relative_eq!(ts.width, 31.0, epsilon = 1e-9);
}

#[test]
fn curved_alignment_offsets_follow_the_normal() {
    let alignment: Arc<dyn Alignment> = Arc::new(
        CircularAlignment::new(Point2::origin(), Direction::NORTH, 500.0, 0.0).unwrap(),
    );
    let bridge = simple_span(GirderSpacingType::General);
    let config = BuildConfig::default();
    let model =
        build_bridge_geometry_model(&bridge, &library(), Arc::clone(&alignment), &config).unwrap();

    let g0 = girder(&model, 0, 0, 0);
    assert_relative_eq!(g0.start().point, alignment.point_at(0.0, -12.0), epsilon = 1e-9);
    assert_relative_eq!(g0.end().point, alignment.point_at(100.0, -12.0), epsilon = 1e-9);
}

#[test]
fn girder_end_points_follow_connections() {
    let connection = ConnectionGeometry::new(
        1.5,
        BearingOffsetMeasure::NormalToSupport,
        0.75,
        EndDistanceMeasure::FromBearingAlongGirder,
    );
    let mut bridge = simple_span(GirderSpacingType::General);
    let (first, rest) = bridge.piers.split_at_mut(1);
    for f in [first[0].ahead.as_mut(), rest[0].back.as_mut()]
        .into_iter()
        .flatten()
    {
        f.connection = connection;
    }

    let model = build(&bridge).unwrap();
    let ends = model
        .girder_end_points(GirderLineId::new(0, 1, 0))
        .unwrap();
    assert_relative_eq!(ends.start.support_point, Point2::new(-4.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(ends.start.bearing_point, Point2::new(-4.0, 1.5), epsilon = 1e-9);
    assert_relative_eq!(ends.start.end_point, Point2::new(-4.0, 0.75), epsilon = 1e-9);
    assert_relative_eq!(ends.end.bearing_point, Point2::new(-4.0, 98.5), epsilon = 1e-9);
    assert_relative_eq!(ends.end.end_point, Point2::new(-4.0, 99.25), epsilon = 1e-9);

    assert!(matches!(
        model.girder_end_points(GirderLineId::new(0, 9, 0)),
        Err(Error::UnknownGirderLine(_))
    ));
}

#[test]
fn snapshot_survives_json() {
    let model = build(&spliced(GirderSpacingType::General)).unwrap();
    let json = model.to_json().unwrap();
    assert!(json.contains("\"strategy\": \"general\""));

    let parsed = ModelSnapshot::from_json(&json).unwrap();
    let original = model.snapshot();
    assert_eq!(parsed.strategy, original.strategy);
    assert_eq!(parsed.supports.len(), original.supports.len());
    for (p, o) in parsed.girder_lines.iter().zip(&original.girder_lines) {
        assert_eq!(p.id, o.id);
        assert_relative_eq!(p.length, o.length, epsilon = 1e-9);
        assert_eq!(p.points.len(), o.points.len());
        assert!(p.start.is_some() && p.end.is_some());
    }
}

#[test]
fn mismatched_face_spacing_is_rejected() {
    let mut bridge = simple_span(GirderSpacingType::General);
    bridge.piers[1].back = Some(face(&GirderSpacing::uniform(5, 8.0)));
    assert!(matches!(
        build(&bridge),
        Err(Error::SpacingGroupMismatch {
            expected: 4,
            found: 5,
            ..
        })
    ));
}

#[test]
fn support_parallel_to_alignment_is_rejected() {
    let mut bridge = simple_span(GirderSpacingType::General);
    bridge.piers[1].orientation = "N 0 E".to_string();
    assert!(matches!(
        build(&bridge),
        Err(Error::GeometryResolution { support, .. }) if support == SupportId::pier(1)
    ));
}

#[test]
fn narrow_pier_cap_is_rejected() {
    let mut bridge = simple_span(GirderSpacingType::General);
    bridge.piers[1].model = PierModel::Physical(ColumnLayout {
        column_spacing: [10.0].into_iter().collect(),
        left_overhang: 1.0,
        right_overhang: 1.0,
        reference_column: 0,
        reference_offset: -5.0,
        reference_offset_type: ReferenceOffsetType::Alignment,
    });
    assert!(matches!(
        build(&bridge),
        Err(Error::GeometryResolution { support, .. }) if support == SupportId::pier(1)
    ));

    let relaxed = BuildConfig {
        check_support_extents: false,
        ..BuildConfig::default()
    };
    assert!(build_bridge_geometry_model(&bridge, &library(), north(), &relaxed).is_ok());
}

#[test]
fn continuous_support_as_segment_boundary_is_rejected() {
    let mut bridge = spliced(GirderSpacingType::General);
    bridge.temporary_supports[1] = TemporarySupportDescription::continuous(
        150.0,
        "NORMAL",
        SegmentRef {
            group: GroupIndex(0),
            segment: 1,
        },
    );
    assert!(matches!(build(&bridge), Err(Error::Description(_))));
}

#[test]
fn invalid_description_is_rejected() {
    let mut bridge = simple_span(GirderSpacingType::General);
    bridge.piers[1].station = -10.0;
    assert!(matches!(build(&bridge), Err(Error::Description(_))));
}

#[test]
fn missing_section_is_rejected() {
    let mut bridge = simple_span(GirderSpacingType::General);
    bridge.groups[0].girders[2] = "U54".to_string();
    assert!(matches!(build(&bridge), Err(Error::Description(_))));
}
