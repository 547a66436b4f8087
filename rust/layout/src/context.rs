// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-build context.
//!
//! Everything a layout step reads is gathered into one [`BuildContext`]: the
//! description, the section library, the alignment and the configuration,
//! plus each support's plan frame. Frames are computed once, up front, so
//! the maximum skew of the bridge is known before any spacing is resolved.

use bridge_lite_core::{
    BridgeDescription, BuildConfig, GirderGroupDescription, SectionLibrary, SupportId,
};
use bridge_lite_geometry::{Alignment, Direction, Line2d, Orientation, Point2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Where a support crosses the alignment and which way it points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportFrame {
    pub id: SupportId,
    pub station: f64,
    /// Alignment point at the support station.
    pub origin: Point2<f64>,
    /// Alignment normal at the support station, pointing right.
    pub normal: Direction,
    /// Direction of the support centerline, pointing right.
    pub heading: Direction,
    /// Signed angle from the alignment normal to the heading, radians.
    pub skew: f64,
}

impl SupportFrame {
    /// The support centerline, parameterized by offset from the alignment
    /// along the heading.
    pub fn line(&self) -> Line2d {
        Line2d::new(self.origin, self.heading)
    }

    #[inline]
    pub fn cos_skew(&self) -> f64 {
        self.skew.cos()
    }
}

/// Read-only inputs of one build.
pub struct BuildContext<'a> {
    pub description: &'a BridgeDescription,
    pub library: &'a SectionLibrary,
    pub alignment: &'a dyn Alignment,
    pub config: &'a BuildConfig,
    frames: FxHashMap<SupportId, SupportFrame>,
    max_skew: f64,
}

impl<'a> BuildContext<'a> {
    /// Compute every support frame and check the skews against the configured
    /// limit.
    pub fn new(
        description: &'a BridgeDescription,
        library: &'a SectionLibrary,
        alignment: &'a dyn Alignment,
        config: &'a BuildConfig,
    ) -> Result<Self> {
        let ids = description
            .pier_ids()
            .map(SupportId::from)
            .chain(description.temporary_support_ids().map(SupportId::from));

        let mut frames = FxHashMap::default();
        let mut max_skew = 0.0_f64;
        for id in ids {
            let frame = support_frame(description, alignment, id)?;
            if frame.skew.abs().to_degrees() > config.max_skew_degrees {
                return Err(Error::GeometryResolution {
                    support: id,
                    step: format!(
                        "skew of {:.3}° exceeds the {}° limit",
                        frame.skew.to_degrees(),
                        config.max_skew_degrees
                    ),
                });
            }
            max_skew = max_skew.max(frame.skew.abs());
            frames.insert(id, frame);
        }

        tracing::debug!(
            supports = frames.len(),
            max_skew_degrees = max_skew.to_degrees(),
            "Computed support frames"
        );

        Ok(Self {
            description,
            library,
            alignment,
            config,
            frames,
            max_skew,
        })
    }

    pub fn frame(&self, support: SupportId) -> Result<&SupportFrame> {
        self.frames
            .get(&support)
            .ok_or(Error::UnknownSupport(support))
    }

    /// Largest absolute skew over all supports, radians.
    pub fn max_skew(&self) -> f64 {
        self.max_skew
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Whether spacing is given as the clear joint between adjacent girders.
    pub fn is_joint_spacing(&self) -> bool {
        self.description.spacing_type.is_joint()
    }

    /// Top width of each girder in a group, left to right.
    pub fn girder_widths(&self, group: &GirderGroupDescription) -> Result<SmallVec<[f64; 8]>> {
        group
            .girders
            .iter()
            .map(|section| self.library.width(section).map_err(Error::from))
            .collect()
    }
}

fn support_frame(
    description: &BridgeDescription,
    alignment: &dyn Alignment,
    id: SupportId,
) -> Result<SupportFrame> {
    let station = description.station(id)?;
    let orientation: Orientation = description
        .orientation(id)?
        .parse()
        .map_err(|source| Error::InvalidOrientation {
            support: id,
            source,
        })?;
    let normal = alignment.normal(station);
    let heading = orientation.heading(normal);
    Ok(SupportFrame {
        id,
        station,
        origin: alignment.point_at(station, 0.0),
        normal,
        heading,
        skew: normal.angle_to(heading),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bridge_lite_core::{GirderGroupDescription, GirderSpacingType, PierDescription, PierFace};
    use bridge_lite_geometry::StraightAlignment;

    fn bridge(back_orientation: &str) -> BridgeDescription {
        let mut bridge = BridgeDescription::new(GirderSpacingType::General);
        bridge.piers = vec![
            PierDescription::new(0.0, "NORMAL").with_ahead(PierFace::default()),
            PierDescription::new(100.0, back_orientation).with_back(PierFace::default()),
        ];
        bridge.groups = vec![GirderGroupDescription::of_section(0, 1, "W", 2)];
        bridge
    }

    fn north() -> StraightAlignment {
        StraightAlignment::new(Point2::origin(), Direction::NORTH, 0.0)
    }

    #[test]
    fn frames_carry_heading_and_skew() {
        let bridge = bridge("30 00 00 L");
        let library = SectionLibrary::new();
        let alignment = north();
        let config = BuildConfig::default();
        let ctx = BuildContext::new(&bridge, &library, &alignment, &config).unwrap();

        let start = ctx.frame(SupportId::pier(0)).unwrap();
        assert_relative_eq!(start.skew, 0.0);
        assert_relative_eq!(start.heading.radians(), Direction::EAST.radians());

        let end = ctx.frame(SupportId::pier(1)).unwrap();
        assert_relative_eq!(end.skew, 30f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(end.origin.y, 100.0);
        assert_relative_eq!(ctx.max_skew(), 30f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn excessive_skew_is_rejected() {
        let bridge = bridge("60 00 00 R");
        let library = SectionLibrary::new();
        let alignment = north();
        let config = BuildConfig {
            max_skew_degrees: 45.0,
            ..BuildConfig::default()
        };
        let result = BuildContext::new(&bridge, &library, &alignment, &config);
        assert!(matches!(
            result,
            Err(Error::GeometryResolution { support, .. }) if support == SupportId::pier(1)
        ));
    }

    #[test]
    fn bad_orientation_names_the_support() {
        let bridge = bridge("SIDEWAYS");
        let library = SectionLibrary::new();
        let alignment = north();
        let config = BuildConfig::default();
        let result = BuildContext::new(&bridge, &library, &alignment, &config);
        assert!(matches!(
            result,
            Err(Error::InvalidOrientation { support, .. }) if support == SupportId::pier(1)
        ));
    }
}
