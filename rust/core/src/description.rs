// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The declarative bridge description.
//!
//! A description is a snapshot of what the user authored: piers in station
//! order (the abutments are the first and last piers), temporary supports in
//! station order, girder groups spanning consecutive piers, and spacing records
//! attached to pier faces and temporary supports. It is never mutated by the
//! layout; any change produces a new description and a new geometry model.

use crate::connection::ConnectionGeometry;
use crate::error::{Error, Result};
use crate::ids::{Face, GroupIndex, PierIndex, SegmentRef, SupportId, TemporarySupportIndex};
use crate::spacing::{GirderSpacing, GirderSpacingType, ReferenceOffsetType, Spacings};

/// Column layout of a physical pier, measured along the pier centerline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnLayout {
    /// Distance between adjacent columns, left to right.
    pub column_spacing: Spacings,
    pub left_overhang: f64,
    pub right_overhang: f64,
    /// Column whose position `reference_offset` gives.
    pub reference_column: usize,
    pub reference_offset: f64,
    pub reference_offset_type: ReferenceOffsetType,
}

impl ColumnLayout {
    pub fn column_count(&self) -> usize {
        self.column_spacing.len() + 1
    }

    /// Out-to-out length of the pier cap.
    pub fn width(&self) -> f64 {
        self.left_overhang + self.column_spacing.iter().sum::<f64>() + self.right_overhang
    }

    /// Distance from the left end of the cap to the reference column.
    pub fn left_end_to_reference(&self) -> f64 {
        self.left_overhang
            + self
                .column_spacing
                .iter()
                .take(self.reference_column)
                .sum::<f64>()
    }
}

/// How a pier's width and offset are determined.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PierModel {
    /// Derived from the girder spacing framing the pier.
    #[default]
    Idealized,
    /// Given directly by a column layout.
    Physical(ColumnLayout),
}

/// One face of a pier that has an adjacent span.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PierFace {
    /// Spacing at this face. Falls back to the bridge spacing when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spacing: Option<GirderSpacing>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connection: ConnectionGeometry,
}

impl PierFace {
    pub fn new(spacing: Option<GirderSpacing>, connection: ConnectionGeometry) -> Self {
        Self {
            spacing,
            connection,
        }
    }

    pub fn with_spacing(spacing: GirderSpacing) -> Self {
        Self::new(Some(spacing), ConnectionGeometry::default())
    }
}

/// A pier or abutment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PierDescription {
    pub station: f64,
    /// Orientation string, e.g. `NORMAL`, `15 00 00 L` or `N 45 E`.
    pub orientation: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub model: PierModel,
    /// Present when a span precedes the pier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub back: Option<PierFace>,
    /// Present when a span follows the pier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ahead: Option<PierFace>,
}

impl PierDescription {
    pub fn new(station: f64, orientation: impl Into<String>) -> Self {
        Self {
            station,
            orientation: orientation.into(),
            model: PierModel::Idealized,
            back: None,
            ahead: None,
        }
    }

    pub fn with_back(mut self, face: PierFace) -> Self {
        self.back = Some(face);
        self
    }

    pub fn with_ahead(mut self, face: PierFace) -> Self {
        self.ahead = Some(face);
        self
    }

    pub fn face(&self, face: Face) -> Option<&PierFace> {
        match face {
            Face::Back => self.back.as_ref(),
            Face::Ahead => self.ahead.as_ref(),
        }
    }
}

/// How a temporary support relates to the girder segments it carries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TemporarySupportKind {
    /// Segments break here and the support has its own spacing. Falls back to
    /// the bridge spacing when absent.
    Independent { spacing: Option<GirderSpacing> },
    /// The support sits under one continuous segment.
    ContinuousSegment { segment: SegmentRef },
}

/// A construction-stage support.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporarySupportDescription {
    pub station: f64,
    pub orientation: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connection: ConnectionGeometry,
    pub kind: TemporarySupportKind,
}

impl TemporarySupportDescription {
    pub fn independent(
        station: f64,
        orientation: impl Into<String>,
        spacing: Option<GirderSpacing>,
    ) -> Self {
        Self {
            station,
            orientation: orientation.into(),
            connection: ConnectionGeometry::default(),
            kind: TemporarySupportKind::Independent { spacing },
        }
    }

    pub fn continuous(station: f64, orientation: impl Into<String>, segment: SegmentRef) -> Self {
        Self {
            station,
            orientation: orientation.into(),
            connection: ConnectionGeometry::default(),
            kind: TemporarySupportKind::ContinuousSegment { segment },
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.kind, TemporarySupportKind::ContinuousSegment { .. })
    }
}

/// Girders spanning from one pier to another, possibly in several segments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GirderGroupDescription {
    pub start_pier: PierIndex,
    pub end_pier: PierIndex,
    /// Library section name of each girder, left to right.
    pub girders: Vec<String>,
    /// Interior supports where segments break, in station order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub segment_boundaries: Vec<SupportId>,
}

impl GirderGroupDescription {
    pub fn new(start_pier: usize, end_pier: usize, girders: Vec<String>) -> Self {
        Self {
            start_pier: PierIndex(start_pier),
            end_pier: PierIndex(end_pier),
            girders,
            segment_boundaries: Vec::new(),
        }
    }

    /// `count` girders of the same section.
    pub fn of_section(start_pier: usize, end_pier: usize, section: &str, count: usize) -> Self {
        Self::new(start_pier, end_pier, vec![section.to_string(); count])
    }

    pub fn with_segment_boundaries(mut self, boundaries: Vec<SupportId>) -> Self {
        self.segment_boundaries = boundaries;
        self
    }

    pub fn girder_count(&self) -> usize {
        self.girders.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_boundaries.len() + 1
    }
}

/// The whole bridge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BridgeDescription {
    /// Offset of the bridge line from the alignment, positive to the right,
    /// measured normal to the alignment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub alignment_offset: f64,
    pub spacing_type: GirderSpacingType,
    /// Spacing used wherever a face or temporary support gives none.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bridge_spacing: Option<GirderSpacing>,
    pub piers: Vec<PierDescription>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub temporary_supports: Vec<TemporarySupportDescription>,
    pub groups: Vec<GirderGroupDescription>,
}

impl BridgeDescription {
    pub fn new(spacing_type: GirderSpacingType) -> Self {
        Self {
            alignment_offset: 0.0,
            spacing_type,
            bridge_spacing: None,
            piers: Vec::new(),
            temporary_supports: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn pier(&self, index: PierIndex) -> Result<&PierDescription> {
        self.piers.get(index.0).ok_or(Error::UnknownPier(index))
    }

    pub fn temporary_support(
        &self,
        index: TemporarySupportIndex,
    ) -> Result<&TemporarySupportDescription> {
        self.temporary_supports
            .get(index.0)
            .ok_or(Error::UnknownTemporarySupport(index))
    }

    pub fn group(&self, index: GroupIndex) -> Result<&GirderGroupDescription> {
        self.groups.get(index.0).ok_or(Error::UnknownGroup(index))
    }

    pub fn pier_ids(&self) -> impl Iterator<Item = PierIndex> {
        (0..self.piers.len()).map(PierIndex)
    }

    pub fn temporary_support_ids(&self) -> impl Iterator<Item = TemporarySupportIndex> {
        (0..self.temporary_supports.len()).map(TemporarySupportIndex)
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupIndex> {
        (0..self.groups.len()).map(GroupIndex)
    }

    pub fn station(&self, support: SupportId) -> Result<f64> {
        match support {
            SupportId::Pier(p) => Ok(self.pier(p)?.station),
            SupportId::TemporarySupport(t) => Ok(self.temporary_support(t)?.station),
        }
    }

    pub fn orientation(&self, support: SupportId) -> Result<&str> {
        match support {
            SupportId::Pier(p) => Ok(self.pier(p)?.orientation.as_str()),
            SupportId::TemporarySupport(t) => Ok(self.temporary_support(t)?.orientation.as_str()),
        }
    }

    /// Spacing at a pier face, falling back to the bridge spacing. Uniform
    /// spacing types always use the bridge spacing. `None` when the face has
    /// no adjacent span or no spacing is available.
    pub fn pier_spacing(&self, pier: PierIndex, face: Face) -> Result<Option<&GirderSpacing>> {
        Ok(self.pier(pier)?.face(face).and_then(|f| {
            if self.spacing_type.is_uniform() {
                self.bridge_spacing.as_ref()
            } else {
                f.spacing.as_ref().or(self.bridge_spacing.as_ref())
            }
        }))
    }

    /// Spacing at an independent temporary support, resolved like a pier face.
    /// Always `None` for continuous-segment supports.
    pub fn temporary_support_spacing(
        &self,
        ts: TemporarySupportIndex,
    ) -> Result<Option<&GirderSpacing>> {
        Ok(match &self.temporary_support(ts)?.kind {
            TemporarySupportKind::Independent { .. } if self.spacing_type.is_uniform() => {
                self.bridge_spacing.as_ref()
            }
            TemporarySupportKind::Independent { spacing } => {
                spacing.as_ref().or(self.bridge_spacing.as_ref())
            }
            TemporarySupportKind::ContinuousSegment { .. } => None,
        })
    }

    /// Spacing used where a segment meets `support` on the given face.
    /// Temporary supports have a single face.
    pub fn spacing_at(&self, support: SupportId, face: Face) -> Result<Option<&GirderSpacing>> {
        match support {
            SupportId::Pier(p) => self.pier_spacing(p, face),
            SupportId::TemporarySupport(t) => self.temporary_support_spacing(t),
        }
    }

    /// Connection geometry where a segment meets `support` on the given face.
    pub fn connection_at(&self, support: SupportId, face: Face) -> Result<ConnectionGeometry> {
        match support {
            SupportId::Pier(p) => Ok(self
                .pier(p)?
                .face(face)
                .map(|f| f.connection)
                .unwrap_or_default()),
            SupportId::TemporarySupport(t) => Ok(self.temporary_support(t)?.connection),
        }
    }

    /// All segment boundaries of a group, including its end piers.
    pub fn boundaries(&self, group: GroupIndex) -> Result<Vec<SupportId>> {
        let g = self.group(group)?;
        let mut boundaries = Vec::with_capacity(g.segment_boundaries.len() + 2);
        boundaries.push(SupportId::Pier(g.start_pier));
        boundaries.extend(g.segment_boundaries.iter().copied());
        boundaries.push(SupportId::Pier(g.end_pier));
        Ok(boundaries)
    }

    /// The supports at the start and end of a segment.
    pub fn segment_ends(&self, segment: SegmentRef) -> Result<(SupportId, SupportId)> {
        let boundaries = self.boundaries(segment.group)?;
        if segment.segment + 1 >= boundaries.len() {
            return Err(Error::UnknownSegment {
                group: segment.group,
                segment: segment.segment,
            });
        }
        Ok((boundaries[segment.segment], boundaries[segment.segment + 1]))
    }

    /// Piers and temporary supports strictly between two stations, in
    /// station order.
    pub fn supports_between(&self, start: f64, end: f64) -> Vec<SupportId> {
        let mut found: Vec<(f64, SupportId)> = self
            .piers
            .iter()
            .enumerate()
            .map(|(i, p)| (p.station, SupportId::pier(i)))
            .chain(
                self.temporary_supports
                    .iter()
                    .enumerate()
                    .map(|(i, t)| (t.station, SupportId::temporary_support(i))),
            )
            .filter(|(station, _)| *station > start && *station < end)
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.into_iter().map(|(_, id)| id).collect()
    }

    /// Groups framing the back and ahead faces of a pier.
    pub fn framing_groups(&self, pier: PierIndex) -> (Option<GroupIndex>, Option<GroupIndex>) {
        let back = self
            .groups
            .iter()
            .position(|g| g.start_pier < pier && pier <= g.end_pier)
            .map(GroupIndex);
        let ahead = self
            .groups
            .iter()
            .position(|g| g.start_pier <= pier && pier < g.end_pier)
            .map(GroupIndex);
        (back, ahead)
    }

    /// The group whose span strictly contains `station`.
    pub fn group_at_station(&self, station: f64) -> Option<GroupIndex> {
        self.groups
            .iter()
            .position(|g| {
                let start = self.piers.get(g.start_pier.0).map(|p| p.station);
                let end = self.piers.get(g.end_pier.0).map(|p| p.station);
                matches!((start, end), (Some(s), Some(e)) if s < station && station < e)
            })
            .map(GroupIndex)
    }

    /// Check the structural consistency of the description.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidDescription(msg));

        if self.piers.len() < 2 {
            return invalid(format!("a bridge needs at least 2 piers, got {}", self.piers.len()));
        }
        for (i, pair) in self.piers.windows(2).enumerate() {
            if !(pair[0].station < pair[1].station) {
                return invalid(format!(
                    "pier stations must increase: pier {} at {} is not before pier {} at {}",
                    i,
                    pair[0].station,
                    i + 1,
                    pair[1].station
                ));
            }
        }
        let last = self.piers.len() - 1;
        for (i, pier) in self.piers.iter().enumerate() {
            if (i > 0) != pier.back.is_some() {
                return invalid(format!("pier {i} back face must exist iff a span precedes it"));
            }
            if (i < last) != pier.ahead.is_some() {
                return invalid(format!("pier {i} ahead face must exist iff a span follows it"));
            }
            if let PierModel::Physical(columns) = &pier.model {
                if columns.reference_column >= columns.column_count() {
                    return invalid(format!(
                        "pier {i} reference column {} is out of range",
                        columns.reference_column
                    ));
                }
                if columns.width() < 0.0 {
                    return invalid(format!("pier {i} column layout has negative width"));
                }
            }
        }

        let first_station = self.piers[0].station;
        let last_station = self.piers[last].station;
        for (i, ts) in self.temporary_supports.iter().enumerate() {
            if !(first_station < ts.station && ts.station < last_station) {
                return invalid(format!(
                    "temporary support {i} at station {} is outside the bridge",
                    ts.station
                ));
            }
        }

        if self.groups.is_empty() {
            return invalid("a bridge needs at least one girder group".to_string());
        }
        let mut expected_start = PierIndex(0);
        for (gi, g) in self.groups.iter().enumerate() {
            if g.start_pier != expected_start || g.end_pier <= g.start_pier {
                return invalid(format!(
                    "group {gi} must start at {expected_start} and end after it"
                ));
            }
            self.pier(g.end_pier)?;
            if g.girders.is_empty() {
                return invalid(format!("group {gi} has no girders"));
            }
            let start = self.piers[g.start_pier.0].station;
            let end = self.piers[g.end_pier.0].station;
            let mut previous = start;
            for boundary in &g.segment_boundaries {
                if let SupportId::TemporarySupport(t) = boundary {
                    if self.temporary_support(*t)?.is_continuous() {
                        return invalid(format!(
                            "group {gi} segment boundary {boundary} is a continuous-segment support"
                        ));
                    }
                }
                let station = self.station(*boundary)?;
                if !(previous < station && station < end) {
                    return invalid(format!(
                        "group {gi} segment boundary {boundary} is out of station order"
                    ));
                }
                previous = station;
            }
            expected_start = g.end_pier;
        }
        if expected_start.0 != last {
            return invalid(format!("girder groups end at {expected_start}, not the last pier"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spacing::GirderSpacing;

    fn three_span() -> BridgeDescription {
        let face = || PierFace::with_spacing(GirderSpacing::uniform(3, 6.0));
        let mut bridge = BridgeDescription::new(GirderSpacingType::General);
        bridge.piers = vec![
            PierDescription::new(0.0, "NORMAL").with_ahead(face()),
            PierDescription::new(80.0, "NORMAL").with_back(face()).with_ahead(face()),
            PierDescription::new(180.0, "NORMAL").with_back(face()).with_ahead(face()),
            PierDescription::new(260.0, "NORMAL").with_back(face()),
        ];
        bridge.temporary_supports = vec![TemporarySupportDescription::independent(120.0, "NORMAL", None)];
        bridge.groups = vec![
            GirderGroupDescription::of_section(0, 1, "WF42", 3),
            GirderGroupDescription::of_section(1, 3, "WF42", 3)
                .with_segment_boundaries(vec![SupportId::temporary_support(0)]),
        ];
        bridge
    }

    #[test]
    fn valid_description_passes() {
        three_span().validate().unwrap();
    }

    #[test]
    fn decreasing_stations_are_rejected() {
        let mut bridge = three_span();
        bridge.piers[2].station = 50.0;
        assert!(matches!(bridge.validate(), Err(Error::InvalidDescription(_))));
    }

    #[test]
    fn missing_face_is_rejected() {
        let mut bridge = three_span();
        bridge.piers[1].ahead = None;
        assert!(bridge.validate().is_err());
    }

    #[test]
    fn groups_must_cover_the_bridge() {
        let mut bridge = three_span();
        bridge.groups.pop();
        assert!(bridge.validate().is_err());
    }

    #[test]
    fn segment_ends_include_group_piers() {
        let bridge = three_span();
        let group = GroupIndex(1);
        assert_eq!(bridge.group(group).unwrap().segment_count(), 2);
        assert_eq!(
            bridge.segment_ends(SegmentRef { group, segment: 0 }).unwrap(),
            (SupportId::pier(1), SupportId::temporary_support(0))
        );
        assert_eq!(
            bridge.segment_ends(SegmentRef { group, segment: 1 }).unwrap(),
            (SupportId::temporary_support(0), SupportId::pier(3))
        );
        assert!(matches!(
            bridge.segment_ends(SegmentRef { group, segment: 2 }),
            Err(Error::UnknownSegment { .. })
        ));
    }

    #[test]
    fn supports_between_merges_identity_spaces() {
        let bridge = three_span();
        assert_eq!(
            bridge.supports_between(80.0, 260.0),
            vec![SupportId::temporary_support(0), SupportId::pier(2)]
        );
    }

    #[test]
    fn framing_groups_of_interior_pier_in_group() {
        let bridge = three_span();
        assert_eq!(bridge.framing_groups(PierIndex(0)), (None, Some(GroupIndex(0))));
        assert_eq!(bridge.framing_groups(PierIndex(1)), (Some(GroupIndex(0)), Some(GroupIndex(1))));
        assert_eq!(bridge.framing_groups(PierIndex(2)), (Some(GroupIndex(1)), Some(GroupIndex(1))));
        assert_eq!(bridge.group_at_station(120.0), Some(GroupIndex(1)));
    }

    #[test]
    fn face_spacing_falls_back_to_bridge_spacing() {
        let mut bridge = three_span();
        bridge.piers[1].back.as_mut().unwrap().spacing = None;
        assert!(bridge.pier_spacing(PierIndex(1), Face::Back).unwrap().is_none());

        bridge.bridge_spacing = Some(GirderSpacing::uniform(3, 7.0));
        let s = bridge.pier_spacing(PierIndex(1), Face::Back).unwrap().unwrap();
        assert_eq!(s.spacings[0], 7.0);
        assert!(bridge.pier_spacing(PierIndex(0), Face::Back).unwrap().is_none());
    }

    #[test]
    fn uniform_types_ignore_face_and_support_spacing() {
        let mut bridge = three_span();
        bridge.temporary_supports[0] = TemporarySupportDescription::independent(
            120.0,
            "NORMAL",
            Some(GirderSpacing::uniform(3, 5.0)),
        );
        bridge.bridge_spacing = Some(GirderSpacing::uniform(3, 8.0));
        let pitch = |b: &BridgeDescription, support: SupportId, face: Face| {
            b.spacing_at(support, face).unwrap().map(|s| s.spacings[0])
        };

        assert_eq!(pitch(&bridge, SupportId::pier(1), Face::Ahead), Some(6.0));
        assert_eq!(pitch(&bridge, SupportId::temporary_support(0), Face::Ahead), Some(5.0));

        bridge.spacing_type = GirderSpacingType::Uniform;
        assert_eq!(pitch(&bridge, SupportId::pier(1), Face::Ahead), Some(8.0));
        assert_eq!(pitch(&bridge, SupportId::temporary_support(0), Face::Ahead), Some(8.0));
        assert_eq!(pitch(&bridge, SupportId::pier(0), Face::Back), None);
    }

    #[test]
    fn continuous_support_cannot_break_segments() {
        let mut bridge = three_span();
        bridge.temporary_supports[0] = TemporarySupportDescription::continuous(
            120.0,
            "NORMAL",
            SegmentRef { group: GroupIndex(1), segment: 0 },
        );
        assert!(matches!(bridge.validate(), Err(Error::InvalidDescription(_))));
    }

    #[test]
    fn physical_pier_geometry() {
        let columns = ColumnLayout {
            column_spacing: [10.0, 12.0].into_iter().collect(),
            left_overhang: 3.0,
            right_overhang: 4.0,
            reference_column: 1,
            reference_offset: 0.0,
            reference_offset_type: ReferenceOffsetType::Alignment,
        };
        assert_eq!(columns.column_count(), 3);
        assert_eq!(columns.width(), 29.0);
        assert_eq!(columns.left_end_to_reference(), 13.0);
    }
}
