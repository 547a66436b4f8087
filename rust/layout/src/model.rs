// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bridge geometry model.
//!
//! [`BridgeGeometryModel`] owns every support line and girder line of one
//! build in slot maps, indexed by the identities the description uses. It is
//! immutable once built: a changed description produces a new model. The
//! model is `Send + Sync` and can be shared across readers.

use std::sync::Arc;

use bridge_lite_core::{Face, GirderLineId, GroupIndex, PierIndex, SupportId, TemporarySupportIndex};
use bridge_lite_geometry::Alignment;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::girder::{girder_end, GirderEndPoints, GirderLine};
use crate::keys::{GirderLineKey, SupportLineKey};
use crate::strategy::LayoutStrategy;
use crate::support::SupportLine;

/// Support lines and girder lines of a bridge, in plan.
#[derive(Debug)]
pub struct BridgeGeometryModel {
    alignment: Arc<dyn Alignment>,
    strategy: LayoutStrategy,
    max_skew: f64,
    tolerance: f64,

    pub(crate) supports: SlotMap<SupportLineKey, SupportLine>,
    pub(crate) girder_lines: SlotMap<GirderLineKey, GirderLine>,

    // Identity → key, and iteration order
    support_index: FxHashMap<SupportId, SupportLineKey>,
    girder_index: FxHashMap<GirderLineId, GirderLineKey>,
    support_order: Vec<SupportLineKey>,
    girder_order: Vec<GirderLineKey>,
}

impl BridgeGeometryModel {
    pub(crate) fn new(
        alignment: Arc<dyn Alignment>,
        strategy: LayoutStrategy,
        max_skew: f64,
        tolerance: f64,
    ) -> Self {
        Self {
            alignment,
            strategy,
            max_skew,
            tolerance,
            supports: SlotMap::with_key(),
            girder_lines: SlotMap::with_key(),
            support_index: FxHashMap::default(),
            girder_index: FxHashMap::default(),
            support_order: Vec::new(),
            girder_order: Vec::new(),
        }
    }

    /// Add a support line. Supports are iterated in insertion order.
    pub(crate) fn insert_support(&mut self, line: SupportLine) -> SupportLineKey {
        let id = line.id;
        let key = self.supports.insert(line);
        self.support_index.insert(id, key);
        self.support_order.push(key);
        key
    }

    /// Add a girder line whose supports are already in the model.
    pub(crate) fn insert_girder_line(&mut self, line: GirderLine) -> Result<GirderLineKey> {
        for point in line.points() {
            if !self.support_index.contains_key(&point.support) {
                return Err(Error::UnknownSupport(point.support));
            }
        }
        let id = line.id;
        let key = self.girder_lines.insert(line);
        self.girder_index.insert(id, key);
        self.girder_order.push(key);
        Ok(key)
    }

    pub fn alignment(&self) -> &Arc<dyn Alignment> {
        &self.alignment
    }

    /// Strategy the girder lines were laid out with.
    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    /// Largest absolute support skew, radians.
    pub fn max_skew(&self) -> f64 {
        self.max_skew
    }

    pub fn support_count(&self) -> usize {
        self.supports.len()
    }

    pub fn girder_line_count(&self) -> usize {
        self.girder_lines.len()
    }

    // =========================================================================
    // Support lines
    // =========================================================================

    pub fn support_line(&self, id: SupportId) -> Option<&SupportLine> {
        self.support_index
            .get(&id)
            .and_then(|key| self.supports.get(*key))
    }

    pub fn pier_line(&self, pier: PierIndex) -> Option<&SupportLine> {
        self.support_line(SupportId::Pier(pier))
    }

    pub fn temporary_support_line(&self, ts: TemporarySupportIndex) -> Option<&SupportLine> {
        self.support_line(SupportId::TemporarySupport(ts))
    }

    /// All support lines in station order.
    pub fn support_lines(&self) -> impl Iterator<Item = &SupportLine> + '_ {
        self.support_order
            .iter()
            .filter_map(|key| self.supports.get(*key))
    }

    // =========================================================================
    // Girder lines
    // =========================================================================

    pub fn girder_line(&self, id: GirderLineId) -> Option<&GirderLine> {
        self.girder_index
            .get(&id)
            .and_then(|key| self.girder_lines.get(*key))
    }

    /// All girder lines, by group, then girder, then segment.
    pub fn girder_lines(&self) -> impl Iterator<Item = &GirderLine> + '_ {
        self.girder_order
            .iter()
            .filter_map(|key| self.girder_lines.get(*key))
    }

    pub fn girder_lines_in_group(
        &self,
        group: GroupIndex,
    ) -> impl Iterator<Item = &GirderLine> + '_ {
        self.girder_lines().filter(move |line| line.id.group == group)
    }

    /// Support, bearing and girder end points at both ends of a girder line.
    ///
    /// The start uses the ahead-face connection of its support and the end
    /// the back-face connection; a temporary support has one connection for
    /// both.
    pub fn girder_end_points(&self, id: GirderLineId) -> Result<GirderEndPoints> {
        let line = self.girder_line(id).ok_or(Error::UnknownGirderLine(id))?;
        let first = line.start();
        let last = line.end();
        let start_support = self
            .support_line(first.support)
            .ok_or(Error::UnknownSupport(first.support))?;
        let end_support = self
            .support_line(last.support)
            .ok_or(Error::UnknownSupport(last.support))?;

        let zero_leg = || Error::InvalidGirderLine {
            id,
            reason: "girder line has a zero-length end leg",
        };
        let into_start = line.start_tangent().ok_or_else(zero_leg)?;
        let into_end = line.end_tangent().ok_or_else(zero_leg)?;

        Ok(GirderEndPoints {
            start: girder_end(
                start_support,
                first.point,
                into_start,
                start_support.connection(Face::Ahead).unwrap_or_default(),
                self.tolerance,
            )?,
            end: girder_end(
                end_support,
                last.point,
                into_end,
                end_support.connection(Face::Back).unwrap_or_default(),
                self.tolerance,
            )?,
        })
    }
}
