// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Support resolution order.
//!
//! Piers and independent temporary supports are laid out from their own
//! spacing. A temporary support under a continuous segment takes its width
//! from the supports bounding that segment, which must therefore be laid out
//! first. The order is a topological sort over those dependencies, stable
//! with respect to description order.

use std::collections::VecDeque;

use bridge_lite_core::{BridgeDescription, SupportId, TemporarySupportKind};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// Every support of the bridge, each after the supports it depends on.
pub fn resolution_order(description: &BridgeDescription) -> Result<Vec<SupportId>> {
    let nodes: Vec<SupportId> = description
        .pier_ids()
        .map(SupportId::from)
        .chain(description.temporary_support_ids().map(SupportId::from))
        .collect();

    let mut in_degree: FxHashMap<SupportId, usize> = nodes.iter().map(|&id| (id, 0)).collect();
    let mut dependents: FxHashMap<SupportId, Vec<SupportId>> = FxHashMap::default();

    for (index, ts) in description.temporary_supports.iter().enumerate() {
        let TemporarySupportKind::ContinuousSegment { segment } = ts.kind else {
            continue;
        };
        let id = SupportId::temporary_support(index);
        let (start, end) =
            description
                .segment_ends(segment)
                .map_err(|e| Error::UnresolvableSplice {
                    support: id,
                    reason: e.to_string(),
                })?;
        for flank in [start, end] {
            if !in_degree.contains_key(&flank) {
                return Err(Error::UnresolvableSplice {
                    support: id,
                    reason: format!("segment end {flank} does not exist"),
                });
            }
            dependents.entry(flank).or_default().push(id);
            *in_degree.entry(id).or_default() += 1;
        }
    }

    let mut ready: VecDeque<SupportId> = nodes
        .iter()
        .copied()
        .filter(|id| in_degree.get(id) == Some(&0))
        .collect();
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(id) = ready.pop_front() {
        order.push(id);
        for dependent in dependents.get(&id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(*dependent);
                }
            }
        }
    }

    if order.len() < nodes.len() {
        let stuck: Vec<SupportId> = nodes
            .into_iter()
            .filter(|id| in_degree.get(id).is_some_and(|d| *d > 0))
            .collect();
        return Err(Error::ResolutionCycle(stuck));
    }

    tracing::debug!(supports = order.len(), "Computed support resolution order");
    Ok(order)
}
