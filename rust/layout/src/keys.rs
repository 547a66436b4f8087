// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena key types for the geometry model.
//!
//! Support lines and girder lines live in slot maps owned by the
//! [`BridgeGeometryModel`](crate::BridgeGeometryModel). Callers address them
//! by [`SupportId`](bridge_lite_core::SupportId) and
//! [`GirderLineId`](bridge_lite_core::GirderLineId); the keys stay internal
//! to the model's indices.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a support line (pier or temporary support centerline).
    pub struct SupportLineKey;

    /// Key for a girder line (one segment of one girder).
    pub struct GirderLineKey;
}
