// SPDX-FileCopyrightText: 2022 DCsunset
//
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod error;
pub mod identifier;
pub mod routing;
pub mod stats;
pub mod store;
pub mod timeouts;

pub use error::*;
pub use identifier::{hash, in_range, RingId};
pub use routing::{NodeRef, RoutingState};
pub use store::DataItem;

/// Build the `NodeRef` a node advertises for itself, given its `m`.
pub fn construct_node_ref(host: &str, port: u16, m: u32) -> NodeRef {
    let key = format!("{host}:{port}");
    NodeRef::new(hash(&key, m), host, port)
}
