//! Routing table (C2): successor, successor list, predecessor, finger
//! table. The table itself is dumb storage; C3/C4 decide how to mutate it.

use serde::{Deserialize, Serialize};

use super::identifier::RingId;

/// Immutable reference to a peer. Equality and hashing are by identifier
/// only, matching spec.md's "equality is by identifier" rule: two refs for
/// the same node created at different times (e.g. before/after a rename)
/// must still compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: RingId,
    pub host: String,
    pub port: u16,
}

impl NodeRef {
    pub fn new(id: RingId, host: impl Into<String>, port: u16) -> Self {
        NodeRef {
            id,
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for NodeRef {}

impl std::hash::Hash for NodeRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// All per-node overlay state, meant to sit behind the single node mutex
/// (spec.md §5). Held as plain data; `ChordNode` in `crate::node` is the
/// thing that mutates it under lock and issues RPCs with the lock released.
pub struct RoutingState {
    pub me: NodeRef,
    pub successor: NodeRef,
    pub predecessor: Option<NodeRef>,
    pub successor_list: Vec<NodeRef>,
    pub finger_table: Vec<Option<NodeRef>>,
}

impl RoutingState {
    /// A brand new node starts as a ring of one: its own successor, no
    /// predecessor, an empty successor list and an unpopulated finger table
    /// of `m` entries.
    pub fn solo(me: NodeRef, m: u32) -> Self {
        let successor = me.clone();
        RoutingState {
            me,
            successor,
            predecessor: None,
            successor_list: Vec::new(),
            finger_table: vec![None; m as usize],
        }
    }
}
