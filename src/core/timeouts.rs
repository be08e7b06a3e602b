//! Per-call-site RPC timeouts (spec.md §5). Pinned here so every caller
//! uses the same budget instead of a scattered literal per call, as
//! `chord_node.py`'s individual `timeout=` arguments did.

use std::time::Duration;

pub const ROUTING_HOP: Duration = Duration::from_secs(5);
pub const MAINTENANCE_PROBE: Duration = Duration::from_secs(2);
pub const LIVENESS_PING: Duration = Duration::from_secs(1);
pub const REPLICA_FANOUT: Duration = Duration::from_secs(1);
pub const KEY_TRANSFER: Duration = Duration::from_secs(3);
pub const STATS_PING: Duration = Duration::from_millis(500);

pub const STABILIZE_PERIOD: Duration = Duration::from_secs(3);
pub const FIX_FINGERS_PERIOD: Duration = Duration::from_secs(1);
pub const INIT_GRACE_PERIOD: Duration = Duration::from_secs(5);
