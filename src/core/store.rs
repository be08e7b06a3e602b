//! Key-value state (C6, data model only): the two stores and the items
//! they hold. Replication/placement logic lives in `crate::node`.

use serde::{Deserialize, Serialize};

/// One versioned value. `version` is a monotonic per-key counter assigned
/// by the primary; `timestamp` is milliseconds since epoch, recorded for
/// diagnostics only (it plays no role in conflict resolution — see
/// spec.md §4.6 on `SyncReplica`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataItem {
    pub key: String,
    pub value: String,
    pub version: u64,
    pub timestamp_ms: u64,
}

pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_millis() as u64
}
