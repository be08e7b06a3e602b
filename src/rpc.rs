//! RPC surface (spec.md §6), defined as a `tarpc` service. Any node must
//! be able to service any request; which node ends up handling a given
//! call is purely a routing decision made inside `crate::node`.

use serde::{Deserialize, Serialize};

use crate::core::{DataItem, NodeRef, RingId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub alive: bool,
    pub node_id: RingId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindSuccessorResponse {
    pub node: NodeRef,
    pub path: Vec<RingId>,
    pub hops: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub successor: Option<NodeRef>,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferKeysResponse {
    pub items: Vec<DataItem>,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutResponse {
    pub success: bool,
    pub message: String,
    pub version: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    pub found: bool,
    pub value: String,
    pub version: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStatsResponse {
    pub node_id: RingId,
    pub primary_keys: u64,
    pub replica_keys: u64,
    pub lookups: u64,
    pub avg_hops: f64,
    pub replication_factor: u32,
    pub alive_successors: u32,
    pub status: String,
}

#[tarpc::service]
pub trait NodeService {
    async fn ping_rpc() -> PingResponse;
    async fn find_successor_rpc(key_id: RingId) -> FindSuccessorResponse;
    async fn get_predecessor_rpc() -> Option<NodeRef>;
    async fn get_successor_rpc() -> NodeRef;
    async fn get_successor_list_rpc() -> Vec<NodeRef>;
    async fn notify_rpc(node: NodeRef) -> bool;
    async fn join_rpc(joining_node: NodeRef) -> JoinResponse;
    async fn transfer_keys_rpc(start_id: RingId, end_id: RingId, target: NodeRef) -> TransferKeysResponse;
    async fn put_rpc(key: String, value: String, is_replica: bool, version: u64) -> PutResponse;
    async fn sync_replica_rpc(key: String, value: String, version: u64, timestamp_ms: u64) -> bool;
    async fn get_rpc(key: String) -> GetResponse;
    async fn delete_rpc(key: String, is_replica: bool) -> DeleteResponse;
    async fn get_stats_rpc() -> GetStatsResponse;
}
