//! The Chord node itself: C2 (routing table) through C6 (key-value state
//! and replication) live here. C1 (identifier arithmetic) is `crate::core`;
//! C4's periodic loops are `crate::node::maintenance`.

pub mod maintenance;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info, warn};
use tarpc::context;
use tokio::sync::Mutex as AsyncMutex;

use crate::client::setup_client;
use crate::core::store::now_ms;
use crate::core::{hash, in_range, timeouts, DataItem, DhtResult, NodeRef, RingId, RoutingState};
use crate::core::stats::Stats;
use crate::rpc::{
    DeleteResponse, FindSuccessorResponse, GetResponse, GetStatsResponse, JoinResponse,
    NodeServiceClient, PutResponse, TransferKeysResponse,
};

struct NodeState {
    routing: RoutingState,
    primary_store: HashMap<String, DataItem>,
    replica_store: HashMap<String, DataItem>,
}

/// Shared node state. Cheap to clone (it is an `Arc`); every incoming RPC
/// gets its own clone of `NodeServer`, all pointing at the same `ChordNode`.
pub struct ChordNode {
    pub m: u32,
    pub replication_factor: usize,
    state: Mutex<NodeState>,
    stats: Stats,
    is_initialized: AtomicBool,
    connections: AsyncMutex<HashMap<RingId, NodeServiceClient>>,
}

impl ChordNode {
    pub fn new(host: &str, port: u16, m: u32, replication_factor: usize) -> Arc<Self> {
        let me = crate::core::construct_node_ref(host, port, m);
        info!("node {} created at {}:{}", me.id, host, port);
        let routing = RoutingState::solo(me, m);
        Arc::new(ChordNode {
            m,
            replication_factor,
            state: Mutex::new(NodeState {
                routing,
                primary_store: HashMap::new(),
                replica_store: HashMap::new(),
            }),
            stats: Stats::new(),
            is_initialized: AtomicBool::new(false),
            connections: AsyncMutex::new(HashMap::new()),
        })
    }

    pub fn id(&self) -> RingId {
        self.state.lock().unwrap().routing.me.id
    }

    fn self_ref(&self) -> NodeRef {
        self.state.lock().unwrap().routing.me.clone()
    }

    fn key_hash(&self, key: &str) -> RingId {
        hash(key, self.m)
    }

    fn mark_initialized(&self) {
        self.is_initialized.store(true, Ordering::SeqCst);
        info!("node {} initialization complete", self.id());
    }

    fn is_initialized(&self) -> bool {
        self.is_initialized.load(Ordering::SeqCst)
    }

    /// Seed a node's pointers after a successful `Join` RPC to a bootstrap
    /// peer, mirroring `serve()`'s post-join wiring in the original.
    pub fn adopt_successor(&self, successor: NodeRef) {
        let mut st = self.state.lock().unwrap();
        st.routing.successor = successor;
    }

    async fn get_or_connect(&self, peer: &NodeRef) -> DhtResult<NodeServiceClient> {
        let mut conns = self.connections.lock().await;
        if let Some(c) = conns.get(&peer.id) {
            return Ok(c.clone());
        }
        let client = setup_client(&peer.addr()).await?;
        conns.insert(peer.id, client.clone());
        Ok(client)
    }

    async fn drop_connection(&self, peer_id: RingId) {
        self.connections.lock().await.remove(&peer_id);
    }

    async fn is_alive(&self, peer: &NodeRef, timeout: Duration) -> bool {
        if peer.id == self.id() {
            return true;
        }
        let Ok(client) = self.get_or_connect(peer).await else {
            return false;
        };
        let mut ctx = context::current();
        ctx.deadline = std::time::SystemTime::now() + timeout;
        match client.ping_rpc(ctx).await {
            Ok(resp) => resp.alive,
            Err(_) => {
                self.drop_connection(peer.id).await;
                false
            }
        }
    }

    // ---- C3: lookup engine ----------------------------------------------

    async fn closest_preceding_finger(&self, key_id: RingId) -> NodeRef {
        let (me, fingers, successor_list) = {
            let st = self.state.lock().unwrap();
            (
                st.routing.me.clone(),
                st.routing.finger_table.clone(),
                st.routing.successor_list.clone(),
            )
        };

        for finger in fingers.iter().rev().flatten() {
            if finger.id != me.id
                && in_range(finger.id, me.id, key_id, false)
                && self.is_alive(finger, timeouts::LIVENESS_PING).await
            {
                return finger.clone();
            }
        }
        for succ in &successor_list {
            if succ.id != me.id
                && in_range(succ.id, me.id, key_id, false)
                && self.is_alive(succ, timeouts::LIVENESS_PING).await
            {
                return succ.clone();
            }
        }
        me
    }

    /// `FindSuccessor` (spec.md §4.3). Shared by the RPC handler and every
    /// internal caller (`put`, `get`); stats are recorded here, once per
    /// node that touches the request, independent of how deep the
    /// remaining forwarding chain turns out to be (Open Question in
    /// spec.md §9 — see DESIGN.md).
    pub async fn find_successor(&self, key_id: RingId) -> FindSuccessorResponse {
        let key_id = crate::core::identifier::modulo(key_id, self.m);
        self.stats.record_lookup_start();

        let (me, successor) = {
            let st = self.state.lock().unwrap();
            (st.routing.me.clone(), st.routing.successor.clone())
        };

        if in_range(key_id, me.id, successor.id, true) {
            self.stats.record_lookup_hops(1);
            return FindSuccessorResponse {
                node: successor,
                path: vec![me.id],
                hops: 1,
            };
        }

        let next = self.closest_preceding_finger(key_id).await;
        if next.id == me.id {
            self.stats.record_lookup_hops(1);
            return FindSuccessorResponse {
                node: successor,
                path: vec![me.id],
                hops: 1,
            };
        }

        match self.get_or_connect(&next).await {
            Ok(client) => {
                let mut ctx = context::current();
                ctx.deadline = std::time::SystemTime::now() + timeouts::ROUTING_HOP;
                match client.find_successor_rpc(ctx, key_id).await {
                    Ok(mut resp) => {
                        resp.path.insert(0, me.id);
                        resp.hops += 1;
                        self.stats.record_lookup_hops(1);
                        resp
                    }
                    Err(e) => {
                        debug!("node {}: forward to {} failed: {e}", me.id, next.id);
                        self.drop_connection(next.id).await;
                        self.stats.record_lookup_hops(1);
                        FindSuccessorResponse {
                            node: successor,
                            path: vec![me.id],
                            hops: 1,
                        }
                    }
                }
            }
            Err(e) => {
                debug!("node {}: could not connect to {}: {e}", me.id, next.id);
                self.stats.record_lookup_hops(1);
                FindSuccessorResponse {
                    node: successor,
                    path: vec![me.id],
                    hops: 1,
                }
            }
        }
    }

    // ---- C2/C3 plain accessors --------------------------------------

    pub fn get_predecessor(&self) -> Option<NodeRef> {
        self.state.lock().unwrap().routing.predecessor.clone()
    }

    pub fn get_successor(&self) -> NodeRef {
        self.state.lock().unwrap().routing.successor.clone()
    }

    pub fn get_successor_list(&self) -> Vec<NodeRef> {
        self.state.lock().unwrap().routing.successor_list.clone()
    }

    fn owns_key(&self, st: &NodeState, key_hash: RingId) -> bool {
        match &st.routing.predecessor {
            None => true,
            Some(p) => in_range(key_hash, p.id, st.routing.me.id, true),
        }
    }

    // ---- C5: join / notify / transfer ------------------------------------

    /// `Notify(n)` (spec.md §4.5). Returns promptly; key hand-off to a new
    /// predecessor, and promotion of replica data that now falls under an
    /// expanded owned range, are handed to a background task.
    ///
    /// In addition to the strict `(predecessor, self)` arc test spec.md §4.5
    /// names, a candidate is also accepted when the current predecessor no
    /// longer answers a liveness probe: otherwise a crashed predecessor can
    /// never be replaced, since no later candidate for that ring position
    /// will ever fall inside an arc anchored on a dead node (see DESIGN.md).
    pub async fn notify(self: &Arc<Self>, candidate: NodeRef) -> bool {
        let current_predecessor = {
            let st = self.state.lock().unwrap();
            st.routing.predecessor.clone()
        };

        let mut replacing_dead_predecessor = false;
        let should_update = match current_predecessor.as_ref() {
            None => true,
            Some(p) if p.id == candidate.id => false,
            Some(p) => {
                let me = self.self_ref();
                if in_range(candidate.id, p.id, me.id, false) {
                    true
                } else if !self.is_alive(p, timeouts::LIVENESS_PING).await {
                    replacing_dead_predecessor = true;
                    true
                } else {
                    false
                }
            }
        };
        if !should_update {
            return true;
        }

        {
            let mut st = self.state.lock().unwrap();
            st.routing.predecessor = Some(candidate.clone());
        }
        info!("node {}: predecessor set to {}", self.id(), candidate.id);

        if replacing_dead_predecessor {
            let this = Arc::clone(self);
            tokio::spawn(async move {
                this.promote_replicas_on_failure().await;
            });
        } else if let Some(old) = current_predecessor {
            if old.id != candidate.id {
                let this = Arc::clone(self);
                tokio::spawn(async move {
                    this.redistribute_keys_on_join(old, candidate).await;
                });
            }
        }
        true
    }

    /// Keys in `(old_predecessor.id, new_predecessor.id]` now belong to the
    /// new predecessor; push them over and drop the local copies.
    async fn redistribute_keys_on_join(&self, old_predecessor: NodeRef, new_node: NodeRef) {
        let keys_to_transfer: Vec<String> = {
            let st = self.state.lock().unwrap();
            st.primary_store
                .keys()
                .filter(|k| {
                    let kh = self.key_hash(k);
                    in_range(kh, old_predecessor.id, new_node.id, true)
                })
                .cloned()
                .collect()
        };
        if keys_to_transfer.is_empty() {
            return;
        }
        info!(
            "node {}: transferring {} keys to new node {}",
            self.id(),
            keys_to_transfer.len(),
            new_node.id
        );
        self.transfer_keys_batch(&keys_to_transfer, &new_node).await;
    }

    async fn transfer_keys_batch(&self, keys: &[String], target: &NodeRef) {
        let Ok(client) = self.get_or_connect(target).await else {
            warn!("node {}: key transfer to {} failed: no connection", self.id(), target.id);
            return;
        };
        for key in keys {
            let item = {
                let st = self.state.lock().unwrap();
                st.primary_store.get(key).cloned()
            };
            let Some(item) = item else { continue };
            let mut ctx = context::current();
            ctx.deadline = std::time::SystemTime::now() + timeouts::KEY_TRANSFER;
            match client
                .put_rpc(ctx, item.key.clone(), item.value.clone(), false, item.version)
                .await
            {
                Ok(_) => {
                    self.state.lock().unwrap().primary_store.remove(key);
                }
                Err(e) => {
                    warn!("node {}: key transfer of {key:?} failed: {e}", self.id());
                }
            }
        }
    }

    /// `Join(joining_node)` handler (spec.md §4.5).
    pub async fn handle_join(self: &Arc<Self>, joining_node: NodeRef) -> JoinResponse {
        info!("node {}: processing join from {}", self.id(), joining_node.id);

        let splice = {
            let st = self.state.lock().unwrap();
            st.routing.successor.id == st.routing.me.id
                || in_range(joining_node.id, st.routing.me.id, st.routing.successor.id, false)
        };

        if splice {
            let old_successor = {
                let mut st = self.state.lock().unwrap();
                let old = st.routing.successor.clone();
                st.routing.successor = joining_node.clone();
                old
            };
            let new_list = self.build_successor_list().await;
            self.state.lock().unwrap().routing.successor_list = new_list;
            return JoinResponse {
                successor: Some(old_successor),
                success: true,
                message: "joined successfully".into(),
            };
        }

        let successor = self.get_successor();
        match self.get_or_connect(&successor).await {
            Ok(client) => {
                let mut ctx = context::current();
                ctx.deadline = std::time::SystemTime::now() + timeouts::ROUTING_HOP;
                match client.join_rpc(ctx, joining_node).await {
                    Ok(resp) => resp,
                    Err(e) => JoinResponse {
                        successor: None,
                        success: false,
                        message: format!("join forward failed: {e}"),
                    },
                }
            }
            Err(e) => JoinResponse {
                successor: None,
                success: false,
                message: format!("join forward failed: {e}"),
            },
        }
    }

    /// `TransferKeys(start, end, target)` (spec.md §4.5) — bulk hand-off,
    /// used alongside the incremental `Notify`-driven path.
    pub fn handle_transfer_keys(&self, start: RingId, end: RingId, _target: NodeRef) -> TransferKeysResponse {
        let mut st = self.state.lock().unwrap();
        let keys: Vec<String> = st
            .primary_store
            .keys()
            .filter(|k| in_range(self.key_hash(k), start, end, true))
            .cloned()
            .collect();
        let mut items = Vec::with_capacity(keys.len());
        for k in keys {
            if let Some(item) = st.primary_store.remove(&k) {
                items.push(item);
            }
        }
        let n = items.len();
        TransferKeysResponse {
            items,
            success: true,
            message: format!("transferred {n} keys"),
        }
    }

    // ---- C4: successor-list maintenance (shared with maintenance.rs) ----

    /// Rebuild the successor list by walking clockwise via `GetSuccessor`
    /// RPCs (spec.md §4.4). Never touches the node mutex while awaiting.
    async fn build_successor_list(&self) -> Vec<NodeRef> {
        let me = self.self_ref();
        let mut current = self.get_successor();
        if current.id == me.id {
            return Vec::new();
        }

        let mut successors = Vec::new();
        let mut seen = std::collections::HashSet::new();
        seen.insert(me.id);

        let max_attempts = self.replication_factor * 2;
        for _ in 0..max_attempts {
            if successors.len() >= self.replication_factor.saturating_sub(1) {
                break;
            }
            if seen.contains(&current.id) {
                break;
            }
            if !self.is_alive(&current, timeouts::MAINTENANCE_PROBE).await {
                break;
            }
            successors.push(current.clone());
            seen.insert(current.id);

            let Ok(client) = self.get_or_connect(&current).await else {
                break;
            };
            let mut ctx = context::current();
            ctx.deadline = std::time::SystemTime::now() + timeouts::MAINTENANCE_PROBE;
            match client.get_successor_rpc(ctx).await {
                Ok(next) => {
                    if seen.contains(&next.id) {
                        break;
                    }
                    current = next;
                }
                Err(_) => break,
            }
        }
        successors
    }

    async fn replicate_put(&self, key: &str, value: &str, version: u64, timestamp_ms: u64) -> usize {
        let targets: Vec<NodeRef> = {
            let st = self.state.lock().unwrap();
            st.routing
                .successor_list
                .iter()
                .take(self.replication_factor.saturating_sub(1))
                .filter(|n| n.id != st.routing.me.id)
                .cloned()
                .collect()
        };

        let mut acked = 0;
        for target in targets {
            let Ok(client) = self.get_or_connect(&target).await else {
                continue;
            };
            let mut ctx = context::current();
            ctx.deadline = std::time::SystemTime::now() + timeouts::REPLICA_FANOUT;
            match client
                .sync_replica_rpc(ctx, key.to_string(), value.to_string(), version, timestamp_ms)
                .await
            {
                Ok(true) => {
                    acked += 1;
                    debug!("node {}: replicated {key:?} v{version} to {}", self.id(), target.id);
                }
                _ => {}
            }
        }
        acked
    }

    // ---- C6: key-value state and replication -----------------------------

    pub async fn put(&self, key: String, value: String, is_replica: bool, version: u64) -> PutResponse {
        self.stats.record_operation();
        let key_hash = self.key_hash(&key);

        let responsible = {
            let st = self.state.lock().unwrap();
            self.owns_key(&st, key_hash)
        };

        if !responsible && !is_replica {
            let target = self.find_successor(key_hash).await.node;
            if target.id == self.id() {
                // fell through to ourselves (routing failure fallback); store locally.
            } else {
                return match self.get_or_connect(&target).await {
                    Ok(client) => {
                        let mut ctx = context::current();
                        ctx.deadline = std::time::SystemTime::now() + timeouts::ROUTING_HOP;
                        match client.put_rpc(ctx, key, value, is_replica, version).await {
                            Ok(resp) => resp,
                            Err(e) => PutResponse {
                                success: false,
                                message: format!("Routing failed: {e}"),
                                version: 0,
                            },
                        }
                    }
                    Err(e) => PutResponse {
                        success: false,
                        message: format!("Routing failed: {e}"),
                        version: 0,
                    },
                };
            }
        }

        let timestamp_ms = now_ms();

        if is_replica {
            let version = if version == 0 { 1 } else { version };
            let item = DataItem {
                key: key.clone(),
                value,
                version,
                timestamp_ms,
            };
            self.state.lock().unwrap().replica_store.insert(key, item);
            return PutResponse {
                success: true,
                message: "replica stored".into(),
                version,
            };
        }

        let version = {
            let st = self.state.lock().unwrap();
            match st.primary_store.get(&key) {
                Some(existing) => existing.version + 1,
                None => 1,
            }
        };
        let item = DataItem {
            key: key.clone(),
            value: value.clone(),
            version,
            timestamp_ms,
        };
        self.state.lock().unwrap().primary_store.insert(key.clone(), item);
        info!("node {}: stored primary {key:?} v{version}", self.id());

        let successful_replicas = if self.is_initialized() {
            self.replicate_put(&key, &value, version, timestamp_ms).await
        } else {
            0
        };

        PutResponse {
            success: true,
            message: format!("Stored with {successful_replicas} replicas"),
            version,
        }
    }

    /// `SyncReplica` (spec.md §4.6): unconditional overwrite, last-writer
    /// wins by arrival order.
    pub fn sync_replica(&self, key: String, value: String, version: u64, timestamp_ms: u64) -> bool {
        let version = if version == 0 { 1 } else { version };
        let item = DataItem {
            key: key.clone(),
            value,
            version,
            timestamp_ms,
        };
        self.state.lock().unwrap().replica_store.insert(key, item);
        true
    }

    /// `Get(key)` (spec.md §4.6).
    pub async fn get(&self, key: String) -> GetResponse {
        self.stats.record_operation();

        {
            let st = self.state.lock().unwrap();
            if let Some(item) = st.primary_store.get(&key).or_else(|| st.replica_store.get(&key)) {
                return GetResponse {
                    found: true,
                    value: item.value.clone(),
                    version: item.version,
                };
            }
        }

        let successor_list = self.get_successor_list();
        let me_id = self.id();
        for succ in &successor_list {
            if succ.id == me_id {
                continue;
            }
            let Ok(client) = self.get_or_connect(succ).await else {
                continue;
            };
            let mut ctx = context::current();
            ctx.deadline = std::time::SystemTime::now() + timeouts::MAINTENANCE_PROBE;
            if let Ok(resp) = client.get_rpc(ctx, key.clone()).await {
                if resp.found {
                    return resp;
                }
            }
        }

        let key_hash = self.key_hash(&key);
        let responsible = {
            let st = self.state.lock().unwrap();
            self.owns_key(&st, key_hash)
        };
        if !responsible {
            let target = self.find_successor(key_hash).await.node;
            if target.id != me_id {
                if let Ok(client) = self.get_or_connect(&target).await {
                    let mut ctx = context::current();
                    ctx.deadline = std::time::SystemTime::now() + timeouts::ROUTING_HOP;
                    if let Ok(resp) = client.get_rpc(ctx, key.clone()).await {
                        return resp;
                    }
                }
            }
        }

        GetResponse {
            found: false,
            value: String::new(),
            version: 0,
        }
    }

    /// `Delete(key, is_replica)` (spec.md §4.6).
    pub async fn delete(&self, key: String, is_replica: bool) -> DeleteResponse {
        self.stats.record_operation();

        if is_replica {
            let removed = self.state.lock().unwrap().replica_store.remove(&key).is_some();
            return DeleteResponse {
                success: removed,
                message: if removed { "deleted".into() } else { "not found".into() },
            };
        }

        let removed = self.state.lock().unwrap().primary_store.remove(&key).is_some();
        if removed {
            let successor_list = self.get_successor_list();
            let me_id = self.id();
            for succ in successor_list {
                if succ.id == me_id {
                    continue;
                }
                if let Ok(client) = self.get_or_connect(&succ).await {
                    let mut ctx = context::current();
                    ctx.deadline = std::time::SystemTime::now() + timeouts::MAINTENANCE_PROBE;
                    let _ = client.delete_rpc(ctx, key.clone(), true).await;
                }
            }
        }

        DeleteResponse {
            success: removed,
            message: if removed { "deleted".into() } else { "not found".into() },
        }
    }

    /// `GetStats` (spec.md §4.6).
    pub async fn get_stats(&self) -> GetStatsResponse {
        let (node_id, primary_keys, replica_keys, successor_list) = {
            let st = self.state.lock().unwrap();
            (
                st.routing.me.id,
                st.primary_store.len() as u64,
                st.replica_store.len() as u64,
                st.routing.successor_list.clone(),
            )
        };

        let mut alive_successors = 0u32;
        for succ in &successor_list {
            if self.is_alive(succ, timeouts::STATS_PING).await {
                alive_successors += 1;
            }
        }

        GetStatsResponse {
            node_id,
            primary_keys,
            replica_keys,
            lookups: self.stats.lookup_count(),
            avg_hops: self.stats.avg_hops(),
            replication_factor: self.replication_factor as u32,
            alive_successors,
            status: "active".into(),
        }
    }

    // ---- C4: failure detection / recovery --------------------------------

    /// Replace a dead successor with the first live entry in the successor
    /// list (spec.md §4.4's `HandleSuccessorFailure`).
    pub async fn handle_successor_failure(&self) {
        let me = self.self_ref();
        let candidates = self.get_successor_list();

        for candidate in &candidates {
            if candidate.id != me.id && self.is_alive(candidate, timeouts::MAINTENANCE_PROBE).await {
                self.state.lock().unwrap().routing.successor = candidate.clone();
                info!("node {}: switched to backup successor {}", me.id, candidate.id);
                let new_list = self.build_successor_list().await;
                self.state.lock().unwrap().routing.successor_list = new_list;
                return;
            }
        }

        let mut st = self.state.lock().unwrap();
        st.routing.successor = me.clone();
        st.routing.successor_list = Vec::new();
        warn!("node {}: no live successor found, became own successor", me.id);
    }

    /// Promote replicas that now fall under this node's ownership after a
    /// predecessor/successor failure (spec.md §4.4).
    pub async fn promote_replicas_on_failure(&self) {
        let promoted: Vec<DataItem> = {
            let mut st = self.state.lock().unwrap();
            let predecessor = st.routing.predecessor.clone();
            let me_id = st.routing.me.id;
            let Some(predecessor) = predecessor else {
                return;
            };
            let keys: Vec<String> = st
                .replica_store
                .keys()
                .filter(|k| in_range(hash(k, self.m), predecessor.id, me_id, true))
                .cloned()
                .collect();
            let mut promoted = Vec::with_capacity(keys.len());
            for key in keys {
                if let Some(item) = st.replica_store.remove(&key) {
                    info!("node {}: promoted replica {key:?} to primary", me_id);
                    st.primary_store.insert(key, item.clone());
                    promoted.push(item);
                }
            }
            promoted
        };

        for item in promoted {
            self.replicate_put(&item.key, &item.value, item.version, item.timestamp_ms)
                .await;
        }
    }

    // ---- accessors used by maintenance.rs ---------------------------------

    pub(crate) fn self_ref_pub(&self) -> NodeRef {
        self.self_ref()
    }

    pub(crate) fn set_successor(&self, successor: NodeRef) {
        self.state.lock().unwrap().routing.successor = successor;
    }

    pub(crate) fn mark_initialized_pub(&self) {
        self.mark_initialized();
    }

    pub(crate) async fn refresh_successor_list(&self) {
        let new_list = self.build_successor_list().await;
        self.state.lock().unwrap().routing.successor_list = new_list;
    }

    pub(crate) async fn fix_finger(&self, index: usize) {
        let start = {
            let st = self.state.lock().unwrap();
            crate::core::identifier::modulo(st.routing.me.id.wrapping_add(1u64 << index.min(63)), self.m)
        };
        let resp = self.find_successor(start).await;
        let mut st = self.state.lock().unwrap();
        if index < st.routing.finger_table.len() {
            st.routing.finger_table[index] = Some(resp.node);
        }
    }
}

/// The `tarpc` service impl. Thin dispatch layer: every handler just
/// forwards to the matching `ChordNode` method under an `Arc` clone, so
/// concurrent RPC workers all share the one node's state.
#[derive(Clone)]
pub struct NodeServer(pub Arc<ChordNode>);

impl NodeServer {
    pub fn new(node: Arc<ChordNode>) -> Self {
        NodeServer(node)
    }
}

#[tarpc::server]
impl crate::rpc::NodeService for NodeServer {
    async fn ping_rpc(self, _: context::Context) -> crate::rpc::PingResponse {
        crate::rpc::PingResponse {
            alive: true,
            node_id: self.0.id(),
        }
    }

    async fn find_successor_rpc(self, _: context::Context, key_id: RingId) -> FindSuccessorResponse {
        self.0.find_successor(key_id).await
    }

    async fn get_predecessor_rpc(self, _: context::Context) -> Option<NodeRef> {
        self.0.get_predecessor()
    }

    async fn get_successor_rpc(self, _: context::Context) -> NodeRef {
        self.0.get_successor()
    }

    async fn get_successor_list_rpc(self, _: context::Context) -> Vec<NodeRef> {
        self.0.get_successor_list()
    }

    async fn notify_rpc(self, _: context::Context, node: NodeRef) -> bool {
        self.0.notify(node).await
    }

    async fn join_rpc(self, _: context::Context, joining_node: NodeRef) -> JoinResponse {
        self.0.handle_join(joining_node).await
    }

    async fn transfer_keys_rpc(
        self,
        _: context::Context,
        start_id: RingId,
        end_id: RingId,
        target: NodeRef,
    ) -> TransferKeysResponse {
        self.0.handle_transfer_keys(start_id, end_id, target)
    }

    async fn put_rpc(
        self,
        _: context::Context,
        key: String,
        value: String,
        is_replica: bool,
        version: u64,
    ) -> PutResponse {
        self.0.put(key, value, is_replica, version).await
    }

    async fn sync_replica_rpc(
        self,
        _: context::Context,
        key: String,
        value: String,
        version: u64,
        timestamp_ms: u64,
    ) -> bool {
        self.0.sync_replica(key, value, version, timestamp_ms)
    }

    async fn get_rpc(self, _: context::Context, key: String) -> GetResponse {
        self.0.get(key).await
    }

    async fn delete_rpc(self, _: context::Context, key: String, is_replica: bool) -> DeleteResponse {
        self.0.delete(key, is_replica).await
    }

    async fn get_stats_rpc(self, _: context::Context) -> GetStatsResponse {
        self.0.get_stats().await
    }
}
