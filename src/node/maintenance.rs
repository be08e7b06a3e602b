//! C4: the two long-running maintenance workers plus the initialization
//! gate (spec.md §4.4). Spawned once per node by `crate::server::serve`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use tarpc::context;

use super::ChordNode;
use crate::core::{in_range, timeouts};

/// `Stabilize` (spec.md §4.4, period ~3s).
pub async fn stabilize_loop(node: Arc<ChordNode>) {
    loop {
        tokio::time::sleep(timeouts::STABILIZE_PERIOD).await;
        if let Err(e) = stabilize_once(&node).await {
            debug!("node {}: stabilize tick failed: {e}", node.id());
        }
    }
}

async fn stabilize_once(node: &Arc<ChordNode>) -> Result<(), String> {
    let successor = node.get_successor();
    if successor.id == node.id() {
        return Ok(());
    }

    if !node.is_alive(&successor, timeouts::MAINTENANCE_PROBE).await {
        info!("node {}: successor {} failed, finding new successor", node.id(), successor.id);
        node.handle_successor_failure().await;
        node.promote_replicas_on_failure().await;
        return Ok(());
    }

    let client = node
        .get_or_connect(&successor)
        .await
        .map_err(|e| e.to_string())?;

    let mut ctx = context::current();
    ctx.deadline = std::time::SystemTime::now() + timeouts::MAINTENANCE_PROBE;
    let predecessor = client
        .get_predecessor_rpc(ctx)
        .await
        .map_err(|e| e.to_string())?;

    if let Some(p) = predecessor {
        if p.id != node.id()
            && in_range(p.id, node.id(), successor.id, false)
            && node.is_alive(&p, timeouts::MAINTENANCE_PROBE).await
        {
            node.set_successor(p.clone());
            info!("node {}: updated successor to {}", node.id(), p.id);
        }
    }

    let current_successor = node.get_successor();
    if let Ok(client) = node.get_or_connect(&current_successor).await {
        let mut ctx = context::current();
        ctx.deadline = std::time::SystemTime::now() + timeouts::MAINTENANCE_PROBE;
        let _ = client.notify_rpc(ctx, node.self_ref_pub()).await;
    }

    node.refresh_successor_list().await;
    Ok(())
}

/// `Fix-fingers` (spec.md §4.4, period ~1s), round-robin over `0..m`.
pub async fn fix_fingers_loop(node: Arc<ChordNode>) {
    let next = AtomicUsize::new(0);
    loop {
        tokio::time::sleep(timeouts::FIX_FINGERS_PERIOD).await;
        let i = next.fetch_add(1, Ordering::Relaxed) % node.m as usize;
        node.fix_finger(i).await;
    }
}

/// The initialization gate: replication fan-out is suppressed until the
/// successor list has had a chance to settle (spec.md §4.4).
pub async fn initialization_gate(node: Arc<ChordNode>) {
    tokio::time::sleep(timeouts::INIT_GRACE_PERIOD).await;
    node.mark_initialized_pub();
}
