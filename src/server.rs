// SPDX-FileCopyrightText: 2022 DCsunset
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use futures::{future, StreamExt};
use log::{info, warn};
use tarpc::context;
use tarpc::server::{BaseChannel, Channel};
use tarpc::tokio_serde::formats::Bincode;

use crate::core::error::*;
use crate::node::maintenance::{fix_fingers_loop, initialization_gate, stabilize_loop};
use crate::node::{ChordNode, NodeServer};
use crate::rpc::NodeService;

pub struct ServerManager {
    handles: Vec<tokio::task::JoinHandle<()>>,
    pub tx: tokio::sync::watch::Sender<bool>,
}

impl ServerManager {
    /// Wait for the server to terminate
    pub async fn wait(self) -> DhtResult<()> {
        future::join_all(self.handles)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, tokio::task::JoinError>>()?;

        Ok(())
    }

    /// Stop the server gracefully
    pub async fn stop(self) -> DhtResult<()> {
        self.tx.send(true)?;
        self.wait().await
    }

    /// Simulate a crash-fail: abort every background task (accept loop and
    /// maintenance workers) immediately, without notifying any peer. Ring
    /// membership in spec.md §1 is crash-fail only — there is no graceful
    /// leave — so this, not `stop`, is what failure-recovery tests exercise.
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// Bring up a node: bind the RPC listener, start the maintenance workers
/// and, if `join` is given, attempt to join the ring through it. Mirrors
/// `chord_node.py`'s `serve()`, minus the argument-parsing/signal-handling
/// glue that is explicitly out of scope (spec.md §1).
pub async fn serve(
    host: String,
    port: u16,
    m: u32,
    replication_factor: usize,
    join: Option<String>,
) -> DhtResult<(Arc<ChordNode>, ServerManager)> {
    let node = ChordNode::new(&host, port, m, replication_factor);
    let listen_addr = format!("{host}:{port}");

    let mut listener = tarpc::serde_transport::tcp::listen(&listen_addr, Bincode::default).await?;
    listener.config_mut().max_frame_length(50 * 1024 * 1024);
    info!("node {}: listening on {listen_addr}", node.id());

    let (tx, mut rx) = tokio::sync::watch::channel(false);
    let accept_node = Arc::clone(&node);

    let accept_handle = tokio::spawn(async move {
        let serve_fut = listener
            .filter_map(|r| future::ready(r.ok()))
            .map(BaseChannel::with_defaults)
            .map(|channel| {
                let server = NodeServer::new(Arc::clone(&accept_node));
                channel.execute(server.serve()).for_each(|fut| {
                    tokio::spawn(fut);
                    future::ready(())
                })
            })
            .buffer_unordered(64)
            .for_each(|_| async {});

        tokio::select! {
            _ = serve_fut => {}
            _ = rx.changed() => {
                info!("server shutting down");
            }
        }
    });

    if let Some(join_addr) = join {
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        match attempt_join(&node, &join_addr).await {
            Ok(()) => info!("node {}: joined ring via {join_addr}", node.id()),
            Err(e) => warn!("node {}: join via {join_addr} failed: {e}", node.id()),
        }
    }

    let stabilize_handle = tokio::spawn(stabilize_loop(Arc::clone(&node)));
    let fix_fingers_handle = tokio::spawn(fix_fingers_loop(Arc::clone(&node)));
    let init_handle = tokio::spawn(initialization_gate(Arc::clone(&node)));

    let manager = ServerManager {
        handles: vec![accept_handle, stabilize_handle, fix_fingers_handle, init_handle],
        tx,
    };

    Ok((node, manager))
}

async fn attempt_join(node: &Arc<ChordNode>, join_addr: &str) -> DhtResult<()> {
    let client = crate::client::setup_client(join_addr).await?;
    let joining_node = node.self_ref_pub();

    let mut ctx = context::current();
    ctx.deadline = std::time::SystemTime::now() + crate::core::timeouts::ROUTING_HOP;
    let resp = client.join_rpc(ctx, joining_node).await?;

    if !resp.success {
        return Err(DhtError::JoinFailure {
            node: node.self_ref_pub(),
            message: resp.message,
        });
    }

    if let Some(old_successor) = resp.successor {
        node.adopt_successor(old_successor);
    }
    node.refresh_successor_list().await;
    Ok(())
}
