use thiserror::Error;
use std::result::Result;

use super::routing::NodeRef;

#[derive(Error, Debug)]
pub enum DhtError {
    #[error("no live successor for key digest {0}")]
    RoutingDeadEnd(u64),
    #[error("key {0:?} not found")]
    NotFound(String),
    #[error("fail to join node {node:?}: {message}")]
    JoinFailure { node: NodeRef, message: String },
    #[error("rpc error: {0}")]
    RpcError(#[from] tarpc::client::RpcError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("call to {0:?} timed out")]
    Timeout(NodeRef),
    #[error("background task panicked: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("shutdown signal could not be delivered: {0}")]
    Shutdown(#[from] tokio::sync::watch::error::SendError<bool>),
}

pub type DhtResult<T> = Result<T, DhtError>;
