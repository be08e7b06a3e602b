pub mod client;
pub mod config;
pub mod core;
pub mod node;
pub mod rpc;
pub mod server;

pub use core::{DhtError, DhtResult, NodeRef};
pub use node::ChordNode;
