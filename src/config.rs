//! CLI surface (spec.md §6). Argument parsing itself is the excluded
//! "process-level lifecycle glue" — these structs only describe the shape
//! of the inputs; `src/bin/*` just binds them to `crate::server`/`client`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chord-node", about = "Chord DHT node")]
pub struct NodeArgs {
    /// Port to listen on
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "localhost")]
    pub address: String,

    /// Join an existing ring via this peer (format: host:port)
    #[arg(long)]
    pub join: Option<String>,

    /// Replication factor
    #[arg(long, default_value_t = 3)]
    pub replication: usize,

    /// Identifier space width in bits (ring modulus is 2^bits)
    #[arg(long, default_value_t = 32)]
    pub bits: u32,
}

#[derive(Parser, Debug)]
#[command(name = "chord-client", about = "Chord DHT client")]
pub struct ClientArgs {
    /// Node to connect to (format: host:port)
    pub target: String,

    #[command(subcommand)]
    pub command: ClientCommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum ClientCommand {
    Put { key: String, value: String },
    Get { key: String },
    Delete { key: String },
    Find { id: u64 },
    Stats,
    Ping,
}
