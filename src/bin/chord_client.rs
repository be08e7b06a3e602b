use clap::Parser;
use tarpc::context;

use chorddht::config::{ClientArgs, ClientCommand};
use chorddht::core::timeouts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ClientArgs::parse();
    let client = chorddht::client::setup_client(&args.target).await?;

    let mut ctx = context::current();
    ctx.deadline = std::time::SystemTime::now() + timeouts::ROUTING_HOP;

    match args.command {
        ClientCommand::Put { key, value } => {
            let resp = client.put_rpc(ctx, key, value, false, 0).await?;
            println!("{}: {}", resp.success, resp.message);
            std::process::exit(if resp.success { 0 } else { 1 });
        }
        ClientCommand::Get { key } => {
            let resp = client.get_rpc(ctx, key).await?;
            if resp.found {
                println!("{} (v{})", resp.value, resp.version);
                std::process::exit(0);
            } else {
                println!("not found");
                std::process::exit(1);
            }
        }
        ClientCommand::Delete { key } => {
            let resp = client.delete_rpc(ctx, key, false).await?;
            println!("{}: {}", resp.success, resp.message);
            std::process::exit(if resp.success { 0 } else { 1 });
        }
        ClientCommand::Find { id } => {
            let resp = client.find_successor_rpc(ctx, id).await?;
            println!("owner={} hops={} path={:?}", resp.node.id, resp.hops, resp.path);
            std::process::exit(0);
        }
        ClientCommand::Stats => {
            let resp = client.get_stats_rpc(ctx).await?;
            println!(
                "node={} primary_keys={} replica_keys={} lookups={} avg_hops={:.2} replication_factor={} alive_successors={} status={}",
                resp.node_id,
                resp.primary_keys,
                resp.replica_keys,
                resp.lookups,
                resp.avg_hops,
                resp.replication_factor,
                resp.alive_successors,
                resp.status
            );
            std::process::exit(0);
        }
        ClientCommand::Ping => {
            let resp = client.ping_rpc(ctx).await?;
            println!("alive={} node_id={}", resp.alive, resp.node_id);
            std::process::exit(if resp.alive { 0 } else { 1 });
        }
    }
}
