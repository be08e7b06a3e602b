use clap::Parser;
use chorddht::config::NodeArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = NodeArgs::parse();

    let (_node, manager) = chorddht::server::serve(
        args.address,
        args.port,
        args.bits,
        args.replication,
        args.join,
    )
    .await?;

    manager.wait().await?;
    Ok(())
}
