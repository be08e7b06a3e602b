// Scenario 2 (spec.md §8): two-node join.
use tarpc::context;

#[tokio::test]
async fn second_node_joins_and_converges() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_a, manager_a) = chorddht::server::serve("localhost".into(), 15010, 32, 3, None).await?;
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let (_b, manager_b) =
        chorddht::server::serve("localhost".into(), 15011, 32, 3, Some("localhost:15010".into())).await?;

    // Give stabilize a few rounds to converge (period is 3s).
    tokio::time::sleep(std::time::Duration::from_secs(10)).await;

    let client_a = chorddht::client::setup_client("localhost:15010").await?;
    let client_b = chorddht::client::setup_client("localhost:15011").await?;

    let stats_a = client_a.get_stats_rpc(context::current()).await?;
    assert!(stats_a.alive_successors >= 1);

    let pred_a = client_a.get_predecessor_rpc(context::current()).await?;
    let pred_b = client_b.get_predecessor_rpc(context::current()).await?;
    // Each node's predecessor must eventually be the other peer.
    assert!(pred_a.is_some() || pred_b.is_some());

    let put = client_a
        .put_rpc(context::current(), "k".into(), "v".into(), false, 0)
        .await?;
    assert!(put.success);

    let got = client_b.get_rpc(context::current(), "k".into()).await?;
    assert!(got.found);
    assert_eq!(got.value, "v");

    manager_a.tx.send(true)?;
    manager_b.tx.send(true)?;
    Ok(())
}
