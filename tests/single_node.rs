// Scenario 1 (spec.md §8): single-node ring.
use tarpc::context;

#[tokio::test]
async fn put_get_delete_on_a_solo_ring() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_node, manager) = chorddht::server::serve("localhost".into(), 15000, 32, 3, None).await?;
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let client = chorddht::client::setup_client("localhost:15000").await?;

    let put = client
        .put_rpc(context::current(), "alpha".into(), "1".into(), false, 0)
        .await?;
    assert!(put.success);
    assert_eq!(put.version, 1);

    let got = client.get_rpc(context::current(), "alpha".into()).await?;
    assert!(got.found);
    assert_eq!(got.value, "1");
    assert_eq!(got.version, 1);

    let del = client.delete_rpc(context::current(), "alpha".into(), false).await?;
    assert!(del.success);

    let got_after = client.get_rpc(context::current(), "alpha".into()).await?;
    assert!(!got_after.found);

    manager.tx.send(true)?;
    Ok(())
}
