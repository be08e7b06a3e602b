// Scenarios 3 & 4 (spec.md §8): replication fan-out and version bumps on a
// small ring. Five ports, replication factor 3.
use std::collections::HashMap;
use tarpc::context;

const PORTS: [u16; 5] = [15100, 15101, 15102, 15103, 15104];

#[tokio::test]
async fn replicates_to_r_minus_one_successors_and_bumps_versions() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_n0, m0) = chorddht::server::serve("localhost".into(), PORTS[0], 32, 3, None).await?;
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let mut managers = vec![m0];
    for &port in &PORTS[1..] {
        let (_n, m) = chorddht::server::serve(
            "localhost".into(),
            port,
            32,
            3,
            Some(format!("localhost:{}", PORTS[0])),
        )
        .await?;
        managers.push(m);
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }

    // Let stabilize/fix-fingers/init converge across a few periods.
    tokio::time::sleep(std::time::Duration::from_secs(15)).await;

    let mut clients = HashMap::new();
    for &port in &PORTS {
        let c = chorddht::client::setup_client(&format!("localhost:{port}")).await?;
        clients.insert(port, c);
    }

    let entry = clients.get(&PORTS[0]).unwrap();
    let put1 = entry
        .put_rpc(context::current(), "x".into(), "1".into(), false, 0)
        .await?;
    assert!(put1.success);
    assert_eq!(put1.version, 1);

    // Poll `GetStats` on every node until the replica fan-out has landed:
    // with exactly one key ever stored, `primary_keys`/`replica_keys` are
    // an unambiguous count of physical holders (unlike `Get`, which also
    // succeeds via successor-list fallback and routing on nodes that don't
    // actually hold the key locally).
    let (mut primaries, mut replicas) = (0u64, 0u64);
    for _ in 0..30 {
        primaries = 0;
        replicas = 0;
        for &port in &PORTS {
            let stats = clients[&port].get_stats_rpc(context::current()).await?;
            primaries += stats.primary_keys;
            replicas += stats.replica_keys;
        }
        if primaries == 1 && replicas == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }
    assert_eq!(primaries, 1, "exactly one node must hold \"x\" as primary");
    assert_eq!(replicas, 2, "exactly R-1=2 nodes must hold \"x\" as a replica");

    for &port in &PORTS {
        let got = clients[&port].get_rpc(context::current(), "x".into()).await?;
        assert!(got.found, "node on port {port} could not resolve \"x\"");
        assert_eq!(got.value, "1");
        assert_eq!(got.version, 1);
    }

    let put2 = entry
        .put_rpc(context::current(), "x".into(), "2".into(), false, 0)
        .await?;
    assert_eq!(put2.version, 2);
    let put3 = entry
        .put_rpc(context::current(), "x".into(), "3".into(), false, 0)
        .await?;
    assert_eq!(put3.version, 3);

    let final_get = entry.get_rpc(context::current(), "x".into()).await?;
    assert!(final_get.found);
    assert_eq!(final_get.value, "3");
    assert_eq!(final_get.version, 3);

    for m in managers {
        let _ = m.tx.send(true);
    }
    Ok(())
}
