//! Partition behaviour of the in-memory heartbeat index.

use anyhow::Result;
use heartbeat_store::{HeartbeatStore, InMemoryHeartbeatStore};

const NOW: f64 = 1_700_000_000.0;
const THRESHOLD: u64 = 480;

#[tokio::test]
async fn test_empty_store_has_no_accounts() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    assert!(store.is_empty().await);
    assert!(store.list_dead_accounts(THRESHOLD).await?.is_empty());
    assert!(store.list_alive_accounts(THRESHOLD).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_partition_by_threshold() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    store.record_heartbeat("stale", NOW - 3_600.0).await;
    store.record_heartbeat("fresh", NOW - 5.0).await;
    store.record_heartbeat("edge-alive", NOW - 479.5).await;

    assert_eq!(store.list_dead_accounts(THRESHOLD).await?, vec!["stale"]);
    assert_eq!(
        store.list_alive_accounts(THRESHOLD).await?,
        vec!["edge-alive", "fresh"]
    );
    Ok(())
}

#[tokio::test]
async fn test_heartbeat_exactly_at_cutoff_is_dead() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    store.record_heartbeat("boundary", NOW - 480.0).await;

    assert_eq!(store.list_dead_accounts(THRESHOLD).await?, vec!["boundary"]);
    assert!(store.list_alive_accounts(THRESHOLD).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_every_account_lands_in_exactly_one_list() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    for (i, age) in [0.0, 100.0, 479.0, 480.0, 481.0, 10_000.0].iter().enumerate() {
        store.record_heartbeat(format!("acct-{i}"), NOW - age).await;
    }

    let dead = store.list_dead_accounts(THRESHOLD).await?;
    let alive = store.list_alive_accounts(THRESHOLD).await?;
    assert_eq!(dead.len() + alive.len(), store.len().await);
    assert!(dead.iter().all(|id| !alive.contains(id)));
    Ok(())
}

#[tokio::test]
async fn test_results_ordered_oldest_first_then_by_id() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    store.record_heartbeat("b", NOW - 900.0).await;
    store.record_heartbeat("a", NOW - 900.0).await;
    store.record_heartbeat("c", NOW - 2_000.0).await;

    assert_eq!(store.list_dead_accounts(THRESHOLD).await?, vec!["c", "a", "b"]);
    Ok(())
}

#[tokio::test]
async fn test_new_heartbeat_revives_account() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    store.record_heartbeat("acct", NOW - 1_000.0).await;
    assert_eq!(store.list_dead_accounts(THRESHOLD).await?, vec!["acct"]);

    store.record_heartbeat("acct", NOW - 1.0).await;
    assert!(store.list_dead_accounts(THRESHOLD).await?.is_empty());
    assert_eq!(store.list_alive_accounts(THRESHOLD).await?, vec!["acct"]);
    Ok(())
}

#[tokio::test]
async fn test_remove_account() -> Result<()> {
    let store = InMemoryHeartbeatStore::with_pinned_clock(NOW);
    store.record_heartbeat("gone", NOW - 1_000.0).await;

    assert!(store.remove_account("gone").await);
    assert!(!store.remove_account("gone").await);
    assert!(store.list_dead_accounts(THRESHOLD).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_system_clock_store_treats_recent_heartbeat_as_alive() -> Result<()> {
    let store = InMemoryHeartbeatStore::new();
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs_f64();
    store.record_heartbeat("live", now).await;
    store.record_heartbeat("old", now - 86_400.0).await;

    assert_eq!(store.list_alive_accounts(THRESHOLD).await?, vec!["live"]);
    assert_eq!(store.list_dead_accounts(THRESHOLD).await?, vec!["old"]);
    Ok(())
}
