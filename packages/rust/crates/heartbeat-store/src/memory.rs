//! In-process heartbeat index with the same partition rules as the Valkey index.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{HeartbeatStore, staleness_cutoff, unix_now_secs_f64};

/// account id → last heartbeat (UNIX seconds).
#[derive(Debug, Default)]
pub struct InMemoryHeartbeatStore {
    heartbeats: RwLock<HashMap<String, f64>>,
    pinned_now: Option<f64>,
}

impl InMemoryHeartbeatStore {
    /// Empty store that reads the system clock on every query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store whose clock is fixed at `now_secs`.
    pub fn with_pinned_clock(now_secs: f64) -> Self {
        Self {
            heartbeats: RwLock::default(),
            pinned_now: Some(now_secs),
        }
    }

    /// Record (or move forward/back) an account's last heartbeat.
    pub async fn record_heartbeat(&self, account_id: impl Into<String>, at_secs: f64) {
        let account_id = account_id.into();
        tracing::trace!(account_id = %account_id, at_secs, "heartbeat recorded in memory");
        self.heartbeats.write().await.insert(account_id, at_secs);
    }

    /// Drop an account from the index. Returns whether it was present.
    pub async fn remove_account(&self, account_id: &str) -> bool {
        self.heartbeats.write().await.remove(account_id).is_some()
    }

    /// Number of indexed accounts.
    pub async fn len(&self) -> usize {
        self.heartbeats.read().await.len()
    }

    /// Whether the index is empty.
    pub async fn is_empty(&self) -> bool {
        self.heartbeats.read().await.is_empty()
    }

    fn now(&self) -> Result<f64> {
        match self.pinned_now {
            Some(now) => Ok(now),
            None => unix_now_secs_f64(),
        }
    }

    async fn select<F>(&self, keep: F) -> Vec<String>
    where
        F: Fn(f64) -> bool,
    {
        let guard = self.heartbeats.read().await;
        let mut matched: Vec<(&String, f64)> = guard
            .iter()
            .filter(|(_, at)| keep(**at))
            .map(|(id, at)| (id, *at))
            .collect();
        // Sorted-set order: score ascending, member lexicographic on ties.
        matched.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        matched.into_iter().map(|(id, _)| id.clone()).collect()
    }
}

#[async_trait]
impl HeartbeatStore for InMemoryHeartbeatStore {
    async fn list_dead_accounts(&self, threshold_secs: u64) -> Result<Vec<String>> {
        let cutoff = staleness_cutoff(self.now()?, threshold_secs);
        Ok(self.select(|at| at <= cutoff).await)
    }

    async fn list_alive_accounts(&self, threshold_secs: u64) -> Result<Vec<String>> {
        let cutoff = staleness_cutoff(self.now()?, threshold_secs);
        Ok(self.select(|at| at > cutoff).await)
    }
}
