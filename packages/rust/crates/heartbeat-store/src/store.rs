use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::error::{HeartbeatStoreError, Result};

/// Read side of the heartbeat index.
///
/// Implementations partition the known accounts by staleness: an account whose
/// last heartbeat is at or before `now - threshold_secs` is dead, anything newer
/// is alive. Both lists are ordered by heartbeat time, oldest first.
#[async_trait]
pub trait HeartbeatStore: Send + Sync {
    /// Accounts whose last heartbeat is older than the threshold.
    async fn list_dead_accounts(&self, threshold_secs: u64) -> Result<Vec<String>>;

    /// Accounts whose last heartbeat is within the threshold.
    async fn list_alive_accounts(&self, threshold_secs: u64) -> Result<Vec<String>>;
}

/// Staleness cutoff in UNIX seconds for a given `now`.
#[allow(clippy::cast_precision_loss)]
pub fn staleness_cutoff(now_secs: f64, threshold_secs: u64) -> f64 {
    now_secs - threshold_secs as f64
}

pub(crate) fn unix_now_secs_f64() -> Result<f64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .map_err(|_| HeartbeatStoreError::Clock)
}
