//! Valkey/Redis-backed heartbeat index (read-only).
//!
//! The index is one sorted set: member = account id, score = the account's
//! oldest folder heartbeat in UNIX seconds. Staleness queries are range scans
//! over the score, so both lists come back ordered oldest first.

use std::sync::Arc;

use async_trait::async_trait;
use redis::FromRedisValue;
use tokio::sync::Mutex;

use crate::error::{HeartbeatStoreError, Result};
use crate::store::{HeartbeatStore, staleness_cutoff, unix_now_secs_f64};

/// Default port of the heartbeat store.
pub const DEFAULT_STORE_PORT: u16 = 6379;
/// Default sorted-set key holding per-account heartbeat scores.
pub const DEFAULT_ACCOUNT_INDEX_KEY: &str = "account_index";

/// Connection parameters for [`ValkeyHeartbeatStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValkeyStoreConfig {
    /// Store host name or address.
    pub host: String,
    /// Store port.
    pub port: u16,
    /// Logical database number.
    pub db: i64,
    /// Sorted-set key holding the account index.
    pub index_key: String,
}

impl ValkeyStoreConfig {
    /// Config for `host` with default port, db 0 and the default index key.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_STORE_PORT,
            db: 0,
            index_key: DEFAULT_ACCOUNT_INDEX_KEY.to_string(),
        }
    }

    /// `redis://host:port/db`
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }

    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Heartbeat index client. The connection is opened on the first query and
/// reused for the lifetime of the value.
#[derive(Debug)]
pub struct ValkeyHeartbeatStore {
    client: redis::Client,
    endpoint: String,
    index_key: String,
    connection: Arc<Mutex<Option<redis::aio::MultiplexedConnection>>>,
}

impl ValkeyHeartbeatStore {
    /// Build a client. Does not touch the network.
    pub fn new(cfg: &ValkeyStoreConfig) -> Result<Self> {
        let url = cfg.url();
        let client = redis::Client::open(url.as_str())
            .map_err(|source| HeartbeatStoreError::InvalidUrl { url, source })?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint(),
            index_key: cfg.index_key.clone(),
            connection: Arc::new(Mutex::new(None)),
        })
    }

    /// Sorted-set key this client scans.
    pub fn index_key(&self) -> &str {
        &self.index_key
    }

    async fn ensure_connection(
        &self,
        connection: &mut Option<redis::aio::MultiplexedConnection>,
    ) -> Result<()> {
        if connection.is_some() {
            return Ok(());
        }
        let opened = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|source| HeartbeatStoreError::Connection {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        *connection = Some(opened);
        tracing::debug!(
            event = "heartbeat.store.valkey.connected",
            endpoint = %self.endpoint,
            "heartbeat store connected"
        );
        Ok(())
    }

    /// Single attempt; the caller decides what a failure means.
    async fn run_command<T>(&self, operation: &'static str, cmd: redis::Cmd) -> Result<T>
    where
        T: FromRedisValue + Send,
    {
        let mut conn_guard = self.connection.lock().await;
        self.ensure_connection(&mut conn_guard).await?;
        let Some(conn) = conn_guard.as_mut() else {
            return Err(HeartbeatStoreError::ConnectionUnavailable {
                endpoint: self.endpoint.clone(),
            });
        };
        let result: redis::RedisResult<T> = cmd.query_async(conn).await;
        result.map_err(|source| {
            tracing::warn!(
                event = "heartbeat.store.valkey.command_failed",
                operation,
                error = %source,
                "heartbeat store command failed"
            );
            *conn_guard = None;
            HeartbeatStoreError::Command { operation, source }
        })
    }

    async fn range_by_score(
        &self,
        operation: &'static str,
        min: String,
        max: String,
    ) -> Result<Vec<String>> {
        let mut cmd = redis::cmd("ZRANGEBYSCORE");
        cmd.arg(&self.index_key).arg(&min).arg(&max);
        let accounts: Vec<String> = self.run_command(operation, cmd).await?;
        tracing::debug!(
            event = "heartbeat.store.valkey.range_scanned",
            operation,
            index_key = %self.index_key,
            min = %min,
            max = %max,
            accounts = accounts.len(),
            "heartbeat index scanned"
        );
        Ok(accounts)
    }
}

/// `ZRANGEBYSCORE` bounds selecting dead accounts (`score <= cutoff`).
pub fn dead_score_bounds(cutoff: f64) -> (String, String) {
    ("-inf".to_string(), format!("{cutoff}"))
}

/// `ZRANGEBYSCORE` bounds selecting alive accounts (`score > cutoff`).
pub fn alive_score_bounds(cutoff: f64) -> (String, String) {
    (format!("({cutoff}"), "+inf".to_string())
}

#[async_trait]
impl HeartbeatStore for ValkeyHeartbeatStore {
    async fn list_dead_accounts(&self, threshold_secs: u64) -> Result<Vec<String>> {
        let cutoff = staleness_cutoff(unix_now_secs_f64()?, threshold_secs);
        let (min, max) = dead_score_bounds(cutoff);
        self.range_by_score("list_dead_accounts", min, max).await
    }

    async fn list_alive_accounts(&self, threshold_secs: u64) -> Result<Vec<String>> {
        let cutoff = staleness_cutoff(unix_now_secs_f64()?, threshold_secs);
        let (min, max) = alive_score_bounds(cutoff);
        self.range_by_score("list_alive_accounts", min, max).await
    }
}
