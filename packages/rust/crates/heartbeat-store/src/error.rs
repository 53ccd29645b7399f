//! Error types for heartbeat index lookups.
//!
//! Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Failure while talking to the heartbeat index.
#[derive(Error, Debug)]
pub enum HeartbeatStoreError {
    /// Connection URL could not be parsed by the client.
    #[error("invalid heartbeat store url {url}")]
    InvalidUrl {
        /// URL that was rejected.
        url: String,
        /// Underlying client error.
        #[source]
        source: redis::RedisError,
    },

    /// Opening the connection failed (host unreachable, auth, ...).
    #[error("failed to connect to heartbeat store at {endpoint}")]
    Connection {
        /// `host:port` that was dialled.
        endpoint: String,
        /// Underlying client error.
        #[source]
        source: redis::RedisError,
    },

    /// Connection slot was empty after a successful open.
    #[error("heartbeat store connection to {endpoint} unavailable")]
    ConnectionUnavailable {
        /// `host:port` of the store.
        endpoint: String,
    },

    /// A query was sent but the server returned an error.
    #[error("heartbeat store command `{operation}` failed")]
    Command {
        /// Logical operation name (e.g. `list_dead_accounts`).
        operation: &'static str,
        /// Underlying client error.
        #[source]
        source: redis::RedisError,
    },

    /// System clock is set before the UNIX epoch.
    #[error("system clock is before the unix epoch")]
    Clock,
}

/// Result alias for heartbeat store operations.
pub type Result<T> = std::result::Result<T, HeartbeatStoreError>;
