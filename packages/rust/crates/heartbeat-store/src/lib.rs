//! Heartbeat index lookups: which monitored accounts are dead or alive.
//!
//! - [`HeartbeatStore`]: the lookup contract consumed by reporters.
//! - [`ValkeyHeartbeatStore`]: read-only client over the Valkey/Redis account index.
//! - [`InMemoryHeartbeatStore`]: same partition rules, kept in process.

mod error;
mod memory;
mod store;
mod valkey;

pub use error::{HeartbeatStoreError, Result};
pub use memory::InMemoryHeartbeatStore;
pub use store::{HeartbeatStore, staleness_cutoff};
pub use valkey::{
    DEFAULT_ACCOUNT_INDEX_KEY, DEFAULT_STORE_PORT, ValkeyHeartbeatStore, ValkeyStoreConfig,
    alive_score_bounds, dead_score_bounds,
};
