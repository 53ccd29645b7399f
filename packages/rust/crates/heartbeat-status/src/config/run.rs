use anyhow::{Result, bail};
use heartbeat_store::{DEFAULT_ACCOUNT_INDEX_KEY, ValkeyStoreConfig};

use crate::reporter::{
    DEFAULT_ALIVE_CODE, DEFAULT_DEAD_CODE, DEFAULT_DEAD_THRESHOLD_SECS, DEFAULT_METRIC_TEMPLATE,
    ReporterConfig,
};

use super::settings::RuntimeSettings;

/// Per-invocation parameters (CLI flags). Flags win over settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRunRequest {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub threshold_secs: Option<u64>,
}

impl StatusRunRequest {
    pub fn reporter_config(&self, settings: &RuntimeSettings) -> Result<ReporterConfig> {
        let status = &settings.status;
        let config = ReporterConfig {
            environment: self.environment.clone(),
            threshold_secs: self
                .threshold_secs
                .or(status.threshold_secs)
                .unwrap_or(DEFAULT_DEAD_THRESHOLD_SECS),
            dead_code: status.dead_code.unwrap_or(DEFAULT_DEAD_CODE),
            alive_code: status.alive_code.unwrap_or(DEFAULT_ALIVE_CODE),
            metric_template: status
                .metric_template
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_METRIC_TEMPLATE)
                .to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn store_config(&self, settings: &RuntimeSettings) -> Result<ValkeyStoreConfig> {
        let host = self.host.trim();
        if host.is_empty() {
            bail!("store host must not be empty");
        }
        if self.port == 0 {
            bail!("store port must be a positive integer");
        }
        let status = &settings.status;
        let db = status.db.unwrap_or(0);
        if db < 0 {
            bail!("store db must not be negative (got {db})");
        }
        Ok(ValkeyStoreConfig {
            host: host.to_string(),
            port: self.port,
            db,
            index_key: status
                .index_key
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_ACCOUNT_INDEX_KEY)
                .to_string(),
        })
    }
}
