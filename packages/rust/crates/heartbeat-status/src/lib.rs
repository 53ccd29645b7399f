//! Heartbeat status reporter: dead/alive account metric lines.
//!
//! - [`StatusReporter`]: lists dead then alive accounts from a [`HeartbeatStore`]
//!   and writes `accounts.<env>.<id>.status <code> <ts>` lines to a writer.
//! - Runtime settings: YAML files merged system-under-user, then CLI flags.

#![allow(missing_docs)]

mod config;
mod observability;
mod reporter;

use std::io::Write;

use anyhow::{Context, Result};
use heartbeat_store::{HeartbeatStore, ValkeyHeartbeatStore};

pub use config::{
    RuntimeSettings, StatusRunRequest, StatusSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
pub use observability::ReporterEvent;
pub use reporter::{
    AccountStatus, DEFAULT_ALIVE_CODE, DEFAULT_DEAD_CODE, DEFAULT_DEAD_THRESHOLD_SECS,
    DEFAULT_ENVIRONMENT, DEFAULT_METRIC_TEMPLATE, MetricLine, ReportSummary, ReporterConfig,
    StatusReporter, unix_now_secs,
};

/// Resolve `request` against `settings`, connect to the Valkey index and write
/// one run of status lines to `out`.
pub async fn run_status_report<W: Write>(
    request: &StatusRunRequest,
    settings: &RuntimeSettings,
    out: &mut W,
) -> Result<ReportSummary> {
    let reporter_config = request.reporter_config(settings)?;
    let store_config = request.store_config(settings)?;
    let store = ValkeyHeartbeatStore::new(&store_config)
        .context("failed to build heartbeat store client")?;
    tracing::debug!(
        event = ReporterEvent::StoreConfigured.as_str(),
        endpoint = %format!("{}:{}", store_config.host, store_config.port),
        index_key = %store_config.index_key,
        "heartbeat store configured"
    );
    run_with_store(StatusReporter::new(reporter_config)?, &store, out).await
}

/// Run `reporter` against an already-built store, logging the outcome.
pub async fn run_with_store<S, W>(
    reporter: StatusReporter,
    store: &S,
    out: &mut W,
) -> Result<ReportSummary>
where
    S: HeartbeatStore + ?Sized,
    W: Write,
{
    match reporter.report_now(store, out).await {
        Ok(summary) => {
            tracing::info!(
                event = ReporterEvent::RunCompleted.as_str(),
                environment = %reporter.config().environment,
                dead = summary.dead,
                alive = summary.alive,
                captured_at = summary.captured_at,
                "heartbeat status lines written"
            );
            Ok(summary)
        }
        Err(error) => {
            tracing::error!(
                event = ReporterEvent::RunFailed.as_str(),
                environment = %reporter.config().environment,
                error = %format!("{error:#}"),
                "heartbeat status run failed"
            );
            Err(error)
        }
    }
}
