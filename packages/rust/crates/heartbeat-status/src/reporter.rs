//! Status reporter: heartbeat index → one metric line per account.
//!
//! Pipeline per run: capture timestamp → list dead → write dead lines →
//! list alive → write alive lines. Dead lines are flushed before the alive
//! query so a failure there leaves them on the sink.

use std::fmt;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use heartbeat_store::HeartbeatStore;

use crate::observability::ReporterEvent;

/// Seconds without a heartbeat after which an account counts as dead.
pub const DEFAULT_DEAD_THRESHOLD_SECS: u64 = 480;
/// Status code written for dead accounts.
pub const DEFAULT_DEAD_CODE: i64 = 1;
/// Status code written for alive accounts.
pub const DEFAULT_ALIVE_CODE: i64 = 0;
/// Metric name template; `{environment}` and `{account_id}` are substituted.
pub const DEFAULT_METRIC_TEMPLATE: &str = "accounts.{environment}.{account_id}.status";
/// Default metric namespace.
pub const DEFAULT_ENVIRONMENT: &str = "prod";

const ENVIRONMENT_PLACEHOLDER: &str = "{environment}";
const ACCOUNT_ID_PLACEHOLDER: &str = "{account_id}";

/// Which list an account came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Dead,
    Alive,
}

impl AccountStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dead => "dead",
            Self::Alive => "alive",
        }
    }
}

/// Everything that used to be a module-level constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    pub environment: String,
    pub threshold_secs: u64,
    pub dead_code: i64,
    pub alive_code: i64,
    pub metric_template: String,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            threshold_secs: DEFAULT_DEAD_THRESHOLD_SECS,
            dead_code: DEFAULT_DEAD_CODE,
            alive_code: DEFAULT_ALIVE_CODE,
            metric_template: DEFAULT_METRIC_TEMPLATE.to_string(),
        }
    }
}

impl ReporterConfig {
    /// Default config namespaced under `environment`.
    pub fn for_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.environment.trim().is_empty() {
            bail!("environment must not be empty");
        }
        if self.environment.trim() != self.environment {
            bail!(
                "environment `{}` has leading or trailing whitespace",
                self.environment
            );
        }
        if self.threshold_secs == 0 {
            bail!("dead threshold must be a positive number of seconds");
        }
        for placeholder in [ENVIRONMENT_PLACEHOLDER, ACCOUNT_ID_PLACEHOLDER] {
            if !self.metric_template.contains(placeholder) {
                bail!(
                    "metric template `{}` is missing the {placeholder} placeholder",
                    self.metric_template
                );
            }
        }
        Ok(())
    }

    /// Render the metric name for one account.
    ///
    /// Substituted values are never re-scanned, so an account id containing
    /// `{environment}` is written verbatim.
    pub fn metric_name(&self, account_id: &str) -> String {
        self.metric_template
            .split(ACCOUNT_ID_PLACEHOLDER)
            .map(|part| part.replace(ENVIRONMENT_PLACEHOLDER, &self.environment))
            .collect::<Vec<_>>()
            .join(account_id)
    }

    pub fn status_code(&self, status: AccountStatus) -> i64 {
        match status {
            AccountStatus::Dead => self.dead_code,
            AccountStatus::Alive => self.alive_code,
        }
    }

    pub fn metric_line(
        &self,
        account_id: &str,
        status: AccountStatus,
        timestamp: u64,
    ) -> MetricLine {
        MetricLine {
            name: self.metric_name(account_id),
            code: self.status_code(status),
            timestamp,
        }
    }
}

/// `<name> <code> <timestamp>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLine {
    pub name: String,
    pub code: i64,
    pub timestamp: u64,
}

impl fmt::Display for MetricLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.code, self.timestamp)
    }
}

/// Counts from one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub dead: usize,
    pub alive: usize,
    pub captured_at: u64,
}

impl ReportSummary {
    pub fn lines(&self) -> usize {
        self.dead + self.alive
    }
}

#[derive(Debug, Clone)]
pub struct StatusReporter {
    config: ReporterConfig,
}

impl StatusReporter {
    pub fn new(config: ReporterConfig) -> Result<Self> {
        config.validate().context("invalid reporter config")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Run once with a timestamp taken from the system clock.
    pub async fn report_now<S, W>(&self, store: &S, out: &mut W) -> Result<ReportSummary>
    where
        S: HeartbeatStore + ?Sized,
        W: Write,
    {
        self.report(store, out, unix_now_secs()?).await
    }

    /// Query `store` and write one line per account to `out`, every line
    /// stamped with `captured_at`.
    pub async fn report<S, W>(
        &self,
        store: &S,
        out: &mut W,
        captured_at: u64,
    ) -> Result<ReportSummary>
    where
        S: HeartbeatStore + ?Sized,
        W: Write,
    {
        let threshold_secs = self.config.threshold_secs;
        tracing::debug!(
            event = ReporterEvent::RunStarted.as_str(),
            environment = %self.config.environment,
            threshold_secs,
            captured_at,
            "heartbeat status run started"
        );

        let dead = store
            .list_dead_accounts(threshold_secs)
            .await
            .context("failed to list dead accounts")?;
        tracing::debug!(
            event = ReporterEvent::DeadAccountsListed.as_str(),
            accounts = dead.len(),
            "dead accounts listed"
        );
        self.write_lines(out, &dead, AccountStatus::Dead, captured_at)?;

        let alive = store
            .list_alive_accounts(threshold_secs)
            .await
            .context("failed to list alive accounts")?;
        tracing::debug!(
            event = ReporterEvent::AliveAccountsListed.as_str(),
            accounts = alive.len(),
            "alive accounts listed"
        );
        self.write_lines(out, &alive, AccountStatus::Alive, captured_at)?;

        Ok(ReportSummary {
            dead: dead.len(),
            alive: alive.len(),
            captured_at,
        })
    }

    fn write_lines<W: Write>(
        &self,
        out: &mut W,
        accounts: &[String],
        status: AccountStatus,
        timestamp: u64,
    ) -> Result<()> {
        for account_id in accounts {
            let line = self.config.metric_line(account_id, status, timestamp);
            writeln!(out, "{line}")
                .with_context(|| format!("failed to write {} status line", status.as_str()))?;
        }
        out.flush().context("failed to flush status lines")?;
        Ok(())
    }
}

/// Current UTC time in whole seconds since the epoch.
pub fn unix_now_secs() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(elapsed.as_secs())
}
