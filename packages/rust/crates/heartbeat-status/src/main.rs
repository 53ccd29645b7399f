//! heartbeat-status CLI: one pass over the heartbeat index, metric lines on stdout.
//!
//! Logging: set `RUST_LOG=heartbeat_status=debug` (or `warn`, ...) to tune logs on stderr.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use heartbeat_status::{load_runtime_settings, run_status_report, set_config_home_override};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "heartbeat_status=debug,heartbeat_store=debug"
        } else {
            "heartbeat_status=info,heartbeat_store=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }
    let runtime_settings = load_runtime_settings();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_status_report(&cli.run_request(), &runtime_settings, &mut out).await?;
    Ok(())
}
