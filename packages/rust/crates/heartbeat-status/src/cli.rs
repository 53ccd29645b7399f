use std::path::PathBuf;

use clap::{ArgAction, Parser};

use heartbeat_status::{DEFAULT_ENVIRONMENT, StatusRunRequest};
use heartbeat_store::DEFAULT_STORE_PORT;

#[derive(Parser, Debug)]
#[command(name = "heartbeat-status")]
#[command(about = "Print dead/alive status metric lines for every account in the heartbeat index.")]
#[command(disable_help_flag = true)]
pub(crate) struct Cli {
    /// Heartbeat store host.
    #[arg(short = 'h', long)]
    pub(crate) host: String,

    /// Heartbeat store port.
    #[arg(short = 'p', long, default_value_t = DEFAULT_STORE_PORT)]
    pub(crate) port: u16,

    /// Environment tag used in metric names.
    #[arg(short = 'e', long, default_value = DEFAULT_ENVIRONMENT)]
    pub(crate) environment: String,

    /// Seconds without a heartbeat before an account is reported dead (default: settings, then 480).
    #[arg(long)]
    pub(crate) threshold_secs: Option<u64>,

    /// Override config directory for settings.yaml lookup.
    #[arg(long)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug logging on stderr (ignored when RUST_LOG is set).
    #[arg(short = 'v', long)]
    pub(crate) verbose: bool,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    pub(crate) fn run_request(&self) -> StatusRunRequest {
        StatusRunRequest {
            host: self.host.clone(),
            port: self.port,
            environment: self.environment.clone(),
            threshold_secs: self.threshold_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn short_flags_and_defaults() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["heartbeat-status", "-h", "cache.internal"])?;
        let request = cli.run_request();
        assert_eq!(request.host, "cache.internal");
        assert_eq!(request.port, 6379);
        assert_eq!(request.environment, "prod");
        assert_eq!(request.threshold_secs, None);
        assert!(!cli.verbose);
        Ok(())
    }

    #[test]
    fn long_flags() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "heartbeat-status",
            "--host",
            "10.0.0.5",
            "--port",
            "6380",
            "--environment",
            "staging",
            "--threshold-secs",
            "900",
            "--verbose",
        ])?;
        let request = cli.run_request();
        assert_eq!(request.port, 6380);
        assert_eq!(request.environment, "staging");
        assert_eq!(request.threshold_secs, Some(900));
        assert!(cli.verbose);
        Ok(())
    }

    #[test]
    fn host_is_required() {
        assert!(Cli::try_parse_from(["heartbeat-status"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["heartbeat-status", "-h", "x", "extra"]).is_err());
    }

    #[test]
    fn port_must_fit_u16() {
        assert!(Cli::try_parse_from(["heartbeat-status", "-h", "x", "-p", "70000"]).is_err());
    }

    #[test]
    fn help_is_long_only() {
        let error = Cli::try_parse_from(["heartbeat-status", "--help"])
            .err()
            .map(|e| e.kind());
        assert_eq!(error, Some(clap::error::ErrorKind::DisplayHelp));
    }
}
