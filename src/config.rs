//! Command-line and environment configuration for both binaries.
//!
//! Every option can be given as a flag or through its `ANALYTICS_*`
//! environment variable; flags win.

use clap::{Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_DATA_PATH: &str = "data/transaction_logs.csv";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Options shared by the console runner and the server
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Transaction log CSV (Date,Product,Category,Amount,Region)
    #[arg(long, short = 'd', env = "ANALYTICS_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Show debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sales-analytics")]
#[command(version, about = "Print a sales analytics report from a transaction log", long_about = None)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "analytics-server")]
#[command(version, about = "Serve sales analytics over HTTP", long_about = None)]
pub struct ServerArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Address to listen on
    #[arg(long, short = 'b', env = "ANALYTICS_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,
}

/// Install the global tracing subscriber (stderr)
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "sales_analytics=debug,analytics_server=debug"
    } else {
        "sales_analytics=info,analytics_server=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) is harmless, so ignore the error
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_defaults() {
        let args = ConsoleArgs::try_parse_from(["sales-analytics"]).unwrap();
        if std::env::var_os("ANALYTICS_DATA_PATH").is_none() {
            assert_eq!(args.common.data, PathBuf::from(DEFAULT_DATA_PATH));
        }
        assert!(!args.json);
        assert!(!args.common.verbose);
    }

    #[test]
    fn test_console_flags() {
        let args =
            ConsoleArgs::try_parse_from(["sales-analytics", "--data", "sales.csv", "--json", "-v"])
                .unwrap();
        assert_eq!(args.common.data, PathBuf::from("sales.csv"));
        assert!(args.json);
        assert!(args.common.verbose);
    }

    #[test]
    fn test_server_flags() {
        let args = ServerArgs::try_parse_from([
            "analytics-server",
            "-d",
            "logs/today.csv",
            "--bind",
            "127.0.0.1:9000",
        ])
        .unwrap();
        assert_eq!(args.common.data, PathBuf::from("logs/today.csv"));
        assert_eq!(args.bind, "127.0.0.1:9000");
    }
}
