//! CLI module for server-health
//!
//! Provides the command-line interface for the standalone health server.

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// server-health - Health/ping endpoint aggregating dependency connection checks
#[derive(Parser, Debug)]
#[command(name = "server-health")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SERVER_HEALTH_HOST              Bind address (default: 0.0.0.0)
    SERVER_HEALTH_PORT              Listen port (default: 8080)
    SERVER_HEALTH_PATH              Health route (default: /health)
    SERVER_HEALTH_PING_PATH         Ping route (default: /ping)
    SERVER_HEALTH_PROBE_TIMEOUT_MS  Per-probe timeout in ms (default: none)
    SERVER_HEALTH_ENV               Environment name reported as env.nodeEnv
    SERVER_HEALTH_LOG_LEVEL         Log level (default: info)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the health server
    Serve(serve::ServeArgs),
    /// Query a running health endpoint and print the result
    Check(check::CheckArgs),
}
