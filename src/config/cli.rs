//! Command-line interface definition.
//!
//! `clap` derive types for the `wheregoes` binary. Kept in the library so the
//! parser can be exercised from tests.

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_PORT, DEFAULT_USER_AGENT, REQUEST_TIMEOUT_SECS, RESPONSE_HEADER_TIMEOUT_SECS,
};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Trace a single URL and print each hop
/// wheregoes trace https://bit.ly/example
///
/// # Same, as JSON
/// wheregoes trace https://bit.ly/example --json
///
/// # Run the trace server
/// PORT=9000 GET_TOKEN=s3cret wheregoes serve --serving-host wheregoes.example
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "wheregoes",
    version,
    about = "Traces the redirect chain of a URL hop by hop."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value sent on every hop
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Overall per-hop request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Maximum wait for response headers in seconds
    #[arg(long, default_value_t = RESPONSE_HEADER_TIMEOUT_SECS, global = true)]
    pub response_header_timeout_seconds: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trace a single URL and print its hops
    Trace(TraceArgs),
    /// Serve the trace API over HTTP
    Serve(ServeArgs),
}

/// Arguments for `wheregoes trace`.
#[derive(Debug, Args)]
pub struct TraceArgs {
    /// URL to trace (http or https)
    pub url: String,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `wheregoes serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Public host name of this server (rejects URLs pointing back at it)
    #[arg(long, env = "SERVING_HOST")]
    pub serving_host: Option<String>,

    /// Token enabling GET /trace requests
    #[arg(long, env = "GET_TOKEN", hide_env_values = true)]
    pub get_token: Option<String>,
}

impl Cli {
    /// Builds the library configuration from parsed arguments.
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
            response_header_timeout_seconds: self.response_header_timeout_seconds,
            ..Default::default()
        };
        if let Command::Serve(serve) = &self.command {
            config.port = serve.port;
            config.serving_host = serve.serving_host.clone();
            config.get_token = serve.get_token.clone();
        }
        config
    }
}
