//! Configuration types.
//!
//! This module defines enums and structs used for configuration. They carry no
//! CLI dependencies beyond `ValueEnum` so the library can be configured
//! programmatically.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_PORT, DEFAULT_USER_AGENT, REQUEST_TIMEOUT_SECS, RESPONSE_HEADER_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration.
///
/// # Examples
///
/// ```no_run
/// use wheregoes::Config;
///
/// let config = Config {
///     timeout_seconds: 4,
///     serving_host: Some("wheregoes.example".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// HTTP User-Agent header value sent on every hop
    pub user_agent: String,

    /// Overall per-hop request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum wait for response headers in seconds
    pub response_header_timeout_seconds: u64,

    /// Port the trace server listens on
    pub port: u16,

    /// Host the server is reachable under; input URLs containing it are rejected.
    /// When unset, the server falls back to each request's `Host` header.
    pub serving_host: Option<String>,

    /// Shared secret enabling `GET /trace?url=..&token=..`. GET tracing is
    /// disabled when unset or empty.
    pub get_token: Option<String>,
}

impl Config {
    /// Overall per-hop request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Response-header wait.
    pub fn response_header_timeout(&self) -> Duration {
        Duration::from_secs(self.response_header_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            response_header_timeout_seconds: RESPONSE_HEADER_TIMEOUT_SECS,
            port: DEFAULT_PORT,
            serving_host: None,
            get_token: None,
        }
    }
}
