//! Logger initialization.
//!
//! `env_logger` backend with two line formats: colored plain text for terminals
//! and one JSON object per line for log collectors.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Dependency targets that log per connection, with the most verbose level kept.
const NOISY_TARGETS: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Warn),
    ("ammonia", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate and as the
/// global default. Dependencies that log every connection (`hyper`, `reqwest`,
/// `rustls`) are clamped so per-hop tracing output stays readable.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug wheregoes trace https://example.com
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=wheregoes=debug,reqwest=info wheregoes serve
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (target, max) in NOISY_TARGETS {
        builder.filter_module(target, level.min(*max));
    }
    builder.filter_module("wheregoes", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level();
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    level_emoji(level),
                    record.target().cyan(),
                    colored_level(level),
                    record.args()
                )
            });
        }
    }

    // try_init so a second initialization (tests) errors instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Renders one structured log line.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    format!(
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        ts_millis,
        level,
        target,
        serde_json::to_string(msg).unwrap_or_else(|_| "\"\"".into())
    )
}

fn colored_level(level: Level) -> ColoredString {
    match level {
        Level::Error => level.to_string().red(),
        Level::Warn => level.to_string().yellow(),
        Level::Info => level.to_string().green(),
        Level::Debug => level.to_string().blue(),
        Level::Trace => level.to_string().purple(),
    }
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✔️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}
