//! Error type definitions.
//!
//! Input validation, transport, tracing and initialization errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Boxed error used to carry an underlying transport cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejections produced while validating caller-supplied input.
///
/// These never reach the tracer; callers surface them as client errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not an absolute http(s) URL with a host.
    #[error("Invalid URL format")]
    InvalidFormat,

    /// Longer than `MAX_URL_LENGTH`.
    #[error("URL exceeds maximum length ({length} > {max})")]
    TooLong {
        /// Length of the rejected input
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// The URL points back at the server doing the tracing.
    #[error("Redirecting to URLs within the same server is not allowed")]
    SameHostNotAllowed,
}

/// Outcome of a failed hop request, as reported by a [`Transport`](crate::fetch::Transport).
///
/// The tracer turns `Timeout`, `TlsValidation` and `Cancelled` into aborted
/// traces and propagates `Network` as a hard failure.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The response did not arrive within the configured timeouts.
    #[error("request timed out")]
    Timeout,

    /// The certificate chain was not signed by a known authority.
    #[error("TLS certificate validation failed: {0}")]
    TlsValidation(String),

    /// The caller cancelled the trace while a hop was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// Any other transport failure.
    #[error("network error: {0}")]
    Network(#[source] BoxError),
}

/// Hard failures that abort a whole trace.
#[derive(Error, Debug)]
pub enum TraceError {
    /// A hop request failed for a reason other than timeout or TLS trust.
    #[error("error accessing URL {url}: {source}")]
    Network {
        /// URL of the hop that failed
        url: String,
        /// Underlying transport error
        #[source]
        source: BoxError,
    },

    /// A relative `Location` had no scheme and nothing to inherit one from.
    #[error("missing scheme for relative redirect")]
    MissingScheme,

    /// A relative `Location` had no host and nothing to inherit one from.
    #[error("missing host for relative redirect")]
    MissingHost,

    /// A redirect target could not be parsed as a URL.
    #[error("error parsing URL {url}: {source}")]
    UrlParse {
        /// The text that failed to parse
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// A redirect query parameter carried a malformed percent-encoding.
    #[error("error decoding {param} parameter: invalid percent-encoding")]
    InvalidEncoding {
        /// Name of the offending query parameter
        param: String,
    },
}
