//! HTTP client initialization.
//!
//! The tracer follows redirects itself, so the only client built here has
//! automatic redirect following disabled.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client used for tracing.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirect following disabled (the tracer observes every 3xx itself)
/// - Overall request timeout from `timeout_seconds`
/// - Read timeout from `response_header_timeout_seconds`, bounding the wait for
///   response headers
/// - TCP connect timeout
/// - Fixed User-Agent
/// - Rustls TLS backend with the bundled web PKI roots
///
/// The client pools connections and is safe to share across concurrent traces.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.request_timeout())
        .read_timeout(config.response_header_timeout())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .use_rustls_tls()
        .build()?;
    Ok(Arc::new(client))
}
