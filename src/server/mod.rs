//! HTTP trace server.
//!
//! Endpoints:
//! - `POST /trace` - trace the `url` form field
//! - `GET /trace?url=..&token=..` - same, gated by the configured GET token
//! - `GET /stats` - usage count
//! - `GET /` - service name, version and usage count
//! - `GET /health` - liveness
//!
//! Other methods on `/trace` are redirected to `/`.

mod handlers;
mod types;

use anyhow::Context;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, SECURITY_RESPONSE_HEADERS};
use crate::fetch::ReqwestTransport;
use crate::initialization::init_redirect_client;
use handlers::{
    health_handler, home_handler, redirect_home, stats_handler, trace_form_handler,
    trace_query_handler,
};
pub use types::{AppState, HomeResponse, StatsResponse, UsageCounter};

/// Builds the router. Separate from [`start_server`] so tests can serve it on
/// an ephemeral port.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route(
            "/trace",
            post(trace_form_handler)
                .get(trace_query_handler)
                .fallback(redirect_home),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::map_response(add_security_headers))
        .with_state(state)
}

async fn add_security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in SECURITY_RESPONSE_HEADERS {
        if let Ok(name) = HeaderName::try_from(*name) {
            headers.insert(name, HeaderValue::from_static(*value));
        }
    }
    response
}

/// Builds the shared transport and serves the trace API on `0.0.0.0:<port>`.
///
/// Cancelling `shutdown` stops the server and aborts in-flight traces.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the port cannot be
/// bound, or the server fails.
pub async fn start_server(config: Config, shutdown: CancellationToken) -> anyhow::Result<()> {
    let client = init_redirect_client(&config).context("Failed to initialize HTTP client")?;
    let port = config.port;
    let state = AppState {
        shutdown,
        ..AppState::new(ReqwestTransport::new(client), config)
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind trace server to port {}", port))?;

    serve(listener, state).await
}

/// Serves the trace API on an already bound listener.
///
/// Returns once `state.shutdown` is cancelled and in-flight requests have
/// finished; cancelling also aborts every running trace.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Trace server listening on http://{}/", addr);
    }
    let shutdown = state.shutdown.clone();

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Trace server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_start_server_returns_after_shutdown() {
        crate::initialization::init_crypto_provider();
        let config = Config {
            port: 0,
            ..Default::default()
        };
        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(5), start_server(config, shutdown))
            .await
            .expect("server should stop once cancelled");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_start_server_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
        let config = Config {
            port: taken.local_addr().unwrap().port(),
            ..Default::default()
        };

        let err = start_server(config, CancellationToken::new())
            .await
            .expect_err("port is already bound");
        assert!(err.to_string().contains("Failed to bind trace server"));
    }
}
