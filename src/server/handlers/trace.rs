//! `/trace` handlers.

use axum::{
    extract::{Form, Query, State},
    http::{header::HOST, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::{error, info, warn};
use serde::Deserialize;

use super::super::types::AppState;
use crate::app::TraceReport;
use crate::fetch::{trace, TraceContext, TraceDiagnostic};
use crate::security::validate_trace_url;

/// Form body of `POST /trace`
#[derive(Debug, Deserialize)]
pub struct TraceForm {
    /// URL to trace
    #[serde(default)]
    pub url: String,
}

/// Query string of `GET /trace`
#[derive(Debug, Deserialize)]
pub struct TraceQuery {
    /// URL to trace
    #[serde(default)]
    pub url: String,
    /// Must equal the configured GET token
    #[serde(default)]
    pub token: String,
}

/// Traces the `url` form field.
pub async fn trace_form_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TraceForm>,
) -> Response {
    run_trace(&state, &headers, &form.url).await
}

/// Traces the `url` query parameter if `token` matches the configured GET token.
///
/// Without a configured token, or with a wrong one, the URL is ignored and the
/// request fails validation like an empty submission.
pub async fn trace_query_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TraceQuery>,
) -> Response {
    let authorized = state
        .config
        .get_token
        .as_deref()
        .is_some_and(|expected| !expected.is_empty() && expected == query.token);
    if !authorized && !query.url.is_empty() {
        warn!("GET /trace with missing or invalid token");
    }
    let raw_url = if authorized { query.url.as_str() } else { "" };
    run_trace(&state, &headers, raw_url).await
}

/// Host the same-host check compares against.
fn serving_host(state: &AppState, headers: &HeaderMap) -> Option<String> {
    state.config.serving_host.clone().or_else(|| {
        headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    })
}

async fn run_trace(state: &AppState, headers: &HeaderMap, raw_url: &str) -> Response {
    let count = state.usage.increment();
    info!("Trace request #{}", count);

    let start = match validate_trace_url(raw_url, serving_host(state, headers).as_deref()) {
        Ok(url) => url,
        Err(e) => {
            warn!("Rejected {:?}: {}", raw_url, e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let ctx = TraceContext::new().with_cancellation(state.shutdown.child_token());
    let result = match trace(&start, &state.transport, &ctx).await {
        Ok(result) => result,
        Err(e) => {
            error!("Error following redirects from {}: {}", start, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error following redirects: {e}"),
            )
                .into_response();
        }
    };

    let status = match result.diagnostic {
        Some(TraceDiagnostic::Timeout) => StatusCode::GATEWAY_TIMEOUT,
        Some(TraceDiagnostic::TlsValidationError) => StatusCode::BAD_GATEWAY,
        Some(TraceDiagnostic::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    (status, Json(TraceReport::from_result(result, raw_url))).into_response()
}
