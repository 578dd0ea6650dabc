//! Informational endpoints.

use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, HomeResponse, StatsResponse};

/// Service name and version with the current usage count
pub async fn home_handler(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        use_count: state.usage.get(),
    })
}

/// Usage count only
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        use_count: state.usage.get(),
    })
}

/// Liveness probe
pub async fn health_handler() -> &'static str {
    "ok"
}

/// Sends unsupported methods back to `/` with a 302.
pub async fn redirect_home() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/")]).into_response()
}
