//! Trace server state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::fetch::ReqwestTransport;

/// Number of trace requests served since startup.
///
/// Owned by whoever builds the server; nothing is persisted.
#[derive(Debug, Default)]
pub struct UsageCounter(AtomicUsize);

impl UsageCounter {
    /// Starts counting from `initial`.
    pub fn new(initial: usize) -> Self {
        Self(AtomicUsize::new(initial))
    }

    /// Records one request and returns the new count.
    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current count.
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shared state for the trace server.
#[derive(Clone)]
pub struct AppState {
    /// Redirect-disabled transport shared by all traces
    pub transport: ReqwestTransport,
    /// Request counter
    pub usage: Arc<UsageCounter>,
    /// Serving host and GET token
    pub config: Arc<Config>,
    /// Cancelling this token aborts every in-flight trace
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates state with a zeroed counter and a fresh shutdown token.
    pub fn new(transport: ReqwestTransport, config: Config) -> Self {
        Self {
            transport,
            usage: Arc::new(UsageCounter::default()),
            config: Arc::new(config),
            shutdown: CancellationToken::new(),
        }
    }
}

/// JSON body of `GET /`
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    /// Package name
    pub service: &'static str,
    /// Package version
    pub version: &'static str,
    /// Trace requests served so far
    pub use_count: usize,
}

/// JSON body of `GET /stats`
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Trace requests served so far
    pub use_count: usize,
}
