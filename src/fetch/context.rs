//! Per-trace context.
//!
//! Groups the redirect policy with the cancellation token a caller uses to stop
//! a trace mid-hop (request handlers cancel when the client disconnects).

use tokio_util::sync::CancellationToken;

use super::policy::RedirectPolicy;

/// Settings and cancellation handle for one trace.
#[derive(Debug, Clone, Default)]
pub struct TraceContext {
    /// Shortcut and CDN tables
    pub policy: RedirectPolicy,
    /// Cancelling this token aborts the trace with `TraceDiagnostic::Cancelled`
    pub cancel: CancellationToken,
}

impl TraceContext {
    /// Creates a context with the default policy and a fresh token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the redirect policy.
    pub fn with_policy(mut self, policy: RedirectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Uses an existing cancellation token, e.g. a child of a shutdown token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}
