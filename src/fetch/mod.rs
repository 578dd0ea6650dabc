//! Redirect tracing.
//!
//! [`trace`] follows a chain hop by hop through a [`Transport`]. The chain is
//! recorded as [`Hop`]s in a [`TraceResult`]; how the result is presented is
//! left to the caller.

mod context;
mod policy;
mod redirects;
mod request;
mod resolve;
mod transport;
mod types;

pub use context::TraceContext;
pub use policy::RedirectPolicy;
pub use redirects::trace;
pub use resolve::{apply_query_fixups, resolve_location};
pub use transport::{HopResponse, ReqwestTransport, Transport};
pub use types::{is_redirect_status, Hop, StatusClass, TraceDiagnostic, TraceResult};

#[cfg(test)]
mod tests;
