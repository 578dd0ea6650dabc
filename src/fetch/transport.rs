//! Hop transport.
//!
//! The tracer issues one GET per hop through a [`Transport`]. The production
//! implementation wraps a shared `reqwest::Client` with redirects disabled;
//! tests substitute scripted transports.

use std::future::Future;
use std::sync::Arc;

use log::debug;
use reqwest::header::{HeaderMap, LOCATION, SERVER};
use url::Url;

use super::request::RequestHeaders;
use crate::error_handling::{categorize_reqwest_error, TransportError};

/// The parts of a hop response the tracer inspects.
///
/// Owning only the status and two header values means the response body is
/// always released by the transport before the tracer continues.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HopResponse {
    /// HTTP status code
    pub status: u16,
    /// `Location` header, if present and non-empty
    pub location: Option<String>,
    /// `Server` header, if present
    pub server: Option<String>,
}

impl HopResponse {
    /// Extracts the tracer-relevant parts of a response head.
    pub fn from_headers(status: u16, headers: &HeaderMap) -> Self {
        Self {
            status,
            location: header_text(headers, LOCATION.as_str()).filter(|v| !v.is_empty()),
            server: header_text(headers, SERVER.as_str()),
        }
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
}

/// Issues a single GET for one hop without following redirects.
///
/// Implementations must:
/// - not follow redirects themselves
/// - apply their own timeouts and report them as `TransportError::Timeout`
/// - report untrusted certificate chains as `TransportError::TlsValidation`
/// - release the response body before returning
pub trait Transport {
    /// Requests `url` and returns the response head.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<HopResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// The client must be built with `redirect::Policy::none()`; see
/// [`init_redirect_client`](crate::initialization::init_redirect_client).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Wraps a redirect-disabled client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &Url) -> Result<HopResponse, TransportError> {
        let response = RequestHeaders::apply_to_request_builder(self.client.get(url.clone()))
            .send()
            .await
            .map_err(categorize_reqwest_error)?;

        let hop = HopResponse::from_headers(response.status().as_u16(), response.headers());
        debug!("GET {} -> {}", url, hop.status);
        // Dropping the response releases the body and its connection
        drop(response);
        Ok(hop)
    }
}
