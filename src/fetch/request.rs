//! Browser-like request headers.
//!
//! Some origins serve bots a different redirect chain than browsers (or none at
//! all), so every hop carries the headers a desktop browser sends on a
//! top-level navigation. The User-Agent itself is configured on the client.

/// Realistic browser request headers applied to every hop.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}
