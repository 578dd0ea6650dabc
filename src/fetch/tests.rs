// Tracer tests against a scripted transport.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error_handling::{TraceError, TransportError};
use crate::fetch::{
    trace, HopResponse, RedirectPolicy, StatusClass, TraceContext, TraceDiagnostic, Transport,
};

enum Scripted {
    Respond(HopResponse),
    Fail(fn() -> TransportError),
    Hang,
}

/// Replays canned responses per URL and records every request.
#[derive(Default)]
struct ScriptedTransport {
    script: HashMap<String, Scripted>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn respond(mut self, url: &str, status: u16, location: Option<&str>) -> Self {
        self.script.insert(
            url.to_string(),
            Scripted::Respond(HopResponse {
                status,
                location: location.map(str::to_string),
                server: None,
            }),
        );
        self
    }

    fn respond_with_server(mut self, url: &str, status: u16, server: &str) -> Self {
        self.script.insert(
            url.to_string(),
            Scripted::Respond(HopResponse {
                status,
                location: None,
                server: Some(server.to_string()),
            }),
        );
        self
    }

    fn fail(mut self, url: &str, error: fn() -> TransportError) -> Self {
        self.script.insert(url.to_string(), Scripted::Fail(error));
        self
    }

    fn hang(mut self, url: &str) -> Self {
        self.script.insert(url.to_string(), Scripted::Hang);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &Url) -> Result<HopResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.script.get(url.as_str()) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(error)) => Err(error()),
            Some(Scripted::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportError::Timeout)
            }
            None => panic!("unscripted request to {url}"),
        }
    }
}

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn hop_summary(result: &crate::fetch::TraceResult) -> Vec<(usize, &str, u16)> {
    result
        .hops
        .iter()
        .map(|hop| (hop.number, hop.url.as_str(), hop.status_code))
        .collect()
}

#[tokio::test]
async fn test_no_redirect() {
    let transport = ScriptedTransport::default().respond("http://a.example/", 200, None);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(result.final_url, "http://a.example/");
    assert_eq!(hop_summary(&result), vec![(1, "http://a.example/", 200)]);
    assert_eq!(result.hops[0].status_class, StatusClass::Success);
    assert_eq!(result.final_status, Some(200));
    assert!(result.diagnostic.is_none());
}

#[tokio::test]
async fn test_chain_of_absolute_redirects() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 301, Some("https://b.example/"))
        .respond("https://b.example/", 302, Some("https://c.example/landing"))
        .respond("https://c.example/landing", 404, None);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(
        hop_summary(&result),
        vec![
            (1, "http://a.example/", 301),
            (2, "https://b.example/", 302),
            (3, "https://c.example/landing", 404),
        ]
    );
    assert_eq!(result.final_url, "https://c.example/landing");
    assert_eq!(result.final_status, Some(404));
    assert_eq!(result.hops[2].status_class, StatusClass::ClientError);
}

#[tokio::test]
async fn test_relative_redirect_inherits_host() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 302, Some("/b"))
        .respond("http://a.example/b", 200, None);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(
        hop_summary(&result),
        vec![(1, "http://a.example/", 302), (2, "http://a.example/b", 200)]
    );
    assert_eq!(result.final_url, "http://a.example/b");
}

#[tokio::test]
async fn test_relative_redirect_after_host_change() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 301, Some("https://b.example:8443/x"))
        .respond("https://b.example:8443/x", 302, Some("/y"))
        .respond("https://b.example:8443/y", 200, None);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(result.final_url, "https://b.example:8443/y");
    assert_eq!(result.hops.len(), 3);
}

#[tokio::test]
async fn test_self_loop_stops_without_third_request() {
    let transport = ScriptedTransport::default().respond("http://a.example/", 302, Some("http://a.example/"));
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(
        hop_summary(&result),
        vec![(1, "http://a.example/", 302), (2, "http://a.example/", 508)]
    );
    assert_eq!(result.diagnostic, Some(TraceDiagnostic::LoopDetected));
    assert_eq!(result.final_url, "http://a.example/");
    assert_eq!(result.hops[1].status_class, StatusClass::ServerError);
    assert_eq!(transport.requests(), vec!["http://a.example/"]);
}

#[tokio::test]
async fn test_two_step_loop() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 302, Some("http://b.example/"))
        .respond("http://b.example/", 302, Some("http://a.example/"));
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(
        hop_summary(&result),
        vec![
            (1, "http://a.example/", 302),
            (2, "http://b.example/", 302),
            (3, "http://a.example/", 508),
        ]
    );
    assert_eq!(transport.requests().len(), 2);
    assert!(!result.is_aborted());
}

#[tokio::test]
async fn test_missing_location_reports_empty_hops() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 301, Some("http://b.example/"))
        .respond("http://b.example/", 302, None);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert!(result.hops.is_empty());
    assert!(result.final_url.is_empty());
    assert_eq!(result.diagnostic, Some(TraceDiagnostic::MissingLocation));
    assert!(!result.cdn_detected);
}

#[tokio::test]
async fn test_missing_location_behind_cdn() {
    let transport = ScriptedTransport::default().respond_with_server("http://a.example/", 307, "cloudflare");
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert!(result.hops.is_empty());
    assert!(result.cdn_detected);
}

#[tokio::test]
async fn test_terminal_shortcut_is_not_requested() {
    let transport = ScriptedTransport::default().respond(
        "http://mail.example/",
        302,
        Some("https://outlook.office365.com/owa/?realm=example"),
    );
    let result = trace(&url("http://mail.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(
        hop_summary(&result),
        vec![
            (1, "http://mail.example/", 302),
            (3, "https://outlook.office365.com/owa/?realm=example", 200),
        ]
    );
    assert_eq!(result.final_url, "https://outlook.office365.com/owa/?realm=example");
    assert_eq!(transport.requests(), vec!["http://mail.example/"]);
}

#[tokio::test]
async fn test_terminal_shortcut_can_be_disabled() {
    let transport = ScriptedTransport::default()
        .respond("http://mail.example/", 302, Some("https://outlook.office365.com/owa/"))
        .respond("https://outlook.office365.com/owa/", 200, None);
    let ctx = TraceContext::new().with_policy(RedirectPolicy::default().without_shortcuts());
    let result = trace(&url("http://mail.example/"), &transport, &ctx).await.unwrap();

    assert_eq!(
        hop_summary(&result),
        vec![
            (1, "http://mail.example/", 302),
            (2, "https://outlook.office365.com/owa/", 200),
        ]
    );
}

#[tokio::test]
async fn test_return_uri_fixup_applied_before_next_request() {
    let transport = ScriptedTransport::default()
        .respond(
            "https://app.example/",
            302,
            Some("https://login.example/auth?client=app&returnUri=%2Flogin%3Ftoken%3Dabc"),
        )
        .respond("https://login.example/auth?returnUri=/login?token=abc", 200, None);
    let result = trace(&url("https://app.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(
        result.final_url,
        "https://login.example/auth?returnUri=/login?token=abc"
    );
}

#[tokio::test]
async fn test_invalid_fixup_encoding_is_an_error() {
    let transport = ScriptedTransport::default().respond(
        "https://app.example/",
        302,
        Some("https://login.example/auth?redir=%25zz"),
    );
    let err = trace(&url("https://app.example/"), &transport, &TraceContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TraceError::InvalidEncoding { ref param } if param == "redir"));
}

#[tokio::test]
async fn test_timeout_aborts_with_recorded_hops() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 301, Some("http://slow.example/"))
        .fail("http://slow.example/", || TransportError::Timeout);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(result.diagnostic, Some(TraceDiagnostic::Timeout));
    assert!(result.is_aborted());
    assert!(result.final_url.is_empty());
    assert_eq!(hop_summary(&result), vec![(1, "http://a.example/", 301)]);
}

#[tokio::test]
async fn test_untrusted_certificate_aborts() {
    let transport = ScriptedTransport::default().fail("https://self-signed.example/", || {
        TransportError::TlsValidation("invalid peer certificate: UnknownIssuer".to_string())
    });
    let result = trace(
        &url("https://self-signed.example/"),
        &transport,
        &TraceContext::new(),
    )
    .await
    .unwrap();

    assert_eq!(result.diagnostic, Some(TraceDiagnostic::TlsValidationError));
    assert!(result.hops.is_empty());
}

#[tokio::test]
async fn test_network_error_is_hard_failure() {
    let transport = ScriptedTransport::default().fail("http://down.example/", || {
        TransportError::Network("connection refused".into())
    });
    let err = trace(&url("http://down.example/"), &transport, &TraceContext::new())
        .await
        .unwrap_err();

    match err {
        TraceError::Network { url, .. } => assert_eq!(url, "http://down.example/"),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let transport = ScriptedTransport::default().respond("http://a.example/", 200, None);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let ctx = TraceContext::new().with_cancellation(cancel);
    let result = trace(&url("http://a.example/"), &transport, &ctx).await.unwrap();

    assert_eq!(result.diagnostic, Some(TraceDiagnostic::Cancelled));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_cancelled_mid_hop_keeps_earlier_hops() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 302, Some("http://stuck.example/"))
        .hang("http://stuck.example/");
    let cancel = CancellationToken::new();
    let ctx = TraceContext::new().with_cancellation(cancel.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });
    let result = trace(&url("http://a.example/"), &transport, &ctx).await.unwrap();
    canceller.await.unwrap();

    assert_eq!(result.diagnostic, Some(TraceDiagnostic::Cancelled));
    assert_eq!(hop_summary(&result), vec![(1, "http://a.example/", 302)]);
}

#[tokio::test]
async fn test_out_of_range_status_has_empty_class() {
    let transport = ScriptedTransport::default().respond("http://odd.example/", 999, None);
    let result = trace(&url("http://odd.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(result.hops[0].status_class, StatusClass::Unknown);
    assert_eq!(result.hops[0].status_class.as_str(), "");
    assert_eq!(result.final_url, "http://odd.example/");
}

#[tokio::test]
async fn test_304_is_followed_as_redirect() {
    let transport = ScriptedTransport::default()
        .respond("http://a.example/", 304, Some("/fresh"))
        .respond("http://a.example/fresh", 200, None);
    let result = trace(&url("http://a.example/"), &transport, &TraceContext::new())
        .await
        .unwrap();

    assert_eq!(result.hops.len(), 2);
}
