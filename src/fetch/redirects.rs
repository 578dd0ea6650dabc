//! HTTP redirect chain tracing.
//!
//! Follows a chain one request at a time, recording every hop, until a
//! non-redirect response, a repeated URL, a redirect without `Location`, a
//! terminal shortcut, or a transport failure ends it.

use std::collections::HashMap;

use log::{debug, info, warn};
use url::Url;

use super::context::TraceContext;
use super::resolve::{apply_query_fixups, resolve_location};
use super::transport::Transport;
use super::types::{is_redirect_status, Hop, TraceDiagnostic, TraceResult};
use crate::config::{LOOP_DETECTED_STATUS, SPECIAL_ENDPOINT_STATUS};
use crate::error_handling::{TraceError, TransportError};

/// Traces the redirect chain starting at `start`.
///
/// One GET is issued per hop through `transport`; redirects are never followed
/// by the transport itself. The starting URL counts as visited, so any redirect
/// back to an already requested URL ends the trace with a loop marker hop
/// (status `LOOP_DETECTED_STATUS`) instead of another request.
///
/// Timeouts, untrusted certificates and cancellation through `ctx.cancel` are
/// not errors: they end the trace with a diagnostic and the hops recorded so far.
///
/// # Errors
///
/// - `TraceError::Network` for any other transport failure
/// - resolution errors from [`resolve_location`] and [`apply_query_fixups`]
pub async fn trace<T: Transport>(
    start: &Url,
    transport: &T,
    ctx: &TraceContext,
) -> Result<TraceResult, TraceError> {
    let mut hops: Vec<Hop> = Vec::new();
    let mut visited: HashMap<String, usize> = HashMap::new();
    visited.insert(start.as_str().to_string(), 1);

    let mut current = start.clone();
    let mut previous: Option<Url> = None;
    let mut number = 1;

    info!("Tracing redirects from {}", start);

    loop {
        let fetched = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => Err(TransportError::Cancelled),
            response = transport.fetch(&current) => response,
        };

        let response = match fetched {
            Ok(response) => response,
            Err(TransportError::Timeout) => {
                warn!("Timed out requesting {}", current);
                return Ok(TraceResult::aborted(TraceDiagnostic::Timeout, hops));
            }
            Err(TransportError::TlsValidation(message)) => {
                warn!("Untrusted certificate at {}: {}", current, message);
                return Ok(TraceResult::aborted(
                    TraceDiagnostic::TlsValidationError,
                    hops,
                ));
            }
            Err(TransportError::Cancelled) => {
                debug!("Trace cancelled while requesting {}", current);
                return Ok(TraceResult::aborted(TraceDiagnostic::Cancelled, hops));
            }
            Err(TransportError::Network(source)) => {
                return Err(TraceError::Network {
                    url: current.to_string(),
                    source,
                });
            }
        };

        hops.push(Hop::new(number, current.as_str(), response.status));

        if !is_redirect_status(response.status) {
            debug!("Chain ends at {} with {}", current, response.status);
            return Ok(TraceResult::completed(current.as_str(), hops));
        }

        let Some(location) = response.location else {
            let cdn_detected = ctx.policy.is_cdn_server(response.server.as_deref());
            warn!(
                "Redirect status {} for {} but no Location header{}",
                response.status,
                current,
                if cdn_detected { " (CDN edge)" } else { "" }
            );
            return Ok(TraceResult::missing_location(cdn_detected));
        };

        if ctx.policy.is_terminal_shortcut(&location) {
            debug!("Location {} is terminal, not requesting it", location);
            hops.push(Hop::new(number + 2, location.as_str(), SPECIAL_ENDPOINT_STATUS));
            return Ok(TraceResult::completed(location, hops));
        }

        let next = apply_query_fixups(resolve_location(
            &location,
            previous.as_ref(),
            Some(&current),
        )?)?;
        let key = next.as_str().to_string();

        let seen = visited.entry(key.clone()).or_insert(0);
        if *seen >= 1 {
            warn!("Redirect loop: {} was already visited", key);
            hops.push(Hop::new(number + 1, key.as_str(), LOOP_DETECTED_STATUS));
            return Ok(TraceResult::loop_detected(key, hops));
        }
        *seen += 1;

        debug!("{} -> {}", current, next);
        previous = Some(next.clone());
        current = next;
        number += 1;
    }
}
