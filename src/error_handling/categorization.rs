//! Error categorization.
//!
//! Maps `reqwest::Error` values onto the transport outcomes the tracer
//! distinguishes: timeouts, TLS trust failures, and everything else.

use std::error::Error as StdError;

use super::types::TransportError;

/// Categorizes a `reqwest::Error` into a [`TransportError`].
///
/// Timeouts are checked first (`is_timeout` covers both the overall request
/// timeout and the read timeout used for the response-header wait). The error
/// source chain is then searched for a certificate-trust failure. Anything else
/// is a network error carrying the original error as its source.
pub fn categorize_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout;
    }

    if is_tls_trust_failure(&error) {
        return TransportError::TlsValidation(error_chain_message(&error));
    }

    TransportError::Network(Box::new(error))
}

/// Returns true if any error in the chain is a certificate validation failure.
///
/// rustls errors usually surface wrapped in an `io::Error`, whose `source()`
/// skips the wrapped value, so `io::Error::get_ref` is inspected as well.
pub fn is_tls_trust_failure(error: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(rustls_err) = err.downcast_ref::<rustls::Error>() {
            if matches!(rustls_err, rustls::Error::InvalidCertificate(_)) {
                return true;
            }
        }

        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            if let Some(inner) = io_err.get_ref() {
                if is_tls_trust_failure(inner) {
                    return true;
                }
            }
        }

        let message = err.to_string().to_ascii_lowercase();
        if message.contains("unknownissuer")
            || message.contains("unknown issuer")
            || message.contains("certificate signed by unknown authority")
        {
            return true;
        }

        current = err.source();
    }
    false
}

/// Joins an error and its sources into a single line.
fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        parts.push(err.to_string());
        current = err.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustls::{CertificateError, Error as RustlsError};

    #[derive(Debug)]
    struct Wrapper(Box<dyn StdError + Send + Sync>);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("client error (Connect)")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(self.0.as_ref())
        }
    }

    #[test]
    fn test_direct_rustls_certificate_error_is_tls_failure() {
        let err = RustlsError::InvalidCertificate(CertificateError::UnknownIssuer);
        assert!(is_tls_trust_failure(&err));
    }

    #[test]
    fn test_rustls_error_inside_io_error_is_found() {
        let rustls_err = RustlsError::InvalidCertificate(CertificateError::UnknownIssuer);
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, rustls_err);
        let wrapped = Wrapper(Box::new(io));
        assert!(is_tls_trust_failure(&wrapped));
    }

    #[test]
    fn test_other_rustls_errors_are_not_trust_failures() {
        let err = RustlsError::HandshakeNotComplete;
        assert!(!is_tls_trust_failure(&err));
    }

    #[test]
    fn test_plain_io_error_is_not_tls_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        assert!(!is_tls_trust_failure(&io));
    }

    #[test]
    fn test_error_chain_message_joins_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "inner cause");
        let wrapped = Wrapper(Box::new(io));
        assert_eq!(
            error_chain_message(&wrapped),
            "client error (Connect): inner cause"
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let err = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .expect_err("closed port should refuse");

        match categorize_reqwest_error(err) {
            TransportError::Network(_) => {}
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
