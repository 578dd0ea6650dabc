//! `wheregoes trace`: one trace from the command line.

use log::{error, info, warn};

use super::output::print_trace_report;
use super::report::TraceReport;
use crate::config::{Config, TraceArgs, EXIT_ABORTED, EXIT_HARD_FAILURE, EXIT_INVALID_INPUT};
use crate::fetch::{trace, ReqwestTransport, TraceContext};
use crate::initialization::init_redirect_client;
use crate::security::validate_trace_url;

/// Validates, traces and prints a single URL. Returns the process exit code.
///
/// - `0` when the chain was followed to an end (including loops and missing `Location`)
/// - `EXIT_INVALID_INPUT` when the URL is rejected
/// - `EXIT_ABORTED` on timeout or untrusted certificate
/// - `EXIT_HARD_FAILURE` when the client cannot be built or the trace fails
pub async fn run_trace_command(config: &Config, args: &TraceArgs) -> i32 {
    // No serving host on the command line, so nothing to compare against
    let start = match validate_trace_url(&args.url, None) {
        Ok(url) => url,
        Err(e) => {
            error!("{}: {}", args.url, e);
            return EXIT_INVALID_INPUT;
        }
    };

    let client = match init_redirect_client(config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            return EXIT_HARD_FAILURE;
        }
    };
    let transport = ReqwestTransport::new(client);

    let result = match trace(&start, &transport, &TraceContext::new()).await {
        Ok(result) => result,
        Err(e) => {
            error!("Error following redirects: {}", e);
            return EXIT_HARD_FAILURE;
        }
    };

    let report = TraceReport::from_result(result, &args.url);
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return EXIT_HARD_FAILURE;
            }
        }
    } else {
        print_trace_report(&report);
    }

    if report.is_aborted() {
        warn!(
            "Trace of {} aborted: {}",
            args.url,
            report.final_message.as_deref().unwrap_or_default()
        );
        return EXIT_ABORTED;
    }

    info!("Traced {} in {} hop(s)", args.url, report.hops.len());
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_crypto_provider;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn args(url: String) -> TraceArgs {
        TraceArgs { url, json: true }
    }

    #[tokio::test]
    async fn test_completed_trace_exits_zero() {
        init_crypto_provider();
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/start"))
                .respond_with(status_code(301).insert_header("Location", "/end")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/end"))
                .respond_with(status_code(200)),
        );

        let code = run_trace_command(&Config::default(), &args(server.url_str("/start"))).await;
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_url_exit_code() {
        let code = run_trace_command(&Config::default(), &args("javascript:alert(1)".into())).await;
        assert_eq!(code, EXIT_INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_unreachable_host_exit_code() {
        init_crypto_provider();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let code = run_trace_command(
            &Config::default(),
            &args(format!("http://127.0.0.1:{port}/")),
        )
        .await;
        assert_eq!(code, EXIT_HARD_FAILURE);
    }

    #[tokio::test]
    async fn test_timeout_exit_code() {
        init_crypto_provider();
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow")).respond_with(
                delay_and_then(std::time::Duration::from_secs(4), status_code(200)),
            ),
        );
        let config = Config {
            timeout_seconds: 1,
            response_header_timeout_seconds: 1,
            ..Default::default()
        };

        let code = run_trace_command(&config, &args(server.url_str("/slow"))).await;
        assert_eq!(code, EXIT_ABORTED);
    }
}
