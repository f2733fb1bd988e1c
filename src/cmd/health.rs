//! `toggleboard health` — check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON. A `503` from an instance
//! whose store is unreachable is still rendered before failing.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::ToggleError;
use crate::health::HealthResponse;

const PROBE_TIMEOUT_SECS: u64 = 10;

pub async fn execute(args: HealthArgs) -> Result<(), ToggleError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let uri: hyper::Uri = url
        .parse()
        .map_err(|e: hyper::http::uri::InvalidUri| ToggleError::UriParse {
            source: Box::new(e),
        })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| ToggleError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(
        std::time::Duration::from_secs(PROBE_TIMEOUT_SECS),
        client.request(req),
    )
    .await
    .map_err(|_| ToggleError::HttpRequest {
        source: format!("health check timed out after {PROBE_TIMEOUT_SECS}s").into(),
    })?
    .map_err(|e| ToggleError::HttpRequest {
        source: Box::new(e),
    })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| ToggleError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
    } else {
        match serde_json::from_slice::<HealthResponse>(&body) {
            Ok(health) => print_summary(&args.url, &health),
            Err(e) => {
                eprintln!("Failed to parse health response: {e}");
                println!("{}", String::from_utf8_lossy(&body));
            }
        }
    }

    if !status.is_success() {
        return Err(ToggleError::HealthCheckFailed(status));
    }
    Ok(())
}

fn print_summary(url: &str, health: &HealthResponse) {
    let mark = if health.store.reachable {
        '\u{2713}'
    } else {
        '\u{2717}'
    };
    println!("{mark} toggleboard is {} ({url})", health.status);
    println!("  version:        {}", health.version);
    println!("  uptime:         {}", format_uptime(health.uptime_seconds));
    println!(
        "  store:          {} ({})",
        health.store.backend,
        if health.store.reachable {
            "reachable"
        } else {
            "unreachable"
        }
    );
    println!(
        "  requests:       {} succeeded, {} failed",
        health.stats.requests_succeeded, health.stats.requests_failed
    );
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
