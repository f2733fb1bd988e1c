//! Request-scoped middleware.
//!
//! [`track_request`] assigns every request a correlation id (taken from the
//! `x-correlation-id` header or freshly generated), runs the handler inside
//! a tracing span carrying that id, echoes it on the response, and counts
//! the outcome in [`Stats`](crate::server::Stats). Health probes are not
//! counted.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use crate::server::AppState;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

pub async fn track_request(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let span = tracing::info_span!("request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;
    let status = response.status();

    if path != "/health" {
        let counter = if status.is_client_error() || status.is_server_error() {
            &state.stats.failed
        } else {
            &state.stats.succeeded
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    tracing::info!(
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        status = status.as_u16(),
        "request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}
