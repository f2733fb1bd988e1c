//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload containing the server
//! version, uptime, storage backend reachability, and cumulative request
//! statistics. Answers `503` when the store does not respond to a ping.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub store: StoreHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
pub struct StoreHealth {
    pub backend: String,
    pub reachable: bool,
}

#[derive(Serialize, Deserialize)]
pub struct StatsResponse {
    pub requests_succeeded: u64,
    pub requests_failed: u64,
}

pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let reachable = match state.toggles.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "store ping failed");
            false
        }
    };

    let (status, label) = if reachable {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
            store: StoreHealth {
                backend: state.toggles.backend().to_string(),
                reachable,
            },
            stats: StatsResponse {
                requests_succeeded: state.stats.succeeded.load(Ordering::Relaxed),
                requests_failed: state.stats.failed.load(Ordering::Relaxed),
            },
        }),
    )
}
