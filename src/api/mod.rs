//! HTTP surface for feature toggles.
//!
//! Paths keep the package name and record id as path segments:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/feature-toggle` | [`toggles::create`] |
//! | GET | `/feature-toggles/{package}` | [`toggles::list_all`] |
//! | DELETE | `/feature-toggles/{package}` | [`toggles::delete_all`] |
//! | GET | `/feature-toggles/{package}/active` | [`toggles::list_active`] |
//! | GET | `/feature-toggles/{package}/by-date?date=YYYY-MM-DD` | [`toggles::list_by_date`] |
//! | DELETE | `/feature-toggles` | [`toggles::delete_everything`] |
//! | GET | `/feature-toggle/{package}/{id}` | [`toggles::get_one`] |
//! | DELETE | `/feature-toggle/{package}/{id}` | [`toggles::delete_one`] |
//! | PUT | `/feature-toggle/{package}/{id}/update-dates` | [`toggles::update_dates`] |
//! | PUT | `/feature-toggle/{package}/{id}/update-name` | [`toggles::update_name`] |

pub mod toggles;

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ToggleError;
use crate::server::AppState;

/// Build the toggle sub-router; state is attached by the caller.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feature-toggle", post(toggles::create))
        .route("/feature-toggles", delete(toggles::delete_everything))
        .route(
            "/feature-toggles/{package}",
            get(toggles::list_all).delete(toggles::delete_all),
        )
        .route("/feature-toggles/{package}/active", get(toggles::list_active))
        .route("/feature-toggles/{package}/by-date", get(toggles::list_by_date))
        .route(
            "/feature-toggle/{package}/{id}",
            get(toggles::get_one).delete(toggles::delete_one),
        )
        .route(
            "/feature-toggle/{package}/{id}/update-dates",
            put(toggles::update_dates),
        )
        .route(
            "/feature-toggle/{package}/{id}/update-name",
            put(toggles::update_name),
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(rename = "_id")]
    pub id: String,
}

// axum's own rejections are plain text; these turn them into a 400 with the
// usual `{"error": ...}` body.

fn invalid_request(detail: &str) -> ToggleError {
    ToggleError::validation(format!("Invalid request: {detail}"))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ToggleError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| invalid_request(&rejection.body_text()))
}

fn path_params<T>(params: Result<Path<T>, PathRejection>) -> Result<T, ToggleError> {
    params
        .map(|Path(params)| params)
        .map_err(|rejection| invalid_request(&rejection.body_text()))
}

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ToggleError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| invalid_request(&rejection.body_text()))
}
