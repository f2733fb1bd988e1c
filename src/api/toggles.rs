//! Handlers for the `/feature-toggle` and `/feature-toggles` routes.
//!
//! Each handler extracts path, query and body (extractor rejections become
//! validation errors), calls the matching
//! [`ToggleService`](crate::toggle::service::ToggleService) operation, and
//! shapes the JSON reply. Errors render through
//! [`ToggleError`]'s `IntoResponse`.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::{json_body, path_params, query_params, CreatedResponse, MessageResponse};
use crate::error::ToggleError;
use crate::server::AppState;
use crate::toggle::{CreateToggle, DateChange, FeatureToggle, NameChange};

#[derive(Debug, Deserialize)]
pub struct ByDateParams {
    pub date: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateToggle>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ToggleError> {
    let request = json_body(payload)?;
    let toggle = state.toggles.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Feature toggle created successfully".into(),
            id: toggle.id,
        }),
    ))
}

pub async fn list_all(
    State(state): State<Arc<AppState>>,
    package: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<FeatureToggle>>, ToggleError> {
    let package = path_params(package)?;
    state.toggles.list_all(&package).await.map(Json)
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<FeatureToggle>, ToggleError> {
    let (package, id) = path_params(ids)?;
    state.toggles.get(&package, &id).await.map(Json)
}

pub async fn list_active(
    State(state): State<Arc<AppState>>,
    package: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<FeatureToggle>>, ToggleError> {
    let package = path_params(package)?;
    state.toggles.list_active(&package).await.map(Json)
}

pub async fn list_by_date(
    State(state): State<Arc<AppState>>,
    package: Result<Path<String>, PathRejection>,
    params: Result<Query<ByDateParams>, QueryRejection>,
) -> Result<Json<Vec<FeatureToggle>>, ToggleError> {
    let package = path_params(package)?;
    let params = query_params(params)?;
    state
        .toggles
        .list_by_date(&package, params.date.as_deref())
        .await
        .map(Json)
}

pub async fn update_dates(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(String, String)>, PathRejection>,
    payload: Result<Json<DateChange>, JsonRejection>,
) -> Result<Json<MessageResponse>, ToggleError> {
    let (package, id) = path_params(ids)?;
    let change = json_body(payload)?;
    state.toggles.update_dates(&package, &id, change).await?;
    Ok(MessageResponse::new("Dates updated"))
}

pub async fn update_name(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(String, String)>, PathRejection>,
    payload: Result<Json<NameChange>, JsonRejection>,
) -> Result<Json<MessageResponse>, ToggleError> {
    let (package, id) = path_params(ids)?;
    let change = json_body(payload)?;
    state
        .toggles
        .update_name(&package, &id, change.name.as_deref())
        .await?;
    Ok(MessageResponse::new("Name updated successfully"))
}

pub async fn delete_one(
    State(state): State<Arc<AppState>>,
    ids: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<MessageResponse>, ToggleError> {
    let (package, id) = path_params(ids)?;
    state.toggles.delete(&package, &id).await?;
    Ok(MessageResponse::new(format!(
        "Feature toggle {id} successfully deleted"
    )))
}

pub async fn delete_all(
    State(state): State<Arc<AppState>>,
    package: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ToggleError> {
    let package = path_params(package)?;
    state.toggles.delete_all(&package).await?;
    Ok(MessageResponse::new("All feature toggles deleted"))
}

pub async fn delete_everything(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ToggleError> {
    state.toggles.delete_everything().await?;
    Ok(MessageResponse::new("All feature toggles deleted"))
}
