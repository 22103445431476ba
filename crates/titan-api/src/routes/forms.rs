//! Form definition endpoints

use crate::error::ApiResult;
use crate::models::{StatusMessage, SubmissionCreate};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use titan_forms::{FormDefinition, FormValidation};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:form_id", get(get_form).put(save_form))
        .route("/:form_id/validate", post(validate_data))
        .merge(super::submissions::router())
}

/// Get a form definition
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
) -> ApiResult<Json<FormDefinition>> {
    let form = state.store.get_form_definition(&form_id).await?;
    Ok(Json(form))
}

/// Create or replace a form definition.
///
/// The body is checked while it is deserialized, so a malformed definition
/// never reaches the store.
pub async fn save_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    body: Result<Json<FormDefinition>, JsonRejection>,
) -> ApiResult<Json<StatusMessage>> {
    let Json(form) = body?;
    for warning in form.lint() {
        tracing::warn!(form_id = %form_id, %warning, "form definition warning");
    }
    state.store.save_form_definition(&form_id, form).await?;
    Ok(Json(StatusMessage::success("Form definition updated successfully")))
}

/// Evaluate visibility and validation without recording anything
pub async fn validate_data(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    body: Result<Json<SubmissionCreate>, JsonRejection>,
) -> ApiResult<Json<FormValidation>> {
    let Json(input) = body?;
    let form = state.store.get_form_definition(&form_id).await?;
    Ok(Json(form.validate(&input.data)))
}
