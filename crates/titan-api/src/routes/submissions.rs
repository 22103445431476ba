//! Submission endpoints

use crate::error::{ApiError, ApiResult};
use crate::models::{ListQuery, SubmissionCreate, SubmissionReceipt};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use titan_forms::FormSubmission;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/:form_id/submissions", get(list_submissions).post(submit_form))
}

/// Validate and record a submission
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    body: Result<Json<SubmissionCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmissionReceipt>)> {
    let Json(input) = body?;
    let form = state.store.get_form_definition(&form_id).await?;

    let validation = form.validate(&input.data);
    if !validation.valid {
        tracing::info!(
            form_id = %form_id,
            invalid_fields = validation.errors.values().filter(|e| !e.is_empty()).count(),
            "submission rejected"
        );
        return Err(ApiError::Rejected(validation));
    }

    let submission = FormSubmission::new(form_id, input.data);
    let submission_id = submission.submission_id.clone();
    state.store.insert_submission(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionReceipt {
            submission_id,
            status: "success".into(),
            message: "Your submission has been received successfully!".into(),
        }),
    ))
}

/// Most recent submissions for a form
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<FormSubmission>>> {
    let limit = state.config.list_limit(query.limit);
    let submissions = state.store.list_submissions(&form_id, limit).await?;
    Ok(Json(submissions))
}
