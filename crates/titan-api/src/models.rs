//! API Models

use serde::{Deserialize, Serialize};
use titan_forms::{FormData, FormValidation};

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FormValidation>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), message: message.into(), validation: None }
    }
}

/// Submission payload
#[derive(Debug, Deserialize)]
pub struct SubmissionCreate {
    #[serde(default)]
    pub data: FormData,
}

/// Receipt for an accepted submission
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub status: String,
    pub message: String,
}

/// Generic acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self { status: "success".into(), message: message.into() }
    }
}

/// `?limit=` for listings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}
