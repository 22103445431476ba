//! Recorded submissions

use crate::value::FormData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user payload recorded against a form. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub submission_id: String,
    pub form_id: String,
    pub data: FormData,
    pub timestamp: DateTime<Utc>,
}

impl FormSubmission {
    /// New submission with a random 128-bit id, stamped now
    pub fn new(form_id: impl Into<String>, data: FormData) -> Self {
        Self {
            submission_id: uuid::Uuid::new_v4().to_string(),
            form_id: form_id.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_are_unique() {
        let a = FormSubmission::new("f", FormData::new());
        let b = FormSubmission::new("f", FormData::new());
        assert_ne!(a.submission_id, b.submission_id);
    }

    #[test]
    fn test_wire_shape() {
        let mut data = FormData::new();
        data.insert("email".into(), json!("ada@example.com"));
        let wire = serde_json::to_value(FormSubmission::new("contact-us-v1", data)).unwrap();
        assert_eq!(wire["formId"], json!("contact-us-v1"));
        assert_eq!(wire["data"]["email"], json!("ada@example.com"));
        assert!(wire["submissionId"].is_string());
        assert!(wire["timestamp"].is_string());
    }
}
