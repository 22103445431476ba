//! Persistence abstraction for form definitions and submissions
//!
//! The engine only talks to storage through [`FormStore`]. A store is an
//! explicit handle: the process creates one, passes it to whoever needs it,
//! and calls [`FormStore::close`] on shutdown.

use crate::definition::FormDefinition;
use crate::error::{StoreError, StoreResult};
use crate::sample;
use crate::submission::FormSubmission;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Form definition and submission storage
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Definition by form id
    async fn get_form_definition(&self, form_id: &str) -> StoreResult<FormDefinition>;

    /// Create or replace a definition. Fails when `form_id` differs from the
    /// definition's own id.
    async fn save_form_definition(&self, form_id: &str, form: FormDefinition) -> StoreResult<()>;

    /// Append a submission
    async fn insert_submission(&self, submission: FormSubmission) -> StoreResult<()>;

    /// Up to `limit` most recent submissions for a form, oldest first
    async fn list_submissions(&self, form_id: &str, limit: usize) -> StoreResult<Vec<FormSubmission>>;

    /// Release the store. Later calls fail.
    async fn close(&self) -> StoreResult<()>;
}

/// In-memory store (for testing and development)
pub struct InMemoryFormStore {
    forms: RwLock<HashMap<String, FormDefinition>>,
    submissions: RwLock<HashMap<String, Vec<FormSubmission>>>,
    closed: AtomicBool,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self {
            forms: RwLock::new(HashMap::new()),
            submissions: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Store preloaded with the sample contact form
    pub fn with_sample() -> Self {
        let store = Self::new();
        let form = sample::contact_form();
        store.forms.write().insert(form.form_id().to_string(), form);
        store
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Storage("store is closed".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryFormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn get_form_definition(&self, form_id: &str) -> StoreResult<FormDefinition> {
        self.ensure_open()?;
        self.forms
            .read()
            .get(form_id)
            .cloned()
            .ok_or_else(|| StoreError::form_not_found(form_id))
    }

    async fn save_form_definition(&self, form_id: &str, form: FormDefinition) -> StoreResult<()> {
        self.ensure_open()?;
        if form.form_id() != form_id {
            return Err(StoreError::ValidationFailed(format!(
                "formId {:?} in body does not match {:?}",
                form.form_id(),
                form_id
            )));
        }
        tracing::info!(form_id, fields = form.fields().len(), "form definition saved");
        self.forms.write().insert(form_id.to_string(), form);
        Ok(())
    }

    async fn insert_submission(&self, submission: FormSubmission) -> StoreResult<()> {
        self.ensure_open()?;
        tracing::info!(
            form_id = %submission.form_id,
            submission_id = %submission.submission_id,
            "submission recorded"
        );
        self.submissions
            .write()
            .entry(submission.form_id.clone())
            .or_default()
            .push(submission);
        Ok(())
    }

    async fn list_submissions(&self, form_id: &str, limit: usize) -> StoreResult<Vec<FormSubmission>> {
        self.ensure_open()?;
        let submissions = self.submissions.read();
        let all = submissions.get(form_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(all[all.len().saturating_sub(limit)..].to_vec())
    }

    async fn close(&self) -> StoreResult<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StoreError::Storage("store already closed".into()));
        }
        tracing::info!("form store closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FormData;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_form_definition_lifecycle() {
        let store = InMemoryFormStore::new();
        assert!(matches!(
            store.get_form_definition(sample::CONTACT_FORM_ID).await,
            Err(StoreError::NotFound { kind: "form", .. })
        ));

        store
            .save_form_definition(sample::CONTACT_FORM_ID, sample::contact_form())
            .await
            .unwrap();
        let loaded = store.get_form_definition(sample::CONTACT_FORM_ID).await.unwrap();
        assert_eq!(loaded, sample::contact_form());
    }

    #[tokio::test]
    async fn test_save_rejects_mismatched_id() {
        let store = InMemoryFormStore::new();
        let result = store.save_form_definition("other", sample::contact_form()).await;
        assert!(matches!(result, Err(StoreError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_list_returns_most_recent() {
        let store = InMemoryFormStore::with_sample();
        for i in 0..5 {
            let mut data = FormData::new();
            data.insert("n".into(), json!(i));
            store
                .insert_submission(FormSubmission::new(sample::CONTACT_FORM_ID, data))
                .await
                .unwrap();
        }

        let recent = store.list_submissions(sample::CONTACT_FORM_ID, 2).await.unwrap();
        let ns: Vec<_> = recent.iter().map(|s| s.data["n"].clone()).collect();
        assert_eq!(ns, vec![json!(3), json!(4)]);

        assert_eq!(store.list_submissions(sample::CONTACT_FORM_ID, 100).await.unwrap().len(), 5);
        assert!(store.list_submissions("unknown", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let store = Arc::new(InMemoryFormStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.insert_submission(FormSubmission::new("f", FormData::new())).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        let all = store.list_submissions("f", 100).await.unwrap();
        assert_eq!(all.len(), 16);
    }

    #[tokio::test]
    async fn test_closed_store_refuses_calls() {
        let store = InMemoryFormStore::with_sample();
        store.close().await.unwrap();
        assert!(matches!(
            store.get_form_definition(sample::CONTACT_FORM_ID).await,
            Err(StoreError::Storage(_))
        ));
        assert!(store.close().await.is_err());
    }
}
