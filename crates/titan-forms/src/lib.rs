//! Form-Titan form engine
//!
//! Forms are described declaratively: a list of field definitions plus a
//! recursive layout tree. This crate checks those descriptions, decides for
//! arbitrary submission data which fields are visible, and validates the
//! visible ones.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      FormDefinition                           │
//! │   formId | name | config.mode | fields | layoutDefinition     │
//! └───────────────┬───────────────────────────────┬───────────────┘
//!                 │ fields                        │ walk()
//!                 ▼                               ▼
//!        ┌─────────────────┐            ┌──────────────────┐
//!        │  Field Schema   │            │   Layout Tree    │
//!        └────────┬────────┘            └──────────────────┘
//!                 │ per field, with submission data
//!                 ▼
//!        ┌─────────────────┐  visible   ┌──────────────────┐
//!        │   Visibility    │──────────►│    Validator     │──► FormValidation
//!        └─────────────────┘            └──────────────────┘
//! ```
//!
//! Everything except [`store`] is pure: no shared state, safe to call from
//! any number of tasks at once.
//!
//! # Example
//!
//! ```
//! use titan_forms::{sample, FormData, ValidationCode};
//!
//! let form = sample::contact_form();
//! let mut data = FormData::new();
//! data.insert("email".into(), serde_json::json!("not-an-email"));
//!
//! let result = form.validate(&data);
//! assert!(!result.valid);
//! assert!(result.codes("email").contains(&ValidationCode::PatternMismatch));
//! ```

#![warn(clippy::all)]

pub mod definition;
pub mod error;
pub mod layout;
pub mod sample;
pub mod schema;
pub mod store;
pub mod submission;
pub mod validator;
pub mod value;
pub mod visibility;

pub use definition::{FormConfig, FormDefinition, FormMode};
pub use error::{ConfigWarning, SchemaError, SchemaResult, StoreError, StoreResult};
pub use layout::{Attributes, LayoutNode, Walk};
pub use schema::{FieldDefinition, FieldOption, FieldType, FieldValidation, VisibilityOperator, VisibilityRule};
pub use store::{FormStore, InMemoryFormStore};
pub use submission::FormSubmission;
pub use validator::{validate, validate_form, FormValidation, ValidationCode, ValidationError};
pub use value::{FieldValue, FormData};
pub use visibility::{is_visible, Visibility};
