//! Error types for Form-Titan

use serde::Serialize;
use thiserror::Error;

/// Construction-time failure for a malformed form definition.
///
/// Every variant is raised eagerly while a definition is built or
/// deserialized, never while it is rendered or evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Form id is empty
    #[error("form id cannot be empty")]
    EmptyFormId,

    /// Field id is empty
    #[error("field id cannot be empty (field named {name:?})")]
    EmptyFieldId { name: String },

    /// Layout node id is empty
    #[error("layout node id cannot be empty")]
    EmptyNodeId,

    /// Field type is not one of the known input types
    #[error("field {field}: unknown type {field_type:?}")]
    UnknownFieldType { field: String, field_type: String },

    /// Choice field declared without options
    #[error("field {field}: type {field_type} requires at least one option")]
    MissingOptions { field: String, field_type: String },

    /// Option with an empty value
    #[error("field {field}: option {label:?} has an empty value")]
    EmptyOptionValue { field: String, label: String },

    /// minLength greater than maxLength
    #[error("field {field}: minLength {min} is greater than maxLength {max}")]
    InvertedLengthBounds { field: String, min: u64, max: u64 },

    /// min greater than max
    #[error("field {field}: min {min} is greater than max {max}")]
    InvertedRangeBounds { field: String, min: f64, max: f64 },

    /// pattern does not compile
    #[error("field {field}: invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },

    /// Two fields share an id
    #[error("duplicate field id: {0}")]
    DuplicateFieldId(String),

    /// Two layout nodes share an id
    #[error("duplicate layout node id: {0}")]
    DuplicateNodeId(String),

    /// Layout component is neither container nor field
    #[error("layout node {node}: unknown component {component:?}")]
    UnknownComponent { node: String, component: String },

    /// Field node without a fieldId
    #[error("layout node {0}: field component requires a fieldId")]
    MissingFieldRef(String),

    /// Field node with children
    #[error("layout node {0}: field component cannot have children")]
    FieldNodeWithChildren(String),

    /// fieldId does not resolve against the form's fields
    #[error("layout node {node}: fieldId {field_id:?} does not match any field")]
    UnresolvedFieldRef { node: String, field_id: String },
}

/// Non-fatal configuration problem, reported alongside results and never
/// raised.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// Visibility rule with an operator the evaluator does not know.
    /// The rule evaluates false.
    #[error("field {field}: unknown visibility operator {operator:?}")]
    UnknownOperator { field: String, operator: String },

    /// Visibility rule that reads a field the form does not define
    #[error("field {field}: visibility rule reads undefined field {target:?}")]
    UnknownRuleTarget { field: String, target: String },

    /// Field that no layout node references
    #[error("field {field} is not reachable from the layout")]
    UnreachableField { field: String },
}

/// Persistence collaborator error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Requested form or submission is absent
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Definition rejected by the store
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Backing storage failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Malformed definition
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl StoreError {
    /// Missing form definition
    pub fn form_not_found(form_id: impl Into<String>) -> Self {
        Self::NotFound { kind: "form", id: form_id.into() }
    }
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
