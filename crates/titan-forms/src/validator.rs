//! Field and form validation
//!
//! Every applicable check runs, so one call can report several violations
//! for the same field. Hidden fields are never validated.

use crate::definition::FormDefinition;
use crate::error::ConfigWarning;
use crate::schema::{FieldDefinition, FieldType};
use crate::value::{self, FieldValue, FormData};
use crate::visibility;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Kind of violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    Required,
    TooShort,
    TooLong,
    PatternMismatch,
    OutOfRange,
    TypeMismatch,
    InvalidEmail,
}

/// One violation for one field
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    pub code: ValidationCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ValidationCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Outcome of validating a whole submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    /// True when every field's error list is empty
    pub valid: bool,
    /// Errors keyed by field id, with an entry for every field
    pub errors: BTreeMap<String, Vec<ValidationError>>,
    /// Ids of fields hidden for this data, in field order
    pub hidden: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl FormValidation {
    /// Errors for one field, empty when the field is valid, hidden or unknown
    pub fn field_errors(&self, field_id: &str) -> &[ValidationError] {
        self.errors.get(field_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Codes reported for one field, in check order
    pub fn codes(&self, field_id: &str) -> Vec<ValidationCode> {
        self.field_errors(field_id).iter().map(|e| e.code).collect()
    }
}

/// Validate one value against its field definition.
///
/// Returns no errors when `is_visible` is false.
pub fn validate(field: &FieldDefinition, value: Option<&FieldValue>, is_visible: bool) -> Vec<ValidationError> {
    if !is_visible {
        return Vec::new();
    }
    let compiled = field
        .validation
        .as_ref()
        .and_then(|v| v.pattern.as_deref())
        .map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(field = %field.id, error = %e, "pattern does not compile");
                None
            }
        });
    run_checks(field, value, compiled.as_ref().map(Option::as_ref))
}

/// Evaluate visibility for every field, then validate the visible ones.
pub fn validate_form(form: &FormDefinition, data: &FormData) -> FormValidation {
    let mut errors = BTreeMap::new();
    let mut hidden = Vec::new();
    let mut warnings = Vec::new();

    for field in form.fields() {
        let visibility = visibility::evaluate(field, data);
        warnings.extend(visibility.warnings);
        if !visibility.visible {
            hidden.push(field.id.clone());
        }

        let field_errors = if visibility.visible {
            let pattern = form.pattern(&field.id);
            let declared = field.validation.as_ref().is_some_and(|v| v.pattern.is_some());
            run_checks(field, data.get(&field.name), declared.then_some(pattern))
        } else {
            Vec::new()
        };

        tracing::debug!(
            field = %field.id,
            visible = visibility.visible,
            errors = field_errors.len(),
            "field evaluated"
        );
        errors.insert(field.id.clone(), field_errors);
    }

    let valid = errors.values().all(Vec::is_empty);
    FormValidation { valid, errors, hidden, warnings }
}

/// `pattern` is `None` when no pattern is declared and `Some(None)` when the
/// declared pattern could not be compiled, which fails every value.
fn run_checks(
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    pattern: Option<Option<&Regex>>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let rules = field.validation.as_ref();

    let value = match value {
        Some(v) if !value::is_empty(Some(v)) => v,
        _ => {
            if rules.is_some_and(|r| r.required) {
                errors.push(ValidationError::new(ValidationCode::Required, "This field is required"));
            }
            return errors;
        }
    };
    let text = value::as_text(value);

    if let Some(rules) = rules {
        if let Some(text) = &text {
            let length = text.chars().count() as u64;
            if let Some(min) = rules.min_length.filter(|&min| length < min) {
                errors.push(ValidationError::new(
                    ValidationCode::TooShort,
                    format!("Must be at least {min} characters"),
                ));
            }
            if let Some(max) = rules.max_length.filter(|&max| length > max) {
                errors.push(ValidationError::new(
                    ValidationCode::TooLong,
                    format!("Must be no more than {max} characters"),
                ));
            }
        }

        if let Some(pattern) = pattern {
            let matched = match (pattern, &text) {
                (Some(re), Some(text)) => re.is_match(text),
                _ => false,
            };
            if !matched {
                errors.push(ValidationError::new(ValidationCode::PatternMismatch, "Invalid format"));
            }
        }

        if rules.min.is_some() || rules.max.is_some() {
            match value::as_number(value) {
                Some(n) => {
                    if let Some(min) = rules.min.filter(|&min| n < min) {
                        errors.push(ValidationError::new(
                            ValidationCode::OutOfRange,
                            format!("Must be at least {min}"),
                        ));
                    }
                    if let Some(max) = rules.max.filter(|&max| n > max) {
                        errors.push(ValidationError::new(
                            ValidationCode::OutOfRange,
                            format!("Must be no more than {max}"),
                        ));
                    }
                }
                None => errors.push(ValidationError::new(ValidationCode::TypeMismatch, "Must be a number")),
            }
        }
    }

    if field.field_type == FieldType::Email && !text.as_deref().is_some_and(looks_like_email) {
        errors.push(ValidationError::new(ValidationCode::InvalidEmail, "Invalid email address"));
    }

    errors
}

/// `local@domain.tld` with no whitespace and a single `@`.
fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
