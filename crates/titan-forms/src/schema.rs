//! Field schema: input types, constraints, options and visibility rules

use crate::error::{SchemaError, SchemaResult};
use crate::value::FieldValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input type of a field.
///
/// Unrecognised type strings deserialize into [`FieldType::Other`] so the
/// document round-trips and [`FieldDefinition::check`] can reject it with a
/// typed error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Password,
    Number,
    Url,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
    /// Not a known input type
    Other(String),
}

impl FieldType {
    /// Wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Password => "password",
            Self::Number => "number",
            Self::Url => "url",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Date => "date",
            Self::Other(raw) => raw,
        }
    }

    /// Types whose value must be one of the declared options
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Whether this is a recognised type
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "password" => Self::Password,
            "number" => Self::Number,
            "url" => Self::Url,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "date" => Self::Date,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        match ty {
            FieldType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// Per-field validation constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Regular expression, matched with search semantics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldValidation {
    /// Required field with no other constraints
    pub fn required() -> Self {
        Self { required: true, ..Default::default() }
    }

    /// Check bound ordering and compile the pattern.
    pub fn check(&self, field: &str) -> SchemaResult<Option<Regex>> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaError::InvertedLengthBounds { field: field.to_string(), min, max });
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(SchemaError::InvertedRangeBounds { field: field.to_string(), min, max });
            }
        }
        self.pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                    field: field.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}

/// Comparison applied by a visibility rule.
///
/// Unknown operator strings are kept as [`VisibilityOperator::Other`]; the
/// evaluator treats them as a failing rule and reports a warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisibilityOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
    /// Target matches one entry of a comma-separated list
    InArray,
    Other(String),
}

impl VisibilityOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
            Self::InArray => "in_array",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for VisibilityOperator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "contains" => Self::Contains,
            "not_contains" => Self::NotContains,
            "greater_than" => Self::GreaterThan,
            "less_than" => Self::LessThan,
            "is_empty" => Self::IsEmpty,
            "is_not_empty" => Self::IsNotEmpty,
            "in_array" => Self::InArray,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for VisibilityOperator {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<VisibilityOperator> for String {
    fn from(op: VisibilityOperator) -> Self {
        match op {
            VisibilityOperator::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for VisibilityOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditional predicate over another field's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    /// Data key of the field this rule reads
    pub field: String,
    pub operator: VisibilityOperator,
    /// Comparand; ignored by `is_empty` / `is_not_empty`
    #[serde(default)]
    pub value: String,
}

impl VisibilityRule {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<VisibilityOperator>,
        value: impl Into<String>,
    ) -> Self {
        Self { field: field.into(), operator: operator.into(), value: value.into() }
    }
}

/// One input slot of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Vec<VisibilityRule>>,
}

impl FieldDefinition {
    /// Field whose name matches its id
    pub fn new(id: impl Into<String>, field_type: impl Into<FieldType>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            field_type: field_type.into(),
            label: label.into(),
            placeholder: None,
            instructions: None,
            default_value: None,
            options: None,
            validation: None,
            visibility: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_rule(mut self, rule: VisibilityRule) -> Self {
        self.visibility.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// Visibility rules, empty when none are declared
    pub fn rules(&self) -> &[VisibilityRule] {
        self.visibility.as_deref().unwrap_or(&[])
    }

    /// Structural validity of this field on its own.
    pub fn check(&self) -> SchemaResult<()> {
        self.compile().map(|_| ())
    }

    /// Structural checks, yielding the compiled pattern when one is declared.
    pub(crate) fn compile(&self) -> SchemaResult<Option<Regex>> {
        if self.id.is_empty() {
            return Err(SchemaError::EmptyFieldId { name: self.name.clone() });
        }
        if !self.field_type.is_known() {
            return Err(SchemaError::UnknownFieldType {
                field: self.id.clone(),
                field_type: self.field_type.to_string(),
            });
        }
        let options = self.options.as_deref().unwrap_or(&[]);
        if self.field_type.requires_options() && options.is_empty() {
            return Err(SchemaError::MissingOptions {
                field: self.id.clone(),
                field_type: self.field_type.to_string(),
            });
        }
        if let Some(option) = options.iter().find(|o| o.value.is_empty()) {
            return Err(SchemaError::EmptyOptionValue {
                field: self.id.clone(),
                label: option.label.clone(),
            });
        }
        match &self.validation {
            Some(validation) => validation.check(&self.id),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_round_trip() {
        let ty: FieldType = serde_json::from_value(json!("textarea")).unwrap();
        assert_eq!(ty, FieldType::Textarea);

        let odd: FieldType = serde_json::from_value(json!("hologram")).unwrap();
        assert_eq!(odd, FieldType::Other("hologram".into()));
        assert_eq!(serde_json::to_value(&odd).unwrap(), json!("hologram"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let field = FieldDefinition::new("x", "hologram", "X");
        assert!(matches!(field.check(), Err(SchemaError::UnknownFieldType { .. })));
    }

    #[test]
    fn test_choice_requires_options() {
        let field = FieldDefinition::new("method", "select", "Method");
        assert!(matches!(field.check(), Err(SchemaError::MissingOptions { .. })));

        let field = field.with_options(vec![]);
        assert!(matches!(field.check(), Err(SchemaError::MissingOptions { .. })));

        let field = FieldDefinition::new("method", "radio", "Method")
            .with_options(vec![FieldOption::new("Email", "email")]);
        assert!(field.check().is_ok());
    }

    #[test]
    fn test_empty_option_value_rejected() {
        let field = FieldDefinition::new("m", "select", "M")
            .with_options(vec![FieldOption::new("Blank", "")]);
        assert!(matches!(field.check(), Err(SchemaError::EmptyOptionValue { .. })));
    }

    #[test]
    fn test_empty_id_rejected() {
        let field = FieldDefinition::new("", "text", "Nameless");
        assert!(matches!(field.check(), Err(SchemaError::EmptyFieldId { .. })));
    }

    #[test]
    fn test_inverted_bounds() {
        let field = FieldDefinition::new("bio", "textarea", "Bio").with_validation(FieldValidation {
            min_length: Some(10),
            max_length: Some(5),
            ..Default::default()
        });
        assert_eq!(
            field.check(),
            Err(SchemaError::InvertedLengthBounds { field: "bio".into(), min: 10, max: 5 })
        );

        let field = FieldDefinition::new("age", "number", "Age").with_validation(FieldValidation {
            min: Some(65.0),
            max: Some(18.0),
            ..Default::default()
        });
        assert!(matches!(field.check(), Err(SchemaError::InvertedRangeBounds { .. })));

        let equal = FieldDefinition::new("age", "number", "Age").with_validation(FieldValidation {
            min: Some(18.0),
            max: Some(18.0),
            ..Default::default()
        });
        assert!(equal.check().is_ok());
    }

    #[test]
    fn test_invalid_pattern() {
        let field = FieldDefinition::new("code", "text", "Code").with_validation(FieldValidation {
            pattern: Some("([a-z".into()),
            ..Default::default()
        });
        assert!(matches!(field.check(), Err(SchemaError::InvalidPattern { .. })));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let field = FieldDefinition::new("first_name", "text", "First Name")
            .with_default(json!("Ada"))
            .with_validation(FieldValidation { required: true, min_length: Some(2), ..Default::default() });

        let wire = serde_json::to_value(&field).unwrap();
        assert_eq!(wire["type"], json!("text"));
        assert_eq!(wire["defaultValue"], json!("Ada"));
        assert_eq!(wire["validation"]["minLength"], json!(2));
        assert!(wire.get("placeholder").is_none());
    }
}
