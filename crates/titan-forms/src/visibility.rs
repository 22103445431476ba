//! Conditional visibility evaluation
//!
//! A field without rules is always visible. A field with rules is visible
//! only when every rule holds. Evaluation never fails: unparseable operands
//! make a rule false, and an unknown operator makes it false and yields a
//! [`ConfigWarning`].

use crate::error::ConfigWarning;
use crate::schema::{FieldDefinition, VisibilityOperator, VisibilityRule};
use crate::value::{self, FormData};
use serde_json::Value;

/// Visibility decision for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    pub visible: bool,
    pub warnings: Vec<ConfigWarning>,
}

/// Whether `field` is shown for `data`.
pub fn is_visible(field: &FieldDefinition, data: &FormData) -> bool {
    evaluate(field, data).visible
}

/// Evaluate every rule of `field`, collecting warnings.
pub fn evaluate(field: &FieldDefinition, data: &FormData) -> Visibility {
    let mut warnings = Vec::new();
    let mut visible = true;
    // no short-circuit: every malformed rule is reported
    for rule in field.rules() {
        match evaluate_rule(rule, data) {
            Some(holds) => visible &= holds,
            None => {
                tracing::warn!(
                    field = %field.id,
                    operator = %rule.operator,
                    "unknown visibility operator, hiding field"
                );
                warnings.push(ConfigWarning::UnknownOperator {
                    field: field.id.clone(),
                    operator: rule.operator.to_string(),
                });
                visible = false;
            }
        }
    }
    Visibility { visible, warnings }
}

/// `None` when the operator is unknown.
fn evaluate_rule(rule: &VisibilityRule, data: &FormData) -> Option<bool> {
    let target = value::lookup(data, &rule.field);
    let text = target_text(target);

    let holds = match &rule.operator {
        VisibilityOperator::Equals => text.as_deref() == Some(rule.value.as_str()),
        VisibilityOperator::NotEquals => text.as_deref() != Some(rule.value.as_str()),
        VisibilityOperator::Contains => text.is_some_and(|t| t.contains(&rule.value)),
        VisibilityOperator::NotContains => !text.is_some_and(|t| t.contains(&rule.value)),
        VisibilityOperator::GreaterThan => compare(target, &rule.value, |a, b| a > b),
        VisibilityOperator::LessThan => compare(target, &rule.value, |a, b| a < b),
        VisibilityOperator::IsEmpty => value::is_empty(target),
        VisibilityOperator::IsNotEmpty => !value::is_empty(target),
        VisibilityOperator::InArray => {
            text.is_some_and(|t| rule.value.split(',').any(|entry| entry.trim() == t))
        }
        VisibilityOperator::Other(_) => return None,
    };
    Some(holds)
}

/// Absent and null read as the empty string; collections have no text form.
fn target_text(target: Option<&Value>) -> Option<String> {
    match target {
        None | Some(Value::Null) => Some(String::new()),
        Some(v) => value::as_text(v),
    }
}

fn compare(target: Option<&Value>, operand: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (target.and_then(value::as_number), value::parse_number(operand)) {
        (Some(lhs), Some(rhs)) => op(lhs, rhs),
        _ => false,
    }
}
