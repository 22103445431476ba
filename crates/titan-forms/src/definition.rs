//! Form definition: fields, layout and mode composed into one checked document
//!
//! A [`FormDefinition`] can only be obtained through [`FormDefinition::build`]
//! or by deserializing JSON, which runs the same checks. Holding one means
//! every id is unique, every layout `fieldId` resolves and every pattern
//! compiles.

use crate::error::{ConfigWarning, SchemaError, SchemaResult};
use crate::layout::LayoutNode;
use crate::schema::FieldDefinition;
use crate::validator::{self, FormValidation};
use crate::value::FormData;
use crate::visibility;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Whether the form is being filled in or authored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Input,
    Edit,
}

/// Form-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub mode: FormMode,
}

impl FormConfig {
    pub fn new(mode: FormMode) -> Self {
        Self { mode }
    }
}

/// A checked, identified form document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFormDefinition")]
pub struct FormDefinition {
    form_id: String,
    name: String,
    config: FormConfig,
    fields: Vec<FieldDefinition>,
    layout_definition: LayoutNode,
    #[serde(skip)]
    patterns: PatternSet,
}

/// Compiled validation patterns keyed by field id.
///
/// Derived entirely from `fields`, so it never takes part in equality.
#[derive(Debug, Clone, Default)]
struct PatternSet(HashMap<String, Regex>);

impl PartialEq for PatternSet {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl FormDefinition {
    /// Check and compose a definition.
    ///
    /// Fails on an empty form id, any malformed field, duplicate field ids,
    /// an invalid layout tree, or a layout `fieldId` with no matching field.
    pub fn build(
        form_id: impl Into<String>,
        name: impl Into<String>,
        config: FormConfig,
        fields: Vec<FieldDefinition>,
        layout_definition: LayoutNode,
    ) -> SchemaResult<Self> {
        let form_id = form_id.into();
        if form_id.is_empty() {
            return Err(SchemaError::EmptyFormId);
        }

        let mut seen = HashSet::new();
        let mut patterns = HashMap::new();
        for field in &fields {
            let pattern = field.compile()?;
            if !seen.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateFieldId(field.id.clone()));
            }
            if let Some(re) = pattern {
                patterns.insert(field.id.clone(), re);
            }
        }

        layout_definition.check()?;
        layout_definition.resolve_field_refs(&fields)?;

        tracing::debug!(form_id = %form_id, fields = fields.len(), "form definition built");
        Ok(Self {
            form_id,
            name: name.into(),
            config,
            fields,
            layout_definition,
            patterns: PatternSet(patterns),
        })
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Field by id
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Root of the layout tree
    pub fn layout(&self) -> &LayoutNode {
        &self.layout_definition
    }

    /// Compiled pattern for a field
    pub fn pattern(&self, field_id: &str) -> Option<&Regex> {
        self.patterns.0.get(field_id)
    }

    /// Field ids referenced by the layout, in document order
    pub fn field_refs(&self) -> Vec<&str> {
        self.layout_definition.walk().filter_map(LayoutNode::field_id).collect()
    }

    /// Default values keyed by field name, for seeding an input pass
    pub fn initial_data(&self) -> FormData {
        self.fields
            .iter()
            .filter_map(|f| f.default_value.clone().map(|v| (f.name.clone(), v)))
            .collect()
    }

    /// Field ids shown for `data`, in layout order. A field placed by
    /// several layout nodes is listed once, at its first placement.
    pub fn visible_fields(&self, data: &FormData) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.field_refs()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .filter(|id| self.field(id).is_some_and(|f| visibility::is_visible(f, data)))
            .collect()
    }

    /// Run visibility then validation over `data`.
    pub fn validate(&self, data: &FormData) -> FormValidation {
        validator::validate_form(self, data)
    }

    /// Non-fatal problems detectable without submission data.
    pub fn lint(&self) -> Vec<ConfigWarning> {
        let keys: HashSet<&str> = self
            .fields
            .iter()
            .flat_map(|f| [f.id.as_str(), f.name.as_str()])
            .collect();
        let reachable: HashSet<&str> = self.field_refs().into_iter().collect();

        let mut warnings = Vec::new();
        for field in &self.fields {
            for rule in field.rules() {
                if !rule.operator.is_known() {
                    warnings.push(ConfigWarning::UnknownOperator {
                        field: field.id.clone(),
                        operator: rule.operator.to_string(),
                    });
                }
                let head = rule.field.split('.').next().unwrap_or_default();
                if !keys.contains(rule.field.as_str()) && !keys.contains(head) {
                    warnings.push(ConfigWarning::UnknownRuleTarget {
                        field: field.id.clone(),
                        target: rule.field.clone(),
                    });
                }
            }
            if !reachable.contains(field.id.as_str()) {
                warnings.push(ConfigWarning::UnreachableField { field: field.id.clone() });
            }
        }
        warnings
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormDefinition {
    form_id: String,
    name: String,
    #[serde(default)]
    config: FormConfig,
    fields: Vec<FieldDefinition>,
    layout_definition: LayoutNode,
}

impl TryFrom<RawFormDefinition> for FormDefinition {
    type Error = SchemaError;

    fn try_from(raw: RawFormDefinition) -> SchemaResult<Self> {
        Self::build(raw.form_id, raw.name, raw.config, raw.fields, raw.layout_definition)
    }
}
