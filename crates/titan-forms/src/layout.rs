//! Layout tree
//!
//! A form's presentation structure is a tree of [`LayoutNode`]s. Containers
//! own their children outright, so the tree cannot share nodes or form
//! cycles. Duplicate node ids are rejected by [`LayoutNode::check`], which
//! `FormDefinition::build` runs on every layout.
//!
//! ```text
//! root (container)
//!  ├── header (container)
//!  │    └── title (container)
//!  └── form_body (container)
//!       ├── email_field (field → email)
//!       └── phone_field (field → phone)
//! ```

use crate::error::{SchemaError, SchemaResult};
use crate::schema::FieldDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Presentation hints attached to a node
pub type Attributes = Map<String, Value>;

/// One node of the layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "lowercase", try_from = "RawLayoutNode")]
pub enum LayoutNode {
    /// Groups child nodes under a presentation element
    Container {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        element: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<Attributes>,
        children: Vec<LayoutNode>,
    },
    /// Renders a single field
    Field {
        id: String,
        #[serde(rename = "fieldId")]
        field_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<Attributes>,
    },
}

impl LayoutNode {
    /// Container with no children yet
    pub fn container(id: impl Into<String>, element: impl Into<String>) -> Self {
        Self::Container {
            id: id.into(),
            element: Some(element.into()),
            attributes: None,
            children: Vec::new(),
        }
    }

    /// Field reference
    pub fn field(id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self::Field { id: id.into(), field_id: field_id.into(), attributes: None }
    }

    /// Append a child; no-op on field nodes.
    pub fn with_child(mut self, child: LayoutNode) -> Self {
        if let Self::Container { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        let attributes = match &mut self {
            Self::Container { attributes, .. } | Self::Field { attributes, .. } => attributes,
        };
        attributes.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Container { id, .. } | Self::Field { id, .. } => id,
        }
    }

    /// Referenced field id for field nodes
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::Field { field_id, .. } => Some(field_id),
            Self::Container { .. } => None,
        }
    }

    pub fn children(&self) -> &[LayoutNode] {
        match self {
            Self::Container { children, .. } => children,
            Self::Field { .. } => &[],
        }
    }

    /// Depth-first, pre-order traversal starting at this node.
    ///
    /// Lazy, and each call starts a fresh traversal.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Reject empty or repeated node ids anywhere in the tree.
    pub fn check(&self) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for node in self.walk() {
            if node.id().is_empty() {
                return Err(SchemaError::EmptyNodeId);
            }
            if !seen.insert(node.id()) {
                return Err(SchemaError::DuplicateNodeId(node.id().to_string()));
            }
        }
        Ok(())
    }

    /// Field ids referenced by the tree, in document order, each resolved
    /// against `fields`.
    pub fn resolve_field_refs(&self, fields: &[FieldDefinition]) -> SchemaResult<Vec<&str>> {
        let known: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        self.walk()
            .filter_map(|node| node.field_id().map(|field_id| (node, field_id)))
            .map(|(node, field_id)| {
                if known.contains(field_id) {
                    Ok(field_id)
                } else {
                    Err(SchemaError::UnresolvedFieldRef {
                        node: node.id().to_string(),
                        field_id: field_id.to_string(),
                    })
                }
            })
            .collect()
    }
}

/// Pre-order iterator over a layout tree
pub struct Walk<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a LayoutNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Wire shape accepted for a node before it is checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayoutNode {
    id: String,
    component: String,
    #[serde(default)]
    element: Option<String>,
    #[serde(default)]
    attributes: Option<Attributes>,
    #[serde(default)]
    children: Option<Vec<LayoutNode>>,
    #[serde(default)]
    field_id: Option<String>,
}

impl TryFrom<RawLayoutNode> for LayoutNode {
    type Error = SchemaError;

    /// Per-node shape checks only; tree-wide id uniqueness is left to
    /// [`LayoutNode::check`], which runs once over the finished tree.
    fn try_from(raw: RawLayoutNode) -> SchemaResult<Self> {
        if raw.id.is_empty() {
            return Err(SchemaError::EmptyNodeId);
        }
        match raw.component.as_str() {
            "container" => Ok(Self::Container {
                id: raw.id,
                element: raw.element,
                attributes: raw.attributes,
                children: raw.children.unwrap_or_default(),
            }),
            "field" => {
                if raw.children.as_ref().is_some_and(|c| !c.is_empty()) {
                    return Err(SchemaError::FieldNodeWithChildren(raw.id));
                }
                let field_id = match raw.field_id {
                    Some(field_id) if !field_id.is_empty() => field_id,
                    _ => return Err(SchemaError::MissingFieldRef(raw.id)),
                };
                Ok(Self::Field { id: raw.id, field_id, attributes: raw.attributes })
            }
            _ => Err(SchemaError::UnknownComponent { node: raw.id, component: raw.component }),
        }
    }
}
