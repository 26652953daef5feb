// crates/data-values-schema/src/extract.rs
// ============================================================================
// Module: Keyword Extractors
// Description: Documentation, validation, and scalar-type collaborators.
// Purpose: Render per-node metadata into JSON Schema keyword entries.
// Dependencies: serde_json, crate::model
// ============================================================================

//! ## Overview
//! The converter asks three collaborators for keyword contributions:
//! - [`DocumentationExtractor`]: `title`, `description`, `deprecated`, examples.
//! - [`ValidationsExtractor`]: validation rules rendered as keywords.
//! - [`ScalarTypeNames`]: scalar kind to JSON primitive type name.
//!
//! Each has a standard implementation. Absent metadata yields no entries; it
//! is never rendered as a `null` placeholder.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::model::NodeRef;
use crate::model::ScalarKind;
use crate::model::ValidationRule;
use crate::schema_object::SchemaEntry;

// ============================================================================
// SECTION: Collaborator Traits
// ============================================================================

/// Renders a node's documentation into keyword entries.
pub trait DocumentationExtractor: Send + Sync {
    /// Returns documentation entries in emission order; empty when undocumented.
    fn collect_documentation(&self, node: NodeRef<'_>) -> Vec<SchemaEntry>;
}

/// Renders a node's validation rules into keyword entries.
pub trait ValidationsExtractor: Send + Sync {
    /// Returns validation entries in emission order; empty when unvalidated.
    fn convert_validations(&self, node: NodeRef<'_>) -> Vec<SchemaEntry>;
}

/// Maps scalar kinds to JSON Schema primitive type names.
pub trait ScalarTypeNames: Send + Sync {
    /// Returns the JSON primitive name for `kind`.
    fn json_type_name(&self, kind: ScalarKind) -> &'static str;
}

// ============================================================================
// SECTION: Standard Documentation
// ============================================================================

/// Standard documentation rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDocumentation;

impl DocumentationExtractor for StandardDocumentation {
    fn collect_documentation(&self, node: NodeRef<'_>) -> Vec<SchemaEntry> {
        let Some(documentation) = node.documentation() else {
            return Vec::new();
        };
        let mut entries = Vec::new();
        if let Some(title) = non_empty(documentation.title.as_deref()) {
            entries.push(("title".to_string(), Value::from(title)));
        }
        if let Some(description) = non_empty(documentation.description.as_deref()) {
            entries.push(("description".to_string(), Value::from(description)));
        }
        if documentation.deprecated.is_some() {
            entries.push(("deprecated".to_string(), Value::Bool(true)));
        }
        if let Some(first) = documentation.examples.first()
            && let Some(description) = non_empty(first.description.as_deref())
        {
            entries.push(("x-example-description".to_string(), Value::from(description)));
        }
        if !documentation.examples.is_empty() {
            let values = documentation.examples.iter().map(|example| example.value.clone());
            entries.push(("examples".to_string(), Value::Array(values.collect())));
        }
        entries
    }
}

/// Returns the string when it is present and non-blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

// ============================================================================
// SECTION: Standard Validations
// ============================================================================

/// Standard validation rendering.
///
/// Conditional validations (`when` set) render nothing. Length rules pick
/// their keyword from the node's effective value type.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidations;

/// Keyword family used for length rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthKeywords {
    /// `minProperties` / `maxProperties`.
    Properties,
    /// `minItems` / `maxItems`.
    Items,
    /// `minLength` / `maxLength`.
    Length,
}

impl LengthKeywords {
    /// Picks the keyword family for a node.
    fn for_node(node: NodeRef<'_>) -> Self {
        match node.effective_value() {
            NodeRef::Map(_) => Self::Properties,
            NodeRef::Array(_) => Self::Items,
            _ => Self::Length,
        }
    }

    /// Returns the lower-bound keyword.
    const fn min(self) -> &'static str {
        match self {
            Self::Properties => "minProperties",
            Self::Items => "minItems",
            Self::Length => "minLength",
        }
    }

    /// Returns the upper-bound keyword.
    const fn max(self) -> &'static str {
        match self {
            Self::Properties => "maxProperties",
            Self::Items => "maxItems",
            Self::Length => "maxLength",
        }
    }
}

impl ValidationsExtractor for StandardValidations {
    fn convert_validations(&self, node: NodeRef<'_>) -> Vec<SchemaEntry> {
        let Some(validation) = node.validation() else {
            return Vec::new();
        };
        if !validation.is_unconditional() {
            return Vec::new();
        }
        let lengths = LengthKeywords::for_node(node);
        validation
            .rules
            .iter()
            .filter_map(|rule| match rule {
                ValidationRule::MinLength {
                    value,
                } => Some((lengths.min().to_string(), Value::from(*value))),
                ValidationRule::MaxLength {
                    value,
                } => Some((lengths.max().to_string(), Value::from(*value))),
                ValidationRule::Min {
                    value,
                } => Some(("minimum".to_string(), Value::Number(value.clone()))),
                ValidationRule::Max {
                    value,
                } => Some(("maximum".to_string(), Value::Number(value.clone()))),
                ValidationRule::OneOf {
                    values,
                } => Some(("enum".to_string(), Value::Array(values.clone()))),
                ValidationRule::Keyword {
                    name,
                    value,
                } => Some((name.clone(), value.clone())),
                ValidationRule::NotNull => None,
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Standard Scalar Names
// ============================================================================

/// Standard scalar kind to JSON type name table.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTypeNames;

impl ScalarTypeNames for JsonTypeNames {
    fn json_type_name(&self, kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Number | ScalarKind::Float => "number",
            ScalarKind::Boolean => "boolean",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
