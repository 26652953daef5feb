// crates/data-values-schema/src/model.rs
// ============================================================================
// Module: Type Model
// Description: Closed-variant type-descriptor tree for data values schemas.
// Purpose: Provide the read-only input consumed by the schema converter.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The type model is built upstream by the schema authoring phase and is only
//! read here. [`TypeNode`] is a closed set of eight variants; converters match
//! on it exhaustively.
//!
//! Models can also be loaded from JSON or YAML. The serde form is internally
//! tagged by `kind`:
//!
//! ```json
//! { "kind": "map", "items": [
//!     { "kind": "map_item", "key": "name",
//!       "value": { "kind": "scalar", "type": "string", "default": "" } }
//! ] }
//! ```
//!
//! Deserialized input bypasses the typed constructors, so structural variants
//! may show up in value slots. The converter reports that as an invariant
//! violation rather than guessing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Type Nodes
// ============================================================================

/// A node of the type model.
///
/// # Invariants
/// - The variant set is closed; there is no extension point.
/// - Value slots (`Document`, `MapItem`, `ArrayItem`, `Null` children) hold a
///   value type: `Map`, `Array`, `Scalar`, `Null` or `Any`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    /// Root of a data values document.
    Document(DocumentType),
    /// Object with an ordered list of named fields.
    Map(MapType),
    /// Named field of a map.
    MapItem(MapItemType),
    /// Homogeneous sequence.
    Array(ArrayType),
    /// Element descriptor of an array.
    ArrayItem(ArrayItemType),
    /// Primitive value.
    Scalar(ScalarType),
    /// Nullable wrapper around a non-null value type.
    Null(NullType),
    /// Unconstrained value.
    Any(AnyType),
}

impl TypeNode {
    /// Returns the stable snake-case name of the concrete variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.as_node_ref().kind_name()
    }

    /// Returns true for variants allowed in a value slot.
    #[must_use]
    pub const fn is_value_type(&self) -> bool {
        matches!(
            self,
            Self::Map(_) | Self::Array(_) | Self::Scalar(_) | Self::Null(_) | Self::Any(_)
        )
    }

    /// Returns a borrowed view of this node.
    #[must_use]
    pub const fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Self::Document(node) => NodeRef::Document(node),
            Self::Map(node) => NodeRef::Map(node),
            Self::MapItem(node) => NodeRef::MapItem(node),
            Self::Array(node) => NodeRef::Array(node),
            Self::ArrayItem(node) => NodeRef::ArrayItem(node),
            Self::Scalar(node) => NodeRef::Scalar(node),
            Self::Null(node) => NodeRef::Null(node),
            Self::Any(node) => NodeRef::Any(node),
        }
    }
}

// ============================================================================
// SECTION: Borrowed Views
// ============================================================================

/// Borrowed view of a type node.
///
/// Map fields and array elements are stored as their payload structs rather
/// than as [`TypeNode`]s; this view lets converters and extractors treat every
/// position uniformly without cloning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    /// Root of a data values document.
    Document(&'a DocumentType),
    /// Object with an ordered list of named fields.
    Map(&'a MapType),
    /// Named field of a map.
    MapItem(&'a MapItemType),
    /// Homogeneous sequence.
    Array(&'a ArrayType),
    /// Element descriptor of an array.
    ArrayItem(&'a ArrayItemType),
    /// Primitive value.
    Scalar(&'a ScalarType),
    /// Nullable wrapper around a non-null value type.
    Null(&'a NullType),
    /// Unconstrained value.
    Any(&'a AnyType),
}

impl<'a> NodeRef<'a> {
    /// Returns the stable snake-case name of the concrete variant.
    #[must_use]
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::Document(_) => "document",
            Self::Map(_) => "map",
            Self::MapItem(_) => "map_item",
            Self::Array(_) => "array",
            Self::ArrayItem(_) => "array_item",
            Self::Scalar(_) => "scalar",
            Self::Null(_) => "null",
            Self::Any(_) => "any",
        }
    }

    /// Returns the documentation attached to this node, if the variant carries any.
    #[must_use]
    pub const fn documentation(self) -> Option<&'a Documentation> {
        match self {
            Self::Map(node) => Some(&node.documentation),
            Self::Array(node) => Some(&node.documentation),
            Self::Scalar(node) => Some(&node.documentation),
            Self::Null(node) => Some(&node.documentation),
            Self::Any(node) => Some(&node.documentation),
            Self::Document(_) | Self::MapItem(_) | Self::ArrayItem(_) => None,
        }
    }

    /// Returns the validation attached to this node, if any.
    #[must_use]
    pub const fn validation(self) -> Option<&'a Validation> {
        match self {
            Self::Document(node) => node.validation.as_ref(),
            Self::Map(node) => node.validation.as_ref(),
            Self::MapItem(node) => node.validation.as_ref(),
            Self::Array(node) => node.validation.as_ref(),
            Self::Scalar(node) => node.validation.as_ref(),
            Self::Null(node) => node.validation.as_ref(),
            Self::Any(node) => node.validation.as_ref(),
            Self::ArrayItem(_) => None,
        }
    }

    /// Returns the value type this node stands for, looking through wrappers.
    ///
    /// `Document`, `MapItem`, `ArrayItem` and `Null` delegate to their child;
    /// the remaining variants return themselves. Used to pick length keywords
    /// for validations declared on a field rather than on its value.
    #[must_use]
    pub fn effective_value(self) -> Self {
        let mut current = self;
        loop {
            current = match current {
                Self::Document(node) => node.value.as_node_ref(),
                Self::MapItem(node) => node.value.as_node_ref(),
                Self::ArrayItem(node) => node.value.as_node_ref(),
                Self::Null(node) => node.value.as_node_ref(),
                Self::Map(_) | Self::Array(_) | Self::Scalar(_) | Self::Any(_) => return current,
            };
        }
    }
}

// ============================================================================
// SECTION: Variant Payloads
// ============================================================================

/// Root document descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentType {
    /// Value type of the document body.
    pub value: Box<TypeNode>,
    /// Document-level validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Object descriptor with ordered fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapType {
    /// Fields in declaration order.
    #[serde(default)]
    pub items: Vec<MapItemType>,
    /// Documentation for the object.
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub documentation: Documentation,
    /// Object-level validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Named field descriptor.
///
/// Inside a map's `items` list the serde form may repeat `kind: map_item`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MapItemForm")]
pub struct MapItemType {
    /// Field name.
    pub key: String,
    /// Value type of the field.
    pub value: Box<TypeNode>,
    /// Field-level validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Sequence descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayType {
    /// Element descriptor.
    pub item: ArrayItemType,
    /// Default value for the whole array.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
    /// Documentation for the array.
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub documentation: Documentation,
    /// Array-level validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Element descriptor of an array.
///
/// As an array's `item` the serde form may repeat `kind: array_item`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArrayItemForm")]
pub struct ArrayItemType {
    /// Value type of each element.
    pub value: Box<TypeNode>,
}

/// Primitive kinds known to the type model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// UTF-8 string.
    String,
    /// Whole number.
    Integer,
    /// Arbitrary JSON number.
    Number,
    /// Floating-point number.
    Float,
    /// Boolean.
    Boolean,
}

impl ScalarKind {
    /// All scalar kinds, in declaration order.
    pub const ALL: [Self; 5] =
        [Self::String, Self::Integer, Self::Number, Self::Float, Self::Boolean];
}

/// Primitive value descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarType {
    /// Primitive kind.
    #[serde(rename = "type")]
    pub kind: ScalarKind,
    /// Default value.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
    /// Documentation for the value.
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub documentation: Documentation,
    /// Value-level validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Nullable wrapper descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NullType {
    /// Wrapped non-null value type.
    pub value: Box<TypeNode>,
    /// Documentation for the nullable value.
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub documentation: Documentation,
    /// Validation for the nullable value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

/// Unconstrained value descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnyType {
    /// Default value.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
    /// Documentation for the value.
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub documentation: Documentation,
    /// Value-level validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

// ============================================================================
// SECTION: Documentation
// ============================================================================

/// Human-facing documentation attached to a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Documentation {
    /// Short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecation marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    /// Example values in authoring order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

impl Documentation {
    /// Returns true when no documentation is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deprecated.is_none()
            && self.examples.is_empty()
    }
}

/// Deprecation marker with an optional notice for authors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deprecation {
    /// Notice shown by authoring tools; not part of the emitted schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Example value with an optional description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Example {
    /// Description of the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value.
    pub value: Value,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validation attached to a node.
///
/// # Invariants
/// - A validation with a `when` condition is conditional; standard rendering
///   skips it entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Validation {
    /// Rules in authoring order.
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
    /// Optional condition gating the rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

impl Validation {
    /// Builds an unconditional validation from rules.
    #[must_use]
    pub const fn new(rules: Vec<ValidationRule>) -> Self {
        Self {
            rules,
            when: None,
        }
    }

    /// Returns true when the rules apply unconditionally.
    #[must_use]
    pub const fn is_unconditional(&self) -> bool {
        self.when.is_none()
    }
}

/// Single validation rule descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case", deny_unknown_fields)]
pub enum ValidationRule {
    /// Minimum length (characters, items, or properties).
    MinLength {
        /// Lower bound.
        value: u64,
    },
    /// Maximum length (characters, items, or properties).
    MaxLength {
        /// Upper bound.
        value: u64,
    },
    /// Inclusive numeric lower bound.
    Min {
        /// Lower bound.
        value: serde_json::Number,
    },
    /// Inclusive numeric upper bound.
    Max {
        /// Upper bound.
        value: serde_json::Number,
    },
    /// Value must equal one of the listed values.
    OneOf {
        /// Allowed values.
        values: Vec<Value>,
    },
    /// Value must not be null; expressed by `type` alone in JSON Schema.
    NotNull,
    /// Opaque keyword contributed verbatim.
    Keyword {
        /// Keyword name.
        name: String,
        /// Keyword value.
        value: Value,
    },
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl TypeNode {
    /// Builds a document around a value type.
    #[must_use]
    pub fn document(value: Self) -> Self {
        Self::Document(DocumentType {
            value: Box::new(value),
            validation: None,
        })
    }

    /// Builds a map from `(key, value)` pairs in declaration order.
    #[must_use]
    pub fn map<K: Into<String>>(fields: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Map(MapType {
            items: fields.into_iter().map(|(key, value)| MapItemType::new(key, value)).collect(),
            documentation: Documentation::default(),
            validation: None,
        })
    }

    /// Builds an array of `item` with an optional array default.
    #[must_use]
    pub fn array(item: Self, default: Option<Value>) -> Self {
        Self::Array(ArrayType {
            item: ArrayItemType {
                value: Box::new(item),
            },
            default,
            documentation: Documentation::default(),
            validation: None,
        })
    }

    /// Builds a scalar of `kind` with an optional default.
    #[must_use]
    pub fn scalar(kind: ScalarKind, default: Option<Value>) -> Self {
        Self::Scalar(ScalarType {
            kind,
            default,
            documentation: Documentation::default(),
            validation: None,
        })
    }

    /// Wraps a value type as nullable.
    #[must_use]
    pub fn nullable(value: Self) -> Self {
        Self::Null(NullType {
            value: Box::new(value),
            documentation: Documentation::default(),
            validation: None,
        })
    }

    /// Builds an unconstrained value with an optional default.
    #[must_use]
    pub fn any(default: Option<Value>) -> Self {
        Self::Any(AnyType {
            default,
            documentation: Documentation::default(),
            validation: None,
        })
    }

    /// Attaches documentation to variants that carry it; other variants are returned unchanged.
    #[must_use]
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        match &mut self {
            Self::Map(node) => node.documentation = documentation,
            Self::Array(node) => node.documentation = documentation,
            Self::Scalar(node) => node.documentation = documentation,
            Self::Null(node) => node.documentation = documentation,
            Self::Any(node) => node.documentation = documentation,
            Self::Document(_) | Self::MapItem(_) | Self::ArrayItem(_) => {}
        }
        self
    }

    /// Attaches a validation to variants that carry one; `ArrayItem` is returned unchanged.
    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        let validation = Some(validation);
        match &mut self {
            Self::Document(node) => node.validation = validation,
            Self::Map(node) => node.validation = validation,
            Self::MapItem(node) => node.validation = validation,
            Self::Array(node) => node.validation = validation,
            Self::Scalar(node) => node.validation = validation,
            Self::Null(node) => node.validation = validation,
            Self::Any(node) => node.validation = validation,
            Self::ArrayItem(_) => {}
        }
        self
    }
}

impl MapItemType {
    /// Builds a field without validation.
    #[must_use]
    pub fn new(key: impl Into<String>, value: TypeNode) -> Self {
        Self {
            key: key.into(),
            value: Box::new(value),
            validation: None,
        }
    }

    /// Attaches a field-level validation.
    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }
}

// ============================================================================
// SECTION: Serde Helpers
// ============================================================================

/// Serde form of [`MapItemType`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MapItemForm {
    /// Optional repeat of the variant tag.
    #[serde(default)]
    kind: Option<String>,
    /// Field name.
    key: String,
    /// Value type of the field.
    value: Box<TypeNode>,
    /// Field-level validation.
    #[serde(default)]
    validation: Option<Validation>,
}

impl TryFrom<MapItemForm> for MapItemType {
    type Error = String;

    fn try_from(form: MapItemForm) -> Result<Self, Self::Error> {
        check_item_kind(form.kind.as_deref(), "map_item")?;
        Ok(Self {
            key: form.key,
            value: form.value,
            validation: form.validation,
        })
    }
}

/// Serde form of [`ArrayItemType`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ArrayItemForm {
    /// Optional repeat of the variant tag.
    #[serde(default)]
    kind: Option<String>,
    /// Value type of each element.
    value: Box<TypeNode>,
}

impl TryFrom<ArrayItemForm> for ArrayItemType {
    type Error = String;

    fn try_from(form: ArrayItemForm) -> Result<Self, Self::Error> {
        check_item_kind(form.kind.as_deref(), "array_item")?;
        Ok(Self {
            value: form.value,
        })
    }
}

/// Rejects an item whose repeated tag names a different variant.
fn check_item_kind(kind: Option<&str>, expected: &str) -> Result<(), String> {
    match kind {
        Some(found) if found != expected => {
            Err(format!("expected kind `{expected}`, found `{found}`"))
        }
        _ => Ok(()),
    }
}

/// Deserializes a present field as `Some`, keeping an explicit `null`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
