// crates/data-values-schema/src/calculator.rs
// ============================================================================
// Module: Property Calculator
// Description: Recursive conversion from type nodes to JSON Schema objects.
// Purpose: Emit one canonical schema object per type node.
// Dependencies: serde_json, thiserror, crate::extract, crate::model
// ============================================================================

//! ## Overview
//! [`PropertyCalculator::convert`] maps one [`TypeNode`] to one sorted
//! [`SchemaObject`]. Each variant has its own emission rule; nested schemas
//! are converted first and frozen into the parent. Conversion either produces
//! the full object or fails; no partial output is returned.
//!
//! The calculator holds only shared, immutable collaborators, so one instance
//! can convert independent models from several threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::extract::DocumentationExtractor;
use crate::extract::JsonTypeNames;
use crate::extract::ScalarTypeNames;
use crate::extract::StandardDocumentation;
use crate::extract::StandardValidations;
use crate::extract::ValidationsExtractor;
use crate::model::AnyType;
use crate::model::ArrayType;
use crate::model::MapType;
use crate::model::NodeRef;
use crate::model::NullType;
use crate::model::ScalarKind;
use crate::model::ScalarType;
use crate::model::TypeNode;
use crate::schema_object::SchemaObject;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum nesting depth accepted by the calculator.
///
/// Depth counts every node on a path from the root, the root included.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Types allowed by an unconstrained value, in emission order.
pub const ANY_TYPES: [&str; 6] = ["null", "string", "number", "object", "array", "boolean"];

/// JSON type name appended by the nullable wrapper.
const NULL_TYPE: &str = "null";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while converting a type model.
///
/// # Invariants
/// - Every variant means the model and the converter disagree; callers must
///   not turn these into partial output.
/// - [`ConvertError::UnexpectedVariant`] names the offending concrete variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A variant appeared where the model never places it.
    #[error("unrecognized type `{variant}` in {slot}")]
    UnexpectedVariant {
        /// Concrete variant name.
        variant: &'static str,
        /// Slot that held it.
        slot: &'static str,
    },
    /// A map declared the same field twice.
    #[error("duplicate map key `{key}`")]
    DuplicateProperty {
        /// Repeated field name.
        key: String,
    },
    /// The model nests deeper than allowed.
    #[error("type model exceeds max depth {max_depth}")]
    DepthLimitExceeded {
        /// Configured limit.
        max_depth: usize,
    },
}

impl ConvertError {
    /// Returns a stable label for audit records.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnexpectedVariant {
                ..
            } => "unexpected_variant",
            Self::DuplicateProperty {
                ..
            } => "duplicate_property",
            Self::DepthLimitExceeded {
                ..
            } => "depth_limit_exceeded",
        }
    }
}

// ============================================================================
// SECTION: Calculator
// ============================================================================

/// Converts type nodes into JSON Schema objects.
#[derive(Clone)]
pub struct PropertyCalculator {
    /// Documentation collaborator.
    documentation: Arc<dyn DocumentationExtractor>,
    /// Validation collaborator.
    validations: Arc<dyn ValidationsExtractor>,
    /// Scalar type name collaborator.
    type_names: Arc<dyn ScalarTypeNames>,
    /// Maximum nesting depth.
    max_depth: usize,
}

impl fmt::Debug for PropertyCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyCalculator")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl Default for PropertyCalculator {
    fn default() -> Self {
        Self {
            documentation: Arc::new(StandardDocumentation),
            validations: Arc::new(StandardValidations),
            type_names: Arc::new(JsonTypeNames),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PropertyCalculator {
    /// Creates a calculator with the standard collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the documentation collaborator.
    #[must_use]
    pub fn with_documentation(mut self, documentation: Arc<dyn DocumentationExtractor>) -> Self {
        self.documentation = documentation;
        self
    }

    /// Replaces the validation collaborator.
    #[must_use]
    pub fn with_validations(mut self, validations: Arc<dyn ValidationsExtractor>) -> Self {
        self.validations = validations;
        self
    }

    /// Replaces the scalar type name collaborator.
    #[must_use]
    pub fn with_type_names(mut self, type_names: Arc<dyn ScalarTypeNames>) -> Self {
        self.type_names = type_names;
        self
    }

    /// Sets the maximum nesting depth.
    ///
    /// A model converts when no path from the root holds more than
    /// `max_depth` nodes. Conversion recurses once per node, so callers should
    /// keep this within [`MAX_DEPTH_LIMIT`](crate::config::MAX_DEPTH_LIMIT).
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Converts a node into a sorted schema object.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the model holds a variant in a slot it
    /// can never occupy, repeats a map key, or nests past the depth limit.
    pub fn convert(&self, node: &TypeNode) -> Result<SchemaObject, ConvertError> {
        self.calculate(node.as_node_ref(), 0)
    }

    /// Dispatches on the node variant.
    fn calculate(&self, node: NodeRef<'_>, depth: usize) -> Result<SchemaObject, ConvertError> {
        if depth >= self.max_depth {
            return Err(ConvertError::DepthLimitExceeded {
                max_depth: self.max_depth,
            });
        }
        let object = match node {
            NodeRef::Document(document) => {
                let mut object = self.value_slot(&document.value, "document value", depth)?;
                object.extend(self.validations.convert_validations(node));
                object
            }
            NodeRef::Map(map) => self.calculate_map(node, map, depth)?,
            NodeRef::MapItem(item) => {
                let mut object = self.value_slot(&item.value, "map item value", depth)?;
                object.extend(self.validations.convert_validations(node));
                object
            }
            NodeRef::Array(array) => self.calculate_array(node, array, depth)?,
            NodeRef::ArrayItem(item) => self.value_slot(&item.value, "array item value", depth)?,
            NodeRef::Scalar(scalar) => self.calculate_scalar(node, scalar),
            NodeRef::Null(null) => self.calculate_null(node, null, depth)?,
            NodeRef::Any(any) => self.calculate_any(node, any),
        };
        Ok(object.sorted())
    }

    /// Converts a child that must be a value type.
    fn value_slot(
        &self,
        child: &TypeNode,
        slot: &'static str,
        depth: usize,
    ) -> Result<SchemaObject, ConvertError> {
        if !child.is_value_type() {
            return Err(ConvertError::UnexpectedVariant {
                variant: child.kind_name(),
                slot,
            });
        }
        self.calculate(child.as_node_ref(), depth + 1)
    }

    /// Collects documentation then validation entries for a node.
    fn metadata(&self, node: NodeRef<'_>) -> SchemaObject {
        let mut object = SchemaObject::new();
        object.extend(self.documentation.collect_documentation(node));
        object.extend(self.validations.convert_validations(node));
        object
    }

    /// Emits an object schema with declared properties.
    fn calculate_map(
        &self,
        node: NodeRef<'_>,
        map: &MapType,
        depth: usize,
    ) -> Result<SchemaObject, ConvertError> {
        let mut object = self.metadata(node);
        object.insert("type", Value::from("object"));
        object.insert("additionalProperties", Value::Bool(false));

        let mut seen = HashSet::with_capacity(map.items.len());
        let mut properties = Map::new();
        for item in &map.items {
            if !seen.insert(item.key.as_str()) {
                return Err(ConvertError::DuplicateProperty {
                    key: item.key.clone(),
                });
            }
            let field = self.calculate(NodeRef::MapItem(item), depth + 1)?;
            properties.insert(item.key.clone(), field.into_value());
        }
        object.insert("properties", Value::Object(properties));
        Ok(object)
    }

    /// Emits an array schema.
    fn calculate_array(
        &self,
        node: NodeRef<'_>,
        array: &ArrayType,
        depth: usize,
    ) -> Result<SchemaObject, ConvertError> {
        let mut object = self.metadata(node);
        object.insert("type", Value::from("array"));
        if let Some(default) = &array.default {
            object.insert("default", default.clone());
        }
        let items = self.calculate(NodeRef::ArrayItem(&array.item), depth + 1)?;
        object.insert("items", items.into_value());
        Ok(object)
    }

    /// Emits a primitive schema.
    fn calculate_scalar(&self, node: NodeRef<'_>, scalar: &ScalarType) -> SchemaObject {
        let mut object = self.metadata(node);
        if let Some(default) = &scalar.default {
            object.insert("default", default.clone());
        }
        object.insert("type", Value::from(self.type_names.json_type_name(scalar.kind)));
        if scalar.kind == ScalarKind::Float {
            object.insert("format", Value::from("float"));
        }
        object
    }

    /// Emits the wrapped schema with `null` added to its `type`.
    fn calculate_null(
        &self,
        node: NodeRef<'_>,
        null: &NullType,
        depth: usize,
    ) -> Result<SchemaObject, ConvertError> {
        if let TypeNode::Null(_) = null.value.as_ref() {
            return Err(ConvertError::UnexpectedVariant {
                variant: null.value.kind_name(),
                slot: "null value",
            });
        }
        let mut object = self.metadata(node);
        let inner = self.value_slot(&null.value, "null value", depth)?;
        for (keyword, value) in inner.into_entries() {
            if keyword == "type" {
                object.insert(keyword, nullable_type(value));
            } else {
                object.insert(keyword, value);
            }
        }
        Ok(object)
    }

    /// Emits an unconstrained schema.
    fn calculate_any(&self, node: NodeRef<'_>, any: &AnyType) -> SchemaObject {
        let mut object = self.metadata(node);
        let types = ANY_TYPES.iter().map(|name| Value::from(*name)).collect();
        object.insert("type", Value::Array(types));
        if let Some(default) = &any.default {
            object.insert("default", default.clone());
        }
        object
    }
}

/// Rewrites a `type` value so it also admits `null`.
///
/// A single type `t` becomes `[t, "null"]`. A type list gains a trailing
/// `"null"` unless it already has one.
fn nullable_type(value: Value) -> Value {
    match value {
        Value::Array(mut names) => {
            if !names.iter().any(|name| name.as_str() == Some(NULL_TYPE)) {
                names.push(Value::from(NULL_TYPE));
            }
            Value::Array(names)
        }
        single => Value::Array(vec![single, Value::from(NULL_TYPE)]),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
