// crates/data-values-schema/src/lib.rs
// ============================================================================
// Module: Data Values Schema Library
// Description: JSON Schema generation for closed data-value type models.
// Purpose: Single source of truth for type model to schema conversion.
// Dependencies: serde, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! `data-values-schema` converts an in-memory [`TypeNode`] tree describing
//! configuration data values into a JSON Schema (draft 2020-12) document.
//!
//! - [`PropertyCalculator`] maps every node to a schema object.
//! - [`compare_keywords`] fixes the keyword order of every schema object, so
//!   output is deterministic.
//! - [`JsonSchemaDocument`] adds the `$schema`/`$id`/`description` envelope.
//!
//! ```
//! use data_values_schema::JsonSchemaDocument;
//! use data_values_schema::ScalarKind;
//! use data_values_schema::TypeNode;
//! use serde_json::json;
//!
//! let model = TypeNode::document(TypeNode::map([(
//!     "name",
//!     TypeNode::scalar(ScalarKind::String, Some(json!(""))),
//! )]));
//! let document = JsonSchemaDocument::new().generate(&model)?;
//! assert_eq!(document["properties"]["name"]["type"], "string");
//! # Ok::<(), data_values_schema::ConvertError>(())
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod calculator;
pub mod config;
pub mod document;
pub mod extract;
pub mod key_order;
pub mod model;
pub mod schema_object;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::SchemaAuditEvent;
pub use audit::SchemaAuditSink;
pub use audit::StderrAuditSink;
pub use calculator::ConvertError;
pub use calculator::PropertyCalculator;
pub use config::ConfigError;
pub use config::SchemaConfig;
pub use document::JsonSchemaDocument;
pub use document::SCHEMA_DIALECT;
pub use extract::DocumentationExtractor;
pub use extract::ScalarTypeNames;
pub use extract::ValidationsExtractor;
pub use key_order::compare_keywords;
pub use model::*;
pub use schema_object::SchemaObject;
