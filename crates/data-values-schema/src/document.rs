// crates/data-values-schema/src/document.rs
// ============================================================================
// Module: Schema Document Assembly
// Description: Top-level JSON Schema document envelope and generation.
// Purpose: Wrap the root schema object with dialect, id, and description.
// Dependencies: serde_json, crate::audit, crate::calculator, crate::config
// ============================================================================

//! ## Overview
//! [`JsonSchemaDocument`] produces the final output document. The envelope
//! keywords `$schema`, `$id` and `description` always come first, followed by
//! the root schema entries in canonical keyword order. A root entry that
//! collides with an envelope keyword is dropped; the envelope value wins.
//!
//! [`JsonSchemaDocument::generate`] runs conversion and assembly in one call
//! and records one audit event per call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::audit::NoopAuditSink;
use crate::audit::SchemaAuditEvent;
use crate::audit::SchemaAuditEventParams;
use crate::audit::SchemaAuditSink;
use crate::audit::SchemaOutcome;
use crate::audit::sink_from_config;
use crate::calculator::ConvertError;
use crate::calculator::PropertyCalculator;
use crate::config::ConfigError;
use crate::config::SchemaConfig;
use crate::model::TypeNode;
use crate::schema_object::SchemaObject;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON Schema dialect emitted as `$schema`.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Default value emitted as `$id`.
pub const DEFAULT_SCHEMA_ID: &str = "https://example.biz/schema/ytt/data-values.json";

/// Default root `description`.
pub const DEFAULT_DESCRIPTION: &str = "Schema for data values, generated by ytt";

/// Envelope keywords in emission order.
pub const ENVELOPE_KEYWORDS: [&str; 3] = ["$schema", "$id", "description"];

// ============================================================================
// SECTION: Document Assembler
// ============================================================================

/// Builds complete JSON Schema documents from type models.
#[derive(Clone)]
pub struct JsonSchemaDocument {
    /// Converter for the root node.
    calculator: PropertyCalculator,
    /// Value emitted as `$id`.
    id: String,
    /// Value emitted as the root `description`.
    description: String,
    /// Destination for generation audit events.
    audit: Arc<dyn SchemaAuditSink>,
}

impl fmt::Debug for JsonSchemaDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaDocument")
            .field("calculator", &self.calculator)
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Default for JsonSchemaDocument {
    fn default() -> Self {
        Self {
            calculator: PropertyCalculator::default(),
            id: DEFAULT_SCHEMA_ID.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            audit: Arc::new(NoopAuditSink),
        }
    }
}

/// Assembled document plus the root keywords displaced by the envelope.
struct Assembled {
    /// Output document.
    document: Value,
    /// Root keywords kept after the envelope.
    root_keywords: usize,
    /// Root keywords dropped in favor of the envelope.
    dropped: Vec<String>,
}

impl JsonSchemaDocument {
    /// Creates an assembler with the default envelope and no auditing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assembler from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid or the
    /// configured audit log cannot be opened.
    pub fn from_config(config: &SchemaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let audit =
            sink_from_config(&config.audit).map_err(|err| ConfigError::Io(err.to_string()))?;
        Ok(Self {
            calculator: PropertyCalculator::new().with_max_depth(config.limits.max_depth),
            id: config.document.id.clone(),
            description: config.document.description.clone(),
            audit,
        })
    }

    /// Replaces the property calculator.
    #[must_use]
    pub fn with_calculator(mut self, calculator: PropertyCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Sets the `$id` value.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the root `description` value.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn SchemaAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the configured `$id`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the property calculator.
    #[must_use]
    pub const fn calculator(&self) -> &PropertyCalculator {
        &self.calculator
    }

    /// Wraps a root schema object in the document envelope.
    #[must_use]
    pub fn assemble(&self, root: SchemaObject) -> Value {
        self.assemble_root(root).document
    }

    /// Converts a type model into a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when conversion fails; no document is produced.
    pub fn generate(&self, node: &TypeNode) -> Result<Value, ConvertError> {
        match self.calculator.convert(node) {
            Ok(root) => {
                let assembled = self.assemble_root(root);
                self.audit.record(&SchemaAuditEvent::new(SchemaAuditEventParams {
                    schema_id: self.id.clone(),
                    root_kind: node.kind_name(),
                    outcome: SchemaOutcome::Ok,
                    root_keywords: assembled.root_keywords,
                    dropped_keywords: assembled.dropped,
                    error_kind: None,
                    message: None,
                }));
                Ok(assembled.document)
            }
            Err(err) => {
                self.audit.record(&SchemaAuditEvent::new(SchemaAuditEventParams {
                    schema_id: self.id.clone(),
                    root_kind: node.kind_name(),
                    outcome: SchemaOutcome::Error,
                    root_keywords: 0,
                    dropped_keywords: Vec::new(),
                    error_kind: Some(err.kind()),
                    message: Some(err.to_string()),
                }));
                Err(err)
            }
        }
    }

    /// Emits the envelope, then the sorted root entries that do not collide.
    fn assemble_root(&self, root: SchemaObject) -> Assembled {
        let mut document = Map::new();
        document.insert("$schema".to_string(), Value::from(SCHEMA_DIALECT));
        document.insert("$id".to_string(), Value::from(self.id.as_str()));
        document.insert("description".to_string(), Value::from(self.description.as_str()));

        let mut root_keywords = 0;
        let mut dropped = Vec::new();
        for (keyword, value) in root.sorted().into_entries() {
            if ENVELOPE_KEYWORDS.contains(&keyword.as_str()) {
                dropped.push(keyword);
            } else {
                document.insert(keyword, value);
                root_keywords += 1;
            }
        }
        Assembled {
            document: Value::Object(document),
            root_keywords,
            dropped,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
