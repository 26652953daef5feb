// crates/data-values-schema/src/audit.rs
// ============================================================================
// Module: Schema Audit Logging
// Description: Structured audit events for schema generation.
// Purpose: Emit JSON-lines records without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every call to
//! [`JsonSchemaDocument::generate`](crate::document::JsonSchemaDocument::generate)
//! records one [`SchemaAuditEvent`]. Sinks decide where the event goes:
//! stderr, an append-only file, or nowhere. Events are serialized as single
//! JSON lines so deployments can route them to any log pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::config::AuditConfig;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaOutcome {
    /// Document produced.
    Ok,
    /// Conversion aborted.
    Error,
}

/// Schema generation audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// `$id` of the generated document.
    pub schema_id: String,
    /// Variant name of the model root.
    pub root_kind: &'static str,
    /// Generation outcome.
    pub outcome: SchemaOutcome,
    /// Number of root keywords after the envelope.
    pub root_keywords: usize,
    /// Root keywords dropped because they collide with the envelope.
    pub dropped_keywords: Vec<String>,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Error message when generation failed.
    pub message: Option<String>,
}

/// Inputs used to build a [`SchemaAuditEvent`].
#[derive(Debug, Clone)]
pub struct SchemaAuditEventParams {
    /// `$id` of the generated document.
    pub schema_id: String,
    /// Variant name of the model root.
    pub root_kind: &'static str,
    /// Generation outcome.
    pub outcome: SchemaOutcome,
    /// Number of root keywords after the envelope.
    pub root_keywords: usize,
    /// Root keywords dropped because they collide with the envelope.
    pub dropped_keywords: Vec<String>,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Error message when generation failed.
    pub message: Option<String>,
}

impl SchemaAuditEvent {
    /// Builds an event stamped with the current time.
    #[must_use]
    pub fn new(params: SchemaAuditEventParams) -> Self {
        Self {
            event: match params.outcome {
                SchemaOutcome::Ok => "schema_generated",
                SchemaOutcome::Error => "schema_generation_failed",
            },
            timestamp_ms: now_millis(),
            schema_id: params.schema_id,
            root_kind: params.root_kind,
            outcome: params.outcome,
            root_keywords: params.root_keywords,
            dropped_keywords: params.dropped_keywords,
            error_kind: params.error_kind,
            message: params.message,
        }
    }
}

/// Returns milliseconds since the Unix epoch, or zero if the clock is before it.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or(0)
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for schema generation events.
pub trait SchemaAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &SchemaAuditEvent);
}

/// Audit sink writing JSON lines to stderr.
pub struct StderrAuditSink;

impl SchemaAuditSink for StderrAuditSink {
    fn record(&self, event: &SchemaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink appending JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens (or creates) the audit log at `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SchemaAuditSink for FileAuditSink {
    fn record(&self, event: &SchemaAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that drops all events.
pub struct NoopAuditSink;

impl SchemaAuditSink for NoopAuditSink {
    fn record(&self, _event: &SchemaAuditEvent) {}
}

/// Builds the sink selected by the audit configuration.
///
/// # Errors
///
/// Returns an I/O error when the configured log file cannot be opened.
pub fn sink_from_config(config: &AuditConfig) -> io::Result<Arc<dyn SchemaAuditSink>> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => Ok(Arc::new(FileAuditSink::new(Path::new(path.trim()))?)),
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
