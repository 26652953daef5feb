// crates/data-values-schema/src/config.rs
// ============================================================================
// Module: Schema Generator Configuration
// Description: Configuration loading and validation for schema generation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; omitted sections fall back to defaults that
//! produce the standard document envelope. Invalid values fail closed.
//!
//! ```toml
//! [document]
//! id = "https://example.biz/schema/ytt/data-values.json"
//! description = "Schema for data values, generated by ytt"
//!
//! [limits]
//! max_depth = 128
//!
//! [audit]
//! enabled = true
//! path = "schema-audit.log"
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::calculator::DEFAULT_MAX_DEPTH;
use crate::document::DEFAULT_DESCRIPTION;
use crate::document::DEFAULT_SCHEMA_ID;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "data-values-schema.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DATA_VALUES_SCHEMA_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the `$id` and description strings.
const MAX_ENVELOPE_TEXT_LENGTH: usize = 2048;
/// Upper bound accepted for `limits.max_depth`.
///
/// Conversion recurses once per node; this bound keeps the deepest accepted
/// model within a 2 MiB thread stack in debug builds.
pub const MAX_DEPTH_LIMIT: usize = 256;

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Schema generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Document envelope settings.
    #[serde(default)]
    pub document: DocumentConfig,
    /// Conversion limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl SchemaConfig {
    /// Loads configuration from disk.
    ///
    /// An explicit `path` wins over [`CONFIG_ENV_VAR`], which wins over the
    /// default file name. When no path was given and the default file does
    /// not exist, defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.document.validate()?;
        self.limits.validate()?;
        self.audit.validate()
    }
}

/// Document envelope configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Value emitted as `$id`.
    #[serde(default = "default_schema_id")]
    pub id: String,
    /// Value emitted as the root `description`.
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            id: default_schema_id(),
            description: default_description(),
        }
    }
}

impl DocumentConfig {
    /// Validates envelope strings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_envelope_text("document.id", &self.id)?;
        if self.id.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid("document.id must not contain whitespace".to_string()));
        }
        validate_envelope_text("document.description", &self.description)
    }
}

/// Conversion limits configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum number of nodes on any path from the root, root included.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LimitsConfig {
    /// Validates limit ranges.
    fn validate(self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "limits.max_depth must be between 1 and {MAX_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Enables audit events.
    #[serde(default)]
    pub enabled: bool,
    /// Append-only log path; stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if !self.enabled {
                return Err(ConfigError::Invalid(
                    "audit.path requires audit.enabled = true".to_string(),
                ));
            }
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default `$id` for serde.
fn default_schema_id() -> String {
    DEFAULT_SCHEMA_ID.to_string()
}

/// Default description for serde.
fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

/// Default depth limit for serde.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Resolves the config path; the flag reports whether it was asked for.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a non-empty, bounded envelope string.
fn validate_envelope_text(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_ENVELOPE_TEXT_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
