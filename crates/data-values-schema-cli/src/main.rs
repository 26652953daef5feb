// crates/data-values-schema-cli/src/main.rs
// ============================================================================
// Module: Data Values Schema CLI
// Description: CLI entrypoint for generating data values JSON Schemas.
// Purpose: Load type models from disk and emit or verify schema documents.
// Dependencies: clap, data-values-schema, serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! `dv-schema generate` loads a type model (JSON or YAML, chosen by file
//! extension), converts it and writes the schema document as JSON or YAML.
//! `dv-schema check` verifies that an on-disk document matches what
//! `generate` would produce, keyword order included.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use data_values_schema::ConfigError;
use data_values_schema::ConvertError;
use data_values_schema::JsonSchemaDocument;
use data_values_schema::SchemaConfig;
use data_values_schema::TypeNode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted size for model and expected-document files.
const MAX_INPUT_FILE_SIZE: u64 = 8 * 1024 * 1024;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Schema generator CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "dv-schema", about = "Generate JSON Schema documents for data values.")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a schema document from a type model.
    Generate {
        /// Type model file (`.json`, `.yaml` or `.yml`).
        #[arg(long, value_name = "FILE")]
        model: PathBuf,
        /// Configuration file.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Verify an existing schema document matches the generated one.
    Check {
        /// Type model file (`.json`, `.yaml` or `.yml`).
        #[arg(long, value_name = "FILE")]
        model: PathBuf,
        /// Previously generated document (`.json`, `.yaml` or `.yml`).
        #[arg(long, value_name = "FILE")]
        expected: PathBuf,
        /// Configuration file.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// Serialization formats for emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failures.
#[derive(Debug, Error)]
enum CliError {
    /// Reading or writing a file failed.
    #[error("{path}: {message}")]
    Io {
        /// File involved.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// An input file is larger than allowed.
    #[error("{path}: file exceeds size limit")]
    TooLarge {
        /// Offending file.
        path: String,
    },
    /// An input file could not be parsed.
    #[error("{path}: parse error: {message}")]
    Parse {
        /// Offending file.
        path: String,
        /// Parser error text.
        message: String,
    },
    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The type model could not be converted.
    #[error("schema generation failed: {0}")]
    Convert(#[from] ConvertError),
    /// The document could not be serialized.
    #[error("failed to serialize schema: {0}")]
    Serialize(String),
    /// The on-disk document differs from the generated one.
    #[error("{path} does not match the generated schema")]
    Mismatch {
        /// Checked file.
        path: String,
    },
}

// ============================================================================
// SECTION: CLI Execution
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Executes the CLI command.
fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            model,
            config,
            out,
            format,
        } => {
            let document = generate(&model, config.as_deref())?;
            let rendered = render(&document, format)?;
            match out {
                Some(path) => fs::write(&path, rendered).map_err(|err| io_error(&path, &err)),
                None => {
                    let mut stdout = std::io::stdout();
                    stdout.write_all(rendered.as_bytes()).map_err(|err| CliError::Io {
                        path: "stdout".to_string(),
                        message: err.to_string(),
                    })
                }
            }
        }
        Command::Check {
            model,
            expected,
            config,
        } => {
            let document = generate(&model, config.as_deref())?;
            let on_disk: Value = parse_file(&expected)?;
            if canonical_text(&on_disk)? == canonical_text(&document)? {
                Ok(())
            } else {
                Err(CliError::Mismatch {
                    path: expected.display().to_string(),
                })
            }
        }
    }
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &CliError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "dv-schema: {err}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: CLI Helpers
// ============================================================================

/// Loads configuration and the model, then generates the document.
fn generate(model: &Path, config: Option<&Path>) -> Result<Value, CliError> {
    let config = SchemaConfig::load(config)?;
    let assembler = JsonSchemaDocument::from_config(&config)?;
    let node: TypeNode = parse_file(model)?;
    Ok(assembler.generate(&node)?)
}

/// Reads a bounded file and parses it by extension.
fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let size = fs::metadata(path).map_err(|err| io_error(path, &err))?.len();
    if size > MAX_INPUT_FILE_SIZE {
        return Err(CliError::TooLarge {
            path: path.display().to_string(),
        });
    }
    let bytes = fs::read(path).map_err(|err| io_error(path, &err))?;
    let parsed = if is_yaml(path) {
        serde_yaml::from_slice(&bytes).map_err(|err| err.to_string())
    } else {
        serde_json::from_slice(&bytes).map_err(|err| err.to_string())
    };
    parsed.map_err(|message| CliError::Parse {
        path: path.display().to_string(),
        message,
    })
}

/// Returns true for `.yaml` and `.yml` paths.
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Serializes a document in the requested format with a trailing newline.
fn render(document: &Value, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|err| CliError::Serialize(err.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(document).map_err(|err| CliError::Serialize(err.to_string()))
        }
    }
}

/// Compact JSON text; equal text means equal content and keyword order.
fn canonical_text(document: &Value) -> Result<String, CliError> {
    serde_json::to_string(document).map_err(|err| CliError::Serialize(err.to_string()))
}

/// Builds an I/O error for a path.
fn io_error(path: &Path, err: &std::io::Error) -> CliError {
    CliError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
