//! JSON output for the `--json` flag.
//!
//! Every command writes exactly one envelope to stdout:
//!
//! ```json
//! { "ok": true, "command": "assemble", "errors": [], "result": { ... } }
//! ```
//!
//! Library errors keep their stable codes (`ASSEMBLY_003`, `SYNTH_004`, ...).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::process::ExitCode;
use vocatrack_audio::AssemblyError;
use vocatrack_spec::{BackendError, SpecError};
use vocatrack_synth::SynthError;

/// Error codes for failures that do not come from a library crate.
pub mod error_codes {
    /// File could not be read or written
    pub const IO: &str = "CLI_001";
    /// Any other command failure
    pub const COMMAND: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "ASSEMBLY_006", "CLI_001")
    pub code: String,
    /// Crate the error came from
    pub category: String,
    /// Human-readable message including context
    pub message: String,
}

impl JsonError {
    pub fn new(
        code: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            category: category.into(),
            message: message.into(),
        }
    }

    /// Maps an error chain to the code of its first library error.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        for cause in err.chain() {
            let backend: Option<&dyn BackendError> =
                if let Some(e) = cause.downcast_ref::<AssemblyError>() {
                    Some(e)
                } else if let Some(e) = cause.downcast_ref::<SynthError>() {
                    Some(e)
                } else if let Some(e) = cause.downcast_ref::<SpecError>() {
                    Some(e)
                } else {
                    None
                };
            if let Some(e) = backend {
                return Self::new(e.code(), e.category(), message);
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::new(error_codes::IO, "cli", message);
            }
        }
        Self::new(error_codes::COMMAND, "cli", message)
    }
}

/// The single JSON document a command prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput {
    pub ok: bool,
    pub command: String,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl CommandOutput {
    pub fn success(command: &str, result: serde_json::Value) -> Self {
        Self {
            ok: true,
            command: command.to_string(),
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(command: &str, errors: Vec<JsonError>) -> Self {
        Self {
            ok: false,
            command: command.to_string(),
            errors,
            result: None,
        }
    }

    /// Builds the envelope for a command outcome.
    pub fn from_result<T: Serialize>(command: &str, result: Result<T>) -> Self {
        match result.and_then(|value| Ok(serde_json::to_value(value)?)) {
            Ok(value) => Self::success(command, value),
            Err(e) => Self::failure(command, vec![JsonError::from_error(&e)]),
        }
    }
}

/// Prints an envelope and maps it to an exit code.
pub fn print(output: &CommandOutput) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(if output.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Prints a command outcome as JSON.
pub fn emit<T: Serialize>(command: &str, result: Result<T>) -> Result<ExitCode> {
    print(&CommandOutput::from_result(command, result))
}
