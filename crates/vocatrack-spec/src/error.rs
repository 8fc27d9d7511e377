//! Error types for the vocatrack data model.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data model operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while loading or validating vocabulary and configuration.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The vocabulary table could not be parsed.
    #[error("vocabulary line {line}: {message}")]
    Vocabulary {
        /// 1-based line number in the source text.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid config field '{field}': {message}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for [`crate::ProjectConfig`].
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] serde_json::Error),
}

impl SpecError {
    /// Creates an invalid config error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Common trait for errors surfaced to the CLI.
///
/// Each crate's error type implements this so that failures can be reported
/// with a stable code and a category regardless of where they originated.
///
/// # Example
///
/// ```ignore
/// use vocatrack_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Stable error code such as `"ASSEMBLY_003"`.
    fn code(&self) -> &'static str;

    /// Human-readable message; defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category, e.g. `"assembly"`, `"synth"`, `"spec"`.
    fn category(&self) -> &'static str;
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::Vocabulary { .. } => "SPEC_001",
            SpecError::InvalidConfig { .. } => "SPEC_002",
            SpecError::Read { .. } => "SPEC_003",
            SpecError::ParseConfig(_) => "SPEC_004",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}
