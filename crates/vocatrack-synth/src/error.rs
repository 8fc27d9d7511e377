//! Error types for the synthesis driver.

use std::path::PathBuf;

use thiserror::Error;
use vocatrack_audio::AssemblyError;
use vocatrack_spec::{BackendError, Slot};

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while producing clips.
#[derive(Debug, Error)]
pub enum SynthError {
    /// TTS program not found.
    #[error("TTS program not found. Set `synthesizer.program` in the project file, set VOCATRACK_TTS, or put `vocatrack-tts` on PATH")]
    ProgramNotFound,

    /// Failed to spawn the TTS program.
    #[error("failed to spawn TTS program: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// TTS program did not finish in time.
    #[error("TTS program timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// TTS program exited with non-zero status.
    #[error("TTS program exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// TTS program succeeded but left no output file.
    #[error("TTS program produced no output at {path}")]
    OutputMissing { path: PathBuf },

    /// Reference voice recording could not be read.
    #[error("cannot read reference audio {path}: {source}")]
    ReferenceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Synthesized bytes are not a usable clip.
    #[error("synthesized {slot} clip for '{word}' is invalid: {source}")]
    InvalidClip {
        word: String,
        slot: Slot,
        #[source]
        source: AssemblyError,
    },

    /// Writing a clip into the layout failed.
    #[error("failed to write {path}: {source}")]
    WriteClip {
        path: PathBuf,
        #[source]
        source: AssemblyError,
    },

    /// Request could not be serialized.
    #[error("failed to serialize synthesis request: {0}")]
    SerializeRequest(#[source] serde_json::Error),

    /// Nothing to synthesize.
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates a process failure error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        SynthError::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }
}

impl BackendError for SynthError {
    fn code(&self) -> &'static str {
        match self {
            SynthError::ProgramNotFound => "SYNTH_001",
            SynthError::SpawnFailed(_) => "SYNTH_002",
            SynthError::Timeout { .. } => "SYNTH_003",
            SynthError::ProcessFailed { .. } => "SYNTH_004",
            SynthError::OutputMissing { .. } => "SYNTH_005",
            SynthError::ReferenceUnavailable { .. } => "SYNTH_006",
            SynthError::InvalidClip { .. } => "SYNTH_007",
            SynthError::WriteClip { .. } => "SYNTH_008",
            SynthError::SerializeRequest(_) => "SYNTH_009",
            SynthError::EmptyVocabulary => "SYNTH_010",
            SynthError::Io(_) => "SYNTH_011",
        }
    }

    fn category(&self) -> &'static str {
        "synth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SynthError::ProgramNotFound.code(), "SYNTH_001");
        assert_eq!(SynthError::Timeout { timeout_secs: 5 }.code(), "SYNTH_003");
        assert_eq!(SynthError::EmptyVocabulary.category(), "synth");
    }

    #[test]
    fn test_process_failed_message() {
        let err = SynthError::process_failed(2, "model not loaded");
        assert_eq!(
            err.to_string(),
            "TTS program exited with status 2: model not loaded"
        );
    }

    #[test]
    fn test_invalid_clip_names_word_and_slot() {
        let err = SynthError::InvalidClip {
            word: "cat".to_string(),
            slot: Slot::Meaning,
            source: AssemblyError::malformed("missing RIFF signature"),
        };
        let msg = err.to_string();
        assert!(msg.contains("meaning"));
        assert!(msg.contains("'cat'"));
    }
}
