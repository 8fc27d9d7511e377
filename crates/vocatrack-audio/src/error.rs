//! Error types for the assembly engine.

use std::fmt;

use thiserror::Error;
use vocatrack_spec::{BackendError, Slot};

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// A field of a PCM format, named in format mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatField {
    SampleRate,
    ChannelCount,
    BitsPerSample,
}

impl FormatField {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatField::SampleRate => "sample_rate",
            FormatField::ChannelCount => "channel_count",
            FormatField::BitsPerSample => "bits_per_sample",
        }
    }
}

impl fmt::Display for FormatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that abort an assembly.
///
/// There is no partial success: any of these stops the whole track.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The byte stream is not a RIFF/WAVE container with `fmt ` and `data` blocks.
    #[error("malformed WAV container: {reason}")]
    MalformedContainer {
        /// What was missing or inconsistent.
        reason: String,
    },

    /// The samples are not linear PCM at a supported bit depth.
    #[error(
        "unsupported sample encoding: format tag {format_tag:#06x}, {bits_per_sample} bits per sample \
         (linear PCM at 8, 16, 24 or 32 bits required)"
    )]
    UnsupportedEncoding {
        /// WAVE format tag (1 = PCM).
        format_tag: u16,
        /// Declared bit depth.
        bits_per_sample: u16,
    },

    /// The data block declares more bytes than the stream holds.
    #[error("truncated payload: data block declares {declared} bytes, {available} available")]
    TruncatedPayload {
        /// Size declared in the data block header.
        declared: u64,
        /// Bytes actually present.
        available: u64,
    },

    /// The payload length is not a whole number of sample frames.
    #[error("corrupt clip: {len} bytes is not a multiple of the {block_align}-byte frame size")]
    CorruptClip {
        /// Payload length in bytes.
        len: usize,
        /// Bytes per frame.
        block_align: u16,
    },

    /// A silence duration is negative or not finite.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// A clip's format differs from the canonical one.
    #[error("format mismatch at clip {clip_index}: expected {field} {expected}, got {got}")]
    FormatMismatch {
        /// Which field differs.
        field: FormatField,
        /// Canonical value.
        expected: u32,
        /// Value found in the clip.
        got: u32,
        /// Position of the clip in decode order.
        clip_index: usize,
    },

    /// No clips were given to reconcile.
    #[error("cannot reconcile format of an empty clip set")]
    EmptyClipSet,

    /// No words were given to assemble.
    #[error("cannot assemble an empty corpus")]
    EmptyCorpus,

    /// A referenced clip could not be read or decoded.
    #[error("{slot} clip for word '{word}' is unavailable: {source}")]
    ClipUnavailable {
        /// The word the clip belongs to.
        word: String,
        /// Which of the word's clips.
        slot: Slot,
        /// Underlying read or decode failure.
        #[source]
        source: Box<AssemblyError>,
    },

    /// The assembled payload does not fit a 32-bit RIFF container.
    #[error("assembled payload of {bytes} bytes exceeds the WAV size limit")]
    PayloadTooLarge {
        /// Total payload bytes.
        bytes: u64,
    },

    /// The external transcoder could not be located.
    #[error("ffmpeg not found. Install it and ensure it is in PATH, or set VOCATRACK_FFMPEG")]
    TranscoderNotFound,

    /// The external transcoder failed.
    #[error("ffmpeg failed: {message}")]
    Transcoder {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssemblyError {
    /// Creates a malformed container error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedContainer {
            reason: reason.into(),
        }
    }

    /// Creates a transcoder error.
    pub fn transcoder(message: impl Into<String>) -> Self {
        Self::Transcoder {
            message: message.into(),
        }
    }

    /// Wraps a read or decode failure with the clip it concerns.
    pub fn clip_unavailable(word: impl Into<String>, slot: Slot, source: AssemblyError) -> Self {
        Self::ClipUnavailable {
            word: word.into(),
            slot,
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, looking through [`AssemblyError::ClipUnavailable`].
    pub fn root_cause(&self) -> &AssemblyError {
        match self {
            AssemblyError::ClipUnavailable { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl BackendError for AssemblyError {
    fn code(&self) -> &'static str {
        match self {
            AssemblyError::MalformedContainer { .. } => "ASSEMBLY_001",
            AssemblyError::UnsupportedEncoding { .. } => "ASSEMBLY_002",
            AssemblyError::TruncatedPayload { .. } => "ASSEMBLY_003",
            AssemblyError::CorruptClip { .. } => "ASSEMBLY_004",
            AssemblyError::InvalidDuration { .. } => "ASSEMBLY_005",
            AssemblyError::FormatMismatch { .. } => "ASSEMBLY_006",
            AssemblyError::EmptyClipSet => "ASSEMBLY_007",
            AssemblyError::EmptyCorpus => "ASSEMBLY_008",
            AssemblyError::ClipUnavailable { .. } => "ASSEMBLY_009",
            AssemblyError::PayloadTooLarge { .. } => "ASSEMBLY_010",
            AssemblyError::TranscoderNotFound => "ASSEMBLY_011",
            AssemblyError::Transcoder { .. } => "ASSEMBLY_012",
            AssemblyError::Io(_) => "ASSEMBLY_013",
        }
    }

    fn category(&self) -> &'static str {
        "assembly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mismatch_message_names_field_and_index() {
        let err = AssemblyError::FormatMismatch {
            field: FormatField::SampleRate,
            expected: 32000,
            got: 44100,
            clip_index: 3,
        };
        assert_eq!(
            err.to_string(),
            "format mismatch at clip 3: expected sample_rate 32000, got 44100"
        );
    }

    #[test]
    fn test_clip_unavailable_root_cause() {
        let err = AssemblyError::clip_unavailable(
            "cat",
            Slot::Meaning,
            AssemblyError::malformed("missing data chunk"),
        );
        assert!(err.to_string().contains("meaning clip for word 'cat'"));
        assert!(matches!(
            err.root_cause(),
            AssemblyError::MalformedContainer { .. }
        ));
        assert_eq!(err.code(), "ASSEMBLY_009");
    }

    #[test]
    fn test_unsupported_encoding_message() {
        let err = AssemblyError::UnsupportedEncoding {
            format_tag: 3,
            bits_per_sample: 32,
        };
        assert!(err.to_string().contains("0x0003"));
    }
}
