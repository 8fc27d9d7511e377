//! Decoded audio clips.

use crate::error::{AssemblyError, AssemblyResult};
use crate::wav::PcmFormat;

/// Raw interleaved PCM with its format.
///
/// Immutable once built. The payload is always a whole number of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    format: PcmFormat,
    samples: Vec<u8>,
}

impl AudioClip {
    /// Creates a clip, rejecting payloads that are not frame-aligned.
    pub fn new(format: PcmFormat, samples: Vec<u8>) -> AssemblyResult<Self> {
        if !format.is_aligned(samples.len()) {
            return Err(AssemblyError::CorruptClip {
                len: samples.len(),
                block_align: format.block_align(),
            });
        }
        Ok(Self { format, samples })
    }

    pub fn format(&self) -> PcmFormat {
        self.format
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of sample frames.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.format.block_align())
    }

    pub fn duration_seconds(&self) -> f64 {
        self.format.duration_of(self.samples.len() as u64)
    }

    /// Splits the clip into its format and payload.
    pub fn into_parts(self) -> (PcmFormat, Vec<u8>) {
        (self.format, self.samples)
    }
}
