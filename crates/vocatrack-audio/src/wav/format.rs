//! PCM format descriptor.

use serde::Serialize;
use vocatrack_spec::{FormatSpec, SUPPORTED_BIT_DEPTHS};

use crate::error::{AssemblyError, AssemblyResult};

/// Linear PCM format shared by every clip of an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PcmFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bits per sample: 8, 16, 24 or 32.
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Creates a validated format.
    ///
    /// Zero rates or channel counts are malformed; bit depths outside
    /// 8/16/24/32 are unsupported.
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> AssemblyResult<Self> {
        let format = Self {
            sample_rate,
            channels,
            bits_per_sample,
        };
        format.validate()?;
        Ok(format)
    }

    /// Checks a format built from its public fields.
    pub fn validate(&self) -> AssemblyResult<()> {
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(AssemblyError::UnsupportedEncoding {
                format_tag: 1,
                bits_per_sample: self.bits_per_sample,
            });
        }
        if self.sample_rate == 0 {
            return Err(AssemblyError::malformed("sample rate is zero"));
        }
        if self.channels == 0 {
            return Err(AssemblyError::malformed("channel count is zero"));
        }
        if u16::try_from(self.frame_len()).is_err()
            || u32::try_from(self.bytes_per_second()).is_err()
        {
            return Err(AssemblyError::malformed(format!(
                "{} channels at {} Hz overflow the WAV header fields",
                self.channels, self.sample_rate
            )));
        }
        Ok(())
    }

    /// 16-bit mono at the given rate.
    pub fn mono16(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per interleaved frame, widened so that oversized formats are detectable.
    fn frame_len(&self) -> u64 {
        u64::from(self.channels) * u64::from(self.bytes_per_sample())
    }

    fn bytes_per_second(&self) -> u64 {
        u64::from(self.sample_rate) * self.frame_len()
    }

    /// Block align (bytes per sample frame).
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Byte rate (bytes per second).
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }

    /// Whole frames in `duration_seconds`, truncating any sub-sample remainder.
    pub fn frames_for(&self, duration_seconds: f64) -> u64 {
        (duration_seconds * f64::from(self.sample_rate)).floor() as u64
    }

    /// Duration of `len` payload bytes.
    pub fn duration_of(&self, len: u64) -> f64 {
        len as f64 / self.byte_rate() as f64
    }

    /// Whether `len` bytes is a whole number of frames.
    pub fn is_aligned(&self, len: usize) -> bool {
        let frame = usize::from(self.block_align());
        frame != 0 && len % frame == 0
    }

    /// The byte value of a zero-amplitude sample. 8-bit WAV is unsigned.
    pub(crate) fn silence_byte(&self) -> u8 {
        if self.bits_per_sample == 8 {
            0x80
        } else {
            0
        }
    }
}

impl TryFrom<FormatSpec> for PcmFormat {
    type Error = AssemblyError;

    fn try_from(spec: FormatSpec) -> AssemblyResult<Self> {
        Self::new(spec.sample_rate, spec.channels, spec.bits_per_sample)
    }
}

impl std::fmt::Display for PcmFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}-bit",
            self.sample_rate, self.channels, self.bits_per_sample
        )
    }
}
