//! Exact-length digital silence.

use crate::clip::AudioClip;
use crate::error::{AssemblyError, AssemblyResult};
use crate::wav::PcmFormat;

/// A clip of zero-amplitude samples generated for a pause.
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceSegment {
    duration_seconds: f64,
    clip: AudioClip,
}

impl SilenceSegment {
    /// The requested duration, before truncation to whole frames.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn clip(&self) -> &AudioClip {
        &self.clip
    }

    pub fn samples(&self) -> &[u8] {
        self.clip.samples()
    }

    pub fn len(&self) -> usize {
        self.clip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clip.is_empty()
    }
}

/// Generates `floor(duration * sample_rate)` frames of silence.
///
/// Any sub-sample remainder is dropped. No dither or fade is applied: every
/// sample is the format's zero amplitude (`0x00`, or `0x80` for unsigned
/// 8-bit). A zero duration yields an empty segment.
///
/// # Errors
/// [`AssemblyError::InvalidDuration`] if the duration is negative or not finite.
pub fn generate(format: &PcmFormat, duration_seconds: f64) -> AssemblyResult<SilenceSegment> {
    if !duration_seconds.is_finite() || duration_seconds < 0.0 {
        return Err(AssemblyError::InvalidDuration {
            duration: duration_seconds,
        });
    }

    let frames = format.frames_for(duration_seconds);
    let len = frames
        .checked_mul(u64::from(format.block_align()))
        .filter(|len| *len <= crate::wav::MAX_DATA_LEN)
        .ok_or(AssemblyError::InvalidDuration {
            duration: duration_seconds,
        })?;

    let clip = AudioClip::new(*format, vec![format.silence_byte(); len as usize])?;
    Ok(SilenceSegment {
        duration_seconds,
        clip,
    })
}
