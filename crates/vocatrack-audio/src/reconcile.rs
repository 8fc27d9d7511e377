//! Format reconciliation across a clip set.

use crate::clip::AudioClip;
use crate::error::{AssemblyError, AssemblyResult, FormatField};
use crate::wav::PcmFormat;

/// Adopts the first clip's format and checks every other clip against it.
///
/// # Errors
/// - [`AssemblyError::EmptyClipSet`] if `clips` is empty
/// - [`AssemblyError::FormatMismatch`] naming the first differing field and
///   the index of the offending clip
pub fn reconcile<'a, I>(clips: I) -> AssemblyResult<PcmFormat>
where
    I: IntoIterator<Item = &'a AudioClip>,
{
    let mut clips = clips.into_iter();
    let canonical = clips.next().ok_or(AssemblyError::EmptyClipSet)?.format();
    for (offset, clip) in clips.enumerate() {
        check(&canonical, &clip.format(), offset + 1)?;
    }
    Ok(canonical)
}

/// Checks every clip, including the first, against a declared format.
pub fn reconcile_against<'a, I>(expected: PcmFormat, clips: I) -> AssemblyResult<PcmFormat>
where
    I: IntoIterator<Item = &'a AudioClip>,
{
    let mut seen = false;
    for (index, clip) in clips.into_iter().enumerate() {
        check(&expected, &clip.format(), index)?;
        seen = true;
    }
    if !seen {
        return Err(AssemblyError::EmptyClipSet);
    }
    Ok(expected)
}

fn check(expected: &PcmFormat, got: &PcmFormat, clip_index: usize) -> AssemblyResult<()> {
    let fields = [
        (
            FormatField::SampleRate,
            expected.sample_rate,
            got.sample_rate,
        ),
        (
            FormatField::ChannelCount,
            u32::from(expected.channels),
            u32::from(got.channels),
        ),
        (
            FormatField::BitsPerSample,
            u32::from(expected.bits_per_sample),
            u32::from(got.bits_per_sample),
        ),
    ];
    for (field, expected, got) in fields {
        if expected != got {
            return Err(AssemblyError::FormatMismatch {
                field,
                expected,
                got,
                clip_index,
            });
        }
    }
    Ok(())
}
