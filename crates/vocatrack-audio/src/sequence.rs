//! The per-word segment grammar.
//!
//! For word `i` of `N`:
//!
//! ```text
//! Clip(wordform[i])
//! Silence(between_repeat)
//! Clip(wordform[i])
//! Silence(between_forms)
//! Clip(meaning[i])
//! Silence(between_words)      only if i < N - 1
//! ```
//!
//! A corpus of `N` words therefore yields `3N` clip segments and `2N - 1`
//! silence segments.

use std::sync::Arc;

use vocatrack_spec::PauseConfig;

use crate::clip::AudioClip;
use crate::error::{AssemblyError, AssemblyResult};
use crate::silence::{self, SilenceSegment};
use crate::wav::PcmFormat;

/// One word's decoded clips.
///
/// Clips are shared, so the wordform is decoded once and emitted twice.
#[derive(Debug, Clone)]
pub struct DecodedWord {
    pub word: String,
    pub wordform: Arc<AudioClip>,
    pub meaning: Arc<AudioClip>,
}

impl DecodedWord {
    pub fn new(word: impl Into<String>, wordform: AudioClip, meaning: AudioClip) -> Self {
        Self {
            word: word.into(),
            wordform: Arc::new(wordform),
            meaning: Arc::new(meaning),
        }
    }
}

/// One unit of the output track.
#[derive(Debug, Clone)]
pub enum Segment {
    Clip(Arc<AudioClip>),
    Silence(Arc<SilenceSegment>),
}

impl Segment {
    /// Raw PCM bytes of the segment.
    pub fn samples(&self) -> &[u8] {
        match self {
            Segment::Clip(clip) => clip.samples(),
            Segment::Silence(silence) => silence.samples(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples().is_empty()
    }

    pub fn is_silence(&self) -> bool {
        matches!(self, Segment::Silence(_))
    }
}

/// The ordered segments of one output track.
#[derive(Debug, Clone)]
pub struct AssemblySequence {
    format: PcmFormat,
    segments: Vec<Segment>,
}

impl AssemblySequence {
    pub fn format(&self) -> PcmFormat {
        self.format
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn clip_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.is_silence()).count()
    }

    pub fn silence_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_silence()).count()
    }

    /// Total payload bytes across all segments.
    pub fn data_len(&self) -> u64 {
        self.segments.iter().map(|s| s.len() as u64).sum()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.format.duration_of(self.data_len())
    }

    /// Payload slices in emission order, ready for encoding.
    pub fn payloads(&self) -> Vec<&[u8]> {
        self.segments.iter().map(Segment::samples).collect()
    }
}

/// Builds the segment sequence for `words` in corpus order.
///
/// Clips must already share `format` (see [`crate::reconcile`]). The three
/// pause segments are generated once and shared by every word.
///
/// # Errors
/// - [`AssemblyError::EmptyCorpus`] if `words` is empty
/// - [`AssemblyError::InvalidDuration`] if a pause is negative or not finite
pub fn build(
    words: &[DecodedWord],
    pauses: &PauseConfig,
    format: PcmFormat,
) -> AssemblyResult<AssemblySequence> {
    if words.is_empty() {
        return Err(AssemblyError::EmptyCorpus);
    }

    let between_repeat = Arc::new(silence::generate(&format, pauses.between_repeat)?);
    let between_forms = Arc::new(silence::generate(&format, pauses.between_forms)?);
    let between_words = Arc::new(silence::generate(&format, pauses.between_words)?);

    let mut segments = Vec::with_capacity(words.len() * 6);
    for (i, word) in words.iter().enumerate() {
        segments.push(Segment::Clip(Arc::clone(&word.wordform)));
        segments.push(Segment::Silence(Arc::clone(&between_repeat)));
        segments.push(Segment::Clip(Arc::clone(&word.wordform)));
        segments.push(Segment::Silence(Arc::clone(&between_forms)));
        segments.push(Segment::Clip(Arc::clone(&word.meaning)));
        if i + 1 < words.len() {
            segments.push(Segment::Silence(Arc::clone(&between_words)));
        }
    }

    Ok(AssemblySequence { format, segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tone(format: PcmFormat, byte: u8, frames: usize) -> AudioClip {
        AudioClip::new(format, vec![byte; frames * usize::from(format.block_align())]).unwrap()
    }

    fn word(format: PcmFormat, name: &str, seed: u8) -> DecodedWord {
        DecodedWord::new(name, tone(format, seed, 10), tone(format, seed + 1, 7))
    }

    /// Segment kinds as a compact string: `C` clip, `S` silence.
    fn shape(sequence: &AssemblySequence) -> String {
        sequence
            .segments()
            .iter()
            .map(|s| if s.is_silence() { 'S' } else { 'C' })
            .collect()
    }

    #[test]
    fn test_single_word_grammar() {
        let format = PcmFormat::mono16(32000);
        let words = vec![word(format, "cat", 1)];
        let seq = build(&words, &PauseConfig::new(0.3, 0.5, 1.0), format).unwrap();

        assert_eq!(shape(&seq), "CSCSC");
        let lens: Vec<usize> = seq.segments().iter().map(Segment::len).collect();
        assert_eq!(lens, vec![20, 19200, 20, 32000, 14]);
        assert_eq!(seq.data_len(), 2 * 20 + 14 + 19200 + 32000);
    }

    #[test]
    fn test_wordform_emitted_twice_from_one_decode() {
        let format = PcmFormat::mono16(16000);
        let words = vec![word(format, "cat", 1)];
        let seq = build(&words, &PauseConfig::default(), format).unwrap();
        match (&seq.segments()[0], &seq.segments()[2]) {
            (Segment::Clip(a), Segment::Clip(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected clips at 0 and 2"),
        }
    }

    #[test]
    fn test_no_trailing_pause_after_last_word() {
        let format = PcmFormat::mono16(8000);
        let words = vec![word(format, "a", 1), word(format, "b", 3), word(format, "c", 5)];
        let seq = build(&words, &PauseConfig::default(), format).unwrap();
        assert_eq!(shape(&seq), "CSCSCSCSCSCSCSCSC");
        assert_eq!(seq.clip_count(), 9);
        assert_eq!(seq.silence_count(), 5);
        assert!(!seq.segments().last().unwrap().is_silence());
    }

    #[test]
    fn test_corpus_order_preserved() {
        let format = PcmFormat::mono16(8000);
        let words = vec![word(format, "a", 10), word(format, "b", 20)];
        let seq = build(&words, &PauseConfig::default(), format).unwrap();
        let firsts: Vec<u8> = seq
            .segments()
            .iter()
            .filter(|s| !s.is_silence())
            .map(|s| s.samples()[0])
            .collect();
        assert_eq!(firsts, vec![10, 10, 11, 20, 20, 21]);
    }

    #[test]
    fn test_zero_between_words_keeps_empty_segment() {
        let format = PcmFormat::mono16(8000);
        let words = vec![word(format, "a", 1), word(format, "b", 3)];
        let seq = build(&words, &PauseConfig::new(0.1, 0.1, 0.0), format).unwrap();
        assert_eq!(seq.silence_count(), 3);
        assert!(seq.segments()[5].is_silence());
        assert!(seq.segments()[5].is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let err = build(&[], &PauseConfig::default(), PcmFormat::mono16(8000)).unwrap_err();
        assert!(matches!(err, AssemblyError::EmptyCorpus));
    }

    #[test]
    fn test_negative_pause_rejected() {
        let format = PcmFormat::mono16(8000);
        let words = vec![word(format, "a", 1)];
        let err = build(&words, &PauseConfig::new(0.1, -1.0, 0.1), format).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidDuration { .. }));
    }
}
