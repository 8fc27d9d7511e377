//! Assembly pipeline: load, reconcile, sequence, render, write.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use vocatrack_spec::{ClipReference, PauseConfig, Slot};

use crate::backend::{AssemblyBackend, NativeBackend};
use crate::clip::AudioClip;
use crate::error::{AssemblyError, AssemblyResult};
use crate::output;
use crate::reconcile::{reconcile, reconcile_against};
use crate::sequence::{self, AssemblySequence, DecodedWord};
use crate::wav::{self, PcmFormat};

/// Supplies clip bytes for clip paths.
pub trait ClipSource: Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads clips from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ClipSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// In-memory clips keyed by path.
impl ClipSource for HashMap<PathBuf, Vec<u8>> {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no clip registered at {}", path.display()),
            )
        })
    }
}

/// How referenced clips are decoded.
///
/// Either way, segments are emitted in corpus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// One clip at a time, stopping at the first failure.
    #[default]
    Sequential,
    /// Words decoded concurrently; the earliest failure in corpus order is reported.
    Parallel,
}

/// Summary of a finished assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyReport {
    /// Renderer that produced the file.
    pub backend: &'static str,
    pub format: PcmFormat,
    pub words: usize,
    pub clip_segments: usize,
    pub silence_segments: usize,
    /// Bytes in the data block.
    pub data_bytes: u64,
    /// Bytes in the whole file.
    pub file_bytes: u64,
    pub duration_seconds: f64,
    /// BLAKE3 hash of the data block.
    pub pcm_hash: String,
}

impl AssemblyReport {
    fn new(backend: &'static str, sequence: &AssemblySequence, file_bytes: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        for segment in sequence.segments() {
            hasher.update(segment.samples());
        }
        Self {
            backend,
            format: sequence.format(),
            words: sequence.clip_count() / 3,
            clip_segments: sequence.clip_count(),
            silence_segments: sequence.silence_count(),
            data_bytes: sequence.data_len(),
            file_bytes,
            duration_seconds: sequence.duration_seconds(),
            pcm_hash: hasher.finalize().to_hex().to_string(),
        }
    }
}

/// Assembles study tracks from clip references.
///
/// # Example
///
/// ```ignore
/// let assembler = Assembler::new(pauses)
///     .decode_mode(DecodeMode::Parallel)
///     .expected_format(PcmFormat::mono16(32000));
/// let bytes = assembler.assemble(&refs)?;
/// ```
pub struct Assembler {
    pauses: PauseConfig,
    expected_format: Option<PcmFormat>,
    decode_mode: DecodeMode,
    backend: Box<dyn AssemblyBackend>,
    source: Box<dyn ClipSource>,
}

impl Assembler {
    /// Creates an assembler using the native renderer and filesystem clips.
    pub fn new(pauses: PauseConfig) -> Self {
        Self {
            pauses,
            expected_format: None,
            decode_mode: DecodeMode::default(),
            backend: Box::new(NativeBackend),
            source: Box::new(FsSource),
        }
    }

    /// Replaces the renderer.
    pub fn with_backend(mut self, backend: impl AssemblyBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Replaces where clip bytes come from.
    pub fn with_source(mut self, source: impl ClipSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Requires every clip to have exactly this format.
    pub fn expected_format(mut self, format: PcmFormat) -> Self {
        self.expected_format = Some(format);
        self
    }

    pub fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn load_clip(&self, reference: &ClipReference, slot: Slot) -> AssemblyResult<AudioClip> {
        let unavailable = |e| AssemblyError::clip_unavailable(reference.word.clone(), slot, e);
        let bytes = self
            .source
            .read(reference.path(slot))
            .map_err(|e| unavailable(AssemblyError::Io(e)))?;
        wav::decode(&bytes).map_err(unavailable)
    }

    fn load_word(&self, reference: &ClipReference) -> AssemblyResult<DecodedWord> {
        let wordform = self.load_clip(reference, Slot::Wordform)?;
        let meaning = self.load_clip(reference, Slot::Meaning)?;
        Ok(DecodedWord::new(reference.word.clone(), wordform, meaning))
    }

    /// Reads and decodes every referenced clip, once each.
    pub fn load(&self, references: &[ClipReference]) -> AssemblyResult<Vec<DecodedWord>> {
        if references.is_empty() {
            return Err(AssemblyError::EmptyCorpus);
        }

        match self.decode_mode {
            DecodeMode::Sequential => references.iter().map(|r| self.load_word(r)).collect(),
            DecodeMode::Parallel => references
                .par_iter()
                .map(|r| self.load_word(r))
                .collect::<Vec<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Establishes the track format from decoded words.
    ///
    /// Clips are checked in decode order (`wordform[0]`, `meaning[0]`,
    /// `wordform[1]`, ...), so the first wordform sets the format unless an
    /// expected format was configured.
    pub fn reconcile(&self, words: &[DecodedWord]) -> AssemblyResult<PcmFormat> {
        let clips = words
            .iter()
            .flat_map(|w| [w.wordform.as_ref(), w.meaning.as_ref()]);
        match self.expected_format {
            Some(expected) => reconcile_against(expected, clips),
            None => reconcile(clips),
        }
    }

    /// Loads, reconciles and sequences without rendering.
    pub fn prepare(&self, references: &[ClipReference]) -> AssemblyResult<AssemblySequence> {
        let words = self.load(references)?;
        let format = self.reconcile(&words)?;
        sequence::build(&words, &self.pauses, format)
    }

    /// Assembles the track into memory.
    pub fn assemble(&self, references: &[ClipReference]) -> AssemblyResult<Vec<u8>> {
        let sequence = self.prepare(references)?;
        self.backend.render(&sequence)
    }

    /// Assembles the track and atomically places it at `dest`.
    ///
    /// Nothing is written to `dest` unless every step succeeds.
    pub fn assemble_to_path(
        &self,
        references: &[ClipReference],
        dest: &Path,
    ) -> AssemblyResult<AssemblyReport> {
        let sequence = self.prepare(references)?;
        let file_bytes = output::write_atomic(dest, |w| self.backend.render_to(&sequence, w))?;
        Ok(AssemblyReport::new(self.backend.name(), &sequence, file_bytes))
    }

    /// Report for a prepared sequence as it would be written.
    pub fn report_for(&self, sequence: &AssemblySequence) -> AssemblyReport {
        let file_bytes = wav::HEADER_LEN as u64 + sequence.data_len();
        AssemblyReport::new(self.backend.name(), sequence, file_bytes)
    }

    /// Builds a report for a sequence without writing anything.
    pub fn plan(&self, references: &[ClipReference]) -> AssemblyResult<AssemblyReport> {
        let sequence = self.prepare(references)?;
        Ok(self.report_for(&sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(format: PcmFormat, byte: u8, frames: usize) -> Vec<u8> {
        let pcm = vec![byte; frames * usize::from(format.block_align())];
        wav::encode(&format, &[&pcm]).unwrap()
    }

    fn corpus(
        format: PcmFormat,
        words: &[&str],
    ) -> (HashMap<PathBuf, Vec<u8>>, Vec<ClipReference>) {
        let mut clips = HashMap::new();
        let mut refs = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let r = ClipReference::new(*word, format!("{word}_en.wav"), format!("{word}_zh.wav"));
            clips.insert(r.wordform.clone(), wav_bytes(format, 2 * i as u8 + 1, 5));
            clips.insert(r.meaning.clone(), wav_bytes(format, 2 * i as u8 + 2, 3));
            refs.push(r);
        }
        (clips, refs)
    }

    #[test]
    fn test_load_pairs_clips_with_words() {
        let format = PcmFormat::mono16(8000);
        let names = ["a", "b", "c", "d", "e"];
        let (clips, refs) = corpus(format, &names);
        for mode in [DecodeMode::Sequential, DecodeMode::Parallel] {
            let words = Assembler::new(PauseConfig::default())
                .with_source(clips.clone())
                .decode_mode(mode)
                .load(&refs)
                .unwrap();
            assert_eq!(words.len(), names.len());
            for (i, (decoded, name)) in words.iter().zip(names).enumerate() {
                assert_eq!(decoded.word, name);
                assert_eq!(decoded.wordform.samples()[0], 2 * i as u8 + 1);
                assert_eq!(decoded.meaning.samples()[0], 2 * i as u8 + 2);
            }
        }
    }

    #[test]
    fn test_empty_corpus_before_any_io() {
        let err = Assembler::new(PauseConfig::default()).assemble(&[]).unwrap_err();
        assert!(matches!(err, AssemblyError::EmptyCorpus));
    }

    #[test]
    fn test_missing_clip_names_word_and_slot() {
        let format = PcmFormat::mono16(8000);
        let (mut clips, refs) = corpus(format, &["a", "b"]);
        clips.remove(&PathBuf::from("b_zh.wav"));
        for mode in [DecodeMode::Sequential, DecodeMode::Parallel] {
            let err = Assembler::new(PauseConfig::default())
                .with_source(clips.clone())
                .decode_mode(mode)
                .assemble(&refs)
                .unwrap_err();
            match err {
                AssemblyError::ClipUnavailable { word, slot, source } => {
                    assert_eq!(word, "b");
                    assert_eq!(slot, Slot::Meaning);
                    assert!(matches!(*source, AssemblyError::Io(_)));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_earliest_failure_reported_in_parallel() {
        let format = PcmFormat::mono16(8000);
        let (mut clips, refs) = corpus(format, &["a", "b", "c"]);
        clips.insert(PathBuf::from("a_zh.wav"), b"not a wav".to_vec());
        clips.remove(&PathBuf::from("c_en.wav"));
        let err = Assembler::new(PauseConfig::default())
            .with_source(clips)
            .decode_mode(DecodeMode::Parallel)
            .assemble(&refs)
            .unwrap_err();
        match err {
            AssemblyError::ClipUnavailable { word, slot, source } => {
                assert_eq!(word, "a");
                assert_eq!(slot, Slot::Meaning);
                assert!(matches!(*source, AssemblyError::MalformedContainer { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_mismatch_index_in_decode_order() {
        let format = PcmFormat::mono16(8000);
        let (mut clips, refs) = corpus(format, &["a", "b"]);
        clips.insert(
            PathBuf::from("b_en.wav"),
            wav_bytes(PcmFormat::mono16(16000), 9, 5),
        );
        let err = Assembler::new(PauseConfig::default())
            .with_source(clips)
            .assemble(&refs)
            .unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::FormatMismatch {
                clip_index: 2,
                expected: 8000,
                got: 16000,
                ..
            }
        ));
    }

    #[test]
    fn test_plan_matches_rendered_size() {
        let format = PcmFormat::mono16(8000);
        let (clips, refs) = corpus(format, &["a", "b"]);
        let assembler = Assembler::new(PauseConfig::new(0.01, 0.02, 0.03)).with_source(clips);
        let report = assembler.plan(&refs).unwrap();
        let bytes = assembler.assemble(&refs).unwrap();
        assert_eq!(report.file_bytes, bytes.len() as u64);
        assert_eq!(report.words, 2);
        assert_eq!(report.clip_segments, 6);
        assert_eq!(report.silence_segments, 3);
        assert_eq!(report.backend, "native");
        assert_eq!(report.pcm_hash, wav::compute_pcm_hash(&bytes).unwrap());
    }
}
