//! Whole-vocabulary synthesis into the version layout.

use std::path::PathBuf;

use serde::Serialize;
use vocatrack_audio::{output, wav};
use vocatrack_spec::{ProjectConfig, Slot, SynthesisRequest, VersionLayout, WordEntry};

use crate::error::{SynthError, SynthResult};
use crate::Synthesizer;

/// One finished clip, reported as synthesis proceeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipProgress {
    /// 1-based position among all clips of the run.
    pub index: usize,
    pub total: usize,
    pub word: String,
    pub slot: Slot,
    pub version: u32,
    pub path: PathBuf,
}

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub synthesizer: &'static str,
    pub words: usize,
    pub versions: u32,
    pub clips_written: usize,
    pub bytes_written: u64,
}

/// Synthesizes every version of every word into `layout`.
///
/// For each word and each version `1..=config.iterations` the wordform clip
/// is produced first, then the meaning clip. Every clip must decode as
/// supported PCM before it is written, and is written atomically. The first
/// failure aborts the run; clips already written stay in place.
///
/// # Errors
/// - [`SynthError::EmptyVocabulary`] if `words` is empty
/// - [`SynthError::ReferenceUnavailable`] if the reference recording cannot be read
/// - Any error from the synthesizer, [`SynthError::InvalidClip`], or [`SynthError::WriteClip`]
pub fn synthesize_corpus(
    synth: &dyn Synthesizer,
    config: &ProjectConfig,
    words: &[WordEntry],
    layout: &VersionLayout,
    progress: &mut dyn FnMut(&ClipProgress),
) -> SynthResult<CorpusSummary> {
    if words.is_empty() {
        return Err(SynthError::EmptyVocabulary);
    }

    // Checked once up front so a bad path fails before any program runs.
    std::fs::File::open(&config.reference_audio).map_err(|source| {
        SynthError::ReferenceUnavailable {
            path: config.reference_audio.clone(),
            source,
        }
    })?;

    let total = words.len() * config.iterations as usize * Slot::ALL.len();
    let mut summary = CorpusSummary {
        synthesizer: synth.name(),
        words: words.len(),
        versions: config.iterations,
        clips_written: 0,
        bytes_written: 0,
    };

    for entry in words {
        let requests = Slot::ALL.map(|slot| (slot, SynthesisRequest::for_slot(config, entry, slot)));
        for version in 1..=config.iterations {
            for (slot, request) in &requests {
                let bytes = synth.synthesize(request)?;
                wav::decode(&bytes).map_err(|source| SynthError::InvalidClip {
                    word: entry.word.clone(),
                    slot: *slot,
                    source,
                })?;

                let path = layout.clip_path(&entry.word, *slot, version);
                output::write_bytes_atomic(&path, &bytes).map_err(|source| {
                    SynthError::WriteClip {
                        path: path.clone(),
                        source,
                    }
                })?;

                summary.clips_written += 1;
                summary.bytes_written += bytes.len() as u64;
                progress(&ClipProgress {
                    index: summary.clips_written,
                    total,
                    word: entry.word.clone(),
                    slot: *slot,
                    version,
                    path,
                });
            }
        }
    }

    Ok(summary)
}
