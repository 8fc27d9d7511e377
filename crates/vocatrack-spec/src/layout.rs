//! On-disk naming policy for synthesized versions.
//!
//! ```text
//! <root>/<word>/version_<n>/<word>_en.wav   wordform
//! <root>/<word>/version_<n>/<word>_zh.wav   meaning
//! <root>/full_vocabulary_with_pauses.wav    default assembled track
//! ```
//!
//! Versions are numbered from 1. The assembly engine never sees this policy;
//! it only receives the [`ClipReference`] list produced here.

use std::path::{Path, PathBuf};

use crate::clip::{ClipReference, Slot};
use crate::vocab::WordEntry;

/// File name of the assembled track when no output path is given.
pub const DEFAULT_TRACK_NAME: &str = "full_vocabulary_with_pauses.wav";

/// Maps (word, slot, version) to clip paths under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLayout {
    root: PathBuf,
}

impl VersionLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one version of one word.
    pub fn version_dir(&self, word: &str, version: u32) -> PathBuf {
        self.root
            .join(sanitize(word))
            .join(format!("version_{}", version))
    }

    /// Path of one clip.
    pub fn clip_path(&self, word: &str, slot: Slot, version: u32) -> PathBuf {
        let suffix = match slot {
            Slot::Wordform => "en",
            Slot::Meaning => "zh",
        };
        self.version_dir(word, version)
            .join(format!("{}_{}.wav", sanitize(word), suffix))
    }

    /// Clip references for every word of one version, in corpus order.
    pub fn references(&self, words: &[WordEntry], version: u32) -> Vec<ClipReference> {
        words
            .iter()
            .map(|entry| {
                ClipReference::new(
                    entry.word.clone(),
                    self.clip_path(&entry.word, Slot::Wordform, version),
                    self.clip_path(&entry.word, Slot::Meaning, version),
                )
            })
            .collect()
    }

    /// Default path of the assembled track.
    pub fn default_track_path(&self) -> PathBuf {
        self.root.join(DEFAULT_TRACK_NAME)
    }
}

/// Makes a word safe to use as a single path component.
fn sanitize(word: &str) -> String {
    let cleaned: String = word
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => cleaned.replace('.', "_") + "_",
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clip_paths() {
        let layout = VersionLayout::new("out");
        assert_eq!(
            layout.clip_path("cat", Slot::Wordform, 1),
            PathBuf::from("out/cat/version_1/cat_en.wav")
        );
        assert_eq!(
            layout.clip_path("cat", Slot::Meaning, 2),
            PathBuf::from("out/cat/version_2/cat_zh.wav")
        );
    }

    #[test]
    fn test_references_keep_corpus_order() {
        let layout = VersionLayout::new("out");
        let words = vec![WordEntry::new("b", "二"), WordEntry::new("a", "一")];
        let refs = layout.references(&words, 1);
        assert_eq!(refs[0].word, "b");
        assert_eq!(refs[1].word, "a");
        assert_eq!(refs[1].meaning, PathBuf::from("out/a/version_1/a_zh.wav"));
    }

    #[test]
    fn test_sanitize_path_components() {
        assert_eq!(sanitize("and/or"), "and_or");
        assert_eq!(sanitize(".."), "___");
        assert_eq!(sanitize(""), "_");
        assert_eq!(sanitize("naïve"), "naïve");
    }

    #[test]
    fn test_default_track_path() {
        let layout = VersionLayout::new("vocabulary_audio");
        assert_eq!(
            layout.default_track_path(),
            PathBuf::from("vocabulary_audio/full_vocabulary_with_pauses.wav")
        );
    }
}
