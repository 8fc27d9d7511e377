//! Synthesis requests passed to a TTS backend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clip::Slot;
use crate::config::ProjectConfig;
use crate::vocab::WordEntry;

/// Everything a TTS backend needs to produce one clip.
///
/// Requests are built per call from a [`ProjectConfig`]; there is no shared
/// mutable synthesis state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Voice reference recording.
    pub reference_audio: PathBuf,
    /// Transcript of the reference recording.
    pub reference_text: String,
    /// Language of the reference recording.
    pub reference_language: String,
    /// Text to speak.
    pub text: String,
    /// Language of `text`.
    pub language: String,
}

impl SynthesisRequest {
    /// Builds the request for one slot of one word.
    pub fn for_slot(config: &ProjectConfig, entry: &WordEntry, slot: Slot) -> Self {
        let (text, language) = match slot {
            Slot::Wordform => (&entry.word, &config.target_language),
            Slot::Meaning => (&entry.meaning, &config.meaning_language),
        };
        Self {
            reference_audio: config.reference_audio.clone(),
            reference_text: config.reference_text.clone(),
            reference_language: config.reference_language.clone(),
            text: text.clone(),
            language: language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_selects_text_and_language() {
        let config = ProjectConfig::default();
        let entry = WordEntry::new("cat", "猫");

        let wordform = SynthesisRequest::for_slot(&config, &entry, Slot::Wordform);
        assert_eq!(wordform.text, "cat");
        assert_eq!(wordform.language, "English");

        let meaning = SynthesisRequest::for_slot(&config, &entry, Slot::Meaning);
        assert_eq!(meaning.text, "猫");
        assert_eq!(meaning.language, "Chinese");
        assert_eq!(meaning.reference_language, "Chinese");
    }
}
