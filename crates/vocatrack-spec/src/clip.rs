//! Clip slots and per-word clip references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which of a word's two synthesized clips is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// The vocabulary word spoken in the target language.
    Wordform,
    /// The word's meaning spoken in the reference language.
    Meaning,
}

impl Slot {
    /// Both slots, in synthesis order.
    pub const ALL: [Slot; 2] = [Slot::Wordform, Slot::Meaning];

    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Wordform => "wordform",
            Slot::Meaning => "meaning",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two clips making up one word of one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipReference {
    /// The vocabulary word, used for error context.
    pub word: String,
    /// Path to the wordform clip.
    pub wordform: PathBuf,
    /// Path to the meaning clip.
    pub meaning: PathBuf,
}

impl ClipReference {
    /// Creates a clip reference.
    pub fn new(
        word: impl Into<String>,
        wordform: impl Into<PathBuf>,
        meaning: impl Into<PathBuf>,
    ) -> Self {
        Self {
            word: word.into(),
            wordform: wordform.into(),
            meaning: meaning.into(),
        }
    }

    /// Returns the path stored in `slot`.
    pub fn path(&self, slot: Slot) -> &PathBuf {
        match slot {
            Slot::Wordform => &self.wordform,
            Slot::Meaning => &self.meaning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_by_slot() {
        let r = ClipReference::new("cat", "a/cat_en.wav", "a/cat_zh.wav");
        assert_eq!(r.path(Slot::Wordform), &PathBuf::from("a/cat_en.wav"));
        assert_eq!(r.path(Slot::Meaning), &PathBuf::from("a/cat_zh.wav"));
    }

    #[test]
    fn test_slot_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Slot::Meaning).unwrap(), "\"meaning\"");
        assert_eq!(Slot::Wordform.to_string(), "wordform");
    }
}
