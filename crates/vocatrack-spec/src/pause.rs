//! Pause durations between segments of an assembled track.

use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};
use crate::validation::validate_non_negative;

/// Silence durations, in seconds, inserted by the per-word grammar.
///
/// All values must be finite and non-negative. Zero is legal and produces an
/// empty silence segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PauseConfig {
    /// Between the first and second utterance of the wordform.
    #[serde(default = "default_between_repeat")]
    pub between_repeat: f64,
    /// Between the second wordform utterance and the meaning.
    #[serde(default = "default_between_forms")]
    pub between_forms: f64,
    /// After a word's meaning, before the next word. Never emitted after the last word.
    #[serde(default = "default_between_words")]
    pub between_words: f64,
}

fn default_between_repeat() -> f64 {
    0.3
}

fn default_between_forms() -> f64 {
    0.5
}

fn default_between_words() -> f64 {
    1.0
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            between_repeat: default_between_repeat(),
            between_forms: default_between_forms(),
            between_words: default_between_words(),
        }
    }
}

impl PauseConfig {
    /// Creates a pause config from explicit durations.
    pub fn new(between_repeat: f64, between_forms: f64, between_words: f64) -> Self {
        Self {
            between_repeat,
            between_forms,
            between_words,
        }
    }

    /// Checks that every duration is finite and non-negative.
    pub fn validate(&self) -> SpecResult<()> {
        for (name, value) in [
            ("between_repeat", self.between_repeat),
            ("between_forms", self.between_forms),
            ("between_words", self.between_words),
        ] {
            validate_non_negative(name, value)
                .map_err(|e| SpecError::invalid_config(format!("pauses.{}", name), e.message))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_study_track_timing() {
        let pauses = PauseConfig::default();
        assert_eq!(pauses.between_repeat, 0.3);
        assert_eq!(pauses.between_forms, 0.5);
        assert_eq!(pauses.between_words, 1.0);
        assert!(pauses.validate().is_ok());
    }

    #[test]
    fn test_zero_is_legal() {
        assert!(PauseConfig::new(0.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_negative_names_field() {
        let err = PauseConfig::new(0.3, -0.1, 1.0).validate().unwrap_err();
        assert!(err.to_string().contains("pauses.between_forms"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let pauses: PauseConfig = serde_json::from_str(r#"{"between_words": 2.0}"#).unwrap();
        assert_eq!(pauses.between_repeat, 0.3);
        assert_eq!(pauses.between_words, 2.0);
    }
}
