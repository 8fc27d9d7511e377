//! JSON project configuration.
//!
//! A project file describes where the vocabulary and reference voice live,
//! how many versions to synthesize, and how the study track is paced:
//!
//! ```json
//! {
//!   "reference_audio": "reference/sample.wav",
//!   "reference_text": "知道太多会被杀掉。",
//!   "iterations": 2,
//!   "pauses": { "between_repeat": 0.3, "between_forms": 0.5, "between_words": 1.0 }
//! }
//! ```
//!
//! Relative paths are resolved against the directory containing the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SpecError, SpecResult};
use crate::pause::PauseConfig;
use crate::validation::validate_at_least;

/// Bit depths the assembly engine can carry through unchanged.
pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// A declared PCM format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl FormatSpec {
    /// Checks the fields describe a usable linear PCM format.
    pub fn validate(&self) -> SpecResult<()> {
        if self.sample_rate == 0 {
            return Err(SpecError::invalid_config(
                "expected_format.sample_rate",
                "must be positive",
            ));
        }
        if self.channels == 0 {
            return Err(SpecError::invalid_config(
                "expected_format.channels",
                "must be positive",
            ));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(SpecError::invalid_config(
                "expected_format.bits_per_sample",
                format!("must be one of 8, 16, 24, 32, got {}", self.bits_per_sample),
            ));
        }
        Ok(())
    }
}

/// External TTS program settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesizerConfig {
    /// Program to run. Falls back to `VOCATRACK_TTS`, then `PATH` lookup of `vocatrack-tts`.
    #[serde(default)]
    pub program: Option<PathBuf>,
    /// Extra arguments placed before the request/output arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Per-clip timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Project configuration loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Word list file.
    #[serde(default = "default_vocabulary")]
    pub vocabulary: PathBuf,
    /// Root directory for synthesized clips and assembled tracks.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Voice reference recording.
    #[serde(default)]
    pub reference_audio: PathBuf,
    /// Transcript of the reference recording.
    #[serde(default)]
    pub reference_text: String,
    #[serde(default = "default_chinese")]
    pub reference_language: String,
    /// Language wordforms are spoken in.
    #[serde(default = "default_english")]
    pub target_language: String,
    /// Language meanings are spoken in.
    #[serde(default = "default_chinese")]
    pub meaning_language: String,
    /// Number of independently synthesized versions per word.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default)]
    pub pauses: PauseConfig,
    /// When set, every clip must have exactly this format.
    #[serde(default)]
    pub expected_format: Option<FormatSpec>,
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,
}

fn default_vocabulary() -> PathBuf {
    PathBuf::from("words.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("vocabulary_audio")
}

fn default_chinese() -> String {
    "Chinese".to_string()
}

fn default_english() -> String {
    "English".to_string()
}

fn default_iterations() -> u32 {
    2
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
            output_dir: default_output_dir(),
            reference_audio: PathBuf::new(),
            reference_text: String::new(),
            reference_language: default_chinese(),
            target_language: default_english(),
            meaning_language: default_chinese(),
            iterations: default_iterations(),
            pauses: PauseConfig::default(),
            expected_format: None,
            synthesizer: SynthesizerConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Parses a config from JSON text without resolving paths.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads, resolves and validates a config file.
    pub fn load(path: &Path) -> SpecResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Rebases relative paths onto `base`.
    pub fn resolve_relative(&mut self, base: &Path) {
        for path in [
            &mut self.vocabulary,
            &mut self.output_dir,
            &mut self.reference_audio,
        ] {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
        if let Some(program) = self.synthesizer.program.as_mut() {
            // Bare names are looked up on PATH; only rebase things that look like paths.
            if program.is_relative() && program.components().count() > 1 {
                *program = base.join(&*program);
            }
        }
    }

    /// Validates every field.
    pub fn validate(&self) -> SpecResult<()> {
        validate_at_least("iterations", u64::from(self.iterations), 1)
            .map_err(|e| SpecError::invalid_config("iterations", e.message))?;
        self.pauses.validate()?;
        if let Some(format) = &self.expected_format {
            format.validate()?;
        }
        if self.synthesizer.timeout_secs == 0 {
            return Err(SpecError::invalid_config(
                "synthesizer.timeout_secs",
                "must be positive",
            ));
        }
        Ok(())
    }
}
