//! Project loading shared by the commands.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use vocatrack_audio::PcmFormat;
use vocatrack_spec::{load_vocabulary, PauseConfig, ProjectConfig, VersionLayout, WordEntry};

/// Project file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "vocatrack.json";

/// Command-line pause overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PauseOverrides {
    pub between_repeat: Option<f64>,
    pub between_forms: Option<f64>,
    pub between_words: Option<f64>,
}

impl PauseOverrides {
    /// Applies the overrides on top of configured pauses.
    pub fn apply(&self, pauses: PauseConfig) -> PauseConfig {
        PauseConfig {
            between_repeat: self.between_repeat.unwrap_or(pauses.between_repeat),
            between_forms: self.between_forms.unwrap_or(pauses.between_forms),
            between_words: self.between_words.unwrap_or(pauses.between_words),
        }
    }
}

/// A loaded project: configuration plus its vocabulary.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: ProjectConfig,
    pub words: Vec<WordEntry>,
}

impl Project {
    /// Loads the project file and its vocabulary.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = load_config(config_path)?;
        let words = load_vocabulary(&config.vocabulary).with_context(|| {
            format!("Failed to load vocabulary: {}", config.vocabulary.display())
        })?;
        Ok(Self { config, words })
    }

    pub fn layout(&self) -> VersionLayout {
        VersionLayout::new(&self.config.output_dir)
    }

    /// Format every clip must have, if configured.
    pub fn expected_format(&self) -> Result<Option<PcmFormat>> {
        self.config
            .expected_format
            .map(PcmFormat::try_from)
            .transpose()
            .context("Invalid expected_format")
    }

    /// Checks `version` names one of the synthesized versions.
    pub fn check_version(&self, version: u32) -> Result<()> {
        if version == 0 || version > self.config.iterations {
            bail!(
                "version {} is out of range (project has versions 1..={})",
                version,
                self.config.iterations
            );
        }
        Ok(())
    }

    /// Output path for an assembled track.
    pub fn track_path(&self, output: Option<&Path>) -> PathBuf {
        output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.layout().default_track_path())
    }
}

/// Loads a project file.
///
/// A missing [`DEFAULT_CONFIG`] means "all defaults"; any other missing file
/// is an error.
pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG) {
        return Ok(ProjectConfig::default());
    }
    ProjectConfig::load(path)
        .with_context(|| format!("Failed to load project file: {}", path.display()))
}
