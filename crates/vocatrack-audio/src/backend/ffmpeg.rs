//! Renderer that concatenates segments with an external ffmpeg process.
//!
//! Each non-empty segment is written as a standalone WAV into a temp
//! directory, listed in a concat demuxer script, and joined by ffmpeg. The
//! result is decoded and re-encoded so the header layout matches the native
//! renderer regardless of the chunks ffmpeg adds.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use super::AssemblyBackend;
use crate::error::{AssemblyError, AssemblyResult};
use crate::process::{wait_with_timeout, WaitOutcome};
use crate::sequence::AssemblySequence;
use crate::wav::{self, PcmFormat};

/// Default timeout for one ffmpeg run (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the ffmpeg renderer.
#[derive(Debug, Clone)]
pub struct FfmpegConfig {
    /// Path to the ffmpeg executable.
    pub ffmpeg_path: Option<PathBuf>,
    /// Timeout for the ffmpeg process.
    pub timeout: Duration,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FfmpegConfig {
    /// Sets the ffmpeg executable path.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Concatenates segments by invoking ffmpeg.
#[derive(Debug, Clone, Default)]
pub struct FfmpegBackend {
    config: FfmpegConfig,
}

impl FfmpegBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FfmpegConfig) -> Self {
        Self { config }
    }

    /// Finds the ffmpeg executable: config, then `VOCATRACK_FFMPEG`, then `PATH`.
    pub fn find_ffmpeg(&self) -> AssemblyResult<PathBuf> {
        if let Some(ref path) = self.config.ffmpeg_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        if let Ok(path) = std::env::var("VOCATRACK_FFMPEG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        which::which("ffmpeg").map_err(|_| AssemblyError::TranscoderNotFound)
    }

    fn concat(
        &self,
        ffmpeg: &Path,
        list: &Path,
        out: &Path,
        format: &PcmFormat,
    ) -> AssemblyResult<()> {
        let mut cmd = Command::new(ffmpeg);
        cmd.arg("-hide_banner")
            .arg("-nostdin")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .arg(list)
            .arg("-c:a")
            .arg(pcm_codec(format))
            .arg(out)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = cmd.spawn()?;
        let (status, stderr) = match wait_with_timeout(child, self.config.timeout)? {
            WaitOutcome::Exited { status, stderr } => (status, stderr),
            WaitOutcome::TimedOut => {
                return Err(AssemblyError::transcoder(format!(
                    "timed out after {} seconds",
                    self.config.timeout.as_secs()
                )));
            }
        };
        if !status.success() {
            return Err(AssemblyError::transcoder(format!(
                "exited with status {}: {}",
                status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl AssemblyBackend for FfmpegBackend {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn render(&self, sequence: &AssemblySequence) -> AssemblyResult<Vec<u8>> {
        let format = sequence.format();
        let parts: Vec<&[u8]> = sequence
            .payloads()
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return wav::encode(&format, &[]);
        }

        let ffmpeg = self.find_ffmpeg()?;
        let work = tempfile::tempdir()?;

        let mut list = String::new();
        for (i, part) in parts.iter().enumerate() {
            let path = work.path().join(format!("segment_{:05}.wav", i));
            std::fs::write(&path, wav::encode(&format, &[*part])?)?;
            let _ = writeln!(list, "file '{}'", escape_concat_path(&path));
        }
        let list_path = work.path().join("segments.txt");
        std::fs::write(&list_path, list)?;

        let out_path = work.path().join("joined.wav");
        self.concat(&ffmpeg, &list_path, &out_path, &format)?;

        let joined = wav::decode(&std::fs::read(&out_path)?)?;
        if joined.format() != format {
            return Err(AssemblyError::transcoder(format!(
                "output format {} differs from input format {}",
                joined.format(),
                format
            )));
        }
        wav::encode(&format, &[joined.samples()])
    }
}

/// ffmpeg encoder name that preserves the format's sample layout.
fn pcm_codec(format: &PcmFormat) -> &'static str {
    match format.bits_per_sample {
        8 => "pcm_u8",
        24 => "pcm_s24le",
        32 => "pcm_s32le",
        _ => "pcm_s16le",
    }
}

/// Quotes a path for a concat demuxer `file '...'` line.
fn escape_concat_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}
