//! Inspect command implementation
//!
//! Prints the format, length and PCM hash of a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vocatrack_audio::{wav, PcmFormat};

use super::json_output;

/// What `inspect` reports about a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectOutcome {
    pub path: PathBuf,
    pub format: PcmFormat,
    pub file_bytes: u64,
    pub data_bytes: u64,
    pub frames: u64,
    pub duration_seconds: f64,
    /// BLAKE3 hash of the data block.
    pub pcm_hash: String,
}

/// Decodes `path` and summarizes it.
pub fn execute(path: &Path) -> Result<InspectOutcome> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let clip = wav::decode(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;

    Ok(InspectOutcome {
        path: path.to_path_buf(),
        format: clip.format(),
        file_bytes: bytes.len() as u64,
        data_bytes: clip.len() as u64,
        frames: clip.frames() as u64,
        duration_seconds: clip.duration_seconds(),
        pcm_hash: wav::pcm_hash(clip.samples()),
    })
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if the file decodes, 1 otherwise
pub fn run(path: &Path, json: bool) -> Result<ExitCode> {
    if json {
        return json_output::emit("inspect", execute(path));
    }

    let info = execute(path)?;
    println!("{} {}", "Inspecting:".cyan().bold(), info.path.display());
    println!("  {} {}", "format".dimmed(), info.format);
    println!(
        "  {} {} bytes ({} in data block)",
        "size".dimmed(),
        info.file_bytes,
        info.data_bytes
    );
    println!(
        "  {} {:.3}s ({} frames)",
        "length".dimmed(),
        info.duration_seconds,
        info.frames
    );
    println!("  {} {}", "pcm".dimmed(), info.pcm_hash);
    Ok(ExitCode::SUCCESS)
}
