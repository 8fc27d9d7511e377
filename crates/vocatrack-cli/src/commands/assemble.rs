//! Assemble command implementation
//!
//! Concatenates one synthesized version of every word into a study track.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use vocatrack_audio::{AssemblyReport, Assembler, DecodeMode, FfmpegBackend, NativeBackend};

use super::json_output;
use crate::project::{PauseOverrides, Project};

/// Options shared by `assemble` and `plan`.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub config: PathBuf,
    pub version: u32,
    pub backend: String,
    pub pauses: PauseOverrides,
    pub parallel: bool,
}

/// Result of a successful assembly.
#[derive(Debug, Clone, Serialize)]
pub struct AssembleOutcome {
    pub output: PathBuf,
    pub version: u32,
    #[serde(flatten)]
    pub report: AssemblyReport,
}

/// Builds an assembler for the project and options.
pub(crate) fn build_assembler(project: &Project, options: &AssembleOptions) -> Result<Assembler> {
    let pauses = options.pauses.apply(project.config.pauses);
    pauses.validate().context("Invalid pause durations")?;

    let mut assembler = Assembler::new(pauses);
    assembler = match options.backend.as_str() {
        "native" => assembler.with_backend(NativeBackend),
        "ffmpeg" => assembler.with_backend(FfmpegBackend::new()),
        other => bail!("unknown backend: {} (expected native or ffmpeg)", other),
    };
    if let Some(format) = project.expected_format()? {
        assembler = assembler.expected_format(format);
    }
    if options.parallel {
        assembler = assembler.decode_mode(DecodeMode::Parallel);
    }
    Ok(assembler)
}

/// Assembles the track and returns what was written.
pub fn execute(options: &AssembleOptions, output: Option<&Path>) -> Result<AssembleOutcome> {
    let project = Project::load(&options.config)?;
    project.check_version(options.version)?;
    let assembler = build_assembler(&project, options)?;

    let references = project.layout().references(&project.words, options.version);
    let output = project.track_path(output);
    let report = assembler
        .assemble_to_path(&references, &output)
        .with_context(|| format!("Failed to assemble version {}", options.version))?;

    Ok(AssembleOutcome {
        output,
        version: options.version,
        report,
    })
}

/// Run the assemble command
///
/// # Returns
/// Exit code: 0 if the track was written, 1 otherwise
pub fn run(options: &AssembleOptions, output: Option<&Path>, json: bool) -> Result<ExitCode> {
    if json {
        return json_output::emit("assemble", execute(options, output));
    }

    let start = Instant::now();
    println!(
        "{} version {} ({} backend)",
        "Assembling:".cyan().bold(),
        options.version,
        options.backend
    );

    let outcome = execute(options, output)?;
    let report = &outcome.report;
    println!(
        "  {} {} words, {} clips, {} pauses",
        "->".green(),
        report.words,
        report.clip_segments,
        report.silence_segments
    );
    println!("  {} {}", "->".green(), report.format);
    println!(
        "  {} {:.2}s, {} bytes",
        "->".green(),
        report.duration_seconds,
        report.file_bytes
    );
    println!("  {} pcm {}", "->".green(), report.pcm_hash[..16].dimmed());
    println!(
        "{} {} ({} ms)",
        "ok".green().bold(),
        outcome.output.display(),
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}
