//! Synthesize command implementation
//!
//! Produces every version of every word's clips with the configured TTS program.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use vocatrack_synth::{synthesize_corpus, ClipProgress, CommandSynthesizer, CorpusSummary};

use super::json_output;
use crate::project::Project;

/// Synthesizes the project's corpus, reporting each clip to `progress`.
pub fn execute(
    config: &Path,
    progress: &mut dyn FnMut(&ClipProgress),
) -> Result<CorpusSummary> {
    let project = Project::load(config)?;
    let synth = CommandSynthesizer::with_config(project.config.synthesizer.clone());
    synthesize_corpus(
        &synth,
        &project.config,
        &project.words,
        &project.layout(),
        progress,
    )
    .context("Synthesis failed")
}

/// Run the synthesize command
///
/// # Returns
/// Exit code: 0 if every clip was written, 1 otherwise
pub fn run(config: &Path, json: bool) -> Result<ExitCode> {
    if json {
        return json_output::emit("synthesize", execute(config, &mut |_| {}));
    }

    let start = Instant::now();
    println!("{} {}", "Synthesizing:".cyan().bold(), config.display());

    let summary = execute(config, &mut |p| {
        println!(
            "  {} [{}/{}] {} {} v{} {}",
            "->".green(),
            p.index,
            p.total,
            p.word.bold(),
            p.slot,
            p.version,
            p.path.display().to_string().dimmed()
        );
    })?;

    println!(
        "{} {} clips for {} words ({} bytes, {:.1}s)",
        "ok".green().bold(),
        summary.clips_written,
        summary.words,
        summary.bytes_written,
        start.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}
