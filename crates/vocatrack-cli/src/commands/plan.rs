//! Plan command implementation
//!
//! Shows the segment layout and totals of a track without writing it.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;
use vocatrack_audio::{AssemblyReport, Segment};

use super::assemble::{build_assembler, AssembleOptions};
use super::json_output;
use crate::project::Project;

/// One segment of the planned track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSegment {
    pub kind: &'static str,
    /// Word the segment belongs to; pauses between words have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    pub bytes: usize,
    pub seconds: f64,
}

/// A planned track.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    pub version: u32,
    pub segments: Vec<PlannedSegment>,
    #[serde(flatten)]
    pub report: AssemblyReport,
}

/// Segments per word, including the pause that follows it.
const SEGMENTS_PER_WORD: usize = 6;

/// Builds the plan for one version.
pub fn execute(options: &AssembleOptions) -> Result<PlanOutcome> {
    let project = Project::load(&options.config)?;
    project.check_version(options.version)?;
    let assembler = build_assembler(&project, options)?;

    let references = project.layout().references(&project.words, options.version);
    let sequence = assembler
        .prepare(&references)
        .with_context(|| format!("Failed to plan version {}", options.version))?;

    let format = sequence.format();
    let segments = sequence
        .segments()
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let word_index = i / SEGMENTS_PER_WORD;
            let between_words = i % SEGMENTS_PER_WORD == SEGMENTS_PER_WORD - 1;
            PlannedSegment {
                kind: match segment {
                    Segment::Clip(_) => "clip",
                    Segment::Silence(_) => "silence",
                },
                word: (!between_words).then(|| references[word_index].word.clone()),
                bytes: segment.len(),
                seconds: format.duration_of(segment.len() as u64),
            }
        })
        .collect();

    Ok(PlanOutcome {
        version: options.version,
        segments,
        report: assembler.report_for(&sequence),
    })
}

/// Run the plan command
///
/// # Returns
/// Exit code: 0 if every clip loads and agrees on format, 1 otherwise
pub fn run(options: &AssembleOptions, json: bool) -> Result<ExitCode> {
    if json {
        return json_output::emit("plan", execute(options));
    }

    println!("{} version {}", "Plan:".cyan().bold(), options.version);
    let plan = execute(options)?;

    for (i, segment) in plan.segments.iter().enumerate() {
        let label = match (&segment.word, segment.kind) {
            (Some(word), "clip") => word.bold().to_string(),
            (Some(_), _) => "pause".dimmed().to_string(),
            (None, _) => "pause between words".dimmed().to_string(),
        };
        println!(
            "  {:>4} {:<24} {:>10} bytes {:>8.3}s",
            i, label, segment.bytes, segment.seconds
        );
    }

    let report = &plan.report;
    println!();
    println!("{}", "Totals:".bold());
    println!("  {} {}", "->".green(), report.format);
    println!(
        "  {} {} words, {} clips, {} pauses",
        "->".green(),
        report.words,
        report.clip_segments,
        report.silence_segments
    );
    println!(
        "  {} {:.2}s, {} bytes when written",
        "->".green(),
        report.duration_seconds,
        report.file_bytes
    );
    Ok(ExitCode::SUCCESS)
}
