//! Doctor command implementation
//!
//! Checks external programs and output permissions.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vocatrack_audio::FfmpegBackend;
use vocatrack_synth::CommandSynthesizer;

use super::json_output;
use crate::project::load_config;

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub name: &'static str,
    pub ok: bool,
    /// Required checks fail the command.
    pub required: bool,
    pub detail: String,
}

/// All checks.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorOutcome {
    pub version: &'static str,
    pub checks: Vec<Check>,
}

impl DoctorOutcome {
    pub fn all_ok(&self) -> bool {
        self.checks.iter().all(|c| c.ok || !c.required)
    }
}

fn located(name: &'static str, required: bool, found: Result<PathBuf, String>) -> Check {
    match found {
        Ok(path) => Check {
            name,
            ok: true,
            required,
            detail: path.display().to_string(),
        },
        Err(message) => Check {
            name,
            ok: false,
            required,
            detail: message,
        },
    }
}

/// Creates and removes a probe file under `dir`.
fn check_writable(dir: &Path) -> Check {
    let result = std::fs::create_dir_all(dir).and_then(|_| {
        tempfile::Builder::new()
            .prefix(".vocatrack_write_test")
            .tempfile_in(dir)
            .map(drop)
    });
    Check {
        name: "output directory",
        ok: result.is_ok(),
        required: true,
        detail: match result {
            Ok(()) => format!("{} is writable", dir.display()),
            Err(e) => format!("cannot write to {}: {}", dir.display(), e),
        },
    }
}

/// Runs every check against the project at `config`.
pub fn execute(config: &Path) -> Result<DoctorOutcome> {
    let project = load_config(config)?;

    let tts = CommandSynthesizer::with_config(project.synthesizer.clone());
    let checks = vec![
        located(
            "tts program",
            true,
            tts.find_program().map_err(|e| e.to_string()),
        ),
        located(
            "ffmpeg",
            false,
            FfmpegBackend::new().find_ffmpeg().map_err(|e| e.to_string()),
        ),
        check_writable(&project.output_dir),
    ];

    Ok(DoctorOutcome {
        version: env!("CARGO_PKG_VERSION"),
        checks,
    })
}

/// Run the doctor command
///
/// # Returns
/// Exit code: 0 if all required checks pass, 1 if any fail
pub fn run(config: &Path, json: bool) -> Result<ExitCode> {
    if json {
        let outcome = execute(config);
        let ok = outcome.as_ref().map(DoctorOutcome::all_ok).unwrap_or(false);
        let code = json_output::emit("doctor", outcome)?;
        return Ok(if ok { code } else { ExitCode::from(1) });
    }

    println!("{}", "vocatrack doctor".cyan().bold());
    println!("{}", "================".cyan());
    println!();

    let outcome = execute(config)?;
    println!("{}", "Versions:".bold());
    println!("  {} vocatrack-cli v{}", "->".green(), outcome.version);
    println!();

    println!("{}", "Checks:".bold());
    for check in &outcome.checks {
        let marker = match (check.ok, check.required) {
            (true, _) => "ok".green(),
            (false, true) => "!!".red(),
            (false, false) => "!!".yellow(),
        };
        println!("  {} {}: {}", marker, check.name, check.detail);
        if !check.ok && !check.required {
            println!(
                "     {}",
                "Optional; only needed for `--backend ffmpeg`.".dimmed()
            );
        }
    }
    println!();

    if outcome.all_ok() {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}
