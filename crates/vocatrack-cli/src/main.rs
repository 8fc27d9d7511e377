//! vocatrack CLI - vocabulary study tracks from synthesized speech
//!
//! This binary drives clip synthesis and assembles synthesized versions into
//! study tracks with configurable pauses.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use vocatrack_cli::commands;
use vocatrack_cli::commands::assemble::AssembleOptions;
use vocatrack_cli::project::{PauseOverrides, DEFAULT_CONFIG};

/// vocatrack - Vocabulary Study Track Generator
#[derive(Parser)]
#[command(name = "vocatrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options selecting and pacing one version of the track.
#[derive(Args, Debug, Clone)]
struct TrackArgs {
    /// Path to the project file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Synthesized version to assemble (1-based)
    #[arg(id = "take", short = 'n', long = "take", default_value_t = 1)]
    version: u32,

    /// Renderer used to write the track
    #[arg(long, default_value = "native", value_parser = ["native", "ffmpeg"])]
    backend: String,

    /// Pause between the two wordform repetitions, in seconds
    #[arg(long)]
    pause_repeat: Option<f64>,

    /// Pause between the second wordform and the meaning, in seconds
    #[arg(long)]
    pause_forms: Option<f64>,

    /// Pause between consecutive words, in seconds
    #[arg(long)]
    pause_words: Option<f64>,

    /// Decode clips in parallel
    #[arg(long)]
    parallel: bool,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    json: bool,
}

impl TrackArgs {
    fn options(&self) -> AssembleOptions {
        AssembleOptions {
            config: self.config.clone(),
            version: self.version,
            backend: self.backend.clone(),
            pauses: PauseOverrides {
                between_repeat: self.pause_repeat,
                between_forms: self.pause_forms,
                between_words: self.pause_words,
            },
            parallel: self.parallel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize every version of every word with the configured TTS program
    Synthesize {
        /// Path to the project file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Assemble one synthesized version into a study track
    Assemble {
        #[command(flatten)]
        track: TrackArgs,

        /// Output WAV path (default: <output_dir>/full_vocabulary_with_pauses.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the segments and totals of a track without writing it
    Plan {
        #[command(flatten)]
        track: TrackArgs,
    },

    /// Print format, length and PCM hash of a WAV file
    Inspect {
        /// Path to the WAV file
        input: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check external programs and output permissions
    Doctor {
        /// Path to the project file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Synthesize { config, json } => commands::synthesize::run(&config, json),
        Commands::Assemble { track, output } => {
            commands::assemble::run(&track.options(), output.as_deref(), track.json)
        }
        Commands::Plan { track } => commands::plan::run(&track.options(), track.json),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Doctor { config, json } => commands::doctor::run(&config, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
