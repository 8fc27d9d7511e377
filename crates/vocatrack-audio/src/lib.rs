//! vocatrack audio assembly engine
//!
//! Concatenates synthesized word clips into one study track with
//! sample-accurate silences between them.
//!
//! # Overview
//!
//! For every word the track contains, in order:
//!
//! ```text
//! wordform, pause(between_repeat), wordform, pause(between_forms), meaning
//! ```
//!
//! followed by `pause(between_words)` unless it is the last word.
//!
//! The pieces, leaves first:
//!
//! - [`wav`] - WAV container decoding and encoding
//! - [`silence`] - exact-length digital silence
//! - [`reconcile`] - enforcing one PCM format across every clip
//! - [`sequence`] - the per-word segment grammar
//! - [`pipeline`] - load, reconcile, sequence, render, write
//! - [`backend`] - interchangeable renderers (in-process or ffmpeg)
//! - [`output`] - atomic placement of finished files
//! - [`process`] - waiting on external programs with a deadline
//!
//! # Determinism
//!
//! Assembling the same clip bytes with the same pauses yields byte-identical
//! output. No timestamps or variable metadata are written.
//!
//! # Example
//!
//! ```ignore
//! use vocatrack_audio::Assembler;
//! use vocatrack_spec::{PauseConfig, VersionLayout};
//!
//! let layout = VersionLayout::new("vocabulary_audio");
//! let refs = layout.references(&words, 1);
//! let report = Assembler::new(PauseConfig::default())
//!     .assemble_to_path(&refs, &layout.default_track_path())?;
//! println!("{} words, {:.1}s", report.words, report.duration_seconds);
//! ```

pub mod backend;
pub mod clip;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod reconcile;
pub mod sequence;
pub mod silence;
pub mod wav;

pub use backend::{AssemblyBackend, FfmpegBackend, NativeBackend};
pub use clip::AudioClip;
pub use error::{AssemblyError, AssemblyResult, FormatField};
pub use pipeline::{AssemblyReport, Assembler, ClipSource, DecodeMode, FsSource};
pub use sequence::{AssemblySequence, DecodedWord, Segment};
pub use silence::SilenceSegment;
pub use wav::PcmFormat;
