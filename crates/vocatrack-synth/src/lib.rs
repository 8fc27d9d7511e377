//! vocatrack synthesis driver
//!
//! Produces the per-word clips the assembly engine consumes. Each word gets
//! `iterations` independently synthesized versions, each holding a wordform
//! clip (target language) and a meaning clip (meaning language), laid out by
//! [`vocatrack_spec::VersionLayout`].
//!
//! The TTS model itself lives outside this crate. [`CommandSynthesizer`]
//! drives any program that accepts a JSON [`SynthesisRequest`] file and
//! writes a WAV file:
//!
//! ```text
//! <program> [args...] --request <request.json> --output <clip.wav>
//! ```
//!
//! [`SynthesisRequest`]: vocatrack_spec::SynthesisRequest

pub mod command;
pub mod corpus;
pub mod error;

pub use command::{CommandConfig, CommandSynthesizer, DEFAULT_PROGRAM};
pub use corpus::{synthesize_corpus, ClipProgress, CorpusSummary};
pub use error::{SynthError, SynthResult};

use vocatrack_spec::SynthesisRequest;

/// Something that can turn a request into WAV bytes.
pub trait Synthesizer: Send + Sync {
    /// Short name for reports.
    fn name(&self) -> &'static str;

    /// Synthesizes one clip, returning a complete WAV file.
    fn synthesize(&self, request: &SynthesisRequest) -> SynthResult<Vec<u8>>;
}
