//! Interchangeable renderers for an assembled sequence.
//!
//! The grammar and format reconciliation run before a backend is invoked,
//! so every backend receives the same ordered segments and only decides how
//! they become WAV bytes.

mod ffmpeg;
mod native;

use std::io::Write;

pub use ffmpeg::{FfmpegBackend, FfmpegConfig, DEFAULT_TIMEOUT_SECS};
pub use native::NativeBackend;

use crate::error::AssemblyResult;
use crate::sequence::AssemblySequence;

/// Turns an [`AssemblySequence`] into a WAV stream.
pub trait AssemblyBackend: Send + Sync {
    /// Short identifier for reports.
    fn name(&self) -> &'static str;

    /// Renders the whole track into memory.
    fn render(&self, sequence: &AssemblySequence) -> AssemblyResult<Vec<u8>>;

    /// Renders into a writer, returning the number of bytes written.
    fn render_to(
        &self,
        sequence: &AssemblySequence,
        writer: &mut dyn Write,
    ) -> AssemblyResult<u64> {
        let bytes = self.render(sequence)?;
        writer.write_all(&bytes)?;
        Ok(bytes.len() as u64)
    }
}
