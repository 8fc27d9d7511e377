//! In-process renderer.

use std::io::Write;

use super::AssemblyBackend;
use crate::error::AssemblyResult;
use crate::sequence::AssemblySequence;
use crate::wav;

/// Encodes the sequence directly with [`wav::encode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl AssemblyBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn render(&self, sequence: &AssemblySequence) -> AssemblyResult<Vec<u8>> {
        wav::encode(&sequence.format(), &sequence.payloads())
    }

    fn render_to(
        &self,
        sequence: &AssemblySequence,
        writer: &mut dyn Write,
    ) -> AssemblyResult<u64> {
        wav::encode_to(writer, &sequence.format(), &sequence.payloads())
    }
}
