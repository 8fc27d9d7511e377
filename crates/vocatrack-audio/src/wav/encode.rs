//! WAV encoding with header fields derived from the format and total length.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::format::PcmFormat;
use crate::error::{AssemblyError, AssemblyResult};

/// Size of the canonical PCM header.
pub const HEADER_LEN: usize = 44;

/// Largest data block whose RIFF size (`36 + data`) still fits in 32 bits.
pub const MAX_DATA_LEN: u64 = u32::MAX as u64 - 36;

/// Writes a complete WAV stream to a writer.
///
/// The total length is computed in a first pass over `payloads` so the header
/// can be written before any payload bytes; payloads are then streamed in
/// order without being concatenated in memory.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - PCM format of every payload
/// * `payloads` - Raw PCM blocks, in output order
///
/// # Returns
/// Number of bytes written
pub fn encode_to<W: Write + ?Sized>(
    writer: &mut W,
    format: &PcmFormat,
    payloads: &[&[u8]],
) -> AssemblyResult<u64> {
    format.validate()?;

    let mut data_size = 0u64;
    for payload in payloads {
        if !format.is_aligned(payload.len()) {
            return Err(AssemblyError::CorruptClip {
                len: payload.len(),
                block_align: format.block_align(),
            });
        }
        data_size += payload.len() as u64;
    }
    if data_size > MAX_DATA_LEN {
        return Err(AssemblyError::PayloadTooLarge { bytes: data_size });
    }
    let data_size = data_size as u32;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(36 + data_size)?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(16)?;
    writer.write_u16::<LittleEndian>(1)?; // PCM
    writer.write_u16::<LittleEndian>(format.channels)?;
    writer.write_u32::<LittleEndian>(format.sample_rate)?;
    writer.write_u32::<LittleEndian>(format.byte_rate())?;
    writer.write_u16::<LittleEndian>(format.block_align())?;
    writer.write_u16::<LittleEndian>(format.bits_per_sample)?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_size)?;
    for payload in payloads {
        writer.write_all(payload)?;
    }

    Ok(HEADER_LEN as u64 + u64::from(data_size))
}

/// Encodes payloads into an in-memory WAV file.
pub fn encode(format: &PcmFormat, payloads: &[&[u8]]) -> AssemblyResult<Vec<u8>> {
    let total: usize = payloads.iter().map(|p| p.len()).sum();
    let mut buffer = Vec::with_capacity(HEADER_LEN + total);
    encode_to(&mut buffer, format, payloads)?;
    Ok(buffer)
}
