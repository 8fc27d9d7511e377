//! RIFF/WAVE decoding.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use super::format::PcmFormat;
use crate::clip::AudioClip;
use crate::error::{AssemblyError, AssemblyResult};

const WAVE_FORMAT_PCM: u16 = 0x0001;
const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// KSDATAFORMAT_SUBTYPE_PCM, as stored on disk.
const SUBTYPE_PCM: [u8; 16] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xAA, 0x00, 0x38, 0x9B, 0x71,
];

/// Data size written by streaming encoders that never patched their header.
const UNKNOWN_DATA_SIZE: u32 = u32::MAX;

/// Decodes a WAV byte stream into a clip.
///
/// Chunks other than `fmt ` and `data` are skipped. The declared data size
/// must be fully present; `0xFFFFFFFF` is read as "until end of stream".
///
/// # Errors
/// - [`AssemblyError::MalformedContainer`] if the RIFF/WAVE signature, the
///   `fmt ` block or the `data` block is missing or inconsistent
/// - [`AssemblyError::UnsupportedEncoding`] for anything but 8/16/24/32-bit linear PCM
/// - [`AssemblyError::TruncatedPayload`] if the data block is shorter than declared
/// - [`AssemblyError::CorruptClip`] if the payload is not frame-aligned
pub fn decode(bytes: &[u8]) -> AssemblyResult<AudioClip> {
    if bytes.len() < 12 {
        return Err(AssemblyError::malformed(format!(
            "{} bytes is too short for a RIFF header",
            bytes.len()
        )));
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(AssemblyError::malformed("missing RIFF signature"));
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(AssemblyError::malformed("RIFF form type is not WAVE"));
    }

    let mut format = None;
    let mut payload = None;
    let mut pos = 12usize;

    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let size = read_u32(&bytes[pos + 4..pos + 8]);
        let body = pos + 8;
        let available = bytes.len() - body;

        match id {
            b"fmt " => {
                if size as usize > available {
                    return Err(AssemblyError::malformed("fmt block runs past end of stream"));
                }
                format = Some(parse_fmt(&bytes[body..body + size as usize])?);
            }
            b"data" => {
                let len = if size == UNKNOWN_DATA_SIZE {
                    available
                } else if size as usize > available {
                    return Err(AssemblyError::TruncatedPayload {
                        declared: u64::from(size),
                        available: available as u64,
                    });
                } else {
                    size as usize
                };
                payload = Some(&bytes[body..body + len]);
                if size == UNKNOWN_DATA_SIZE {
                    break;
                }
            }
            _ => {}
        }

        if format.is_some() && payload.is_some() {
            break;
        }

        // Chunks are word aligned.
        let padded = size as usize + (size as usize & 1);
        match body.checked_add(padded) {
            Some(next) => pos = next,
            None => break,
        }
    }

    let format = format.ok_or_else(|| AssemblyError::malformed("missing fmt block"))?;
    let payload = payload.ok_or_else(|| AssemblyError::malformed("missing data block"))?;
    AudioClip::new(format, payload.to_vec())
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn parse_fmt(body: &[u8]) -> AssemblyResult<PcmFormat> {
    if body.len() < 16 {
        return Err(AssemblyError::malformed(format!(
            "fmt block is {} bytes, at least 16 required",
            body.len()
        )));
    }

    let mut cursor = Cursor::new(body);
    let format_tag = cursor.read_u16::<LittleEndian>()?;
    let channels = cursor.read_u16::<LittleEndian>()?;
    let sample_rate = cursor.read_u32::<LittleEndian>()?;
    let _byte_rate = cursor.read_u32::<LittleEndian>()?;
    let block_align = cursor.read_u16::<LittleEndian>()?;
    let bits_per_sample = cursor.read_u16::<LittleEndian>()?;

    let is_pcm = match format_tag {
        WAVE_FORMAT_PCM => true,
        WAVE_FORMAT_EXTENSIBLE => body.len() >= 40 && body[24..40] == SUBTYPE_PCM,
        _ => false,
    };
    if !is_pcm {
        return Err(AssemblyError::UnsupportedEncoding {
            format_tag,
            bits_per_sample,
        });
    }

    let format = PcmFormat::new(sample_rate, channels, bits_per_sample).map_err(|e| match e {
        AssemblyError::UnsupportedEncoding {
            bits_per_sample, ..
        } => AssemblyError::UnsupportedEncoding {
            format_tag,
            bits_per_sample,
        },
        other => other,
    })?;

    if block_align != format.block_align() {
        return Err(AssemblyError::malformed(format!(
            "block align {} does not match {} channels of {}-bit samples",
            block_align, channels, bits_per_sample
        )));
    }

    Ok(format)
}
