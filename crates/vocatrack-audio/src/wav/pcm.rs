//! PCM hashing for determinism checks.

use super::decode::decode;
use crate::error::AssemblyResult;

/// BLAKE3 hash of raw PCM bytes, as lowercase hex.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Decodes a WAV file and hashes its payload only, ignoring header layout.
pub fn compute_pcm_hash(wav_data: &[u8]) -> AssemblyResult<String> {
    let clip = decode(wav_data)?;
    Ok(pcm_hash(clip.samples()))
}
