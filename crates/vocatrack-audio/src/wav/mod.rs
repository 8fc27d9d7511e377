//! WAV container codec.
//!
//! Decoding accepts RIFF/WAVE files holding linear PCM (including
//! `WAVE_FORMAT_EXTENSIBLE` with a PCM sub-format). Encoding writes the
//! canonical 44-byte header followed by the payloads in order, with every
//! size field derived from the format and the total payload length.

mod decode;
mod encode;
mod format;
mod pcm;


pub use decode::decode;
pub use encode::{encode, encode_to, HEADER_LEN, MAX_DATA_LEN};
pub use format::PcmFormat;
pub use pcm::{compute_pcm_hash, pcm_hash};
