//! Deterministic WAV output.
//!
//! Renders are written as 16-bit mono PCM behind a fixed 44-byte header, so
//! a buffer always serializes to the same bytes. The BLAKE3 hash of the PCM
//! payload identifies a render regardless of its sample rate.

mod pcm;
mod result;
mod writer;


pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav, write_wav_file, write_wav_to_vec};
