//! PCM payload extraction and hashing.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};

/// Decodes a 16-bit integer WAV and returns its samples re-encoded as
/// little-endian bytes, or `None` if the bytes are not such a file.
///
/// The result does not depend on header layout or extra chunks, so two files
/// carrying the same audio compare equal.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<Vec<u8>> {
    let mut reader = WavReader::new(Cursor::new(wav_data)).ok()?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return None;
    }
    let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
    Some(samples.ok()?.into_iter().flat_map(i16::to_le_bytes).collect())
}

/// BLAKE3 hex digest of a WAV file's PCM payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(&pcm).to_hex().to_string())
}
