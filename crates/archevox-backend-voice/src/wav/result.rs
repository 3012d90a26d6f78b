//! Rendered WAV plus its identifying hash.

use crate::buffer::AudioBuffer;

use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// A buffer serialized as a WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Serializes mono samples.
    pub fn from_mono(samples: &[f32], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(sample_rate, &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Serializes an [`AudioBuffer`].
    pub fn from_buffer(buffer: &AudioBuffer) -> Self {
        Self::from_mono(buffer.samples(), buffer.sample_rate())
    }

    /// Duration in seconds, 0 for a zero rate.
    pub fn duration_seconds(&self) -> f64 {
        match self.sample_rate {
            0 => 0.0,
            rate => self.num_samples as f64 / rate as f64,
        }
    }
}
