//! Anchor loading and the anchor aberration path.
//!
//! Anchors are integer PCM WAV files. They are decoded with `hound`,
//! downmixed to mono by averaging channels, and resampled to the engine rate
//! with linear interpolation. Downsampling first lowpasses at 45% of the
//! target rate.

use std::path::Path;

use archevox_spec::{validate_aberration_params, AberrationParameters};
use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::aberration::AberrationChain;
use crate::buffer::AudioBuffer;
use crate::error::{VoiceError, VoiceResult};
use crate::filter::lowpass_4th;
use crate::normalize::OutputNormalizer;

/// Anti-alias cutoff for downsampling, as a fraction of the target rate.
const ANTI_ALIAS_RATIO: f64 = 0.45;

/// Loads a WAV anchor as mono `f64` samples at its native rate.
///
/// # Errors
/// `Io` if the file cannot be opened or read; `UnsupportedFormat` for float
/// samples, bit depths other than 8, 16, 24 or 32, zero channels or a
/// malformed file.
pub fn read_wav_mono(path: &Path) -> VoiceResult<(Vec<f64>, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        return Err(VoiceError::unsupported_format(format!(
            "'{}': only integer PCM is supported, got {:?}",
            path.display(),
            spec.sample_format
        )));
    }
    if spec.channels == 0 {
        return Err(VoiceError::unsupported_format(format!(
            "'{}': no channels",
            path.display()
        )));
    }

    let interleaved: Vec<i32> = match spec.bits_per_sample {
        8 | 16 | 24 | 32 => reader.samples::<i32>().collect::<Result<_, _>>()?,
        bits => {
            return Err(VoiceError::unsupported_format(format!(
                "'{}': unsupported bit depth {} (supported: 8, 16, 24, 32)",
                path.display(),
                bits
            )))
        }
    };

    let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
    let normalized: Vec<f64> = interleaved.iter().map(|&s| s as f64 / scale).collect();
    Ok((downmix(&normalized, spec.channels), spec.sample_rate))
}

/// Averages interleaved channels into one.
///
/// A trailing partial frame is dropped.
pub fn downmix(interleaved: &[f64], channels: u16) -> Vec<f64> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}

/// Resamples by linear interpolation to `ceil(len * to_rate / from_rate)` samples.
pub fn resample_linear(samples: &[f64], from_rate: u32, to_rate: u32) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;
    let last = samples.len() - 1;

    (0..output_len)
        .map(|i| {
            let src_pos = i as f64 * ratio;
            let src_idx = src_pos.floor() as usize;
            let frac = src_pos - src_idx as f64;
            if src_idx < last {
                let s0 = samples[src_idx];
                let s1 = samples[src_idx + 1];
                s0 + (s1 - s0) * frac
            } else {
                samples[src_idx.min(last)]
            }
        })
        .collect()
}

/// Converts `samples` from `from_rate` to `to_rate`, lowpassing first when
/// the rate goes down.
pub fn resample(samples: &[f64], from_rate: u32, to_rate: u32) -> Vec<f64> {
    if from_rate > to_rate {
        let filtered = lowpass_4th(
            samples,
            to_rate as f64 * ANTI_ALIAS_RATIO,
            from_rate as f64,
        );
        resample_linear(&filtered, from_rate, to_rate)
    } else {
        resample_linear(samples, from_rate, to_rate)
    }
}

/// Passes anchor recordings through the aberration chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorAberrationSynthesizer {
    sample_rate: u32,
    normalizer: OutputNormalizer,
}

impl AnchorAberrationSynthesizer {
    /// Creates a synthesizer whose engine rate is `sample_rate`.
    pub fn new(sample_rate: u32) -> VoiceResult<Self> {
        if sample_rate == 0 {
            return Err(VoiceError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            sample_rate,
            normalizer: OutputNormalizer::anchor(),
        })
    }

    /// Returns the engine sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Loads an anchor as a mono buffer at the engine rate.
    pub fn load_anchor(&self, path: &Path) -> VoiceResult<AudioBuffer> {
        let (samples, native_rate) = read_wav_mono(path)?;
        if native_rate == 0 {
            return Err(VoiceError::unsupported_format(format!(
                "'{}': sample rate is 0",
                path.display()
            )));
        }
        let resampled = resample(&samples, native_rate, self.sample_rate);
        debug!(
            path = %path.display(),
            native_rate,
            engine_rate = self.sample_rate,
            samples_in = samples.len(),
            samples_out = resampled.len(),
            "loaded anchor"
        );
        Ok(AudioBuffer::from_f64(&resampled, self.sample_rate))
    }

    /// Applies the aberration chain to `anchor` and normalizes to 0.85 peak.
    ///
    /// An anchor at another rate is resampled to the engine rate first.
    ///
    /// # Errors
    /// `InvalidParameter` for out-of-range knobs or an empty anchor;
    /// `NumericInstability` if a stage produces a non-finite sample.
    pub fn synthesize(
        &self,
        anchor: &AudioBuffer,
        params: &AberrationParameters,
        seed: u32,
    ) -> VoiceResult<AudioBuffer> {
        let validation = validate_aberration_params(params, "aberration");
        if let Some(err) = validation.errors.first() {
            return Err(VoiceError::invalid_param(
                err.path.clone().unwrap_or_else(|| "aberration".to_string()),
                err.message.clone(),
            ));
        }
        if anchor.is_empty() {
            return Err(VoiceError::invalid_param("anchor", "anchor has no samples"));
        }
        if anchor.sample_rate() == 0 {
            return Err(VoiceError::InvalidSampleRate {
                rate: anchor.sample_rate(),
            });
        }

        let mut signal = anchor.to_f64();
        if anchor.sample_rate() != self.sample_rate {
            signal = resample(&signal, anchor.sample_rate(), self.sample_rate);
        }

        let chain = AberrationChain::from_params(params);
        debug!(
            samples = signal.len(),
            seed,
            stages = ?chain.enabled_stages(),
            "anchor aberration synthesis"
        );
        let processed = chain.process(&signal, self.sample_rate as f64, seed)?;
        self.normalizer
            .normalize(&processed, self.sample_rate, "anchor_aberration")
    }
}
