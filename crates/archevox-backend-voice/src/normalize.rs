//! Peak normalization shared by both synthesis paths.

use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::error::{VoiceError, VoiceResult};

/// Peak target for source-filter output.
pub const SOURCE_FILTER_PEAK: f64 = 0.8;

/// Peak target for anchor aberration output.
pub const ANCHOR_PEAK: f64 = 0.85;

/// Scales a signal so its largest absolute sample equals a target peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputNormalizer {
    target_peak: f64,
}

impl OutputNormalizer {
    /// Creates a normalizer for a target peak in (0, 1].
    pub fn new(target_peak: f64) -> VoiceResult<Self> {
        if !target_peak.is_finite() || target_peak <= 0.0 || target_peak > 1.0 {
            return Err(VoiceError::invalid_param(
                "target_peak",
                format!("must be in (0, 1], got {}", target_peak),
            ));
        }
        Ok(Self { target_peak })
    }

    /// Normalizer used by the source-filter path.
    pub fn source_filter() -> Self {
        Self {
            target_peak: SOURCE_FILTER_PEAK,
        }
    }

    /// Normalizer used by the anchor aberration path.
    pub fn anchor() -> Self {
        Self {
            target_peak: ANCHOR_PEAK,
        }
    }

    /// Returns the target peak.
    pub fn target_peak(&self) -> f64 {
        self.target_peak
    }

    /// Normalizes `signal` and narrows it into an [`AudioBuffer`].
    ///
    /// An all-zero signal is returned as silence. The narrowed samples never
    /// exceed the target peak, even where `f32` rounding would push them up.
    ///
    /// # Errors
    /// `NumericInstability` if any sample is NaN or infinite.
    pub fn normalize(&self, signal: &[f64], sample_rate: u32, stage: &str) -> VoiceResult<AudioBuffer> {
        if let Some(i) = signal.iter().position(|s| !s.is_finite()) {
            return Err(VoiceError::instability(
                stage,
                format!("non-finite sample {} at index {}", signal[i], i),
            ));
        }

        let peak = signal.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()));
        if peak == 0.0 {
            debug!(stage, len = signal.len(), "silent output, skipping normalization");
            return Ok(AudioBuffer::from_f64(signal, sample_rate));
        }

        let gain = self.target_peak / peak;
        if !gain.is_finite() {
            return Err(VoiceError::instability(
                stage,
                format!("peak {} is too small to normalize", peak),
            ));
        }

        let limit = self.f32_limit();
        let samples = signal
            .iter()
            .map(|&s| ((s * gain) as f32).clamp(-limit, limit))
            .collect();

        Ok(AudioBuffer::new(samples, sample_rate))
    }

    /// Largest `f32` not above the target peak.
    fn f32_limit(&self) -> f32 {
        let limit = self.target_peak as f32;
        if limit as f64 > self.target_peak {
            f32::from_bits(limit.to_bits() - 1)
        } else {
            limit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_to_target() {
        let buffer = OutputNormalizer::source_filter()
            .normalize(&[0.1, -0.4, 0.2], 48000, "test")
            .unwrap();
        let peak = buffer.peak() as f64;
        assert!(peak <= SOURCE_FILTER_PEAK);
        assert!((peak - SOURCE_FILTER_PEAK).abs() < 1e-6);
        assert!(buffer.samples()[1] < 0.0);
    }

    #[test]
    fn test_peak_never_exceeds_target_after_narrowing() {
        let signal: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin() * 3.0).collect();
        for normalizer in [OutputNormalizer::source_filter(), OutputNormalizer::anchor()] {
            let buffer = normalizer.normalize(&signal, 48000, "test").unwrap();
            assert!(buffer.peak() as f64 <= normalizer.target_peak());
        }
    }

    #[test]
    fn test_silence_passes_through() {
        let buffer = OutputNormalizer::anchor()
            .normalize(&[0.0; 16], 48000, "test")
            .unwrap();
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = OutputNormalizer::anchor()
            .normalize(&[0.1, f64::INFINITY], 48000, "growl")
            .unwrap_err();
        assert!(matches!(err, VoiceError::NumericInstability { ref stage, .. } if stage == "growl"));
    }

    #[test]
    fn test_invalid_target_rejected() {
        assert!(OutputNormalizer::new(0.0).is_err());
        assert!(OutputNormalizer::new(1.5).is_err());
        assert!(OutputNormalizer::new(0.5).is_ok());
    }
}
