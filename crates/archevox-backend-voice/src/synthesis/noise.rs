//! Reproducible Gaussian noise and its spectral shaping.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::{VoiceError, VoiceResult};
use crate::filter::lowpass_4th;
use crate::rng::create_rng;

use super::check_duration;

/// Draws one standard normal sample (Box-Muller).
#[inline]
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u keeps the logarithm away from zero
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Draws `len` unit-variance Gaussian samples from a caller-owned generator.
pub fn white<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    (0..len).map(|_| gaussian(rng)).collect()
}

/// Seeded noise source with Butterworth shaping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseGenerator {
    sample_rate: u32,
}

impl NoiseGenerator {
    /// Creates a noise generator.
    pub fn new(sample_rate: u32) -> VoiceResult<Self> {
        if sample_rate == 0 {
            return Err(VoiceError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self { sample_rate })
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Generates `round(duration_seconds * sample_rate)` samples of white noise.
    ///
    /// Durations above [`MAX_DURATION_SECONDS`](archevox_spec::MAX_DURATION_SECONDS)
    /// are rejected with `InvalidDuration`.
    pub fn generate(&self, duration_seconds: f64, seed: u32) -> VoiceResult<Vec<f64>> {
        check_duration(duration_seconds)?;
        let len = (duration_seconds * self.sample_rate as f64).round() as usize;
        let mut rng = create_rng(seed);
        Ok(white(len, &mut rng))
    }

    /// Applies a 4th-order Butterworth lowpass at `cutoff_hz`.
    ///
    /// Cutoffs close to Nyquist are clamped.
    pub fn shape(&self, buffer: &[f64], cutoff_hz: f64) -> VoiceResult<Vec<f64>> {
        if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
            return Err(VoiceError::InvalidFrequency { freq: cutoff_hz });
        }
        Ok(lowpass_4th(buffer, cutoff_hz, self.sample_rate as f64))
    }
}
