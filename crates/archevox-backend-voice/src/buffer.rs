//! Mono audio buffer exchanged at every public boundary.

/// Immutable mono sample sequence with its sample rate.
///
/// Buffers are created fresh per call and owned by the caller. Synthesis works
/// in `f64` internally and only narrows to `f32` when a buffer is built.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wraps samples recorded at `sample_rate`.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Builds a buffer by narrowing `f64` samples.
    pub fn from_f64(samples: &[f64], sample_rate: u32) -> Self {
        Self::new(samples.iter().map(|&s| s as f32).collect(), sample_rate)
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    /// Root-mean-square level.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum / self.samples.len() as f64).sqrt()
    }

    /// Returns true if every sample is finite.
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }

    /// Widens the samples for processing.
    pub fn to_f64(&self) -> Vec<f64> {
        self.samples.iter().map(|&s| s as f64).collect()
    }

    /// Consumes the buffer and returns its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
