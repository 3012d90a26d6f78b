//! Pitch contour over normalized utterance time.

use serde::{Deserialize, Serialize};

/// Ordered F0 samples spread evenly over normalized time [0, 1).
///
/// Sample `i` of `n` covers the interval `[i / n, (i + 1) / n)`. Lookup is
/// floor-indexed with no interpolation, so each glottal pulse takes the F0 of
/// the interval it starts in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchContour {
    samples: Vec<f64>,
}

impl PitchContour {
    /// Creates a contour from F0 samples in Hz.
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Creates a linear glide between two frequencies with `steps` samples.
    pub fn glide(start_hz: f64, end_hz: f64, steps: usize) -> Self {
        let steps = steps.max(1);
        let divisor = if steps > 1 { steps - 1 } else { 1 };
        let samples = (0..steps)
            .map(|i| start_hz + (end_hz - start_hz) * (i as f64 / divisor as f64))
            .collect();
        Self { samples }
    }

    /// The raw F0 samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the contour holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// F0 at normalized time `progress`, or `None` for an empty contour.
    ///
    /// Progress outside [0, 1) is clamped to the first or last sample.
    pub fn f0_at(&self, progress: f64) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let last = self.samples.len() - 1;
        let index = if progress <= 0.0 {
            0
        } else {
            ((progress * self.samples.len() as f64).floor() as usize).min(last)
        };
        Some(self.samples[index])
    }
}
