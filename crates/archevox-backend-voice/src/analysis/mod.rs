//! Spectral and level analysis of rendered voices.

use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

use crate::buffer::AudioBuffer;

/// Largest FFT taken over a buffer.
const MAX_FFT_SIZE: usize = 1 << 17;

/// Buffers shorter than this produce an empty spectrum.
const MIN_FFT_INPUT: usize = 64;

/// Bins below this frequency are ignored when picking the dominant frequency.
const DOMINANT_MIN_HZ: f64 = 20.0;

/// Hann-windowed magnitude spectrum over positive frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    magnitudes: Vec<f64>,
    bin_hz: f64,
}

impl Spectrum {
    /// Computes the spectrum of the first `2^k` samples (zero padded).
    pub fn compute(samples: &[f32], sample_rate: u32) -> Self {
        if samples.len() < MIN_FFT_INPUT || sample_rate == 0 {
            return Self {
                magnitudes: Vec::new(),
                bin_hz: 0.0,
            };
        }

        let fft_size = samples.len().next_power_of_two().min(MAX_FFT_SIZE);
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);

        let window_len = samples.len().min(fft_size);
        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .take(fft_size)
            .enumerate()
            .map(|(i, &s)| {
                let w = 0.5
                    * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / window_len as f64).cos());
                Complex::new(s as f64 * w, 0.0)
            })
            .collect();
        buffer.resize(fft_size, Complex::new(0.0, 0.0));

        fft.process(&mut buffer);

        let magnitudes = buffer
            .iter()
            .take(fft_size / 2)
            .map(|c| c.norm())
            .collect();

        Self {
            magnitudes,
            bin_hz: sample_rate as f64 / fft_size as f64,
        }
    }

    /// Frequency spacing between bins (Hz).
    pub fn bin_hz(&self) -> f64 {
        self.bin_hz
    }

    /// Bin magnitudes from DC up to (excluding) Nyquist.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Magnitude of the bin nearest `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        if self.magnitudes.is_empty() || freq_hz < 0.0 {
            return 0.0;
        }
        let bin = (freq_hz / self.bin_hz).round() as usize;
        self.magnitudes.get(bin).copied().unwrap_or(0.0)
    }

    /// Sum of squared magnitudes for bins within `[low_hz, high_hz]`.
    pub fn band_energy(&self, low_hz: f64, high_hz: f64) -> f64 {
        self.magnitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let f = *i as f64 * self.bin_hz;
                f >= low_hz && f <= high_hz
            })
            .map(|(_, m)| m * m)
            .sum()
    }

    /// Frequency of the strongest bin above 20 Hz, or 0 for silence.
    pub fn dominant_frequency(&self) -> f64 {
        if self.magnitudes.is_empty() {
            return 0.0;
        }
        let min_bin = (DOMINANT_MIN_HZ / self.bin_hz).ceil() as usize;
        let mut best = (0usize, 0.0f64);
        for (i, &m) in self.magnitudes.iter().enumerate().skip(min_bin) {
            if m > best.1 {
                best = (i, m);
            }
        }
        best.0 as f64 * self.bin_hz
    }

    /// Magnitude-weighted mean frequency, or 0 for silence.
    pub fn spectral_centroid(&self) -> f64 {
        let (weighted, total) = self
            .magnitudes
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(w, t), (i, &m)| {
                (w + i as f64 * self.bin_hz * m, t + m)
            });
        if total > 0.0 {
            weighted / total
        } else {
            0.0
        }
    }
}

/// Summary statistics for a rendered buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioStats {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
    /// Duration in seconds.
    pub duration_seconds: f64,
    /// Largest absolute sample.
    pub peak: f64,
    /// Root-mean-square level.
    pub rms: f64,
    /// Strongest frequency above 20 Hz.
    pub dominant_frequency_hz: f64,
    /// Spectral centroid.
    pub spectral_centroid_hz: f64,
}

/// Computes [`AudioStats`] for a buffer.
pub fn analyze(buffer: &AudioBuffer) -> AudioStats {
    let spectrum = Spectrum::compute(buffer.samples(), buffer.sample_rate());
    AudioStats {
        sample_rate: buffer.sample_rate(),
        num_samples: buffer.len(),
        duration_seconds: buffer.duration_seconds(),
        peak: buffer.peak() as f64,
        rms: buffer.rms(),
        dominant_frequency_hz: spectrum.dominant_frequency(),
        spectral_centroid_hz: spectrum.spectral_centroid(),
    }
}
