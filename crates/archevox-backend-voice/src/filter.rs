//! Biquad filter implementations.
//!
//! Lowpass and highpass coefficients follow the Audio EQ Cookbook. Formant
//! resonators use the all-pole form with a unit numerator. A 4th-order
//! Butterworth lowpass is built by cascading two cookbook sections.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::{VoiceError, VoiceResult};

/// Q values of the two sections of a 4th-order Butterworth lowpass.
pub const BUTTERWORTH_4_Q: [f64; 2] = [0.541_196_100_146_197, 1.306_562_964_876_376_5];

/// Q of a 2nd-order Butterworth section.
pub const BUTTERWORTH_2_Q: f64 = FRAC_1_SQRT_2;

/// Highest cutoff used, as a fraction of the sample rate.
///
/// Cookbook sections degenerate as the cutoff approaches Nyquist.
const MAX_CUTOFF_RATIO: f64 = 0.45;

/// Biquad filter coefficients, normalized so that a0 = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Creates lowpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor, 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = 2.0 * PI * clamp_cutoff(cutoff, sample_rate) / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Creates highpass filter coefficients.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = 2.0 * PI * clamp_cutoff(cutoff, sample_rate) / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 + cos_omega) / 2.0;
        let b1 = -(1.0 + cos_omega);
        let b2 = (1.0 + cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Creates a two-pole formant resonator.
    ///
    /// Pole radius `r = exp(-pi * bandwidth / sample_rate)`, pole angle
    /// `theta = 2 * pi * frequency / sample_rate`; denominator
    /// `[1, -2r cos(theta), r^2]`, numerator `[1]`.
    ///
    /// # Errors
    /// * `InvalidFrequency` if `frequency` is not in (0, Nyquist)
    /// * `NumericInstability` if `bandwidth <= 0` or the pole reaches the unit circle
    pub fn resonator(frequency: f64, bandwidth: f64, sample_rate: f64) -> VoiceResult<Self> {
        let nyquist = sample_rate / 2.0;
        if !frequency.is_finite() || frequency <= 0.0 || frequency >= nyquist {
            return Err(VoiceError::InvalidFrequency { freq: frequency });
        }
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(VoiceError::instability(
                "resonator",
                format!("bandwidth {} Hz puts the pole on or outside the unit circle", bandwidth),
            ));
        }

        let r = (-PI * bandwidth / sample_rate).exp();
        if r >= 1.0 {
            return Err(VoiceError::instability(
                "resonator",
                format!("bandwidth {} Hz rounds to pole radius 1.0", bandwidth),
            ));
        }
        let theta = 2.0 * PI * frequency / sample_rate;

        Ok(Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: -2.0 * r * theta.cos(),
            a2: r * r,
        })
    }

    /// Radius of the complex pole pair.
    pub fn pole_radius(&self) -> f64 {
        self.a2.abs().sqrt()
    }
}

/// Biquad filter state (direct form I).
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a lowpass filter.
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::lowpass(cutoff, q, sample_rate))
    }

    /// Creates a highpass filter.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::highpass(cutoff, q, sample_rate))
    }

    /// Resets the filter state.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.coeffs.b0 * input + self.coeffs.b1 * self.x1 + self.coeffs.b2 * self.x2
            - self.coeffs.a1 * self.y1
            - self.coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Processes a buffer of samples, returning a new buffer.
    pub fn process_buffer_copy(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&s| self.process(s)).collect()
    }
}

/// 4th-order Butterworth lowpass as two cascaded biquads.
#[derive(Debug, Clone)]
pub struct ButterworthLowpass {
    sections: [BiquadFilter; 2],
}

impl ButterworthLowpass {
    /// Creates the cascade for `cutoff` Hz.
    pub fn new(cutoff: f64, sample_rate: f64) -> Self {
        Self {
            sections: BUTTERWORTH_4_Q.map(|q| BiquadFilter::lowpass(cutoff, q, sample_rate)),
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let mid = self.sections[0].process(input);
        self.sections[1].process(mid)
    }

    /// Filters a buffer, returning a new buffer.
    pub fn process_buffer_copy(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&s| self.process(s)).collect()
    }
}

/// Applies a 2nd-order Butterworth lowpass to a whole buffer.
pub fn lowpass_2nd(input: &[f64], cutoff: f64, sample_rate: f64) -> Vec<f64> {
    BiquadFilter::lowpass(cutoff, BUTTERWORTH_2_Q, sample_rate).process_buffer_copy(input)
}

/// Applies a 2nd-order Butterworth highpass to a whole buffer.
pub fn highpass_2nd(input: &[f64], cutoff: f64, sample_rate: f64) -> Vec<f64> {
    BiquadFilter::highpass(cutoff, BUTTERWORTH_2_Q, sample_rate).process_buffer_copy(input)
}

/// Applies a 4th-order Butterworth lowpass to a whole buffer.
pub fn lowpass_4th(input: &[f64], cutoff: f64, sample_rate: f64) -> Vec<f64> {
    ButterworthLowpass::new(cutoff, sample_rate).process_buffer_copy(input)
}

fn clamp_cutoff(cutoff: f64, sample_rate: f64) -> f64 {
    cutoff.clamp(1.0, sample_rate * MAX_CUTOFF_RATIO)
}
