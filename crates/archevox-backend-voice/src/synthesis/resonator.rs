//! Cascaded formant resonators.

use archevox_spec::Formant;

use crate::error::{VoiceError, VoiceResult};
use crate::filter::{BiquadCoeffs, BiquadFilter};

/// Applies one two-pole resonator per formant, in the order given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantResonatorBank {
    sample_rate: u32,
}

impl FormantResonatorBank {
    /// Creates a resonator bank.
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

    /// Builds the coefficients for every formant without filtering anything.
    ///
    /// # Errors
    /// `InvalidFrequency` for a formant at or above Nyquist, `NumericInstability`
    /// for a non-positive bandwidth.
    pub fn coefficients(&self, formants: &[Formant]) -> VoiceResult<Vec<BiquadCoeffs>> {
        formants
            .iter()
            .map(|f| BiquadCoeffs::resonator(f.frequency_hz, f.bandwidth_hz, self.sample_rate as f64))
            .collect()
    }

    /// Filters `signal` through the cascade F1 -> Fn.
    ///
    /// All coefficients are checked before any sample is processed.
    pub fn apply_formants(&self, signal: &[f64], formants: &[Formant]) -> VoiceResult<Vec<f64>> {
        let coeffs = self.coefficients(formants)?;
        let mut output = signal.to_vec();
        for c in coeffs {
            BiquadFilter::new(c).process_buffer(&mut output);
        }
        Ok(output)
    }
}
