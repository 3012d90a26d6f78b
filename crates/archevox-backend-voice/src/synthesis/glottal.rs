//! Liljencrants-Fant glottal source.
//!
//! One period is shaped in three phases measured from the start of the
//! period:
//!
//! - open phase `[0, Te)`: `exp(-t / Ta) * sin(pi * t / Tp)`
//! - return phase `[Te, Ta)`: exponential decay from the value at `Te` with
//!   time constant `Ta - Te`
//! - closed phase `[Ta, T0)`: silence
//!
//! where `T0 = 1 / f0`, `Te = excitation_ratio * T0`, `Tp = Te / speed_quotient`
//! and `Ta = open_quotient * T0`. When `Ta <= Te` the open phase is cut at
//! `Ta` and the return phase is skipped, so the pulse is always silent after
//! `Ta`.

use std::f64::consts::PI;

use archevox_spec::validation::common::{
    validate_open_unit_interval, validate_positive, validate_range,
};
use archevox_spec::{PitchContour, VocalTractParameters, DEFAULT_EXCITATION_RATIO};
use tracing::{debug, warn};

use crate::error::{VoiceError, VoiceResult};

use super::check_duration;

/// Generates glottal pulses and pulse trains at a fixed sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlottalSourceGenerator {
    sample_rate: u32,
    excitation_ratio: f64,
}

impl GlottalSourceGenerator {
    /// Creates a generator with the default excitation ratio.
    pub fn new(sample_rate: u32) -> VoiceResult<Self> {
        if sample_rate == 0 {
            return Err(VoiceError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            sample_rate,
            excitation_ratio: DEFAULT_EXCITATION_RATIO,
        })
    }

    /// Replaces the excitation ratio (`Te / T0`), which must be in (0, 1).
    pub fn with_excitation_ratio(mut self, excitation_ratio: f64) -> VoiceResult<Self> {
        check_excitation_ratio(excitation_ratio)?;
        self.excitation_ratio = excitation_ratio;
        Ok(self)
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the configured excitation ratio.
    pub fn excitation_ratio(&self) -> f64 {
        self.excitation_ratio
    }

    /// Generates one peak-normalized pulse period of `round(sample_rate / f0)` samples.
    ///
    /// # Errors
    /// `InvalidFrequency` if `f0` is not in (0, Nyquist); `InvalidParameter`
    /// for an open quotient outside (0, 1], a non-positive speed quotient or an
    /// excitation ratio outside (0, 1).
    pub fn generate_pulse(
        &self,
        f0: f64,
        open_quotient: f64,
        speed_quotient: f64,
        excitation_ratio: f64,
    ) -> VoiceResult<Vec<f64>> {
        self.check_f0(f0)?;
        VoiceError::check(
            "open_quotient",
            validate_open_unit_interval("open_quotient", open_quotient),
        )?;
        VoiceError::check(
            "speed_quotient",
            validate_positive("speed_quotient", speed_quotient),
        )?;
        check_excitation_ratio(excitation_ratio)?;
        Ok(self.shape_pulse(f0, open_quotient, speed_quotient, excitation_ratio))
    }

    /// Generates a pulse train of `round(duration_seconds * sample_rate)` samples.
    ///
    /// Each pulse takes its F0 from `pitch_contour` at the normalized position
    /// where it starts, falling back to `params.f0`, and is scaled by
    /// `params.tenseness`, which may exceed 1 after affect modulation. The
    /// final pulse is truncated at the buffer end.
    pub fn generate(
        &self,
        duration_seconds: f64,
        params: &VocalTractParameters,
        pitch_contour: Option<&PitchContour>,
    ) -> VoiceResult<Vec<f64>> {
        check_duration(duration_seconds)?;
        self.check_f0(params.f0)?;
        VoiceError::check(
            "open_quotient",
            validate_open_unit_interval("open_quotient", params.open_quotient),
        )?;
        VoiceError::check(
            "speed_quotient",
            validate_positive("speed_quotient", params.speed_quotient),
        )?;
        VoiceError::check(
            "tenseness",
            validate_range("tenseness", params.tenseness, 0.0, f64::MAX),
        )?;
        if let Some(contour) = pitch_contour {
            for &f0 in contour.samples() {
                self.check_f0(f0)?;
            }
        }

        if params.open_quotient <= self.excitation_ratio {
            warn!(
                open_quotient = params.open_quotient,
                excitation_ratio = self.excitation_ratio,
                "open quotient does not exceed excitation ratio; skipping return phase"
            );
        }

        let total = (duration_seconds * self.sample_rate as f64).round() as usize;
        let mut output = vec![0.0; total];
        let mut pulse = Vec::new();
        let mut pulse_f0 = f64::NAN;
        let mut pos = 0;
        let mut pulses = 0usize;

        while pos < total {
            let progress = pos as f64 / total as f64;
            let f0 = pitch_contour
                .and_then(|c| c.f0_at(progress))
                .unwrap_or(params.f0);

            if f0 != pulse_f0 {
                pulse = self.shape_pulse(
                    f0,
                    params.open_quotient,
                    params.speed_quotient,
                    self.excitation_ratio,
                );
                pulse_f0 = f0;
            }

            let end = (pos + pulse.len()).min(total);
            for (out, &p) in output[pos..end].iter_mut().zip(pulse.iter()) {
                *out = p * params.tenseness;
            }
            pos += pulse.len();
            pulses += 1;
        }

        debug!(
            duration_seconds,
            samples = total,
            pulses,
            contour = pitch_contour.is_some(),
            "generated glottal pulse train"
        );
        Ok(output)
    }

    fn check_f0(&self, f0: f64) -> VoiceResult<()> {
        let nyquist = self.sample_rate as f64 / 2.0;
        if !f0.is_finite() || f0 <= 0.0 || f0 >= nyquist {
            return Err(VoiceError::InvalidFrequency { freq: f0 });
        }
        Ok(())
    }

    fn shape_pulse(
        &self,
        f0: f64,
        open_quotient: f64,
        speed_quotient: f64,
        excitation_ratio: f64,
    ) -> Vec<f64> {
        let sr = self.sample_rate as f64;
        let period = (sr / f0).round() as usize;

        let t0 = 1.0 / f0;
        let te = excitation_ratio * t0;
        let tp = te / speed_quotient;
        let ta = open_quotient * t0;
        let open_end = te.min(ta);
        let e_amp = (-te / ta).exp() * (PI * te / tp).sin();

        let mut pulse: Vec<f64> = (0..period)
            .map(|i| {
                let t = i as f64 / sr;
                if t < open_end {
                    (-t / ta).exp() * (PI * t / tp).sin()
                } else if t < ta {
                    e_amp * (-(t - te) / (ta - te)).exp()
                } else {
                    0.0
                }
            })
            .collect();

        let peak = pulse.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()));
        if peak > 0.0 {
            for s in pulse.iter_mut() {
                *s /= peak;
            }
        }
        pulse
    }
}

fn check_excitation_ratio(excitation_ratio: f64) -> VoiceResult<()> {
    if !excitation_ratio.is_finite() || excitation_ratio <= 0.0 || excitation_ratio >= 1.0 {
        return Err(VoiceError::invalid_param(
            "excitation_ratio",
            format!("must be in (0, 1), got {}", excitation_ratio),
        ));
    }
    Ok(())
}
