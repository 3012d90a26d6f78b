//! Source-filter synthesis path.
//!
//! Affect modulation, an LF pulse train, the formant cascade, optional breath
//! noise and a final peak normalization, in that order.

use archevox_spec::validation::common::{validate_positive, validate_unit_interval};
use archevox_spec::{PitchContour, VocalTractParameters};
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::error::{VoiceError, VoiceResult};
use crate::normalize::OutputNormalizer;
use crate::rng::create_component_rng;

use super::check_duration;
use super::emotion::{AffectFactors, EmotionParameterMapper};
use super::glottal::GlottalSourceGenerator;
use super::noise::{white, NoiseGenerator};
use super::resonator::FormantResonatorBank;

/// Lowpass cutoff for breath noise (Hz).
pub const BREATH_NOISE_CUTOFF_HZ: f64 = 3000.0;

/// Breath noise level per unit of breathiness, relative to the voiced peak.
pub const BREATH_NOISE_GAIN: f64 = 0.1;

/// Fully synthetic voice generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceFilterSynthesizer {
    sample_rate: u32,
    glottal: GlottalSourceGenerator,
    noise: NoiseGenerator,
    resonators: FormantResonatorBank,
    normalizer: OutputNormalizer,
}

impl SourceFilterSynthesizer {
    /// Creates a synthesizer running at `sample_rate` Hz.
    pub fn new(sample_rate: u32) -> VoiceResult<Self> {
        Ok(Self {
            sample_rate,
            glottal: GlottalSourceGenerator::new(sample_rate)?,
            noise: NoiseGenerator::new(sample_rate)?,
            resonators: FormantResonatorBank::new(sample_rate)?,
            normalizer: OutputNormalizer::source_filter(),
        })
    }

    /// Replaces the glottal excitation ratio.
    pub fn with_excitation_ratio(mut self, excitation_ratio: f64) -> VoiceResult<Self> {
        self.glottal = self.glottal.with_excitation_ratio(excitation_ratio)?;
        Ok(self)
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Renders `duration_seconds` of voice.
    ///
    /// The parameters are first modulated by their own arousal, valence and
    /// dominance; a pitch contour is scaled by the same F0 factor. Breath
    /// noise is mixed in only when `add_noise` is set and breathiness is
    /// positive, drawn from a stream derived from `seed`.
    ///
    /// # Errors
    /// `InvalidDuration` (including anything over 30 s), `InvalidFrequency`
    /// or `InvalidParameter` for bad input; `NumericInstability` for a non-positive formant bandwidth or a
    /// non-finite result.
    pub fn synthesize(
        &self,
        duration_seconds: f64,
        params: &VocalTractParameters,
        pitch_contour: Option<&PitchContour>,
        add_noise: bool,
        seed: u32,
    ) -> VoiceResult<AudioBuffer> {
        check_duration(duration_seconds)?;
        check_params(params)?;

        debug!(
            duration_seconds,
            sample_rate = self.sample_rate,
            f0 = params.f0,
            add_noise,
            seed,
            "source-filter synthesis"
        );

        let factors = AffectFactors::new(params.arousal, params.valence, params.dominance);
        let modulated = EmotionParameterMapper::modulate_self(params);
        let contour = pitch_contour
            .map(|c| PitchContour::new(c.samples().iter().map(|f0| f0 * factors.f0).collect()));

        let source = self
            .glottal
            .generate(duration_seconds, &modulated, contour.as_ref())?;
        let mut voiced = self.resonators.apply_formants(&source, &modulated.formants)?;

        if add_noise && params.breathiness > 0.0 {
            scale_to_unit_peak(&mut voiced);
            let mut rng = create_component_rng(seed, "breathiness");
            let noise = white(voiced.len(), &mut rng);
            let breath = self.noise.shape(&noise, BREATH_NOISE_CUTOFF_HZ)?;
            let gain = params.breathiness * BREATH_NOISE_GAIN;
            for (v, n) in voiced.iter_mut().zip(breath) {
                *v += n * gain;
            }
        }

        self.normalizer
            .normalize(&voiced, self.sample_rate, "source_filter")
    }
}

fn check_params(params: &VocalTractParameters) -> VoiceResult<()> {
    VoiceError::check(
        "tract_length_cm",
        validate_positive("tract_length_cm", params.tract_length_cm),
    )?;
    let unit_fields = [
        ("tenseness", params.tenseness),
        ("breathiness", params.breathiness),
        ("arousal", params.arousal),
        ("valence", params.valence),
        ("dominance", params.dominance),
    ];
    for (name, value) in unit_fields {
        VoiceError::check(name, validate_unit_interval(name, value))?;
    }
    Ok(())
}

fn scale_to_unit_peak(signal: &mut [f64]) {
    let peak = signal.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()));
    if peak > 0.0 && peak.is_finite() {
        for s in signal.iter_mut() {
            *s /= peak;
        }
    }
}
