//! Ordered application of the aberration stages.

use archevox_spec::AberrationParameters;
use tracing::debug;

use super::stages::{
    BandwidthExpansion, Breathiness, FormantShift, GrowlSubharmonic, HollowResonance, Roughness,
    Wetness, WhisperBlend,
};
use super::AberrationStage;
use crate::error::{VoiceError, VoiceResult};
use crate::rng::create_component_rng;

/// The full stage sequence for one archetype.
#[derive(Debug)]
pub struct AberrationChain {
    stages: Vec<Box<dyn AberrationStage>>,
}

impl AberrationChain {
    /// Builds every stage from its knob in `params`.
    pub fn from_params(params: &AberrationParameters) -> Self {
        let stages: Vec<Box<dyn AberrationStage>> = vec![
            Box::new(FormantShift {
                shift_hz: params.formant_shift_hz,
                scale: params.formant_scale,
            }),
            Box::new(Breathiness {
                amount: params.breathiness,
            }),
            Box::new(Roughness {
                amount: params.roughness,
            }),
            Box::new(HollowResonance {
                amount: params.hollow_resonance,
            }),
            Box::new(Wetness {
                amount: params.wetness,
            }),
            Box::new(BandwidthExpansion {
                expansion: params.bandwidth_expansion,
            }),
            Box::new(GrowlSubharmonic {
                amount: params.growl_harmonics,
            }),
            Box::new(WhisperBlend {
                amount: params.whisper,
            }),
        ];
        Self { stages }
    }

    /// All stages in processing order.
    pub fn stages(&self) -> &[Box<dyn AberrationStage>] {
        &self.stages
    }

    /// Names of the stages that will alter the signal.
    pub fn enabled_stages(&self) -> Vec<&'static str> {
        self.stages
            .iter()
            .filter(|s| !s.is_identity())
            .map(|s| s.descriptor().name)
            .collect()
    }

    /// Runs the enabled stages in order.
    ///
    /// Each stage gets a fresh generator derived from `seed` and its name.
    ///
    /// # Errors
    /// `NumericInstability` naming the first stage whose output is not finite.
    pub fn process(&self, input: &[f64], sample_rate: f64, seed: u32) -> VoiceResult<Vec<f64>> {
        let mut signal = input.to_vec();
        for stage in self.stages.iter().filter(|s| !s.is_identity()) {
            let name = stage.descriptor().name;
            let mut rng = create_component_rng(seed, name);
            signal = stage.process(&signal, sample_rate, &mut rng);

            if let Some(i) = signal.iter().position(|s| !s.is_finite()) {
                return Err(VoiceError::instability(
                    name,
                    format!("non-finite sample at index {}", i),
                ));
            }
            debug!(stage = name, samples = signal.len(), "applied aberration stage");
        }
        Ok(signal)
    }
}
