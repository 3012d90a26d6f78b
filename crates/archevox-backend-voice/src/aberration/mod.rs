//! Vocal-tract aberration filter chain.
//!
//! An anchor waveform passes through a fixed sequence of small stages. Each
//! stage is driven by one knob of [`AberrationParameters`] and is skipped
//! entirely at that knob's identity value, so a stage that is switched off
//! leaves the signal bit-exact.
//!
//! | # | Stage | Knob | Identity |
//! |---|-------|------|----------|
//! | 1 | formant shift | `formant_shift_hz`, `formant_scale` | under 1 Hz, scale within 1% of 1.0 |
//! | 2 | breathiness | `breathiness` | 0 |
//! | 3 | roughness | `roughness` | 0 |
//! | 4 | hollow resonance | `hollow_resonance` | 0 |
//! | 5 | wetness | `wetness` | 0 |
//! | 6 | bandwidth expansion | `bandwidth_expansion` | <= 1.0 |
//! | 7 | growl subharmonic | `growl_harmonics` | 0 |
//! | 8 | whisper blend | `whisper` | 0 |
//!
//! Stochastic stages draw from a PCG32 stream derived from the call seed and
//! the stage name.
//!
//! [`AberrationParameters`]: archevox_spec::AberrationParameters

mod chain;
mod stages;

#[cfg(test)]
mod tests;

use std::fmt;

use archevox_spec::params::{
    KnobIdentity, BANDWIDTH_EXPANSION_IDENTITY, BREATHINESS_IDENTITY, FORMANT_SCALE_IDENTITY,
    FORMANT_SHIFT_IDENTITY, GROWL_HARMONICS_IDENTITY, HOLLOW_RESONANCE_IDENTITY,
    ROUGHNESS_IDENTITY, WETNESS_IDENTITY, WHISPER_IDENTITY,
};
use rand_pcg::Pcg32;

pub use chain::AberrationChain;
pub use stages::{
    BandwidthExpansion, Breathiness, FormantShift, GrowlSubharmonic, HollowResonance, Roughness,
    Wetness, WhisperBlend, GROWL_BLOCK_SECONDS,
};

/// Static description of one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageDescriptor {
    /// Position in the chain, starting at 0.
    pub order: usize,
    /// Stage name, also the key for its noise stream.
    pub name: &'static str,
    /// Knobs that drive the stage with their neutral ranges.
    pub knobs: &'static [KnobIdentity],
}

impl StageDescriptor {
    /// Returns true if every knob value, given in `knobs` order, is neutral.
    pub fn is_identity_at(&self, values: &[f64]) -> bool {
        debug_assert_eq!(values.len(), self.knobs.len());
        self.knobs
            .iter()
            .zip(values)
            .all(|(knob, &value)| knob.rule.holds(value))
    }
}

/// Every stage in processing order.
pub const STAGE_TABLE: [StageDescriptor; 8] = [
    StageDescriptor {
        order: 0,
        name: "formant_shift",
        knobs: &[FORMANT_SHIFT_IDENTITY, FORMANT_SCALE_IDENTITY],
    },
    StageDescriptor {
        order: 1,
        name: "breathiness",
        knobs: &[BREATHINESS_IDENTITY],
    },
    StageDescriptor {
        order: 2,
        name: "roughness",
        knobs: &[ROUGHNESS_IDENTITY],
    },
    StageDescriptor {
        order: 3,
        name: "hollow_resonance",
        knobs: &[HOLLOW_RESONANCE_IDENTITY],
    },
    StageDescriptor {
        order: 4,
        name: "wetness",
        knobs: &[WETNESS_IDENTITY],
    },
    StageDescriptor {
        order: 5,
        name: "bandwidth_expansion",
        knobs: &[BANDWIDTH_EXPANSION_IDENTITY],
    },
    StageDescriptor {
        order: 6,
        name: "growl_subharmonic",
        knobs: &[GROWL_HARMONICS_IDENTITY],
    },
    StageDescriptor {
        order: 7,
        name: "whisper",
        knobs: &[WHISPER_IDENTITY],
    },
];

/// One transform in the aberration chain.
pub trait AberrationStage: Send + Sync + fmt::Debug {
    /// The stage's row in [`STAGE_TABLE`].
    fn descriptor(&self) -> &'static StageDescriptor;

    /// Current knob values, in the order of the descriptor's `knobs`.
    fn knob_values(&self) -> Vec<f64>;

    /// Returns true if the stage would leave its input unchanged.
    fn is_identity(&self) -> bool {
        self.descriptor().is_identity_at(&self.knob_values())
    }

    /// Transforms `input`, drawing any randomness from `rng`.
    ///
    /// Output has the same length as the input.
    fn process(&self, input: &[f64], sample_rate: f64, rng: &mut Pcg32) -> Vec<f64>;

    /// Like [`process`](Self::process), but copies the input unchanged when
    /// the stage is at its identity value.
    fn apply(&self, input: &[f64], sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        if self.is_identity() {
            input.to_vec()
        } else {
            self.process(input, sample_rate, rng)
        }
    }
}
