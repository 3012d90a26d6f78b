//! The individual aberration stages.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;

use super::{AberrationStage, StageDescriptor, STAGE_TABLE};
use crate::filter::{highpass_2nd, lowpass_2nd, lowpass_4th};
use crate::synthesis::noise::white;

/// Block length of the growl stage's half-speed copy (seconds).
pub const GROWL_BLOCK_SECONDS: f64 = 0.04;

const FORMANT_SHIFT_UP_CUTOFF_HZ: f64 = 1000.0;
const FORMANT_SHIFT_DOWN_CUTOFF_HZ: f64 = 2000.0;
const FORMANT_SHIFT_GAIN: f64 = 1.2;

const BREATH_CUTOFF_HZ: f64 = 4000.0;
const BREATH_GAIN: f64 = 0.15;

const ROUGHNESS_RATE_HZ: f64 = 8.0;
const ROUGHNESS_DEPTH: f64 = 0.15;
const ROUGHNESS_NOISE: f64 = 0.05;

const HOLLOW_DELAY_SECONDS: f64 = 0.015;
const HOLLOW_FEEDBACK: f64 = 0.3;

const WET_RATE_HZ: f64 = 12.0;
const WET_DEPTH: f64 = 0.2;
const WET_POP_PROBABILITY: f64 = 0.001;
const WET_POP_LEVEL: f64 = 0.3;

const BANDWIDTH_NOISE: f64 = 0.1;

const GROWL_GAIN: f64 = 0.4;

const WHISPER_HIGHPASS_HZ: f64 = 500.0;
const WHISPER_HIGHPASS_GAIN: f64 = 0.5;
const WHISPER_NOISE_CUTOFF_HZ: f64 = 3000.0;

/// Multiplies by `1 + sin(2 pi rate t) * depth`.
fn tremolo(input: &[f64], rate_hz: f64, depth: f64, sample_rate: f64) -> Vec<f64> {
    input
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let t = i as f64 / sample_rate;
            x * (1.0 + (2.0 * PI * rate_hz * t).sin() * depth)
        })
        .collect()
}

/// Spectral tilt standing in for a formant shift.
///
/// A positive shift (or a scale above 1) is rendered as a lowpass at 1 kHz, a
/// negative one as a highpass at 2 kHz; both are gained by 1.2. The shift
/// sign wins when it is at least 1 Hz in magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormantShift {
    /// Shift in Hz.
    pub shift_hz: f64,
    /// Multiplicative formant scale.
    pub scale: f64,
}

impl FormantShift {
    fn direction(&self) -> f64 {
        if self.shift_hz.abs() >= 1.0 {
            self.shift_hz.signum()
        } else {
            (self.scale - 1.0).signum()
        }
    }
}

impl AberrationStage for FormantShift {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[0]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.shift_hz, self.scale]
    }

    fn process(&self, input: &[f64], sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let filtered = if self.direction() > 0.0 {
            lowpass_2nd(input, FORMANT_SHIFT_UP_CUTOFF_HZ, sample_rate)
        } else {
            highpass_2nd(input, FORMANT_SHIFT_DOWN_CUTOFF_HZ, sample_rate)
        };
        filtered.into_iter().map(|s| s * FORMANT_SHIFT_GAIN).collect()
    }
}

/// Adds breath noise lowpassed at 4 kHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathiness {
    /// Amount in [0, 1].
    pub amount: f64,
}

impl AberrationStage for Breathiness {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[1]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.amount]
    }

    fn process(&self, input: &[f64], sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let noise = lowpass_4th(&white(input.len(), rng), BREATH_CUTOFF_HZ, sample_rate);
        let gain = self.amount * BREATH_GAIN;
        input
            .iter()
            .zip(noise)
            .map(|(&x, n)| x + n * gain)
            .collect()
    }
}

/// 8 Hz amplitude flutter plus a little broadband noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roughness {
    /// Amount in [0, 1].
    pub amount: f64,
}

impl AberrationStage for Roughness {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[2]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.amount]
    }

    fn process(&self, input: &[f64], sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let modulated = tremolo(
            input,
            ROUGHNESS_RATE_HZ,
            self.amount * ROUGHNESS_DEPTH,
            sample_rate,
        );
        let noise = white(input.len(), rng);
        let gain = self.amount * ROUGHNESS_NOISE;
        modulated
            .into_iter()
            .zip(noise)
            .map(|(x, n)| x + n * gain)
            .collect()
    }
}

/// Feedback comb with a 15 ms delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HollowResonance {
    /// Amount in [0, 1]; feedback is `0.3 * amount`.
    pub amount: f64,
}

impl AberrationStage for HollowResonance {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[3]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.amount]
    }

    fn process(&self, input: &[f64], sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let delay = ((HOLLOW_DELAY_SECONDS * sample_rate).round() as usize).max(1);
        let feedback = HOLLOW_FEEDBACK * self.amount;
        let mut output = Vec::with_capacity(input.len());
        for (i, &x) in input.iter().enumerate() {
            let echo = if i >= delay { output[i - delay] * feedback } else { 0.0 };
            output.push(x + echo);
        }
        output
    }
}

/// 12 Hz wobble with sparse positive pops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wetness {
    /// Amount in [0, 1].
    pub amount: f64,
}

impl AberrationStage for Wetness {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[4]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.amount]
    }

    fn process(&self, input: &[f64], sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let probability = self.amount * WET_POP_PROBABILITY;
        tremolo(input, WET_RATE_HZ, self.amount * WET_DEPTH, sample_rate)
            .into_iter()
            .map(|x| {
                if rng.gen::<f64>() < probability {
                    x + WET_POP_LEVEL
                } else {
                    x
                }
            })
            .collect()
    }
}

/// Broadband noise proportional to how far the expansion exceeds 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthExpansion {
    /// Expansion factor; values at or below 1 disable the stage.
    pub expansion: f64,
}

impl AberrationStage for BandwidthExpansion {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[5]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.expansion]
    }

    fn process(&self, input: &[f64], _sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let gain = (self.expansion - 1.0) * BANDWIDTH_NOISE;
        let noise = white(input.len(), rng);
        input
            .iter()
            .zip(noise)
            .map(|(&x, n)| x + n * gain)
            .collect()
    }
}

/// Octave-down copy mixed under the input.
///
/// The signal is cut into 40 ms blocks. Each block is replaced by its first
/// half played at half speed (every sample repeated twice), which halves
/// every frequency inside the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowlSubharmonic {
    /// Amount in [0, 1].
    pub amount: f64,
}

impl GrowlSubharmonic {
    /// The half-speed copy alone, before mixing.
    pub fn subharmonic(input: &[f64], sample_rate: f64) -> Vec<f64> {
        let block = ((GROWL_BLOCK_SECONDS * sample_rate).round() as usize).max(2);
        let mut sub = Vec::with_capacity(input.len());
        for start in (0..input.len()).step_by(block) {
            let end = (start + block).min(input.len());
            sub.extend((0..end - start).map(|j| input[start + j / 2]));
        }
        sub
    }
}

impl AberrationStage for GrowlSubharmonic {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[6]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.amount]
    }

    fn process(&self, input: &[f64], sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let gain = self.amount * GROWL_GAIN;
        input
            .iter()
            .zip(Self::subharmonic(input, sample_rate))
            .map(|(&x, s)| x + s * gain)
            .collect()
    }
}

/// Crossfade toward a thinned, noisy version of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhisperBlend {
    /// Crossfade amount in [0, 1].
    pub amount: f64,
}

impl AberrationStage for WhisperBlend {
    fn descriptor(&self) -> &'static StageDescriptor {
        &STAGE_TABLE[7]
    }

    fn knob_values(&self) -> Vec<f64> {
        vec![self.amount]
    }

    fn process(&self, input: &[f64], sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let thinned = highpass_2nd(input, WHISPER_HIGHPASS_HZ, sample_rate);
        let noise = lowpass_4th(
            &white(input.len(), rng),
            WHISPER_NOISE_CUTOFF_HZ,
            sample_rate,
        );
        let a = self.amount;
        input
            .iter()
            .zip(thinned.iter().zip(noise))
            .map(|(&x, (&h, n))| x * (1.0 - a) + (h * WHISPER_HIGHPASS_GAIN + n) * a)
            .collect()
    }
}
