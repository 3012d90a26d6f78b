//! Source-filter vocal tract parameters.

use serde::{Deserialize, Serialize};

/// Number of formants modelled by the resonator cascade (F1-F4).
pub const FORMANT_COUNT: usize = 4;

/// Speed of sound in warm, humid air (cm/s), used for tube-model formants.
pub const SPEED_OF_SOUND_CM_S: f64 = 35_000.0;

/// Glottal excitation instant as a fraction of the pitch period (Te / T0).
pub const DEFAULT_EXCITATION_RATIO: f64 = 0.6;

/// A single vocal tract resonance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formant {
    /// Center frequency in Hz.
    pub frequency_hz: f64,
    /// -3 dB bandwidth in Hz.
    pub bandwidth_hz: f64,
}

impl Formant {
    /// Creates a new formant.
    pub fn new(frequency_hz: f64, bandwidth_hz: f64) -> Self {
        Self {
            frequency_hz,
            bandwidth_hz,
        }
    }
}

/// Physical parameters of a source-filter voice.
///
/// Formants are expected (but not required) to ascend F1 < F2 < F3 < F4.
/// The affect scalars are all in [0, 1] with 0.5 meaning neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocalTractParameters {
    /// Fundamental frequency in Hz.
    pub f0: f64,
    /// Fraction of the pitch period the glottis is open, in (0, 1].
    pub open_quotient: f64,
    /// Asymmetry of the glottal opening, > 0.
    pub speed_quotient: f64,
    /// Source amplitude scale, in [0, 1].
    pub tenseness: f64,
    /// Vocal tract length in centimetres.
    #[serde(default = "default_tract_length_cm")]
    pub tract_length_cm: f64,
    /// Aspiration noise amount, in [0, 1].
    #[serde(default)]
    pub breathiness: f64,
    /// F1-F4 resonances.
    pub formants: [Formant; FORMANT_COUNT],
    /// Emotional arousal, in [0, 1].
    #[serde(default = "default_affect")]
    pub arousal: f64,
    /// Emotional valence, in [0, 1].
    #[serde(default = "default_affect")]
    pub valence: f64,
    /// Emotional dominance, in [0, 1].
    #[serde(default = "default_affect")]
    pub dominance: f64,
}

fn default_tract_length_cm() -> f64 {
    17.5
}

fn default_affect() -> f64 {
    0.5
}

impl Default for VocalTractParameters {
    fn default() -> Self {
        Self {
            f0: 120.0,
            open_quotient: 0.7,
            speed_quotient: 1.0,
            tenseness: 0.5,
            tract_length_cm: default_tract_length_cm(),
            breathiness: 0.0,
            formants: [
                Formant::new(800.0, 80.0),
                Formant::new(1200.0, 90.0),
                Formant::new(2500.0, 120.0),
                Formant::new(3500.0, 130.0),
            ],
            arousal: default_affect(),
            valence: default_affect(),
            dominance: default_affect(),
        }
    }
}

impl VocalTractParameters {
    /// Formant frequencies in F1-F4 order.
    pub fn formant_frequencies(&self) -> [f64; FORMANT_COUNT] {
        self.formants.map(|f| f.frequency_hz)
    }

    /// Returns true when F1 < F2 < F3 < F4.
    pub fn formants_ascending(&self) -> bool {
        self.formants
            .windows(2)
            .all(|pair| pair[0].frequency_hz < pair[1].frequency_hz)
    }

    /// Replaces the formants with a uniform closed-open tube model of the
    /// given length: F_n = (2n - 1) * c / (4 * L).
    ///
    /// Bandwidths widen with formant number, matching typical adult speech.
    pub fn with_tube_formants(mut self, tract_length_cm: f64) -> Self {
        const BANDWIDTHS: [f64; FORMANT_COUNT] = [60.0, 90.0, 120.0, 150.0];

        self.tract_length_cm = tract_length_cm;
        for (n, formant) in self.formants.iter_mut().enumerate() {
            let odd = (2 * n + 1) as f64;
            formant.frequency_hz = odd * SPEED_OF_SOUND_CM_S / (4.0 * tract_length_cm);
            formant.bandwidth_hz = BANDWIDTHS[n];
        }
        self
    }

    /// Sets the affect scalars.
    pub fn with_affect(mut self, arousal: f64, valence: f64, dominance: f64) -> Self {
        self.arousal = arousal;
        self.valence = valence;
        self.dominance = dominance;
        self
    }
}
