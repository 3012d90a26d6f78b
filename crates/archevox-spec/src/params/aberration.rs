//! Anchor aberration knobs.

use serde::{Deserialize, Serialize};

/// Range of knob values at which a stage leaves the signal untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdentityRule {
    /// Identity while `|value - center| < tolerance`.
    Near {
        /// The neutral value.
        center: f64,
        /// Half-width of the neutral band.
        tolerance: f64,
    },
    /// Identity while `value <= threshold`.
    AtMost(f64),
}

impl IdentityRule {
    /// Returns true if `value` falls inside the neutral range.
    pub fn holds(self, value: f64) -> bool {
        match self {
            IdentityRule::Near { center, tolerance } => (value - center).abs() < tolerance,
            IdentityRule::AtMost(threshold) => value <= threshold,
        }
    }
}

/// A named aberration knob and its neutral range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobIdentity {
    /// Field name in [`AberrationParameters`].
    pub knob: &'static str,
    /// Values for which the knob has no effect.
    pub rule: IdentityRule,
}

impl KnobIdentity {
    const fn amount(knob: &'static str) -> Self {
        Self {
            knob,
            rule: IdentityRule::AtMost(0.0),
        }
    }
}

/// Shifts under 1 Hz are treated as no shift.
pub const FORMANT_SHIFT_IDENTITY: KnobIdentity = KnobIdentity {
    knob: "formant_shift_hz",
    rule: IdentityRule::Near {
        center: 0.0,
        tolerance: 1.0,
    },
};

/// Scales within 1% of unity are treated as unscaled.
pub const FORMANT_SCALE_IDENTITY: KnobIdentity = KnobIdentity {
    knob: "formant_scale",
    rule: IdentityRule::Near {
        center: 1.0,
        tolerance: 0.01,
    },
};

pub const BREATHINESS_IDENTITY: KnobIdentity = KnobIdentity::amount("breathiness");
pub const ROUGHNESS_IDENTITY: KnobIdentity = KnobIdentity::amount("roughness");
pub const HOLLOW_RESONANCE_IDENTITY: KnobIdentity = KnobIdentity::amount("hollow_resonance");
pub const WETNESS_IDENTITY: KnobIdentity = KnobIdentity::amount("wetness");

/// Only expansion above 1.0 adds noise.
pub const BANDWIDTH_EXPANSION_IDENTITY: KnobIdentity = KnobIdentity {
    knob: "bandwidth_expansion",
    rule: IdentityRule::AtMost(1.0),
};

pub const GROWL_HARMONICS_IDENTITY: KnobIdentity = KnobIdentity::amount("growl_harmonics");
pub const WHISPER_IDENTITY: KnobIdentity = KnobIdentity::amount("whisper");

/// One archetype's DSP fingerprint for the anchor aberration chain.
///
/// Every knob defaults to the value at which its stage is a no-op: 0 for
/// additive effects and 1.0 for scale effects. Fields omitted from JSON take
/// those defaults, so a spec only lists the stages it enables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AberrationParameters {
    /// Formant shift in Hz; sign selects the spectral tilt direction.
    #[serde(default)]
    pub formant_shift_hz: f64,
    /// Formant scale factor.
    #[serde(default = "unity")]
    pub formant_scale: f64,
    /// Added aspiration noise.
    #[serde(default)]
    pub breathiness: f64,
    /// Slow amplitude jitter plus grit noise.
    #[serde(default)]
    pub roughness: f64,
    /// Comb-filter cavity resonance.
    #[serde(default)]
    pub hollow_resonance: f64,
    /// Gurgling amplitude wobble with impulsive pops.
    #[serde(default)]
    pub wetness: f64,
    /// Bandwidth expansion factor; only values above 1.0 have an effect.
    #[serde(default = "unity")]
    pub bandwidth_expansion: f64,
    /// Octave-down subharmonic growl.
    #[serde(default)]
    pub growl_harmonics: f64,
    /// Blend towards an unvoiced whisper.
    #[serde(default)]
    pub whisper: f64,
}

fn unity() -> f64 {
    1.0
}

impl Default for AberrationParameters {
    fn default() -> Self {
        Self {
            formant_shift_hz: 0.0,
            formant_scale: 1.0,
            breathiness: 0.0,
            roughness: 0.0,
            hollow_resonance: 0.0,
            wetness: 0.0,
            bandwidth_expansion: 1.0,
            growl_harmonics: 0.0,
            whisper: 0.0,
        }
    }
}

impl AberrationParameters {
    /// Parameters with every stage disabled.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Every knob paired with its current value, in field order.
    pub fn knobs(&self) -> [(KnobIdentity, f64); 9] {
        [
            (FORMANT_SHIFT_IDENTITY, self.formant_shift_hz),
            (FORMANT_SCALE_IDENTITY, self.formant_scale),
            (BREATHINESS_IDENTITY, self.breathiness),
            (ROUGHNESS_IDENTITY, self.roughness),
            (HOLLOW_RESONANCE_IDENTITY, self.hollow_resonance),
            (WETNESS_IDENTITY, self.wetness),
            (BANDWIDTH_EXPANSION_IDENTITY, self.bandwidth_expansion),
            (GROWL_HARMONICS_IDENTITY, self.growl_harmonics),
            (WHISPER_IDENTITY, self.whisper),
        ]
    }

    /// Returns true if every knob is inside its neutral range, so the
    /// aberration chain would pass the anchor through unchanged.
    pub fn is_identity(&self) -> bool {
        self.knobs()
            .iter()
            .all(|(identity, value)| identity.rule.holds(*value))
    }

    /// Sets the growl amount.
    pub fn with_growl(mut self, amount: f64) -> Self {
        self.growl_harmonics = amount;
        self
    }

    /// Sets the whisper blend.
    pub fn with_whisper(mut self, amount: f64) -> Self {
        self.whisper = amount;
        self
    }

    /// Sets the breathiness amount.
    pub fn with_breathiness(mut self, amount: f64) -> Self {
        self.breathiness = amount;
        self
    }

    /// Sets the formant shift in Hz.
    pub fn with_formant_shift(mut self, shift_hz: f64) -> Self {
        self.formant_shift_hz = shift_hz;
        self
    }
}
