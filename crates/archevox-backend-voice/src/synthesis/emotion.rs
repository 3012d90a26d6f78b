//! Affect-driven parameter modulation.
//!
//! Each affect dimension is centered at 0.5, where it leaves the voice
//! unchanged:
//!
//! - arousal raises F0 by up to 30% and tenseness by up to 20%
//! - dominance raises tenseness by up to 15%
//! - valence raises F1 by up to 10%
//!
//! Low values lower the same quantities by the same proportions.

use archevox_spec::VocalTractParameters;

/// Multiplicative factors applied by [`EmotionParameterMapper::modulate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectFactors {
    /// Applied to F0 and to every pitch contour sample.
    pub f0: f64,
    /// Applied to tenseness.
    pub tenseness: f64,
    /// Applied to the first formant frequency.
    pub f1: f64,
}

impl AffectFactors {
    /// Factors for the given arousal, valence and dominance.
    pub fn new(arousal: f64, valence: f64, dominance: f64) -> Self {
        let centered = |x: f64| 2.0 * x - 1.0;
        Self {
            f0: 1.0 + 0.3 * centered(arousal),
            tenseness: (1.0 + 0.2 * centered(arousal)) * (1.0 + 0.15 * centered(dominance)),
            f1: 1.0 + 0.1 * centered(valence),
        }
    }
}

/// Maps affect coordinates onto source-filter parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmotionParameterMapper;

impl EmotionParameterMapper {
    /// Returns a copy of `params` with F0, tenseness and F1 scaled.
    ///
    /// Everything else, including the stored affect coordinates, is copied
    /// unchanged.
    pub fn modulate(
        params: &VocalTractParameters,
        arousal: f64,
        valence: f64,
        dominance: f64,
    ) -> VocalTractParameters {
        let factors = AffectFactors::new(arousal, valence, dominance);
        let mut out = params.clone();
        out.f0 *= factors.f0;
        out.tenseness *= factors.tenseness;
        out.formants[0].frequency_hz *= factors.f1;
        out
    }

    /// Modulates `params` with its own affect coordinates.
    pub fn modulate_self(params: &VocalTractParameters) -> VocalTractParameters {
        Self::modulate(params, params.arousal, params.valence, params.dominance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_affect_is_identity() {
        let params = VocalTractParameters::default();
        assert_eq!(EmotionParameterMapper::modulate(&params, 0.5, 0.5, 0.5), params);
    }

    #[test]
    fn test_high_arousal() {
        let params = VocalTractParameters::default();
        let out = EmotionParameterMapper::modulate(&params, 1.0, 0.5, 0.5);
        assert!((out.f0 - 156.0).abs() < 1e-9);
        assert!((out.tenseness - 0.6).abs() < 1e-12);
        assert_eq!(out.formants, params.formants);
    }

    #[test]
    fn test_low_valence_lowers_f1_only() {
        let params = VocalTractParameters::default();
        let out = EmotionParameterMapper::modulate(&params, 0.5, 0.0, 0.5);
        assert!((out.formants[0].frequency_hz - 720.0).abs() < 1e-9);
        assert_eq!(out.formants[1..], params.formants[1..]);
        assert_eq!(out.f0, params.f0);
    }

    #[test]
    fn test_dominance_compounds_with_arousal() {
        let factors = AffectFactors::new(1.0, 0.5, 1.0);
        assert!((factors.tenseness - 1.2 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_modulate_self_uses_stored_affect() {
        let params = VocalTractParameters::default().with_affect(0.0, 1.0, 0.5);
        let out = EmotionParameterMapper::modulate_self(&params);
        assert!((out.f0 - 84.0).abs() < 1e-9);
        assert!((out.formants[0].frequency_hz - 880.0).abs() < 1e-9);
        assert_eq!(out.arousal, 0.0);
    }
}
