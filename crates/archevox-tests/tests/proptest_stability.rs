//! Property-based stability tests for the voice engine.
//!
//! These cover the numeric guarantees that hold for every valid input:
//! resonators stay finite, outputs respect their peak ceilings, and a fixed
//! seed always reproduces the same samples.
//!
//! ```bash
//! cargo test -p archevox-tests --test proptest_stability
//! ```

use std::f64::consts::PI;

use proptest::prelude::*;

use archevox_backend_voice::{
    AnchorAberrationSynthesizer, AudioBuffer, FormantResonatorBank, SourceFilterSynthesizer,
};
use archevox_spec::{AberrationParameters, Formant, VocalTractParameters};

const SR: u32 = 48000;

fn impulse(len: usize) -> Vec<f64> {
    let mut x = vec![0.0; len];
    x[0] = 1.0;
    x
}

fn formant() -> impl Strategy<Value = Formant> {
    (1.0f64..23_999.0, 1.0f64..5_000.0).prop_map(|(f, bw)| Formant::new(f, bw))
}

fn vocal_tract() -> impl Strategy<Value = VocalTractParameters> {
    (
        60.0f64..400.0,
        0.2f64..=1.0,
        0.5f64..3.0,
        0.0f64..=1.0,
        0.0f64..=1.0,
        (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
    )
        .prop_map(
            |(f0, open_quotient, speed_quotient, tenseness, breathiness, (a, v, d))| {
                VocalTractParameters {
                    f0,
                    open_quotient,
                    speed_quotient,
                    tenseness,
                    breathiness,
                    ..Default::default()
                }
                .with_affect(a, v, d)
            },
        )
}

fn aberration() -> impl Strategy<Value = AberrationParameters> {
    (
        (-400.0f64..400.0, 0.6f64..1.6),
        (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        (0.0f64..=1.0, 0.5f64..3.0),
        (0.0f64..=1.0, 0.0f64..=1.0),
    )
        .prop_map(
            |(
                (formant_shift_hz, formant_scale),
                (breathiness, roughness, hollow_resonance),
                (wetness, bandwidth_expansion),
                (growl_harmonics, whisper),
            )| AberrationParameters {
                formant_shift_hz,
                formant_scale,
                breathiness,
                roughness,
                hollow_resonance,
                wetness,
                bandwidth_expansion,
                growl_harmonics,
                whisper,
            },
        )
}

fn anchor() -> AudioBuffer {
    let samples: Vec<f32> = (0..4800)
        .map(|i| {
            let t = i as f64 / SR as f64;
            (0.4 * (2.0 * PI * 180.0 * t).sin() + 0.2 * (2.0 * PI * 1250.0 * t).sin()) as f32
        })
        .collect();
    AudioBuffer::new(samples, SR)
}

// ============================================================================
// 1. Resonator stability
// ============================================================================

proptest! {
    /// Any bandwidth with a frequency below Nyquist gives a finite response.
    #[test]
    fn single_resonator_is_finite(f in formant()) {
        let bank = FormantResonatorBank::new(SR).unwrap();
        let out = bank.apply_formants(&impulse(2048), &[f]).unwrap();
        prop_assert!(out.iter().all(|s| s.is_finite()));
    }

    /// Cascades of arbitrary (even crossed) formants stay finite.
    #[test]
    fn resonator_cascade_is_finite(
        f1 in formant(),
        f2 in formant(),
        f3 in formant(),
        f4 in formant()
    ) {
        let bank = FormantResonatorBank::new(SR).unwrap();
        let out = bank.apply_formants(&impulse(1024), &[f1, f2, f3, f4]).unwrap();
        prop_assert!(out.iter().all(|s| s.is_finite()));
    }

    /// Frequencies at or above Nyquist are always rejected, never filtered.
    #[test]
    fn resonator_rejects_at_or_above_nyquist(f in 24_000.0f64..96_000.0, bw in 1.0f64..500.0) {
        let bank = FormantResonatorBank::new(SR).unwrap();
        let result = bank.apply_formants(&[1.0], &[Formant::new(f, bw)]);
        prop_assert!(result.is_err());
        prop_assert!(result.unwrap_err().is_invalid_argument());
    }
}

// ============================================================================
// 2. Source-filter path
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Output length, peak ceiling and finiteness hold for every valid tract.
    #[test]
    fn source_filter_output_is_bounded(
        params in vocal_tract(),
        add_noise in any::<bool>(),
        seed in any::<u32>()
    ) {
        let synth = SourceFilterSynthesizer::new(SR).unwrap();
        let out = synth.synthesize(0.1, &params, None, add_noise, seed).unwrap();
        prop_assert_eq!(out.len(), 4800);
        prop_assert!(out.is_finite());
        prop_assert!(out.peak() <= 0.8);
    }

    /// A fixed seed reproduces the same samples.
    #[test]
    fn source_filter_is_deterministic(params in vocal_tract(), seed in any::<u32>()) {
        let synth = SourceFilterSynthesizer::new(SR).unwrap();
        let a = synth.synthesize(0.05, &params, None, true, seed).unwrap();
        let b = synth.synthesize(0.05, &params, None, true, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ============================================================================
// 3. Anchor aberration path
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The full chain never exceeds the anchor ceiling or changes the length.
    #[test]
    fn aberration_output_is_bounded(params in aberration(), seed in any::<u32>()) {
        let synth = AnchorAberrationSynthesizer::new(SR).unwrap();
        let input = anchor();
        let out = synth.synthesize(&input, &params, seed).unwrap();
        prop_assert_eq!(out.len(), input.len());
        prop_assert!(out.is_finite());
        prop_assert!(out.peak() <= 0.85);
    }

    /// A fixed seed reproduces the same samples.
    #[test]
    fn aberration_is_deterministic(params in aberration(), seed in any::<u32>()) {
        let synth = AnchorAberrationSynthesizer::new(SR).unwrap();
        let input = anchor();
        let a = synth.synthesize(&input, &params, seed).unwrap();
        let b = synth.synthesize(&input, &params, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}
