//! Tests for the aberration stages and chain.

use std::f64::consts::PI;

use archevox_spec::AberrationParameters;
use pretty_assertions::assert_eq;

use super::*;
use crate::rng::create_component_rng;

const SR: f64 = 48000.0;

fn sine(freq: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 0.5 * (2.0 * PI * freq * i as f64 / SR).sin())
        .collect()
}

fn peak(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()))
}

fn identity_stages() -> Vec<Box<dyn AberrationStage>> {
    vec![
        Box::new(FormantShift {
            shift_hz: 0.5,
            scale: 1.005,
        }),
        Box::new(Breathiness { amount: 0.0 }),
        Box::new(Roughness { amount: 0.0 }),
        Box::new(HollowResonance { amount: 0.0 }),
        Box::new(Wetness { amount: 0.0 }),
        Box::new(BandwidthExpansion { expansion: 1.0 }),
        Box::new(BandwidthExpansion { expansion: 0.5 }),
        Box::new(GrowlSubharmonic { amount: 0.0 }),
        Box::new(WhisperBlend { amount: 0.0 }),
    ]
}

#[test]
fn test_every_stage_is_passthrough_at_identity() {
    let input = sine(440.0, 4800);
    for stage in identity_stages() {
        let mut rng = create_component_rng(1, stage.descriptor().name);
        assert!(stage.is_identity(), "{:?}", stage);
        assert_eq!(stage.apply(&input, SR, &mut rng), input);
    }
}

#[test]
fn test_stage_table_matches_chain_order() {
    let chain = AberrationChain::from_params(&AberrationParameters::identity());
    let names: Vec<&str> = chain.stages().iter().map(|s| s.descriptor().name).collect();
    let table: Vec<&str> = STAGE_TABLE.iter().map(|d| d.name).collect();
    assert_eq!(names, table);
    for (i, d) in STAGE_TABLE.iter().enumerate() {
        assert_eq!(d.order, i);
    }
}

#[test]
fn test_table_knobs_cover_every_parameter() {
    let params = AberrationParameters::identity();
    let table_knobs: Vec<&str> = STAGE_TABLE
        .iter()
        .flat_map(|d| d.knobs.iter().map(|k| k.knob))
        .collect();
    let param_knobs: Vec<&str> = params.knobs().iter().map(|(k, _)| k.knob).collect();
    assert_eq!(table_knobs, param_knobs);
}

#[test]
fn test_stage_identity_follows_descriptor() {
    let shift = FormantShift {
        shift_hz: 0.5,
        scale: 1.0,
    };
    assert!(shift.is_identity());
    assert!(STAGE_TABLE[0].is_identity_at(&[0.5, 1.0]));
    assert!(!STAGE_TABLE[0].is_identity_at(&[1.0, 1.0]));
    assert!(!STAGE_TABLE[0].is_identity_at(&[0.0, 1.02]));

    let chain = AberrationChain::from_params(&AberrationParameters::identity());
    for stage in chain.stages() {
        assert_eq!(stage.knob_values().len(), stage.descriptor().knobs.len());
        assert!(stage.descriptor().is_identity_at(&stage.knob_values()));
    }
}

#[test]
fn test_parameter_identity_agrees_with_chain() {
    let cases = [
        AberrationParameters::identity(),
        AberrationParameters::identity().with_formant_shift(0.5),
        AberrationParameters::identity().with_formant_shift(-3.0),
        AberrationParameters {
            formant_scale: 1.005,
            bandwidth_expansion: 0.6,
            ..Default::default()
        },
        AberrationParameters {
            bandwidth_expansion: 1.2,
            ..Default::default()
        },
        AberrationParameters::identity().with_whisper(0.01),
    ];
    for params in cases {
        let chain = AberrationChain::from_params(&params);
        assert_eq!(
            params.is_identity(),
            chain.enabled_stages().is_empty(),
            "{:?}",
            params
        );
    }
}

#[test]
fn test_identity_chain_is_bit_exact() {
    let input = sine(330.0, 9600);
    let chain = AberrationChain::from_params(&AberrationParameters::identity());
    assert!(chain.enabled_stages().is_empty());
    assert_eq!(chain.process(&input, SR, 77).unwrap(), input);
}

#[test]
fn test_enabled_stages_listed_in_order() {
    let params = AberrationParameters {
        whisper: 0.2,
        growl_harmonics: 0.5,
        formant_scale: 1.3,
        ..Default::default()
    };
    let chain = AberrationChain::from_params(&params);
    assert_eq!(
        chain.enabled_stages(),
        vec!["formant_shift", "growl_subharmonic", "whisper"]
    );
}

#[test]
fn test_chain_is_deterministic() {
    let params = AberrationParameters {
        breathiness: 0.4,
        roughness: 0.3,
        wetness: 0.6,
        bandwidth_expansion: 1.5,
        whisper: 0.2,
        ..Default::default()
    };
    let input = sine(220.0, 4800);
    let chain = AberrationChain::from_params(&params);
    let a = chain.process(&input, SR, 5).unwrap();
    let b = chain.process(&input, SR, 5).unwrap();
    let c = chain.process(&input, SR, 6).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_stage_noise_streams_are_independent() {
    let silence = vec![0.0; 2400];
    let seed = 11;

    let without = AberrationChain::from_params(&AberrationParameters {
        bandwidth_expansion: 2.0,
        ..Default::default()
    })
    .process(&silence, SR, seed)
    .unwrap();
    let with = AberrationChain::from_params(&AberrationParameters {
        breathiness: 0.5,
        bandwidth_expansion: 2.0,
        ..Default::default()
    })
    .process(&silence, SR, seed)
    .unwrap();

    let breath = Breathiness { amount: 0.5 }.process(
        &silence,
        SR,
        &mut create_component_rng(seed, "breathiness"),
    );
    for i in 0..silence.len() {
        assert!((with[i] - without[i] - breath[i]).abs() < 1e-12);
    }
}

#[test]
fn test_formant_shift_direction() {
    let high = sine(8000.0, 4800);
    let low = sine(150.0, 4800);
    let mut rng = create_component_rng(0, "formant_shift");

    let up = FormantShift {
        shift_hz: 200.0,
        scale: 1.0,
    };
    assert!(peak(&up.process(&high, SR, &mut rng)[2400..]) < 0.05);
    assert!((peak(&up.process(&low, SR, &mut rng)[2400..]) - 0.6).abs() < 0.02);

    let down = FormantShift {
        shift_hz: -200.0,
        scale: 1.0,
    };
    assert!(peak(&down.process(&low, SR, &mut rng)[2400..]) < 0.01);

    // A pure scale change picks the branch from the scale
    let scaled_up = FormantShift {
        shift_hz: 0.0,
        scale: 1.5,
    };
    assert_eq!(
        scaled_up.process(&high, SR, &mut rng),
        up.process(&high, SR, &mut rng)
    );
}

#[test]
fn test_hollow_resonance_echoes() {
    let mut impulse = vec![0.0; 2000];
    impulse[0] = 1.0;
    let stage = HollowResonance { amount: 1.0 };
    let out = stage.process(&impulse, SR, &mut create_component_rng(0, "hollow_resonance"));
    assert_eq!(out[0], 1.0);
    assert!((out[720] - 0.3).abs() < 1e-12);
    assert!((out[1440] - 0.09).abs() < 1e-12);
    assert_eq!(out[719], 0.0);
}

#[test]
fn test_wetness_pops_on_silence() {
    let silence = vec![0.0; 48000];
    let out = Wetness { amount: 1.0 }.process(
        &silence,
        SR,
        &mut create_component_rng(3, "wetness"),
    );
    let pops: Vec<f64> = out.into_iter().filter(|&s| s != 0.0).collect();
    assert!(pops.iter().all(|&p| p == 0.3));
    assert!((10..=120).contains(&pops.len()), "{} pops", pops.len());
}

#[test]
fn test_growl_subharmonic_halves_frequency() {
    let input = sine(1000.0, 4800);
    let sub = GrowlSubharmonic::subharmonic(&input, SR);
    assert_eq!(sub.len(), input.len());
    // Blocks of 1920 samples hold a whole number of 500 Hz cycles
    for k in 0..2400 {
        let even = 2 * k;
        let expected = 0.5 * (2.0 * PI * 500.0 * even as f64 / SR).sin();
        assert!((sub[even] - expected).abs() < 1e-9, "sample {}", even);
        assert_eq!(sub[even + 1], sub[even]);
    }
}

#[test]
fn test_growl_mixes_under_input() {
    let input = sine(1000.0, 1920);
    let stage = GrowlSubharmonic { amount: 1.0 };
    let out = stage.process(&input, SR, &mut create_component_rng(0, "growl_subharmonic"));
    let sub = GrowlSubharmonic::subharmonic(&input, SR);
    for i in 0..input.len() {
        assert!((out[i] - (input[i] + 0.4 * sub[i])).abs() < 1e-15);
    }
}

#[test]
fn test_full_whisper_discards_dry_signal() {
    let silence = vec![0.0; 4800];
    let tone = sine(100.0, 4800);
    let stage = WhisperBlend { amount: 1.0 };
    let noise_only = stage.process(&silence, SR, &mut create_component_rng(9, "whisper"));
    let with_tone = stage.process(&tone, SR, &mut create_component_rng(9, "whisper"));
    // 100 Hz sits well under the 500 Hz highpass
    let residual: Vec<f64> = with_tone
        .iter()
        .zip(&noise_only)
        .map(|(a, b)| a - b)
        .collect();
    assert!(peak(&residual[2400..]) < 0.05);
}

#[test]
fn test_bandwidth_expansion_scales_noise() {
    let silence = vec![0.0; 48000];
    let out = BandwidthExpansion { expansion: 3.0 }.process(
        &silence,
        SR,
        &mut create_component_rng(2, "bandwidth_expansion"),
    );
    let rms = (out.iter().map(|s| s * s).sum::<f64>() / out.len() as f64).sqrt();
    assert!((rms - 0.2).abs() < 0.01, "rms {}", rms);
}
