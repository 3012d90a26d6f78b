//! End-to-end generation tests for Archevox.
//!
//! Specs are written to disk as JSON, rendered through the CLI command layer
//! and the WAV output is decoded again with `hound`.
//!
//! ```bash
//! cargo test -p archevox-tests --test e2e_generation
//! ```

use std::fs;
use std::process::ExitCode;

use archevox_backend_voice::analysis::Spectrum;
use archevox_cli::commands::{analyze, generate, validate};
use archevox_spec::{AberrationParameters, VocalTractParameters, VoiceSpec};
use archevox_tests::fixtures::read_pcm16;
use archevox_tests::VoiceFixture;
use pretty_assertions::assert_eq;

fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()))
}

// ============================================================================
// Source-filter path
// ============================================================================

#[test]
fn test_source_filter_spec_renders_wav() {
    let fixture = VoiceFixture::new();
    let spec = VoiceSpec::source_filter("cave-troll-01", 7, 1.0, VocalTractParameters::default());
    let spec_path = fixture.add_spec("troll", &spec);
    let out = fixture.out("troll.wav");

    let code = generate::run(
        &spec_path.to_string_lossy(),
        &out.to_string_lossy(),
        None,
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (samples, wav_spec) = read_pcm16(&out);
    assert_eq!(wav_spec.channels, 1);
    assert_eq!(wav_spec.sample_rate, 48000);
    assert_eq!(wav_spec.bits_per_sample, 16);
    assert_eq!(samples.len(), 48000);
    assert!(peak(&samples) <= 0.8);
    assert!(peak(&samples) > 0.7);
}

#[test]
fn test_raw_json_spec_with_contour() {
    let fixture = VoiceFixture::new();
    let spec_path = fixture.add_spec_json(
        "wisp",
        r#"{
            "voice_id": "marsh-wisp",
            "seed": 21,
            "sample_rate": 22050,
            "description": "thin rising wail",
            "recipe": {
                "kind": "source_filter",
                "duration_seconds": 0.4,
                "vocal_tract": {
                    "f0": 300.0,
                    "open_quotient": 0.5,
                    "speed_quotient": 2.0,
                    "tenseness": 0.3,
                    "breathiness": 0.4,
                    "formants": [
                        { "frequency_hz": 500.0, "bandwidth_hz": 60.0 },
                        { "frequency_hz": 1500.0, "bandwidth_hz": 90.0 },
                        { "frequency_hz": 2600.0, "bandwidth_hz": 140.0 },
                        { "frequency_hz": 3600.0, "bandwidth_hz": 200.0 }
                    ],
                    "arousal": 0.8,
                    "valence": 0.2
                },
                "pitch_contour": [280.0, 320.0, 380.0, 450.0]
            }
        }"#,
    );
    let out = fixture.out("wisp.wav");

    let code = generate::run(
        &spec_path.to_string_lossy(),
        &out.to_string_lossy(),
        None,
        false,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (samples, wav_spec) = read_pcm16(&out);
    assert_eq!(wav_spec.sample_rate, 22050);
    assert_eq!(samples.len(), (0.4f64 * 22050.0).round() as usize);
    assert!(samples.iter().any(|s| *s != 0.0));
}

// ============================================================================
// Anchor aberration path
// ============================================================================

#[test]
fn test_anchor_spec_resamples_and_bounds_peak() {
    let fixture = VoiceFixture::new();
    let anchor = fixture.add_sine_anchor("greeting", 220.0, 96000, 0.5, 2);
    let spec = VoiceSpec::anchor_aberration(
        "drowned-sailor",
        5,
        anchor,
        AberrationParameters {
            wetness: 0.7,
            hollow_resonance: 0.5,
            growl_harmonics: 0.4,
            ..AberrationParameters::identity()
        },
    );
    let spec_path = fixture.add_spec("sailor", &spec);
    let out = fixture.out("sailor.wav");

    let code = generate::run(
        &spec_path.to_string_lossy(),
        &out.to_string_lossy(),
        None,
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (samples, wav_spec) = read_pcm16(&out);
    assert_eq!(wav_spec.sample_rate, 48000);
    assert!((samples.len() as i64 - 24000).abs() <= 1);
    assert!(peak(&samples) <= 0.85);
}

#[test]
fn test_growl_spec_adds_subharmonic() {
    let fixture = VoiceFixture::new();
    let anchor = fixture.add_sine_anchor("tone", 1000.0, 48000, 1.0, 1);

    let render = |name: &str, aberration: AberrationParameters| {
        let spec = VoiceSpec::anchor_aberration("growl-test", 1, anchor.clone(), aberration);
        let spec_path = fixture.add_spec(name, &spec);
        let out = fixture.out(&format!("{}.wav", name));
        generate::run(
            &spec_path.to_string_lossy(),
            &out.to_string_lossy(),
            None,
            true,
        )
        .unwrap();
        let (samples, _) = read_pcm16(&out);
        samples.into_iter().map(|s| s as f32).collect::<Vec<f32>>()
    };

    let dry = Spectrum::compute(&render("dry", AberrationParameters::identity()), 48000);
    let growl = Spectrum::compute(
        &render("growl", AberrationParameters::identity().with_growl(1.0)),
        48000,
    );

    assert!(growl.band_energy(480.0, 520.0) > 100.0 * dry.band_energy(480.0, 520.0));
    assert!(growl.band_energy(980.0, 1020.0) > growl.band_energy(480.0, 520.0));
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_invalid_specs_fail_validation() {
    let fixture = VoiceFixture::new();

    let bad_id = fixture.add_spec(
        "bad-id",
        &VoiceSpec::source_filter("X", 1, 1.0, VocalTractParameters::default()),
    );
    assert_eq!(
        validate::run(&bad_id.to_string_lossy(), true).unwrap(),
        ExitCode::from(1)
    );

    let unknown_field = fixture.add_spec_json(
        "unknown",
        r#"{ "voice_id": "ghoul", "seed": 1, "volume": 3,
             "recipe": { "kind": "anchor_aberration", "anchor_path": "a.wav" } }"#,
    );
    assert_eq!(
        validate::run(&unknown_field.to_string_lossy(), true).unwrap(),
        ExitCode::from(1)
    );

    let nyquist = fixture.add_spec_json(
        "nyquist",
        r#"{ "voice_id": "shrieker", "seed": 1, "sample_rate": 8000,
             "recipe": { "kind": "source_filter", "duration_seconds": 0.2,
               "vocal_tract": { "f0": 120.0, "open_quotient": 0.7,
                 "speed_quotient": 1.0, "tenseness": 0.5,
                 "formants": [
                   { "frequency_hz": 800.0, "bandwidth_hz": 80.0 },
                   { "frequency_hz": 1200.0, "bandwidth_hz": 90.0 },
                   { "frequency_hz": 2500.0, "bandwidth_hz": 120.0 },
                   { "frequency_hz": 4000.0, "bandwidth_hz": 130.0 } ] } } }"#,
    );
    let out = fixture.out("nyquist.wav");
    assert_eq!(
        generate::run(&nyquist.to_string_lossy(), &out.to_string_lossy(), None, true).unwrap(),
        ExitCode::from(1)
    );
    assert!(!out.exists());
}

#[test]
fn test_unsupported_anchor_format() {
    let fixture = VoiceFixture::new();
    fs::write(fixture.path().join("anchors/fake.wav"), b"RIFF....WAVEjunk").unwrap();
    let spec = VoiceSpec::anchor_aberration(
        "fake-anchor",
        1,
        "anchors/fake.wav",
        AberrationParameters::identity().with_whisper(0.5),
    );
    let spec_path = fixture.add_spec("fake", &spec);
    let out = fixture.out("fake.wav");

    assert!(generate::run(
        &spec_path.to_string_lossy(),
        &out.to_string_lossy(),
        None,
        false
    )
    .is_err());
}

// ============================================================================
// Analyze round trip
// ============================================================================

#[test]
fn test_analyze_rendered_voice() {
    let fixture = VoiceFixture::new();
    let params = VocalTractParameters {
        f0: 150.0,
        ..Default::default()
    };
    let spec = VoiceSpec::source_filter("choir-shade", 3, 0.5, params);
    let spec_path = fixture.add_spec("shade", &spec);
    let out = fixture.out("shade.wav");

    generate::run(
        &spec_path.to_string_lossy(),
        &out.to_string_lossy(),
        None,
        true,
    )
    .unwrap();
    assert_eq!(
        analyze::run(&out.to_string_lossy(), true).unwrap(),
        ExitCode::SUCCESS
    );
}
