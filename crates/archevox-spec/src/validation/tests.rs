//! Tests for voice spec validation.

use pretty_assertions::assert_eq;

use super::*;
use crate::params::Formant;

fn codes(result: &ValidationResult) -> Vec<ErrorCode> {
    result.errors.iter().map(|e| e.code).collect()
}

fn warning_codes(result: &ValidationResult) -> Vec<WarningCode> {
    result.warnings.iter().map(|w| w.code).collect()
}

#[test]
fn test_valid_source_filter_spec() {
    let spec = VoiceSpec::source_filter("goblin-01", 42, 1.0, VocalTractParameters::default());
    let result = validate_voice_spec(&spec);
    assert!(result.is_ok(), "{:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_voice_id_pattern() {
    assert!(is_valid_voice_id("cave-troll_02"));
    assert!(!is_valid_voice_id("Troll"));
    assert!(!is_valid_voice_id("ab"));
    assert!(!is_valid_voice_id("9lives"));
}

#[test]
fn test_invalid_voice_id_reported() {
    let spec = VoiceSpec::source_filter("X", 1, 1.0, VocalTractParameters::default());
    let result = validate_voice_spec(&spec);
    assert_eq!(codes(&result), vec![ErrorCode::InvalidVoiceId]);
}

#[test]
fn test_zero_duration_rejected() {
    let spec = VoiceSpec::source_filter("goblin-01", 1, 0.0, VocalTractParameters::default());
    let result = validate_voice_spec(&spec);
    assert_eq!(codes(&result), vec![ErrorCode::InvalidDuration]);
    assert_eq!(
        result.errors[0].path.as_deref(),
        Some("recipe.duration_seconds")
    );
}

#[test]
fn test_overlong_duration_rejected() {
    let spec = VoiceSpec::source_filter("goblin-01", 1, 1.0e14, VocalTractParameters::default());
    let result = validate_voice_spec(&spec);
    assert_eq!(codes(&result), vec![ErrorCode::InvalidDuration]);
    assert!(result.errors[0].message.contains("30"));

    let at_limit = VoiceSpec::source_filter(
        "goblin-01",
        1,
        MAX_DURATION_SECONDS,
        VocalTractParameters::default(),
    );
    assert!(validate_voice_spec(&at_limit).is_ok());
}

#[test]
fn test_sample_rate_out_of_range_short_circuits() {
    let mut spec = VoiceSpec::source_filter("goblin-01", 1, 0.0, VocalTractParameters::default());
    spec.sample_rate = Some(100);
    let result = validate_voice_spec(&spec);
    assert_eq!(codes(&result), vec![ErrorCode::InvalidSampleRate]);
}

#[test]
fn test_negative_f0_rejected() {
    let params = VocalTractParameters {
        f0: -10.0,
        ..Default::default()
    };
    let result = validate_vocal_tract(&params, 48000, "vt");
    assert_eq!(codes(&result), vec![ErrorCode::InvalidFundamental]);
    assert_eq!(result.errors[0].path.as_deref(), Some("vt.f0"));
}

#[test]
fn test_formant_above_nyquist_rejected() {
    let mut params = VocalTractParameters::default();
    params.formants[3] = Formant::new(5000.0, 100.0);
    let result = validate_vocal_tract(&params, 8000, "vt");
    assert_eq!(codes(&result), vec![ErrorCode::InvalidFormant]);
    assert_eq!(
        result.errors[0].path.as_deref(),
        Some("vt.formants[3].frequency_hz")
    );
}

#[test]
fn test_zero_bandwidth_rejected() {
    let mut params = VocalTractParameters::default();
    params.formants[0].bandwidth_hz = 0.0;
    let result = validate_vocal_tract(&params, 48000, "vt");
    assert_eq!(codes(&result), vec![ErrorCode::InvalidFormant]);
}

#[test]
fn test_crossed_formants_warn_only() {
    let mut params = VocalTractParameters::default();
    params.formants[0].frequency_hz = 1500.0;
    let result = validate_vocal_tract(&params, 48000, "vt");
    assert!(result.is_ok());
    assert_eq!(warning_codes(&result), vec![WarningCode::FormantOrder]);
}

#[test]
fn test_short_open_quotient_warns() {
    let params = VocalTractParameters {
        open_quotient: 0.4,
        ..Default::default()
    };
    let result = validate_vocal_tract(&params, 48000, "vt");
    assert!(result.is_ok());
    assert_eq!(warning_codes(&result), vec![WarningCode::ReturnPhaseSkipped]);
}

#[test]
fn test_affect_out_of_range() {
    let params = VocalTractParameters::default().with_affect(1.2, 0.5, -0.1);
    let result = validate_vocal_tract(&params, 48000, "vt");
    assert_eq!(
        codes(&result),
        vec![ErrorCode::ParameterOutOfRange, ErrorCode::ParameterOutOfRange]
    );
}

#[test]
fn test_pitch_contour_validation() {
    let contour = PitchContour::new(vec![120.0, 0.0, 130.0]);
    let result = validate_pitch_contour(&contour, 48000, "pc");
    assert_eq!(codes(&result), vec![ErrorCode::InvalidPitchContour]);
    assert_eq!(result.errors[0].path.as_deref(), Some("pc[1]"));

    let empty = validate_pitch_contour(&PitchContour::default(), 48000, "pc");
    assert!(empty.is_ok());
    assert_eq!(warning_codes(&empty), vec![WarningCode::EmptyPitchContour]);
}

#[test]
fn test_anchor_spec_requires_path() {
    let spec = VoiceSpec::anchor_aberration(
        "wraith-01",
        1,
        "  ",
        AberrationParameters::identity().with_whisper(0.5),
    );
    let result = validate_voice_spec(&spec);
    assert_eq!(codes(&result), vec![ErrorCode::MissingAnchorPath]);
}

#[test]
fn test_identity_aberration_warns() {
    let result = validate_aberration_params(&AberrationParameters::identity(), "ab");
    assert!(result.is_ok());
    assert_eq!(warning_codes(&result), vec![WarningCode::AllStagesIdentity]);
}

#[test]
fn test_sub_hertz_formant_shift_warns() {
    let params = AberrationParameters::identity().with_formant_shift(0.5);
    let result = validate_aberration_params(&params, "ab");
    assert!(result.is_ok());
    assert_eq!(warning_codes(&result), vec![WarningCode::AllStagesIdentity]);
}

#[test]
fn test_aberration_amount_out_of_range() {
    let params = AberrationParameters {
        hollow_resonance: 1.5,
        bandwidth_expansion: 0.0,
        ..Default::default()
    };
    let result = validate_aberration_params(&params, "ab");
    assert_eq!(
        codes(&result),
        vec![ErrorCode::ParameterOutOfRange, ErrorCode::ParameterOutOfRange]
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_non_finite_shift_rejected() {
    let params = AberrationParameters::identity().with_formant_shift(f64::NAN);
    let result = validate_aberration_params(&params, "ab");
    assert_eq!(codes(&result), vec![ErrorCode::ParameterOutOfRange]);
}
