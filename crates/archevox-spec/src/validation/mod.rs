//! Voice spec validation logic.
//!
//! Validation never mutates its input. Hard violations become coded errors;
//! physically odd but renderable inputs (crossed formants, an open quotient
//! shorter than the excitation instant) become warnings, because the backend
//! degrades gracefully on them.

pub mod common;

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::params::{
    AberrationParameters, PitchContour, VocalTractParameters, DEFAULT_EXCITATION_RATIO,
};
use crate::spec::{VoiceRecipe, VoiceSpec, MAX_DURATION_SECONDS};

use common::{
    validate_below_nyquist, validate_open_unit_interval, validate_positive, validate_range,
    validate_unit_interval, CommonValidationError,
};

/// Format: starts with a lowercase letter, followed by 2-63 lowercase letters,
/// digits, underscores, or hyphens.
const VOICE_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]{2,63}$";

/// Lowest sample rate the resonator cascade is tuned for.
const MIN_SAMPLE_RATE: u32 = 8_000;

/// Highest accepted sample rate.
const MAX_SAMPLE_RATE: u32 = 192_000;

/// Upper bound for the formant scale knob.
const MAX_FORMANT_SCALE: f64 = 4.0;

static VOICE_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn voice_id_regex() -> &'static Regex {
    VOICE_ID_REGEX.get_or_init(|| Regex::new(VOICE_ID_PATTERN).expect("invalid regex pattern"))
}

/// Checks whether a voice id matches the documented pattern.
pub fn is_valid_voice_id(voice_id: &str) -> bool {
    voice_id_regex().is_match(voice_id)
}

fn push_error(
    result: &mut ValidationResult,
    code: ErrorCode,
    check: Result<(), CommonValidationError>,
    path: &str,
) {
    if let Err(err) = check {
        result.add_error(ValidationError::with_path(code, err.message, path));
    }
}

/// Validates a complete voice spec.
///
/// # Example
/// ```
/// use archevox_spec::{VoiceSpec, VocalTractParameters, validate_voice_spec};
///
/// let spec = VoiceSpec::source_filter("bog-hag-01", 9, 1.0, VocalTractParameters::default());
/// assert!(validate_voice_spec(&spec).is_ok());
/// ```
pub fn validate_voice_spec(spec: &VoiceSpec) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_valid_voice_id(&spec.voice_id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidVoiceId,
            format!(
                "voice_id must match pattern '{}', got '{}'",
                VOICE_ID_PATTERN, spec.voice_id
            ),
            "voice_id",
        ));
    }

    let sample_rate = spec.sample_rate();
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            format!(
                "sample_rate must be in [{}, {}], got {}",
                MIN_SAMPLE_RATE, MAX_SAMPLE_RATE, sample_rate
            ),
            "sample_rate",
        ));
        // Nyquist checks below are meaningless without a usable rate.
        return result;
    }

    match &spec.recipe {
        VoiceRecipe::SourceFilter {
            duration_seconds,
            vocal_tract,
            pitch_contour,
            ..
        } => {
            push_error(
                &mut result,
                ErrorCode::InvalidDuration,
                validate_positive("duration_seconds", *duration_seconds).and_then(|()| {
                    validate_range(
                        "duration_seconds",
                        *duration_seconds,
                        0.0,
                        MAX_DURATION_SECONDS,
                    )
                }),
                "recipe.duration_seconds",
            );
            result.merge(validate_vocal_tract(
                vocal_tract,
                sample_rate,
                "recipe.vocal_tract",
            ));
            if let Some(contour) = pitch_contour {
                result.merge(validate_pitch_contour(
                    contour,
                    sample_rate,
                    "recipe.pitch_contour",
                ));
            }
        }
        VoiceRecipe::AnchorAberration {
            anchor_path,
            aberration,
        } => {
            if anchor_path.trim().is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::MissingAnchorPath,
                    "anchor_path must not be empty",
                    "recipe.anchor_path",
                ));
            }
            result.merge(validate_aberration_params(aberration, "recipe.aberration"));
        }
    }

    result
}

/// Validates source-filter parameters against a sample rate.
///
/// `prefix` is prepended to every reported JSON path.
pub fn validate_vocal_tract(
    params: &VocalTractParameters,
    sample_rate: u32,
    prefix: &str,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let path = |field: &str| format!("{}.{}", prefix, field);

    push_error(
        &mut result,
        ErrorCode::InvalidFundamental,
        validate_below_nyquist("f0", params.f0, sample_rate),
        &path("f0"),
    );
    push_error(
        &mut result,
        ErrorCode::ParameterOutOfRange,
        validate_open_unit_interval("open_quotient", params.open_quotient),
        &path("open_quotient"),
    );
    push_error(
        &mut result,
        ErrorCode::ParameterOutOfRange,
        validate_positive("speed_quotient", params.speed_quotient),
        &path("speed_quotient"),
    );
    push_error(
        &mut result,
        ErrorCode::ParameterOutOfRange,
        validate_positive("tract_length_cm", params.tract_length_cm),
        &path("tract_length_cm"),
    );

    let unit_fields = [
        ("tenseness", params.tenseness),
        ("breathiness", params.breathiness),
        ("arousal", params.arousal),
        ("valence", params.valence),
        ("dominance", params.dominance),
    ];
    for (name, value) in unit_fields {
        push_error(
            &mut result,
            ErrorCode::ParameterOutOfRange,
            validate_unit_interval(name, value),
            &path(name),
        );
    }

    for (i, formant) in params.formants.iter().enumerate() {
        let name = format!("F{}", i + 1);
        push_error(
            &mut result,
            ErrorCode::InvalidFormant,
            validate_below_nyquist(
                &format!("{} frequency_hz", name),
                formant.frequency_hz,
                sample_rate,
            ),
            &path(&format!("formants[{}].frequency_hz", i)),
        );
        push_error(
            &mut result,
            ErrorCode::InvalidFormant,
            validate_below_nyquist(
                &format!("{} bandwidth_hz", name),
                formant.bandwidth_hz,
                sample_rate,
            ),
            &path(&format!("formants[{}].bandwidth_hz", i)),
        );
    }

    if !params.formants_ascending() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::FormantOrder,
            format!(
                "formants are expected to ascend (F1 < F2 < F3 < F4), got {:?}",
                params.formant_frequencies()
            ),
            path("formants"),
        ));
    }

    if params.open_quotient.is_finite() && params.open_quotient <= DEFAULT_EXCITATION_RATIO {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ReturnPhaseSkipped,
            format!(
                "open_quotient {} does not exceed the excitation ratio {}; the glottal \
                 return phase will be skipped",
                params.open_quotient, DEFAULT_EXCITATION_RATIO
            ),
            path("open_quotient"),
        ));
    }

    result
}

/// Validates a pitch contour against a sample rate.
pub fn validate_pitch_contour(
    contour: &PitchContour,
    sample_rate: u32,
    prefix: &str,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    if contour.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyPitchContour,
            "pitch_contour is empty; the constant f0 will be used",
            prefix,
        ));
        return result;
    }

    for (i, &f0) in contour.samples().iter().enumerate() {
        push_error(
            &mut result,
            ErrorCode::InvalidPitchContour,
            validate_below_nyquist("pitch contour f0", f0, sample_rate),
            &format!("{}[{}]", prefix, i),
        );
    }

    result
}

/// Validates aberration knobs.
pub fn validate_aberration_params(params: &AberrationParameters, prefix: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let path = |field: &str| format!("{}.{}", prefix, field);

    let amounts = [
        ("breathiness", params.breathiness),
        ("roughness", params.roughness),
        ("hollow_resonance", params.hollow_resonance),
        ("wetness", params.wetness),
        ("growl_harmonics", params.growl_harmonics),
        ("whisper", params.whisper),
    ];
    for (name, value) in amounts {
        push_error(
            &mut result,
            ErrorCode::ParameterOutOfRange,
            validate_unit_interval(name, value),
            &path(name),
        );
    }

    push_error(
        &mut result,
        ErrorCode::ParameterOutOfRange,
        validate_range(
            "formant_shift_hz",
            params.formant_shift_hz,
            f64::MIN,
            f64::MAX,
        ),
        &path("formant_shift_hz"),
    );
    push_error(
        &mut result,
        ErrorCode::ParameterOutOfRange,
        validate_range(
            "formant_scale",
            params.formant_scale,
            1.0 / MAX_FORMANT_SCALE,
            MAX_FORMANT_SCALE,
        ),
        &path("formant_scale"),
    );
    push_error(
        &mut result,
        ErrorCode::ParameterOutOfRange,
        validate_positive("bandwidth_expansion", params.bandwidth_expansion),
        &path("bandwidth_expansion"),
    );

    if result.is_ok() && params.is_identity() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::AllStagesIdentity,
            "every aberration stage is disabled; output is the normalized anchor",
            prefix,
        ));
    }

    result
}
