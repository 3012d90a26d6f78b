//! JSON output types for machine-readable CLI output.
//!
//! Every command prints exactly one of these documents when `--json` is set.

use archevox_backend_voice::analysis::AudioStats;
use archevox_backend_voice::VoiceError;
use archevox_spec::error::BackendError;
use archevox_spec::{SpecError, ValidationError, ValidationWarning};
use serde::Serialize;

/// Error codes for CLI operations.
///
/// Validation and backend errors pass their own codes through (`E001`,
/// `VOICE_004`, ...).
pub mod error_codes {
    /// Spec file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Spec JSON did not parse
    pub const JSON_PARSE: &str = "CLI_002";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// JSON path to the offending field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates an error with no path.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// JSON path to the offending field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Converts a spec loading error.
pub fn spec_error_to_json(err: &SpecError) -> JsonError {
    let code = match err {
        SpecError::JsonParse(_) => error_codes::JSON_PARSE,
        _ => error_codes::FILE_READ,
    };
    JsonError::new(code, err.to_string())
}

/// Converts a validation error.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    JsonError {
        code: err.code.to_string(),
        message: err.message.clone(),
        path: err.path.clone(),
    }
}

/// Converts a validation warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Converts a backend error.
pub fn voice_error_to_json(err: &VoiceError) -> JsonError {
    JsonError::new(err.code(), err.message())
}

/// Output of `archevox validate --json`.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    /// Whether the spec is valid
    pub success: bool,
    /// Voice id, when the spec parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    /// Recipe kind, when the spec parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_kind: Option<String>,
    /// BLAKE3 hash of the spec file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// Errors
    pub errors: Vec<JsonError>,
    /// Warnings
    pub warnings: Vec<JsonWarning>,
}

impl ValidateOutput {
    /// Creates a failed output that never got past loading.
    pub fn load_failure(error: JsonError) -> Self {
        Self {
            success: false,
            voice_id: None,
            recipe_kind: None,
            source_hash: None,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

/// Details of a rendered voice.
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    /// Voice id
    pub voice_id: String,
    /// Recipe kind
    pub recipe_kind: String,
    /// Seed actually used
    pub seed: u32,
    /// Written WAV path
    pub output_path: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of samples
    pub num_samples: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Peak absolute sample
    pub peak: f64,
    /// RMS level
    pub rms: f64,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    /// Generation time
    pub duration_ms: u64,
}

/// Output of `archevox generate --json`.
#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    /// Whether rendering succeeded
    pub success: bool,
    /// Result details on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    /// Errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
}

impl GenerateOutput {
    /// Creates a successful output.
    pub fn success(result: GenerateResult, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
            warnings,
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            warnings,
        }
    }
}

/// Output of `archevox analyze --json`.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    /// Whether analysis succeeded
    pub success: bool,
    /// Analyzed file
    pub input: String,
    /// BLAKE3 hash of the file content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_hash: Option<String>,
    /// Metrics on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<AudioStats>,
    /// Errors
    pub errors: Vec<JsonError>,
}
