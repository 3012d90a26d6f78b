//! Error types for voice spec validation and processing.

use thiserror::Error;

/// Error codes for voice spec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Invalid voice_id format
    InvalidVoiceId,
    /// E002: Non-positive or non-finite duration
    InvalidDuration,
    /// E003: Sample rate is zero or unusably low
    InvalidSampleRate,
    /// E004: Fundamental frequency out of range
    InvalidFundamental,
    /// E005: Scalar parameter outside its documented interval
    ParameterOutOfRange,
    /// E006: Formant frequency or bandwidth invalid
    InvalidFormant,
    /// E007: Pitch contour contains a non-positive or non-finite sample
    InvalidPitchContour,
    /// E008: Anchor path missing or empty
    MissingAnchorPath,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVoiceId => "E001",
            ErrorCode::InvalidDuration => "E002",
            ErrorCode::InvalidSampleRate => "E003",
            ErrorCode::InvalidFundamental => "E004",
            ErrorCode::ParameterOutOfRange => "E005",
            ErrorCode::InvalidFormant => "E006",
            ErrorCode::InvalidPitchContour => "E007",
            ErrorCode::MissingAnchorPath => "E008",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for voice spec validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Formants are not in ascending F1 < F2 < F3 < F4 order
    FormantOrder,
    /// W002: Open quotient is so short that the glottal return phase is skipped
    ReturnPhaseSkipped,
    /// W003: Every aberration stage is at its identity value
    AllStagesIdentity,
    /// W004: Pitch contour is present but empty
    EmptyPitchContour,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::FormantOrder => "W001",
            WarningCode::ReturnPhaseSkipped => "W002",
            WarningCode::AllStagesIdentity => "W003",
            WarningCode::EmptyPitchContour => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "recipe.vocal_tract.f0").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Spec validation failed with one or more errors.
    #[error("voice spec validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of spec validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merges another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Backend error types implement this so callers (the CLI, a game server)
/// can report any failure with a stable code and category without matching
/// on backend-specific variants.
///
/// # Example
///
/// ```ignore
/// use archevox_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "VOICE_001". These codes are stable and
    /// can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::InvalidVoiceId.code(), "E001");
        assert_eq!(ErrorCode::InvalidFormant.code(), "E006");
        assert_eq!(ErrorCode::MissingAnchorPath.code(), "E008");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::FormantOrder.code(), "W001");
        assert_eq!(WarningCode::EmptyPitchContour.code(), "W004");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::with_path(
            ErrorCode::InvalidFundamental,
            "f0 must be positive",
            "recipe.vocal_tract.f0",
        );
        assert_eq!(
            err.to_string(),
            "E004: f0 must be positive (at recipe.vocal_tract.f0)"
        );
    }

    #[test]
    fn test_validation_result_merge() {
        let mut a = ValidationResult::success();
        let mut b = ValidationResult::success();
        b.add_error(ValidationError::new(ErrorCode::InvalidDuration, "bad"));
        b.add_warning(ValidationWarning::new(WarningCode::FormantOrder, "order"));

        a.merge(b);
        assert!(!a.is_ok());
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.warnings.len(), 1);
    }

    #[test]
    fn test_into_result() {
        let ok = ValidationResult::success();
        assert!(ok.into_result().is_ok());

        let mut bad = ValidationResult::success();
        bad.add_error(ValidationError::new(ErrorCode::InvalidVoiceId, "bad id"));
        assert_eq!(bad.into_result().unwrap_err().len(), 1);
    }
}
