//! Error types for the voice backend.

use archevox_spec::validation::common::CommonValidationError;
use archevox_spec::BackendError;
use thiserror::Error;

/// Result type for voice synthesis operations.
pub type VoiceResult<T> = Result<T, VoiceError>;

/// Errors that can occur during voice synthesis.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Frequency is non-positive or at/above Nyquist.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Anchor file could not be decoded.
    #[error("unsupported audio format: {message}")]
    UnsupportedFormat {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filter pole left the unit circle or a stage produced NaN/Inf.
    #[error("numeric instability in {stage}: {message}")]
    NumericInstability {
        /// Stage that produced the instability.
        stage: String,
        /// Error message.
        message: String,
    },
}

impl VoiceError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Creates a numeric instability error.
    pub fn instability(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NumericInstability {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Lifts a scalar check from the spec crate into an `InvalidParameter`.
    pub(crate) fn check(name: &str, result: Result<(), CommonValidationError>) -> VoiceResult<()> {
        result.map_err(|err| Self::invalid_param(name, err.message))
    }

    /// Returns true for errors caused by a bad caller-supplied argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            VoiceError::InvalidSampleRate { .. }
                | VoiceError::InvalidDuration { .. }
                | VoiceError::InvalidFrequency { .. }
                | VoiceError::InvalidParameter { .. }
        )
    }
}

impl From<hound::Error> for VoiceError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => VoiceError::Io(io),
            other => VoiceError::unsupported_format(other.to_string()),
        }
    }
}

impl BackendError for VoiceError {
    fn code(&self) -> &'static str {
        match self {
            VoiceError::InvalidSampleRate { .. } => "VOICE_001",
            VoiceError::InvalidDuration { .. } => "VOICE_002",
            VoiceError::InvalidFrequency { .. } => "VOICE_003",
            VoiceError::InvalidParameter { .. } => "VOICE_004",
            VoiceError::UnsupportedFormat { .. } => "VOICE_005",
            VoiceError::Io(_) => "VOICE_006",
            VoiceError::NumericInstability { .. } => "VOICE_007",
        }
    }

    fn category(&self) -> &'static str {
        "voice"
    }
}
