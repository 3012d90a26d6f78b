//! Archevox Voice Spec Library
//!
//! This crate provides the parameter value-objects consumed by the Archevox
//! synthesis backend, plus the JSON voice spec format used by archetype
//! catalogs and the CLI.
//!
//! # Overview
//!
//! A voice spec selects one of two synthesis paths:
//!
//! - **Source-filter**: fully synthetic speech from [`VocalTractParameters`]
//! - **Anchor aberration**: an anchor recording reshaped by [`AberrationParameters`]
//!
//! # Example
//!
//! ```
//! use archevox_spec::{VoiceSpec, validate_voice_spec};
//!
//! let json = r#"{
//!     "voice_id": "cave-troll-01",
//!     "seed": 7,
//!     "recipe": {
//!         "kind": "anchor_aberration",
//!         "anchor_path": "anchors/greeting.wav",
//!         "aberration": { "growl_harmonics": 0.6, "hollow_resonance": 0.4 }
//!     }
//! }"#;
//!
//! let spec = VoiceSpec::from_json(json).unwrap();
//! let result = validate_voice_spec(&spec);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`params`]: Vocal tract, aberration, and pitch contour value-objects
//! - [`spec`]: The voice spec document and its recipe
//! - [`validation`]: Spec and parameter validation functions

pub mod error;
pub mod params;
pub mod spec;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use params::{
    AberrationParameters, Formant, IdentityRule, KnobIdentity, PitchContour, VocalTractParameters,
    DEFAULT_EXCITATION_RATIO, FORMANT_COUNT,
};
pub use spec::{VoiceRecipe, VoiceSpec, DEFAULT_SAMPLE_RATE, MAX_DURATION_SECONDS};
pub use validation::{
    validate_aberration_params, validate_pitch_contour, validate_vocal_tract, validate_voice_spec,
};
