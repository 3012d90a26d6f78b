//! Voice spec document types.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::params::{AberrationParameters, PitchContour, VocalTractParameters};

/// Engine sample rate shared by both synthesis paths (Hz).
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Longest utterance a source-filter recipe may request (seconds).
pub const MAX_DURATION_SECONDS: f64 = 30.0;

/// A request to render one utterance for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceSpec {
    /// Stable identifier, e.g. "cave-troll-01".
    pub voice_id: String,
    /// Seed for every stochastic stage.
    pub seed: u32,
    /// Output sample rate; defaults to [`DEFAULT_SAMPLE_RATE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    /// Free-form description of the archetype.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Which synthesis path to run, with its parameters.
    pub recipe: VoiceRecipe,
}

/// Synthesis path selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum VoiceRecipe {
    /// Fully synthetic glottal source + formant cascade.
    SourceFilter {
        /// Utterance length in seconds.
        duration_seconds: f64,
        /// Vocal tract description.
        vocal_tract: VocalTractParameters,
        /// Optional F0 contour; absent means constant F0.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pitch_contour: Option<PitchContour>,
        /// Whether breathiness noise is mixed in.
        #[serde(default = "default_add_noise")]
        add_noise: bool,
    },
    /// Anchor recording passed through the aberration chain.
    AnchorAberration {
        /// Path to a PCM WAV anchor, relative to the spec file.
        anchor_path: String,
        /// Aberration knobs.
        #[serde(default)]
        aberration: AberrationParameters,
    },
}

fn default_add_noise() -> bool {
    true
}

impl VoiceRecipe {
    /// Returns the recipe kind as it appears in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            VoiceRecipe::SourceFilter { .. } => "source_filter",
            VoiceRecipe::AnchorAberration { .. } => "anchor_aberration",
        }
    }
}

impl VoiceSpec {
    /// Creates a source-filter spec.
    pub fn source_filter(
        voice_id: impl Into<String>,
        seed: u32,
        duration_seconds: f64,
        vocal_tract: VocalTractParameters,
    ) -> Self {
        Self {
            voice_id: voice_id.into(),
            seed,
            sample_rate: None,
            description: None,
            recipe: VoiceRecipe::SourceFilter {
                duration_seconds,
                vocal_tract,
                pitch_contour: None,
                add_noise: true,
            },
        }
    }

    /// Creates an anchor aberration spec.
    pub fn anchor_aberration(
        voice_id: impl Into<String>,
        seed: u32,
        anchor_path: impl Into<String>,
        aberration: AberrationParameters,
    ) -> Self {
        Self {
            voice_id: voice_id.into(),
            seed,
            sample_rate: None,
            description: None,
            recipe: VoiceRecipe::AnchorAberration {
                anchor_path: anchor_path.into(),
                aberration,
            },
        }
    }

    /// Effective sample rate for this spec.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    /// Parses a spec from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a spec file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the spec to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
