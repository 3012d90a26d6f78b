//! Spec-driven entry point.
//!
//! Dispatches a [`VoiceSpec`] to the synthesis path its recipe selects and
//! serializes the result as a deterministic WAV.

use std::path::{Path, PathBuf};

use archevox_spec::{validate_voice_spec, VoiceRecipe, VoiceSpec};
use tracing::debug;

use crate::anchor::AnchorAberrationSynthesizer;
use crate::buffer::AudioBuffer;
use crate::error::{VoiceError, VoiceResult};
use crate::synthesis::SourceFilterSynthesizer;
use crate::wav::WavResult;

/// Result of rendering a voice spec.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The rendered samples.
    pub buffer: AudioBuffer,
    /// The samples as a 16-bit WAV.
    pub wav: WavResult,
    /// Recipe kind that produced the audio.
    pub recipe_kind: &'static str,
}

/// Renders a voice spec.
///
/// Relative anchor paths are resolved against `base_dir`, normally the
/// directory holding the spec file.
///
/// # Errors
/// `InvalidParameter` for the first validation error in the spec, otherwise
/// whatever the selected synthesis path returns.
pub fn generate(spec: &VoiceSpec, base_dir: &Path) -> VoiceResult<GenerateResult> {
    let validation = validate_voice_spec(spec);
    if let Some(err) = validation.errors.first() {
        return Err(VoiceError::invalid_param(
            err.path.clone().unwrap_or_else(|| spec.voice_id.clone()),
            format!("[{}] {}", err.code, err.message),
        ));
    }

    let sample_rate = spec.sample_rate();
    debug!(
        voice_id = %spec.voice_id,
        kind = spec.recipe.kind(),
        sample_rate,
        seed = spec.seed,
        "generating voice"
    );

    let buffer = match &spec.recipe {
        VoiceRecipe::SourceFilter {
            duration_seconds,
            vocal_tract,
            pitch_contour,
            add_noise,
        } => SourceFilterSynthesizer::new(sample_rate)?.synthesize(
            *duration_seconds,
            vocal_tract,
            pitch_contour.as_ref(),
            *add_noise,
            spec.seed,
        )?,
        VoiceRecipe::AnchorAberration {
            anchor_path,
            aberration,
        } => {
            let synth = AnchorAberrationSynthesizer::new(sample_rate)?;
            let anchor = synth.load_anchor(&resolve_path(base_dir, anchor_path))?;
            synth.synthesize(&anchor, aberration, spec.seed)?
        }
    };

    Ok(GenerateResult {
        wav: WavResult::from_buffer(&buffer),
        buffer,
        recipe_kind: spec.recipe.kind(),
    })
}

fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
