//! Source-filter speech synthesis.
//!
//! Leaf components first: the glottal source, noise, the formant resonator
//! bank and the affect mapper. [`SourceFilterSynthesizer`] wires them into the
//! fully synthetic path.

pub mod emotion;
pub mod glottal;
pub mod noise;
pub mod resonator;
pub mod source_filter;

pub use emotion::{AffectFactors, EmotionParameterMapper};
pub use glottal::GlottalSourceGenerator;
pub use noise::NoiseGenerator;
pub use resonator::FormantResonatorBank;
pub use source_filter::SourceFilterSynthesizer;

use archevox_spec::MAX_DURATION_SECONDS;

use crate::error::{VoiceError, VoiceResult};

/// Rejects durations that are not in `(0, MAX_DURATION_SECONDS]`.
pub(crate) fn check_duration(duration_seconds: f64) -> VoiceResult<()> {
    if duration_seconds.is_finite()
        && duration_seconds > 0.0
        && duration_seconds <= MAX_DURATION_SECONDS
    {
        Ok(())
    } else {
        Err(VoiceError::InvalidDuration {
            duration: duration_seconds,
        })
    }
}
