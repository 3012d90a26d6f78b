//! Parameter value-objects for both synthesis paths.
//!
//! These types are immutable descriptions of one archetype's voice. They are
//! constructed once (usually by an archetype catalog) and passed by value or
//! reference into the backend; they never carry runtime state.

mod aberration;
mod pitch;
mod vocal_tract;


pub use aberration::{
    AberrationParameters, IdentityRule, KnobIdentity, BANDWIDTH_EXPANSION_IDENTITY,
    BREATHINESS_IDENTITY, FORMANT_SCALE_IDENTITY, FORMANT_SHIFT_IDENTITY,
    GROWL_HARMONICS_IDENTITY, HOLLOW_RESONANCE_IDENTITY, ROUGHNESS_IDENTITY, WETNESS_IDENTITY,
    WHISPER_IDENTITY,
};
pub use pitch::PitchContour;
pub use vocal_tract::{
    Formant, VocalTractParameters, DEFAULT_EXCITATION_RATIO, FORMANT_COUNT, SPEED_OF_SOUND_CM_S,
};
