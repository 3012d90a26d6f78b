//! Archevox Voice Backend
//!
//! Procedural voice synthesis for creature archetypes. Two paths produce a
//! mono [`AudioBuffer`]:
//!
//! - **Source-filter** ([`SourceFilterSynthesizer`]): Liljencrants-Fant glottal
//!   pulses through a cascade of four formant resonators, with affect
//!   modulation and optional breath noise. Normalized to a 0.8 peak.
//! - **Anchor aberration** ([`AnchorAberrationSynthesizer`]): a recorded or
//!   TTS anchor passed through an ordered chain of timbre stages (breathiness,
//!   roughness, hollow resonance, wetness, growl, whisper). Normalized to a
//!   0.85 peak.
//!
//! # Determinism
//!
//! Every stochastic step draws from a PCG32 generator seeded from the
//! caller's `u32` seed via BLAKE3, so identical inputs give bit-identical
//! output. Synthesizers hold no mutable state and are `Send + Sync`.
//!
//! # Example
//!
//! ```
//! use archevox_backend_voice::{SourceFilterSynthesizer, DEFAULT_SAMPLE_RATE};
//! use archevox_spec::VocalTractParameters;
//!
//! let synth = SourceFilterSynthesizer::new(DEFAULT_SAMPLE_RATE).unwrap();
//! let voice = synth
//!     .synthesize(0.5, &VocalTractParameters::default(), None, true, 42)
//!     .unwrap();
//! assert_eq!(voice.len(), 24_000);
//! assert!(voice.peak() <= 0.8);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Render a JSON voice spec end to end
//! - [`synthesis`] - Glottal source, noise, resonators, affect mapping
//! - [`aberration`] - Aberration stages and chain
//! - [`anchor`] - Anchor loading, resampling and the aberration path
//! - [`filter`] - Biquad filters
//! - [`normalize`] - Output peak normalization
//! - [`analysis`] - FFT-based measurements
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`wav`] - Deterministic WAV writer

pub mod aberration;
pub mod analysis;
pub mod anchor;
pub mod buffer;
pub mod error;
pub mod filter;
pub mod generate;
pub mod normalize;
pub mod rng;
pub mod synthesis;
pub mod wav;

pub use aberration::{AberrationChain, AberrationStage, StageDescriptor, STAGE_TABLE};
pub use anchor::AnchorAberrationSynthesizer;
pub use archevox_spec::DEFAULT_SAMPLE_RATE;
pub use buffer::AudioBuffer;
pub use error::{VoiceError, VoiceResult};
pub use generate::{generate, GenerateResult};
pub use normalize::OutputNormalizer;
pub use synthesis::{
    EmotionParameterMapper, FormantResonatorBank, GlottalSourceGenerator, NoiseGenerator,
    SourceFilterSynthesizer,
};
pub use wav::WavResult;
