//! Archevox End-to-End Test Infrastructure
//!
//! Integration tests that exercise the voice engine the way a catalog
//! pipeline does:
//!
//! - **Generation**: JSON spec -> `archevox_backend_voice::generate` -> WAV
//! - **Determinism**: byte-identical WAVs across repeated runs
//! - **Stability**: property tests over resonator, normalizer and chain inputs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p archevox-tests
//! cargo test -p archevox-tests --test proptest_stability
//! ```

pub mod determinism;
pub mod fixtures;

pub use determinism::{verify_determinism, DeterminismResult, DiffInfo};
pub use fixtures::VoiceFixture;
