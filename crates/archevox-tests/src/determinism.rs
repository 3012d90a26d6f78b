//! Byte-level determinism checks.
//!
//! # Example
//!
//! ```rust,ignore
//! use archevox_tests::verify_determinism;
//!
//! let result = verify_determinism(|| generate(&spec, dir).unwrap().wav.wav_data, 3);
//! assert!(result.is_deterministic, "{}", result);
//! ```

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the reference output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the reference output.
    pub hash: String,
    /// First difference, if any.
    pub diff_info: Option<DiffInfo>,
}

/// First byte difference between the reference and a later run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Byte offset of the difference.
    pub offset: usize,
    /// Reference byte (0 past the end).
    pub expected: u8,
    /// Differing byte (0 past the end).
    pub actual: u8,
    /// Which run (0-indexed) differed.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at byte {}: expected 0x{:02X}, got 0x{:02X} (run {})",
            self.offset, self.expected, self.actual, self.run_index
        )
    }
}

impl fmt::Display for DeterminismResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.diff_info {
            None => write!(
                f,
                "deterministic over {} runs ({} bytes, {})",
                self.runs,
                self.output_size,
                &self.hash[..16]
            ),
            Some(diff) => write!(f, "NOT deterministic: {}", diff),
        }
    }
}

/// Runs `generate_fn` `runs` times and compares every output to the first.
///
/// # Panics
/// If `runs < 2`.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference_bytes = reference.as_ref();
    let hash = blake3::hash(reference_bytes).to_hex().to_string();

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(offset) = first_difference(reference_bytes, output.as_ref()) {
            let output_bytes = output.as_ref();
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_size: reference_bytes.len(),
                hash,
                diff_info: Some(DiffInfo {
                    offset,
                    expected: reference_bytes.get(offset).copied().unwrap_or(0),
                    actual: output_bytes.get(offset).copied().unwrap_or(0),
                    run_index,
                }),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_size: reference_bytes.len(),
        hash,
        diff_info: None,
    }
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}
