//! Voice spec loading with source provenance.

use std::path::{Path, PathBuf};

use archevox_spec::{SpecError, VoiceSpec};

/// A parsed spec plus where it came from.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed spec.
    pub spec: VoiceSpec,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
    /// Directory that relative anchor paths resolve against.
    pub base_dir: PathBuf,
}

/// Reads and parses a JSON voice spec.
pub fn load_spec(path: &Path) -> Result<LoadResult, SpecError> {
    let content = std::fs::read_to_string(path)?;
    let spec = VoiceSpec::from_json(&content)?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(LoadResult {
        spec,
        source_hash,
        base_dir,
    })
}
