//! Temporary spec trees with anchors on disk.

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use archevox_spec::VoiceSpec;
use hound::{SampleFormat, WavSpec, WavWriter};
use tempfile::TempDir;

/// A temp directory holding voice specs and their anchors.
pub struct VoiceFixture {
    pub root: TempDir,
}

impl VoiceFixture {
    /// Creates an empty fixture with an `anchors/` directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("anchors")).expect("Failed to create anchors dir");
        Self { root }
    }

    /// Fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes `spec` as `<name>.json` and returns its path.
    pub fn add_spec(&self, name: &str, spec: &VoiceSpec) -> PathBuf {
        let path = self.path().join(format!("{}.json", name));
        let json = spec.to_json_pretty().expect("Failed to serialize spec");
        fs::write(&path, json).expect("Failed to write spec file");
        path
    }

    /// Writes a raw JSON spec document.
    pub fn add_spec_json(&self, name: &str, json: &str) -> PathBuf {
        let path = self.path().join(format!("{}.json", name));
        fs::write(&path, json).expect("Failed to write spec file");
        path
    }

    /// Writes a 16-bit sine anchor under `anchors/` and returns the path
    /// relative to the fixture root.
    pub fn add_sine_anchor(
        &self,
        name: &str,
        freq: f64,
        sample_rate: u32,
        seconds: f64,
        channels: u16,
    ) -> String {
        let relative = format!("anchors/{}.wav", name);
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer =
            WavWriter::create(self.path().join(&relative), spec).expect("Failed to create anchor");
        let frames = (seconds * sample_rate as f64).round() as usize;
        for i in 0..frames {
            let s = 0.5 * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin();
            for _ in 0..channels {
                writer
                    .write_sample((s * 32767.0).round() as i16)
                    .expect("Failed to write anchor sample");
            }
        }
        writer.finalize().expect("Failed to finalize anchor");
        relative
    }

    /// Output path inside the fixture.
    pub fn out(&self, name: &str) -> PathBuf {
        self.path().join("out").join(name)
    }
}

impl Default for VoiceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a 16-bit mono WAV, returning the samples as `f64` in [-1, 1).
pub fn read_pcm16(path: &Path) -> (Vec<f64>, WavSpec) {
    let mut reader = hound::WavReader::open(path).expect("Failed to open WAV");
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .map(|s| s.expect("Failed to read sample") as f64 / 32768.0)
        .collect();
    (samples, spec)
}
