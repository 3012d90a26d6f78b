//! Analyze command implementation
//!
//! Decodes a WAV file and reports level and spectral metrics.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use archevox_backend_voice::analysis::{analyze, AudioStats};
use archevox_backend_voice::anchor::read_wav_mono;
use archevox_backend_voice::AudioBuffer;
use colored::Colorize;

use super::json_output::{voice_error_to_json, AnalyzeOutput};

/// Run the analyze command
///
/// # Returns
/// Exit code: 0 on success, 1 if the file could not be decoded
pub fn run(input_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path)
    } else {
        run_human(input_path)
    }
}

fn run_human(input_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Analyzing:".cyan().bold(), input_path);

    let data =
        fs::read(input_path).with_context(|| format!("Failed to read file: {}", input_path))?;
    let input_hash = blake3::hash(&data).to_hex().to_string();
    println!("{} {}", "Hash:".dimmed(), &input_hash[..16]);

    let stats = load_stats(Path::new(input_path))
        .with_context(|| format!("Failed to decode WAV: {}", input_path))?;
    print_stats(&stats);

    println!("\n{} Analysis complete", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn run_json(input_path: &str) -> Result<ExitCode> {
    let input_hash = fs::read(input_path)
        .ok()
        .map(|data| blake3::hash(&data).to_hex().to_string());

    let output = match load_stats(Path::new(input_path)) {
        Ok(stats) => AnalyzeOutput {
            success: true,
            input: input_path.to_string(),
            input_hash,
            metrics: Some(stats),
            errors: Vec::new(),
        },
        Err(e) => AnalyzeOutput {
            success: false,
            input: input_path.to_string(),
            input_hash,
            metrics: None,
            errors: vec![voice_error_to_json(&e)],
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn load_stats(path: &Path) -> Result<AudioStats, archevox_backend_voice::VoiceError> {
    let (samples, sample_rate) = read_wav_mono(path)?;
    if sample_rate == 0 {
        return Err(archevox_backend_voice::VoiceError::InvalidSampleRate { rate: 0 });
    }
    Ok(analyze(&AudioBuffer::from_f64(&samples, sample_rate)))
}

fn print_stats(stats: &AudioStats) {
    println!(
        "{} {} samples @ {} Hz ({:.3}s)",
        "Length:".dimmed(),
        stats.num_samples,
        stats.sample_rate,
        stats.duration_seconds
    );
    println!(
        "{} peak {:.4} ({:.1} dBFS), rms {:.4}",
        "Level:".dimmed(),
        stats.peak,
        to_dbfs(stats.peak),
        stats.rms
    );
    println!(
        "{} dominant {:.1} Hz, centroid {:.1} Hz",
        "Spectrum:".dimmed(),
        stats.dominant_frequency_hz,
        stats.spectral_centroid_hz
    );
}

fn to_dbfs(level: f64) -> f64 {
    if level > 0.0 {
        20.0 * level.log10()
    } else {
        f64::NEG_INFINITY
    }
}
