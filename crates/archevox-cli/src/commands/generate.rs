//! Generate command implementation
//!
//! Renders a voice spec through the voice backend and writes a 16-bit WAV.

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use archevox_backend_voice::GenerateResult as Rendered;
use archevox_spec::{validate_voice_spec, VoiceSpec};
use colored::Colorize;

use super::json_output::{
    error_codes, spec_error_to_json, validation_error_to_json, validation_warning_to_json,
    voice_error_to_json, GenerateOutput, GenerateResult, JsonError,
};
use super::validate::print_validation_results;
use crate::input::{load_spec, LoadResult};

/// Run the generate command
///
/// # Arguments
/// * `spec_path` - Path to the voice spec
/// * `out_path` - Where to write the WAV
/// * `seed` - Overrides the spec's seed when set
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the spec is invalid or rendering failed
pub fn run(
    spec_path: &str,
    out_path: &str,
    seed: Option<u32>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(spec_path, out_path, seed)
    } else {
        run_human(spec_path, out_path, seed)
    }
}

fn run_human(spec_path: &str, out_path: &str, seed: Option<u32>) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Generating:".cyan().bold(), spec_path);

    let LoadResult {
        mut spec, base_dir, ..
    } = load_spec(Path::new(spec_path))
        .with_context(|| format!("Failed to load spec file: {}", spec_path))?;
    apply_seed(&mut spec, seed);

    let validation = validate_voice_spec(&spec);
    print_validation_results(&validation);
    if !validation.is_ok() {
        println!(
            "\n{} Spec has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let rendered = archevox_backend_voice::generate(&spec, &base_dir)
        .with_context(|| format!("Failed to render voice '{}'", spec.voice_id))?;
    write_output(out_path, &rendered.wav.wav_data)?;

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "{} {} ({}, seed {})",
        "Voice:".dimmed(),
        spec.voice_id,
        rendered.recipe_kind,
        spec.seed
    );
    println!(
        "{} {} samples @ {} Hz ({:.3}s)",
        "Length:".dimmed(),
        rendered.buffer.len(),
        rendered.buffer.sample_rate(),
        rendered.buffer.duration_seconds()
    );
    println!(
        "{} peak {:.4}, rms {:.4}",
        "Level:".dimmed(),
        rendered.buffer.peak(),
        rendered.buffer.rms()
    );
    println!("{} {}", "PCM hash:".dimmed(), rendered.wav.pcm_hash);
    println!(
        "\n{} Wrote {} ({}ms)",
        "SUCCESS".green().bold(),
        out_path,
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(spec_path: &str, out_path: &str, seed: Option<u32>) -> Result<ExitCode> {
    let start = Instant::now();

    let output = match load_spec(Path::new(spec_path)) {
        Err(e) => GenerateOutput::failure(vec![spec_error_to_json(&e)], Vec::new()),
        Ok(LoadResult {
            mut spec, base_dir, ..
        }) => {
            apply_seed(&mut spec, seed);
            let validation = validate_voice_spec(&spec);
            let warnings = validation
                .warnings
                .iter()
                .map(validation_warning_to_json)
                .collect();

            if !validation.is_ok() {
                let errors = validation
                    .errors
                    .iter()
                    .map(validation_error_to_json)
                    .collect();
                GenerateOutput::failure(errors, warnings)
            } else {
                match archevox_backend_voice::generate(&spec, &base_dir) {
                    Err(e) => GenerateOutput::failure(vec![voice_error_to_json(&e)], warnings),
                    Ok(rendered) => match write_output(out_path, &rendered.wav.wav_data) {
                        Err(e) => GenerateOutput::failure(
                            vec![JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e))],
                            warnings,
                        ),
                        Ok(()) => GenerateOutput::success(
                            summarize(&spec, out_path, &rendered, start),
                            warnings,
                        ),
                    },
                }
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn apply_seed(spec: &mut VoiceSpec, seed: Option<u32>) {
    if let Some(seed) = seed {
        spec.seed = seed;
    }
}

fn write_output(out_path: &str, wav_data: &[u8]) -> Result<()> {
    let path = Path::new(out_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, wav_data).with_context(|| format!("Failed to write WAV: {}", out_path))
}

fn summarize(
    spec: &VoiceSpec,
    out_path: &str,
    rendered: &Rendered,
    start: Instant,
) -> GenerateResult {
    GenerateResult {
        voice_id: spec.voice_id.clone(),
        recipe_kind: rendered.recipe_kind.to_string(),
        seed: spec.seed,
        output_path: out_path.to_string(),
        sample_rate: rendered.buffer.sample_rate(),
        num_samples: rendered.buffer.len(),
        duration_seconds: rendered.buffer.duration_seconds(),
        peak: rendered.buffer.peak() as f64,
        rms: rendered.buffer.rms(),
        pcm_hash: rendered.wav.pcm_hash.clone(),
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
