//! Validate command implementation
//!
//! Parses a voice spec and runs spec validation without rendering.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use archevox_spec::{validate_voice_spec, ValidationResult};
use colored::Colorize;

use super::json_output::{
    spec_error_to_json, validation_error_to_json, validation_warning_to_json, ValidateOutput,
};
use crate::input::{load_spec, LoadResult};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(spec_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(spec_path)
    } else {
        run_human(spec_path)
    }
}

fn run_human(spec_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), spec_path);

    let LoadResult {
        spec, source_hash, ..
    } = load_spec(Path::new(spec_path))
        .with_context(|| format!("Failed to load spec file: {}", spec_path))?;

    println!(
        "{} {} ({})",
        "Voice:".dimmed(),
        spec.voice_id,
        spec.recipe.kind()
    );
    println!("{} {}", "Source:".dimmed(), &source_hash[..16]);

    let result = validate_voice_spec(&spec);
    print_validation_results(&result);

    if result.is_ok() {
        println!("\n{} Spec is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Spec has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(spec_path: &str) -> Result<ExitCode> {
    let output = match load_spec(Path::new(spec_path)) {
        Ok(LoadResult {
            spec, source_hash, ..
        }) => {
            let result = validate_voice_spec(&spec);
            ValidateOutput {
                success: result.is_ok(),
                voice_id: Some(spec.voice_id.clone()),
                recipe_kind: Some(spec.recipe.kind().to_string()),
                source_hash: Some(source_hash),
                errors: result.errors.iter().map(validation_error_to_json).collect(),
                warnings: result
                    .warnings
                    .iter()
                    .map(validation_warning_to_json)
                    .collect(),
            }
        }
        Err(e) => ValidateOutput::load_failure(spec_error_to_json(&e)),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Prints validation errors and warnings to the console.
pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
