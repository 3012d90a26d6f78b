//! Archevox CLI - renders and inspects archetype voices
//!
//! This binary validates JSON voice specs, renders them to WAV through the
//! voice backend, and reports metrics for rendered files.

use std::process::ExitCode;

use clap::Parser;

use archevox_cli::commands;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { spec, json } => commands::validate::run(&spec, json),
        Commands::Generate {
            spec,
            out,
            seed,
            json,
        } => commands::generate::run(&spec, &out, seed, json),
        Commands::Analyze { input, json } => commands::analyze::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
