//! CLI argument definitions for the `archevox` binary.

use clap::{Parser, Subcommand};

/// Archevox - Procedural voice synthesis for creature archetypes
#[derive(Parser)]
#[command(name = "archevox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate a voice spec without rendering it
    Validate {
        /// Path to the voice spec (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a voice spec to a 16-bit mono WAV
    Generate {
        /// Path to the voice spec (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output WAV path
        #[arg(short, long)]
        out: String,

        /// Override the seed from the spec
        #[arg(long)]
        seed: Option<u32>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report level and spectral metrics for a WAV file
    Analyze {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
