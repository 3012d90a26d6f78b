//! Archevox CLI library.
//!
//! Command implementations behind the `archevox` binary. Each command returns
//! an [`std::process::ExitCode`] so it can be driven from tests as well as
//! from `main`.

pub mod commands;
pub mod input;
