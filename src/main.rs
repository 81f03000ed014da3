//! gotag CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Add json tags to one struct
//! gotag -t model/user.go@User -a json
//!
//! # Drop xml tags from every struct under model/
//! gotag -t model/ -r -d xml
//!
//! # Overwrite db tags with snake_case defaults, without asking
//! gotag -t model/user.go -c snake -o db -f
//! ```
//!
//! # Configuration
//!
//! Defaults for `case_style`, `recursive` and `quiet` can be set in the
//! user's config directory (`~/.config/gotag/config.toml` on Linux) or via
//! `GOTAG_*` environment variables. Log verbosity follows `RUST_LOG`.

use std::process::ExitCode;

use colored::Colorize;
use gotag::{GotagError, cli::Cli, commands, config::GotagConfig, ui::TerminalPrompt};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), GotagError> {
    let cli = Cli::parse_args();
    let config = GotagConfig::load()?;
    let mut prompt = TerminalPrompt::new();

    commands::apply(&cli, &config, &mut prompt)?;
    Ok(())
}
