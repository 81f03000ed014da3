//! Output formatting for CLI display
//!
//! Status lines printed while files are processed. Functions return the
//! formatted line; callers decide where it goes and whether quiet mode
//! suppresses it.

use std::path::Path;

use colored::Colorize;

use crate::processor::{FileOutcome, ProcessError};

/// Line announcing that a file is being processed
#[must_use]
pub fn processing(path: &Path) -> String {
    format!("{} {}", "Processing".cyan(), path.display())
}

/// Line describing what happened to a processed file
#[must_use]
pub fn outcome(path: &Path, outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Updated { fields } => format!(
            "  {} {} ({} field(s))",
            "✓ Updated".green(),
            path.display(),
            fields
        ),
        FileOutcome::WouldUpdate { fields } => format!(
            "  {} {} ({} field(s))",
            "~ Would update".yellow(),
            path.display(),
            fields
        ),
        FileOutcome::Unchanged => format!("  {} {}", "= Unchanged".normal(), path.display()),
        FileOutcome::TypeNotFound(name) => format!(
            "  {} type '{}' not found in {}",
            "⊘".yellow(),
            name,
            path.display()
        ),
    }
}

/// Line reporting a file that was skipped because of an error
#[must_use]
pub fn failure(error: &ProcessError) -> String {
    format!("  {} {}", "✗".red(), error)
}
