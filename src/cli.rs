//! Command-line interface definitions and parsing
//!
//! gotag has a single command: apply tag directives to a target. The target
//! is one of
//!
//! - `path/to/file.go@TypeName` for one struct type
//! - `path/to/file.go` for every struct in a file
//! - `path/to/dir` for every Go file in a directory (`-r` to recurse)
//!
//! Directive flags are repeatable and accept comma-separated lists, so
//! `-a json -a xml` and `-a json,xml` are equivalent.
//!
//! # Examples
//!
//! ```bash
//! # Add json and db tags to every field of User
//! gotag -t model/user.go@User -a json,db
//!
//! # Snake-case defaults across a package tree, previewing only
//! gotag -t model/ -r -c snake -a json --dry-run
//!
//! # Replace the db tag value, asking before each change
//! gotag -t model/user.go -o db=user_id -i
//! ```

use std::str::FromStr;

use clap::Parser;

use crate::case::CaseStyle;
use crate::directives::{DirectiveError, DirectiveSet, InteractionPolicy};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gotag")]
#[command(author, version, about = "Add, delete, and overwrite struct tags in Go source files", long_about = None)]
pub struct Cli {
    /// Target: `file.go@Type`, `file.go`, or a directory
    #[arg(short = 't', long = "target", value_name = "TARGET")]
    pub target: Option<String>,

    /// Descend into subdirectories when the target is a directory
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Ask before adding or overwriting a tag value
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Apply every change without asking (overrides --interactive)
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Case style for default tag values (camel, snake, kebab)
    #[arg(short = 'c', long = "case", value_name = "STYLE", value_parser = CaseStyle::from_str)]
    pub case_style: Option<CaseStyle>,

    /// Tag keys to add
    #[arg(short = 'a', long = "add", value_name = "KEYS")]
    pub add: Vec<String>,

    /// Tag keys to delete
    #[arg(short = 'd', long = "delete", value_name = "KEYS")]
    pub delete: Vec<String>,

    /// Tag values to overwrite, as `key=value` or `key` for the default
    #[arg(short = 'o', long = "overwrite", value_name = "KEY[=VALUE]")]
    pub overwrite: Vec<String>,

    /// Report files that would change without writing them
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Suppress informational output (errors are still shown)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Interaction policy selected by `--interactive` and `--force`
    #[must_use]
    pub const fn policy(&self) -> InteractionPolicy {
        InteractionPolicy::from_flags(self.interactive, self.force)
    }

    /// Directive set built from the add/delete/overwrite flags
    ///
    /// # Errors
    /// Returns `DirectiveError` if a key or overwrite value is invalid.
    pub fn directives(&self) -> Result<DirectiveSet, DirectiveError> {
        DirectiveSet::from_flags(&self.add, &self.delete, &self.overwrite)
    }
}
