//! gotag - add, delete, and overwrite struct tags in Go source files
//!
//! The library is layered bottom-up:
//!
//! - [`tags`] decodes and encodes raw tag strings
//! - [`case`] derives default tag values from field names
//! - [`directives`] reconciles a field's tags with add/delete/overwrite
//!   directives
//! - [`rewrite`] applies directives to a single field
//! - [`source`] reads struct declarations out of Go files and writes tag
//!   changes back
//! - [`processor`] drives whole files and batches
//! - [`target`] turns the user's target string into a file list

use thiserror::Error;

pub mod case;
pub mod cli;
pub mod commands;
pub mod config;
pub mod directives;
pub mod output;
pub mod processor;
pub mod rewrite;
pub mod source;
pub mod tags;
pub mod target;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all fatal failure states of the program
///
/// Per-file failures never surface here; they are collected in
/// [`processor::ProcessSummary`].
#[derive(Debug, Error)]
pub enum GotagError {
    /// The target could not be resolved
    #[error("Invalid target: {0}")]
    Target(#[from] target::TargetError),
    /// A directive flag was malformed
    #[error("Invalid directive: {0}")]
    Directive(#[from] directives::DirectiveError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
