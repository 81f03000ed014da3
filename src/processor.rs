//! File processing
//!
//! Runs the field rewriter over every qualifying struct field of a file and
//! persists the file only when something changed. A file is either replaced
//! in full with a validated result or left untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use thiserror::Error;
use tracing::{debug, info};

use crate::directives::{DirectiveSet, ResolveOptions};
use crate::output;
use crate::rewrite::rewrite_field;
use crate::source::{GoFile, SourceError, StructSource};
use crate::ui::Prompt;

/// Per-file failures; reported and skipped during a batch
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SourceError,
    },
    /// The updated document could not be turned back into valid source
    #[error("failed to render '{}': {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: SourceError,
    },
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of the in-memory pass over one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileChanges {
    /// Structs that passed the type filter
    pub matched_structs: usize,
    /// Fields whose tags were changed by a directive
    pub changed_fields: usize,
}

/// What happened to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// File rewritten on disk
    Updated { fields: usize },
    /// Dry run: file would have been rewritten
    WouldUpdate { fields: usize },
    /// Nothing to change; file not touched
    Unchanged,
    /// The requested struct type is not declared in the file
    TypeNotFound(String),
}

/// Apply directives to every field of every selected struct in `doc`.
///
/// With `type_filter` set, only the struct with exactly that name is visited.
pub fn apply_directives<S: StructSource + ?Sized>(
    doc: &mut S,
    type_filter: Option<&str>,
    directives: &DirectiveSet,
    options: &ResolveOptions,
    prompt: &mut dyn Prompt,
) -> FileChanges {
    let mut changes = FileChanges::default();

    for decl in doc.structs_mut() {
        if type_filter.is_some_and(|name| name != decl.name) {
            continue;
        }
        changes.matched_structs += 1;

        for field in &mut decl.fields {
            if rewrite_field(field, directives, options, prompt) {
                debug!(
                    type_name = decl.name.as_str(),
                    field = field.name(),
                    "field tag changed"
                );
                changes.changed_fields += 1;
            }
        }
    }

    changes
}

/// Processes files one at a time with a fixed set of directives
#[derive(Debug, Clone)]
pub struct FileProcessor<'a> {
    directives: &'a DirectiveSet,
    options: ResolveOptions,
    dry_run: bool,
}

impl<'a> FileProcessor<'a> {
    #[must_use]
    pub const fn new(directives: &'a DirectiveSet, options: ResolveOptions) -> Self {
        Self {
            directives,
            options,
            dry_run: false,
        }
    }

    /// Report changes without writing any file
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process a single file.
    ///
    /// # Errors
    /// Returns `ProcessError` if the file cannot be read, parsed, rendered or
    /// written. The file on disk is unchanged in every error case.
    pub fn process_file(
        &self,
        path: &Path,
        type_filter: Option<&str>,
        prompt: &mut dyn Prompt,
    ) -> Result<FileOutcome, ProcessError> {
        let text = fs::read_to_string(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = GoFile::parse(text).map_err(|source| ProcessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let changes = apply_directives(&mut file, type_filter, self.directives, &self.options, prompt);

        if let Some(name) = type_filter
            && changes.matched_structs == 0
        {
            return Ok(FileOutcome::TypeNotFound(name.to_string()));
        }
        if changes.changed_fields == 0 {
            return Ok(FileOutcome::Unchanged);
        }

        let render_error = |source| ProcessError::Render {
            path: path.to_path_buf(),
            source,
        };
        let rendered = file.render().map_err(render_error)?;
        if rendered == file.original_text() {
            return Ok(FileOutcome::Unchanged);
        }
        GoFile::parse(rendered.as_str()).map_err(render_error)?;

        let fields = changes.changed_fields;
        if self.dry_run {
            return Ok(FileOutcome::WouldUpdate { fields });
        }

        write_atomically(path, &rendered).map_err(|source| ProcessError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), fields, "updated file");
        Ok(FileOutcome::Updated { fields })
    }

    /// Process files in order. Failures are recorded and reported; they never
    /// stop the remaining files from being processed.
    pub fn process_all(
        &self,
        files: &[PathBuf],
        type_filter: Option<&str>,
        prompt: &mut dyn Prompt,
        quiet: bool,
    ) -> ProcessSummary {
        let mut summary = ProcessSummary::new();

        for path in files {
            if !quiet {
                println!("{}", output::processing(path));
            }

            match self.process_file(path, type_filter, prompt) {
                Ok(outcome) => {
                    if !quiet {
                        println!("{}", output::outcome(path, &outcome));
                    }
                    summary.record(&outcome);
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping file");
                    eprintln!("{}", output::failure(&e));
                    summary.add_error(e.to_string());
                }
            }
        }

        summary
    }
}

/// Replace `path` with `contents` without ever leaving a partial file behind
fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    // Replace the file a symlink points at, not the link itself.
    let target = fs::canonicalize(path)?;
    let dir = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target)?.permissions();

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

/// Summary of a batch run
#[derive(Debug, Default)]
pub struct ProcessSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub type_not_found: usize,
    pub fields: usize,
    pub errors: usize,
    pub error_messages: Vec<String>,
}

impl ProcessSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Updated { fields } | FileOutcome::WouldUpdate { fields } => {
                self.updated += 1;
                self.fields += fields;
            }
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::TypeNotFound(_) => self.type_not_found += 1,
        }
    }

    pub fn add_error(&mut self, msg: String) {
        self.errors += 1;
        self.error_messages.push(msg);
    }

    #[must_use]
    pub const fn files(&self) -> usize {
        self.updated + self.unchanged + self.type_not_found + self.errors
    }

    pub fn print(&self, dry_run: bool) {
        let title = if dry_run { "Dry Run Summary" } else { "Summary" };
        let updated = if dry_run { "✓ Would update:" } else { "✓ Updated:" };
        println!("\n{}", format!("=== {title} ===").bold());
        println!("  {} {} file(s), {} field(s)", updated.green(), self.updated, self.fields);
        println!("  {} {}", "= Unchanged:".normal(), self.unchanged);
        if self.type_not_found > 0 {
            println!("  {} {}", "⊘ Type not found:".yellow(), self.type_not_found);
        }
        if self.errors > 0 {
            println!("  {} {}", "✗ Errors:".red(), self.errors);
            println!("\n{}", "Error details:".red().bold());
            for msg in &self.error_messages {
                println!("  - {msg}");
            }
        }
    }
}
