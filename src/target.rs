//! Target resolution
//!
//! A target names what to process:
//!
//! - `path/to/file.go@TypeName` - one struct type in one file
//! - `path/to/file.go` - every struct type in one file
//! - `path/to/dir` - every `.go` file in a directory, optionally recursive

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const GO_EXTENSION: &str = "go";

/// Errors produced while resolving a target
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("target cannot be empty")]
    Empty,
    /// `@` form with more than one `@` or an empty type name
    #[error("invalid struct target '{0}': expected <file>@<TypeName>")]
    MalformedStruct(String),
    #[error("target '{}' does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("target '{}' is not a file", .0.display())]
    NotAFile(PathBuf),
    /// Exists but is neither a `.go` file nor a directory
    #[error("target '{}' is not a Go source file or directory", .0.display())]
    Unsupported(PathBuf),
    #[error("failed to read directory '{}': {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a run should operate on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single struct type in a single file
    Struct { file: PathBuf, type_name: String },
    /// All struct types in a single file
    File(PathBuf),
    /// All Go files in a directory
    Directory(PathBuf),
}

impl Target {
    /// Resolve a target string against the filesystem.
    ///
    /// # Errors
    /// Returns `TargetError` if the input is empty, malformed, refers to a
    /// missing path, or refers to something that is neither a Go file nor a
    /// directory.
    pub fn parse(input: &str) -> Result<Self, TargetError> {
        if input.is_empty() {
            return Err(TargetError::Empty);
        }

        if input.contains('@') {
            let mut parts = input.split('@');
            let (Some(file), Some(type_name), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(TargetError::MalformedStruct(input.to_string()));
            };
            if file.is_empty() || type_name.is_empty() {
                return Err(TargetError::MalformedStruct(input.to_string()));
            }

            let file = PathBuf::from(file);
            let metadata = fs::metadata(&file).map_err(|_| TargetError::NotFound(file.clone()))?;
            if !metadata.is_file() {
                return Err(TargetError::NotAFile(file));
            }
            return Ok(Self::Struct {
                file,
                type_name: type_name.to_string(),
            });
        }

        let path = PathBuf::from(input);
        let metadata = fs::metadata(&path).map_err(|_| TargetError::NotFound(path.clone()))?;
        if metadata.is_file() && is_go_file(&path) {
            Ok(Self::File(path))
        } else if metadata.is_dir() {
            Ok(Self::Directory(path))
        } else {
            Err(TargetError::Unsupported(path))
        }
    }

    /// Struct name filter, if the target names a single type
    #[must_use]
    pub fn type_filter(&self) -> Option<&str> {
        match self {
            Self::Struct { type_name, .. } => Some(type_name),
            Self::File(_) | Self::Directory(_) => None,
        }
    }

    /// Files to process, in processing order.
    ///
    /// Directory entries are visited in lexical order; subdirectories are
    /// only entered when `recursive` is set.
    ///
    /// # Errors
    /// Returns `TargetError::Traversal` if a directory cannot be read.
    pub fn files(&self, recursive: bool) -> Result<Vec<PathBuf>, TargetError> {
        match self {
            Self::Struct { file, .. } | Self::File(file) => Ok(vec![file.clone()]),
            Self::Directory(dir) => {
                let mut files = Vec::new();
                collect_go_files(dir, recursive, &mut files)?;
                Ok(files)
            }
        }
    }
}

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == GO_EXTENSION)
}

fn collect_go_files(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), TargetError> {
    let traversal = |source| TargetError::Traversal {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(traversal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(traversal)?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(traversal)?;
        if file_type.is_dir() {
            if recursive {
                collect_go_files(&path, recursive, files)?;
            }
        } else if is_go_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}
