//! Testing utilities for gotag
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

/// Write a Go source file into `dir`, creating parent directories as needed
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_go_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create test directory");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}
