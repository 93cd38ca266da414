//! File and directory ignore pattern handling for templates.
//! This module processes `.scaffoldignore` files to exclude specific paths
//! from template processing, similar to .gitignore functionality.

use crate::constants::{DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Reads the ignore file of `template_root` and builds a set of glob patterns.
///
/// Patterns are matched against paths relative to the template root,
/// before they are rendered. A matching directory is skipped together with
/// everything below it. [`DEFAULT_IGNORE_PATTERNS`] are always included.
/// Blank lines and lines starting with `#` are skipped.
///
/// # Example
/// ```ignore
/// # Contents of .scaffoldignore:
/// *.pyc
/// **/__pycache__
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(build_glob(pattern)?);
    }

    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(build_glob(line)?);
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}

fn build_glob(pattern: &str) -> Result<Glob> {
    Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}
