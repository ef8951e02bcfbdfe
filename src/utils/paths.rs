// Path Utilities
//
// Filesystem lookups the resolver needs: canonical file locations, the
// upward vendor directory search, import path → package directory, and
// deterministic listing of Go source files.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the directory holding vendored packages
pub const VENDOR_DIR: &str = "vendor";

/// Canonicalize a path, keeping the original when that fails
///
/// Canonical locations make the session cache hit for the same file reached
/// through different relative paths or symlinks (macOS /var vs /private/var).
pub fn canonical_or_original(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|e| {
        warn!(
            "Failed to canonicalize path '{}': {} - using original",
            path.display(),
            e
        );
        path.to_path_buf()
    })
}

/// Location for a file that may only exist in memory: the canonical path
/// when it is on disk, otherwise the path made absolute against the current
/// directory
pub fn absolute_location(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    std::path::absolute(path).unwrap_or_else(|e| {
        warn!(
            "Failed to make path '{}' absolute: {} - using original",
            path.display(),
            e
        );
        path.to_path_buf()
    })
}

/// Walk upward from `start` until a directory containing `vendor/` is found
///
/// Stops at the filesystem root, or early when a `vendor` entry can't be
/// inspected for a reason other than not existing.
pub fn find_vendor_dir(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(VENDOR_DIR);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_dir() => return Some(candidate),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                debug!("Stopping vendor search at '{}': {}", candidate.display(), e);
                return None;
            }
        }
        current = dir.parent();
    }
    None
}

/// Join a slash separated import path onto a search root
///
/// `Path::join` handles `/` on every platform, but pushing components keeps
/// the result free of mixed separators on Windows.
pub fn package_dir(root: &Path, import_path: &str) -> PathBuf {
    let mut dir = root.to_path_buf();
    for component in import_path.split('/').filter(|c| !c.is_empty()) {
        dir.push(component);
    }
    dir
}

pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}

/// Regular `.go` files directly inside `dir`, sorted by path
pub fn go_source_files(dir: &Path, include_tests: bool) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().context("Path contains invalid UTF-8")?;
    let pattern = format!("{}/*.go", glob::Pattern::escape(dir_str));

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)
        .with_context(|| format!("Invalid source pattern for '{}'", dir.display()))?
    {
        let path = entry.with_context(|| format!("scan dir {}", dir.display()))?;
        if !path.is_file() {
            continue;
        }
        if !include_tests && is_test_file(&path) {
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}
