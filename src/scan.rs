//! Scan entry point
//!
//! Reads one Go file, parses it in isolation (no build tags, no type
//! checking) and extracts the File model. Either the whole file extracts or
//! the call fails.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::extractors::DeclarationExtractor;
use crate::language::parse_go;
use crate::model::{File, Origin};
use crate::printer::Printer;
use crate::utils::paths;

/// Scan a Go source file
pub fn scan(path: impl AsRef<Path>) -> Result<Arc<File>> {
    let path = path.as_ref();
    let content = read_source(path)?;
    build_file(paths::canonical_or_original(path), content, None)
}

/// Scan in-memory source as if it lived at `path`. The path is only used for
/// reporting and for locating siblings and vendor directories; relative
/// paths are taken against the current directory.
pub fn scan_source(path: impl AsRef<Path>, content: impl Into<String>) -> Result<Arc<File>> {
    build_file(paths::absolute_location(path.as_ref()), content.into(), None)
}

/// Scan a file already known by its canonical location, recording the
/// import path it was reached through
pub(crate) fn scan_located(location: PathBuf, import_path: Option<&str>) -> Result<Arc<File>> {
    let content = read_source(&location)?;
    build_file(location, content, import_path)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn build_file(location: PathBuf, content: String, import_path: Option<&str>) -> Result<Arc<File>> {
    let tree = parse_go(&location, &content)?;
    let root = tree.root_node();
    let printer = Arc::new(Printer::new(content, &tree));

    let package = DeclarationExtractor::package_name(&printer, root).ok_or_else(|| {
        ModelError::MissingPackage {
            path: location.clone(),
        }
    })?;
    let origin = Arc::new(Origin::new(location, package, import_path));

    let decls = DeclarationExtractor::new(Arc::clone(&printer), Arc::clone(&origin)).extract(root);
    debug!(
        "Scanned {} (package {})",
        origin.location.display(),
        origin.package
    );

    Ok(Arc::new(File::new(
        decls.comment,
        decls.imports,
        decls.values,
        decls.interfaces,
        decls.structs,
        printer,
        origin,
    )))
}
