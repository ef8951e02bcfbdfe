// Search Path Configuration
//
// Where package sources live. Built once and handed to the Resolver, so a
// resolution session never reads process environment on its own.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::paths;

/// Package source roots, consulted in priority order: vendor, module root,
/// standard library root. Each root is expected to contain
/// `<root>/<import path>/*.go`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    /// Look for a `vendor/` directory above the importing file
    pub vendor: bool,
    /// Dependency cache root, `$GOPATH/src`
    pub module_root: Option<PathBuf>,
    /// Standard library root, `$GOROOT/src`
    pub std_root: Option<PathBuf>,
}

impl Default for SearchPaths {
    fn default() -> Self {
        Self {
            vendor: true,
            module_root: None,
            std_root: None,
        }
    }
}

impl SearchPaths {
    /// Read `GOPATH` and `GOROOT` from the process environment
    pub fn from_env() -> Self {
        let gopath = env::var_os("GOPATH");
        let goroot = env::var_os("GOROOT");
        Self::from_vars(gopath.as_deref(), goroot.as_deref())
    }

    /// Build from raw `GOPATH` / `GOROOT` values. Only the first `GOPATH`
    /// entry is used; empty values are ignored.
    pub fn from_vars(gopath: Option<&OsStr>, goroot: Option<&OsStr>) -> Self {
        let module_root = gopath
            .and_then(|value| env::split_paths(value).next())
            .filter(|first| !first.as_os_str().is_empty())
            .map(|first| first.join("src"));
        let std_root = goroot
            .filter(|value| !value.is_empty())
            .map(|value| PathBuf::from(value).join("src"));

        let search = Self {
            vendor: true,
            module_root,
            std_root,
        };
        debug!("Search paths: {:?}", search);
        search
    }

    pub fn with_module_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.module_root = Some(root.into());
        self
    }

    pub fn with_std_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.std_root = Some(root.into());
        self
    }

    pub fn without_vendor(mut self) -> Self {
        self.vendor = false;
        self
    }

    /// Candidate package directories for `import_path`, highest priority first
    pub fn candidates(&self, file_dir: &Path, import_path: &str) -> Vec<PathBuf> {
        let vendor = if self.vendor {
            paths::find_vendor_dir(file_dir)
        } else {
            None
        };

        [vendor.as_ref(), self.module_root.as_ref(), self.std_root.as_ref()]
            .into_iter()
            .flatten()
            .map(|root| paths::package_dir(root, import_path))
            .collect()
    }

    /// First candidate directory that exists
    pub fn package_dir(&self, file_dir: &Path, import_path: &str) -> Option<PathBuf> {
        self.candidates(file_dir, import_path)
            .into_iter()
            .find(|dir| dir.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_vars_appends_src() {
        let search = SearchPaths::from_vars(
            Some(OsStr::new("/home/gopher/go")),
            Some(OsStr::new("/usr/local/go")),
        );
        assert_eq!(search.module_root, Some(PathBuf::from("/home/gopher/go/src")));
        assert_eq!(search.std_root, Some(PathBuf::from("/usr/local/go/src")));
        assert!(search.vendor);
    }

    #[test]
    #[cfg(unix)]
    fn test_from_vars_uses_first_gopath_entry() {
        let search = SearchPaths::from_vars(Some(OsStr::new("/a/go:/b/go")), None);
        assert_eq!(search.module_root, Some(PathBuf::from("/a/go/src")));
        assert_eq!(search.std_root, None);
    }

    #[test]
    fn test_from_vars_ignores_empty() {
        let search = SearchPaths::from_vars(Some(OsStr::new("")), Some(OsStr::new("")));
        assert_eq!(search, SearchPaths::default());
    }

    #[test]
    fn test_candidates_priority_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        let project = root.join("project");
        fs::create_dir_all(project.join("vendor")).unwrap();
        fs::create_dir_all(project.join("cmd")).unwrap();

        let search = SearchPaths::default()
            .with_module_root(root.join("gopath/src"))
            .with_std_root(root.join("goroot/src"));
        let candidates = search.candidates(&project.join("cmd"), "bytes");

        assert_eq!(
            candidates,
            vec![
                project.join("vendor").join("bytes"),
                root.join("gopath/src").join("bytes"),
                root.join("goroot/src").join("bytes"),
            ]
        );
    }

    #[test]
    fn test_package_dir_picks_first_existing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        let std_bytes = root.join("goroot/src/bytes");
        fs::create_dir_all(&std_bytes).unwrap();

        let search = SearchPaths::default()
            .without_vendor()
            .with_module_root(root.join("gopath/src"))
            .with_std_root(root.join("goroot/src"));

        assert_eq!(search.package_dir(&root, "bytes"), Some(std_bytes));
        assert_eq!(search.package_dir(&root, "missing/pkg"), None);
    }
}
