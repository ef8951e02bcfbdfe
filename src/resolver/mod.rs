//! Cross-package type resolution
//!
//! Turns a type name as written in a file (`Rocket`, `*Rocket`,
//! `decimal.Decimal`) into the Struct that declares it, following sibling
//! files, dot imports and import bindings. One Resolver is one session: files
//! are scanned at most once and shared between lookups.

pub mod search_paths;
mod type_ref;

pub use search_paths::SearchPaths;
pub use type_ref::TypeRef;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::indexer::SymbolIndexer;
use crate::model::{Arg, File, Struct, BLANK_ALIAS, DOT_ALIAS};
use crate::scan::scan_located;
use crate::utils::paths;

pub struct Resolver {
    search: SearchPaths,
    /// canonical location → scanned file
    files: HashMap<PathBuf, Arc<File>>,
    /// (package directory, type name) pairs currently being resolved
    in_progress: HashSet<(PathBuf, String)>,
    indexer: Option<Box<dyn SymbolIndexer + Send + Sync>>,
}

impl Resolver {
    pub fn new(search: SearchPaths) -> Self {
        Self {
            search,
            files: HashMap::new(),
            in_progress: HashSet::new(),
            indexer: None,
        }
    }

    /// Attach an external symbol index used by [`Resolver::qualified_name`]
    pub fn with_indexer<I>(mut self, indexer: I) -> Self
    where
        I: SymbolIndexer + Send + Sync + 'static,
    {
        self.indexer = Some(Box::new(indexer));
        self
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search
    }

    /// Number of distinct files scanned in this session
    pub fn scanned_count(&self) -> usize {
        self.files.len()
    }

    /// Scan a file through the session memo
    pub fn scan(&mut self, path: impl AsRef<Path>) -> Result<Arc<File>> {
        self.load(path.as_ref(), None)
    }

    /// Resolve `name` as written in `file` to its struct declaration
    pub fn extract_type(&mut self, file: &Arc<File>, name: &str) -> Result<Arc<Struct>> {
        self.remember(file);
        match self.resolve(file, name)? {
            Some(found) => Ok(found),
            None => Err(ModelError::TypeNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Resolve the declared type of a field or parameter
    pub fn extract_arg_type(&mut self, file: &Arc<File>, arg: &Arg) -> Result<Arc<Struct>> {
        self.extract_type(file, arg.golang_type())
    }

    /// Fully qualified name from the attached indexer, if any
    pub fn qualified_name(&self, file: &File, type_text: &str) -> Option<String> {
        self.indexer.as_ref()?.qualify(type_text, file)
    }

    fn remember(&mut self, file: &Arc<File>) {
        self.files
            .entry(file.location().to_path_buf())
            .or_insert_with(|| Arc::clone(file));
    }

    fn load(&mut self, path: &Path, import_path: Option<&str>) -> Result<Arc<File>> {
        let location = paths::canonical_or_original(path);
        if let Some(file) = self.files.get(&location) {
            if let Some(import_path) = import_path {
                file.origin().assign_import_path(import_path);
            }
            return Ok(Arc::clone(file));
        }

        let file = scan_located(location.clone(), import_path)?;
        self.files.insert(location, Arc::clone(&file));
        Ok(file)
    }

    fn resolve(&mut self, file: &Arc<File>, name: &str) -> Result<Option<Arc<Struct>>> {
        let Some(type_ref) = TypeRef::parse(name) else {
            debug!("'{}' does not name a struct type", name);
            return Ok(None);
        };

        let key = (file.directory().to_path_buf(), type_ref.to_string());
        if !self.in_progress.insert(key.clone()) {
            return Err(ModelError::CyclicReference {
                dir: key.0,
                name: key.1,
            });
        }

        let result = match &type_ref.package {
            None => self.resolve_local(file, &type_ref.name),
            Some(alias) => self.resolve_qualified(file, alias, &type_ref.name),
        };
        self.in_progress.remove(&key);
        result
    }

    fn resolve_local(&mut self, file: &Arc<File>, name: &str) -> Result<Option<Arc<Struct>>> {
        if let Some(found) = file.struct_by_name(name) {
            return Ok(Some(Arc::clone(found)));
        }

        for sibling in self.siblings(file)? {
            if let Some(found) = sibling.struct_by_name(name) {
                debug!(
                    "Found {} in sibling {}",
                    name,
                    sibling.location().display()
                );
                return Ok(Some(Arc::clone(found)));
            }
        }

        let dot_imports: Vec<String> = file
            .imports()
            .iter()
            .filter(|(_, alias)| alias.as_str() == DOT_ALIAS)
            .map(|(path, _)| path.clone())
            .collect();
        for import_path in dot_imports {
            if let Some(found) = self.search_import(file, &import_path, None, name)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    fn resolve_qualified(
        &mut self,
        file: &Arc<File>,
        alias: &str,
        name: &str,
    ) -> Result<Option<Arc<Struct>>> {
        let candidates: Vec<(String, bool)> = file
            .imports()
            .iter()
            .filter(|(_, bound)| bound.as_str() != BLANK_ALIAS && bound.as_str() != DOT_ALIAS)
            .filter(|(_, bound)| bound.is_empty() || bound.as_str() == alias)
            .map(|(path, bound)| (path.clone(), !bound.is_empty()))
            .collect();

        for (import_path, explicit) in candidates {
            let required_package = if explicit { None } else { Some(alias) };
            if let Some(found) = self.search_import(file, &import_path, required_package, name)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    /// Look for `name` in the package bound to `import_path`. Files whose
    /// package differs from `required_package` are skipped when it is set.
    fn search_import(
        &mut self,
        file: &Arc<File>,
        import_path: &str,
        required_package: Option<&str>,
        name: &str,
    ) -> Result<Option<Arc<Struct>>> {
        let Some(dir) = self.search.package_dir(file.directory(), import_path) else {
            debug!("No package directory for import \"{}\"", import_path);
            return Ok(None);
        };
        debug!("Searching {} for {}", dir.display(), name);

        for source in paths::go_source_files(&dir, false)? {
            let candidate = self.load(&source, Some(import_path))?;
            if required_package.is_some_and(|package| candidate.package != package) {
                continue;
            }
            if let Some(found) = self.resolve(&candidate, name)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    fn siblings(&mut self, file: &Arc<File>) -> Result<Vec<Arc<File>>> {
        let siblings = file.siblings_or_try_init(|| self.scan_siblings(file))?;
        Ok(siblings.to_vec())
    }

    /// Other non-test files of the same package in the file's directory
    fn scan_siblings(&mut self, file: &File) -> Result<Vec<Arc<File>>> {
        let mut siblings = Vec::new();
        for source in paths::go_source_files(file.directory(), false)? {
            if paths::canonical_or_original(&source) == file.location() {
                continue;
            }
            let sibling = self.load(&source, file.import_path())?;
            if sibling.package != file.package {
                debug!(
                    "Skipping {} (package {})",
                    sibling.location().display(),
                    sibling.package
                );
                continue;
            }
            siblings.push(sibling);
        }
        Ok(siblings)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(SearchPaths::default())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("search", &self.search)
            .field("files", &self.files.len())
            .field("in_progress", &self.in_progress)
            .field("indexer", &self.indexer.is_some())
            .finish()
    }
}
