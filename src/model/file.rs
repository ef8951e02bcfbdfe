// File model
//
// Everything extracted from one Go source file. A File never changes after
// scanning except for its sibling cache, which is filled at most once.

use once_cell::sync::OnceCell;
use serde::ser::Serializer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::args::Value;
use super::decls::{Interface, Origin, Struct};
use crate::error::Result;
use crate::printer::Printer;

/// Alias marking a blank import (`import _ "path"`)
pub const BLANK_ALIAS: &str = "_";
/// Alias marking a dot import (`import . "path"`)
pub const DOT_ALIAS: &str = ".";

pub struct File {
    pub package: String,
    pub comment: String,
    /// Import path (unquoted) → alias; empty alias means the package's own name
    pub imports: BTreeMap<String, String>,
    pub values: Vec<Value>,
    pub interfaces: Vec<Interface>,
    pub structs: Vec<Arc<Struct>>,
    printer: Arc<Printer>,
    origin: Arc<Origin>,
    siblings: OnceCell<Vec<Arc<File>>>,
}

impl File {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        comment: String,
        imports: BTreeMap<String, String>,
        values: Vec<Value>,
        interfaces: Vec<Interface>,
        structs: Vec<Arc<Struct>>,
        printer: Arc<Printer>,
        origin: Arc<Origin>,
    ) -> Self {
        Self {
            package: origin.package.clone(),
            comment,
            imports,
            values,
            interfaces,
            structs,
            printer,
            origin,
            siblings: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.origin.location
    }

    pub fn directory(&self) -> &Path {
        self.origin.directory()
    }

    /// Import path this file was reached through during resolution
    pub fn import_path(&self) -> Option<&str> {
        self.origin.import_path()
    }

    pub fn origin(&self) -> &Arc<Origin> {
        &self.origin
    }

    pub fn printer(&self) -> &Arc<Printer> {
        &self.printer
    }

    pub fn imports(&self) -> &BTreeMap<String, String> {
        &self.imports
    }

    pub fn struct_by_name(&self, name: &str) -> Option<&Arc<Struct>> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn interface_by_name(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn value_by_name(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Import table extended with extra default-named imports, for
    /// generators that emit code needing more packages than the source did
    pub fn with_imports(&self, extra: &[&str]) -> BTreeMap<String, String> {
        let mut imports = self.imports.clone();
        for path in extra {
            imports.entry((*path).to_string()).or_default();
        }
        imports
    }

    /// Siblings scanned so far, if the cache has been filled
    pub fn cached_siblings(&self) -> Option<&[Arc<File>]> {
        self.siblings.get().map(Vec::as_slice)
    }

    pub(crate) fn siblings_or_try_init<F>(&self, init: F) -> Result<&[Arc<File>]>
    where
        F: FnOnce() -> Result<Vec<Arc<File>>>,
    {
        self.siblings.get_or_try_init(init).map(Vec::as_slice)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("location", &self.origin.location)
            .field("package", &self.package)
            .field("import_path", &self.origin.import_path())
            .field("imports", &self.imports)
            .field("structs", &self.structs.len())
            .field("interfaces", &self.interfaces.len())
            .field("values", &self.values.len())
            .finish()
    }
}

fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct FileView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    import: Option<&'a str>,
    package: &'a str,
    comment: &'a str,
    imports: &'a BTreeMap<String, String>,
    values: &'a [Value],
    #[serde(skip_serializing_if = "is_empty_slice")]
    interfaces: &'a [Interface],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    structs: Vec<&'a Struct>,
}

impl Serialize for File {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        FileView {
            import: self.import_path(),
            package: &self.package,
            comment: &self.comment,
            imports: &self.imports,
            values: &self.values,
            interfaces: &self.interfaces,
            structs: self.structs.iter().map(Arc::as_ref).collect(),
        }
        .serialize(serializer)
    }
}
