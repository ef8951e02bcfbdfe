// Struct, Interface and Method records

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::args::Arg;
use crate::printer::{Printer, Span};

/// Identity of the file a declaration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub location: PathBuf,
    pub package: String,
    /// Import path the file was first reached through; set at most once
    import_path: OnceCell<String>,
}

impl Origin {
    pub fn new(location: PathBuf, package: String, import_path: Option<&str>) -> Self {
        let origin = Self {
            location,
            package,
            import_path: OnceCell::new(),
        };
        if let Some(path) = import_path {
            origin.assign_import_path(path);
        }
        origin
    }

    /// Directory holding the file; `.` for a bare file name
    pub fn directory(&self) -> &Path {
        match self.location.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn import_path(&self) -> Option<&str> {
        self.import_path.get().map(String::as_str)
    }

    /// Record the import path; later assignments keep the first one
    pub(crate) fn assign_import_path(&self, path: &str) {
        let _ = self.import_path.set(path.to_string());
    }
}

/// A named top-level struct type
#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Struct {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub fields: Vec<Arg>,
    /// Span of the `struct { ... }` expression
    #[serde(skip)]
    pub definition: Span,
    #[serde(skip)]
    origin: Arc<Origin>,
    #[serde(skip)]
    printer: Arc<Printer>,
}

impl Struct {
    pub fn new(
        name: impl Into<String>,
        comment: String,
        fields: Vec<Arg>,
        definition: Span,
        origin: Arc<Origin>,
        printer: Arc<Printer>,
    ) -> Self {
        Self {
            name: name.into(),
            comment,
            fields,
            definition,
            origin,
            printer,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Arg> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Verbatim `struct { ... }` text
    pub fn definition_text(&self) -> &str {
        self.printer.text(self.definition)
    }

    /// Declaration rebuilt as `type Name struct { ... }`
    pub fn golang(&self) -> String {
        format!("type {} {}", self.name, self.definition_text())
    }

    pub fn origin(&self) -> &Arc<Origin> {
        &self.origin
    }

    pub fn import_path(&self) -> Option<&str> {
        self.origin.import_path()
    }

    pub fn package(&self) -> &str {
        &self.origin.package
    }
}

impl fmt::Debug for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Struct")
            .field("name", &self.name)
            .field("comment", &self.comment)
            .field("fields", &self.fields)
            .field("origin", &self.origin)
            .finish()
    }
}

/// One method of an interface
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Method {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(rename = "In", skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Arg>,
    #[serde(rename = "Out", skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Arg>,
}

impl Method {
    pub fn has_input(&self) -> bool {
        !self.inputs.is_empty()
    }

    pub fn has_output(&self) -> bool {
        !self.outputs.is_empty()
    }

    pub fn error_outputs(&self) -> Vec<&Arg> {
        self.outputs.iter().filter(|arg| arg.is_error()).collect()
    }

    pub fn non_error_outputs(&self) -> Vec<&Arg> {
        self.outputs.iter().filter(|arg| !arg.is_error()).collect()
    }
}

/// A named top-level interface type. Embedded interfaces are not flattened.
#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Interface {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(skip)]
    pub definition: Span,
    #[serde(skip)]
    printer: Arc<Printer>,
}

impl Interface {
    pub fn new(
        name: impl Into<String>,
        comment: String,
        methods: Vec<Method>,
        definition: Span,
        printer: Arc<Printer>,
    ) -> Self {
        Self {
            name: name.into(),
            methods,
            comment,
            definition,
            printer,
        }
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn definition_text(&self) -> &str {
        self.printer.text(self.definition)
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name)
            .field("comment", &self.comment)
            .field("methods", &self.methods)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_of_bare_file_name() {
        let origin = Origin::new(PathBuf::from("main.go"), "main".to_string(), None);
        assert_eq!(origin.directory(), Path::new("."));

        let nested = Origin::new(PathBuf::from("/src/app/main.go"), "main".to_string(), None);
        assert_eq!(nested.directory(), Path::new("/src/app"));
    }

    #[test]
    fn test_import_path_first_assignment_wins() {
        let origin = Origin::new(PathBuf::from("/a/b.go"), "b".to_string(), Some("example.com/a"));
        origin.assign_import_path("other/a");
        assert_eq!(origin.import_path(), Some("example.com/a"));
    }
}
