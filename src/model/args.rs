// Arg and Value records
//
// Both hold a shared handle to the file's Printer so type text is rendered
// lazily from the original bytes.

use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::types::{PrimitiveKind, TypeExpr};
use crate::printer::{Printer, Span};

/// A named, typed slot: struct field, method parameter or method result
#[derive(Clone)]
pub struct Arg {
    pub name: String,
    pub ty: TypeExpr,
    pub comment: String,
    /// Raw struct tag including its quotes, fields only
    pub tag: Option<String>,
    printer: Arc<Printer>,
}

impl Arg {
    pub fn new(name: impl Into<String>, ty: TypeExpr, comment: String, printer: Arc<Printer>) -> Self {
        Self {
            name: name.into(),
            ty,
            comment,
            tag: None,
            printer,
        }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    /// Verbatim type text
    pub fn golang_type(&self) -> &str {
        self.ty.text(&self.printer)
    }

    /// Split `pkg.Name` into `("pkg", "Name")`; unqualified types give `""`
    pub fn go_pkg_type(&self) -> (&str, &str) {
        let text = self.golang_type();
        match text.split_once('.') {
            Some((pkg, name)) => (pkg, name),
            None => ("", text),
        }
    }

    pub fn printer(&self) -> &Arc<Printer> {
        &self.printer
    }

    pub fn is_pointer(&self) -> bool {
        self.ty.is_pointer()
    }

    pub fn is_array(&self) -> bool {
        self.ty.is_array()
    }

    pub fn is_slice(&self) -> bool {
        self.ty.is_slice()
    }

    pub fn is_map(&self) -> bool {
        self.ty.is_map()
    }

    pub fn is_simple(&self) -> bool {
        self.ty.is_simple()
    }

    pub fn is_integer(&self) -> bool {
        self.ty.is_integer()
    }

    pub fn is_float(&self) -> bool {
        self.ty.is_float()
    }

    pub fn is_string(&self) -> bool {
        self.ty.is_string()
    }

    pub fn is_boolean(&self) -> bool {
        self.ty.is_boolean()
    }

    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        self.ty.primitive()
    }

    /// Element of a slice or array as an unnamed Arg; `None` for other types
    pub fn array_item(&self) -> Option<Arg> {
        self.ty
            .element()
            .map(|elem| Arg::new("", elem.clone(), String::new(), Arc::clone(&self.printer)))
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("name", &self.name)
            .field("type", &self.golang_type())
            .field("comment", &self.comment)
            .field("tag", &self.tag)
            .finish()
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.golang_type() == other.golang_type()
            && self.comment == other.comment
            && self.tag == other.tag
    }
}

fn is_empty_str(text: &&str) -> bool {
    text.is_empty()
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ArgView<'a> {
    name: &'a str,
    golang_type: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    comment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    is_error: bool,
}

impl Serialize for Arg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ArgView {
            name: &self.name,
            golang_type: self.golang_type(),
            comment: &self.comment,
            tag: self.tag.as_deref(),
            is_error: self.is_error(),
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Const,
    Var,
}

/// A package level constant or variable
#[derive(Clone)]
pub struct Value {
    pub name: String,
    pub kind: ValueKind,
    pub ty: Option<TypeExpr>,
    pub initializer: Option<Span>,
    pub comment: String,
    printer: Arc<Printer>,
}

impl Value {
    pub fn new(
        name: impl Into<String>,
        kind: ValueKind,
        ty: Option<TypeExpr>,
        initializer: Option<Span>,
        comment: String,
        printer: Arc<Printer>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            initializer,
            comment,
            printer,
        }
    }

    /// Declared type text, empty when the type is inferred
    pub fn golang_type(&self) -> &str {
        self.ty
            .as_ref()
            .map(|ty| ty.text(&self.printer))
            .unwrap_or("")
    }

    /// Initializer text, empty when absent
    pub fn golang_value(&self) -> &str {
        self.initializer
            .map(|span| self.printer.text(span))
            .unwrap_or("")
    }

    pub fn is_error(&self) -> bool {
        self.ty.as_ref().is_some_and(TypeExpr::is_error)
    }

    pub fn is_const(&self) -> bool {
        self.kind == ValueKind::Const
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("type", &self.golang_type())
            .field("value", &self.golang_value())
            .field("comment", &self.comment)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ValueView<'a> {
    name: &'a str,
    kind: ValueKind,
    golang_type: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    comment: &'a str,
    golang_value: &'a str,
    is_error: bool,
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ValueView {
            name: &self.name,
            kind: self.kind,
            golang_type: self.golang_type(),
            comment: &self.comment,
            golang_value: self.golang_value(),
            is_error: self.is_error(),
        }
        .serialize(serializer)
    }
}
