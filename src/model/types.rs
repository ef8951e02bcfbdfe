// Type descriptors
//
// A TypeExpr is the span of one Go type expression plus its classification,
// decided once when the syntax node is visited. Queries only look at the
// outermost layer; callers unwrap explicitly.

use serde::Serialize;

use crate::printer::{Printer, Span};

/// Name of Go's builtin error interface
pub const ERROR_IDENT: &str = "error";

/// Builtin primitive families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Integer,
    Float,
    String,
    Boolean,
}

impl PrimitiveKind {
    /// Classify an identifier by exact builtin name. Declared aliases of
    /// these names are not recognized.
    pub fn from_ident(name: &str) -> Option<Self> {
        match name {
            "byte" | "rune" | "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8"
            | "uint16" | "uint32" | "uint64" | "uintptr" => Some(Self::Integer),
            "float32" | "float64" => Some(Self::Float),
            "string" => Some(Self::String),
            "bool" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// Outermost syntactic layer of a type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`
    Array(Box<TypeExpr>),
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `...T` in a parameter list
    Variadic(Box<TypeExpr>),
    Primitive(PrimitiveKind),
    /// The bare `error` identifier
    Error,
    /// `T` or `pkg.T`
    Named {
        package: Option<String>,
        name: String,
    },
    /// struct, interface, func, chan, generic instantiation, parenthesized
    Other,
}

/// A classified type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub span: Span,
    pub kind: TypeKind,
}

impl TypeExpr {
    pub fn new(span: Span, kind: TypeKind) -> Self {
        Self { span, kind }
    }

    pub fn text<'p>(&self, printer: &'p Printer) -> &'p str {
        printer.text(self.span)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// Slice or fixed-size array
    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Slice(_) | TypeKind::Array(_))
    }

    pub fn is_slice(&self) -> bool {
        matches!(self.kind, TypeKind::Slice(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, TypeKind::Map { .. })
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_simple(&self) -> bool {
        self.primitive().is_some()
    }

    pub fn is_integer(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::Integer)
    }

    pub fn is_float(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::Float)
    }

    pub fn is_string(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::String)
    }

    pub fn is_boolean(&self) -> bool {
        self.primitive() == Some(PrimitiveKind::Boolean)
    }

    pub fn is_error(&self) -> bool {
        self.kind == TypeKind::Error
    }

    /// Element type of a slice or array
    pub fn element(&self) -> Option<&TypeExpr> {
        match &self.kind {
            TypeKind::Slice(elem) | TypeKind::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// Target of a pointer
    pub fn pointee(&self) -> Option<&TypeExpr> {
        match &self.kind {
            TypeKind::Pointer(inner) => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeExpr {
        let kind = match name {
            ERROR_IDENT => TypeKind::Error,
            _ => PrimitiveKind::from_ident(name)
                .map(TypeKind::Primitive)
                .unwrap_or_else(|| TypeKind::Named {
                    package: None,
                    name: name.to_string(),
                }),
        };
        TypeExpr::new(Span::new(0, name.len()), kind)
    }

    #[test]
    fn test_primitive_names() {
        assert_eq!(PrimitiveKind::from_ident("uint32"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::from_ident("rune"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::from_ident("float64"), Some(PrimitiveKind::Float));
        assert_eq!(PrimitiveKind::from_ident("string"), Some(PrimitiveKind::String));
        assert_eq!(PrimitiveKind::from_ident("bool"), Some(PrimitiveKind::Boolean));
        assert_eq!(PrimitiveKind::from_ident("complex128"), None);
        assert_eq!(PrimitiveKind::from_ident("MyInt"), None);
    }

    #[test]
    fn test_outermost_layer_only() {
        let ptr_to_slice = TypeExpr::new(
            Span::new(0, 6),
            TypeKind::Pointer(Box::new(TypeExpr::new(
                Span::new(1, 6),
                TypeKind::Slice(Box::new(named("int"))),
            ))),
        );
        assert!(ptr_to_slice.is_pointer());
        assert!(!ptr_to_slice.is_array());
        assert!(ptr_to_slice.element().is_none());
        assert!(ptr_to_slice.pointee().unwrap().is_slice());
    }

    #[test]
    fn test_error_only_bare_ident() {
        assert!(named("error").is_error());
        let ptr = TypeExpr::new(Span::new(0, 6), TypeKind::Pointer(Box::new(named("error"))));
        assert!(!ptr.is_error());
        let qualified = TypeExpr::new(
            Span::new(0, 8),
            TypeKind::Named {
                package: Some("x".to_string()),
                name: "error".to_string(),
            },
        );
        assert!(!qualified.is_error());

        let slice = TypeExpr::new(Span::new(0, 7), TypeKind::Slice(Box::new(named("error"))));
        assert!(!slice.is_error());
        assert!(slice.element().unwrap().is_error());

        let map = TypeExpr::new(
            Span::new(0, 16),
            TypeKind::Map {
                key: Box::new(named("string")),
                value: Box::new(named("error")),
            },
        );
        assert!(!map.is_error());
        assert!(map.is_map());
        assert!(map.element().is_none());
    }
}
