// Astools Core - tree-sitter based Go source models
//
// Scans Go files into a model of structs, interfaces, methods, values and
// imports for code generators, and resolves type names across files and
// packages (siblings, vendor, module root, standard library).

pub mod error;
pub mod extractors;
pub mod indexer;
pub mod language;
pub mod model;
pub mod printer;
pub mod resolver;
pub mod scan;
pub mod utils;

pub use error::{ModelError, Result};
pub use indexer::SymbolIndexer;
pub use model::{
    Arg, File, Interface, Method, Origin, PrimitiveKind, Struct, TypeExpr, TypeKind, Value,
    ValueKind,
};
pub use printer::{Printer, Span};
pub use resolver::{Resolver, SearchPaths, TypeRef};
pub use scan::{scan, scan_source};

