// Go source model
//
// Read-only records describing declarations of one file:
// - types.rs: closed type classification (TypeExpr, TypeKind, PrimitiveKind)
// - args.rs: Arg (field/parameter/result slots) and Value (const/var)
// - decls.rs: Struct, Interface, Method and their Origin
// - file.rs: File, the aggregate for one scanned source file

pub mod args;
pub mod decls;
pub mod file;
pub mod types;

pub use args::{Arg, Value, ValueKind};
pub use decls::{Interface, Method, Origin, Struct};
pub use file::{File, BLANK_ALIAS, DOT_ALIAS};
pub use types::{PrimitiveKind, TypeExpr, TypeKind, ERROR_IDENT};
