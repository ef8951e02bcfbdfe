// External symbol indexing
//
// Some callers keep their own index of Go symbols (gopls, a ctags dump, a
// generated table). The resolver hands type references to it to obtain a
// fully qualified name without scanning anything itself.

use crate::model::File;

/// Maps a type reference as written in `file` to a qualified name such as
/// `github.com/shopspring/decimal.Decimal`
pub trait SymbolIndexer {
    fn qualify(&self, type_ref: &str, file: &File) -> Option<String>;
}

impl<F> SymbolIndexer for F
where
    F: Fn(&str, &File) -> Option<String>,
{
    fn qualify(&self, type_ref: &str, file: &File) -> Option<String> {
        self(type_ref, file)
    }
}
