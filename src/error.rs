use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning Go files and resolving types
#[derive(Debug, Error)]
pub enum ModelError {
    /// Source file missing or unreadable
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not syntactically valid Go
    #[error("parse {}: syntax error at {line}:{column}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("parse {}: missing package clause", path.display())]
    MissingPackage { path: PathBuf },

    #[error("parser produced no tree for {}", path.display())]
    NoTree { path: PathBuf },

    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// No declaration matched; carries the name exactly as requested
    #[error("type {name} can't be extracted")]
    TypeNotFound { name: String },

    #[error("cyclic reference while resolving {name} in {}", dir.display())]
    CyclicReference { dir: PathBuf, name: String },

    /// Directory walking failures
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::TypeNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
