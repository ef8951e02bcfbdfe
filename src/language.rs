//! Language Support - tree-sitter configuration for Go
//!
//! This module is the single place that knows which grammar backs the model.
//! Everything else receives an already-parsed `Tree`.

use once_cell::sync::Lazy;
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::{ModelError, Result};

static GO_LANGUAGE: Lazy<Language> = Lazy::new(|| tree_sitter_go::LANGUAGE.into());

/// Get the tree-sitter Go language
pub fn go_language() -> &'static Language {
    &GO_LANGUAGE
}

/// Parse Go source into a syntax tree.
///
/// Fails when the grammar can't be loaded, when tree-sitter gives up, or when
/// the resulting tree contains error or missing nodes. A tree with errors is
/// never handed to the extractor.
pub fn parse_go(path: &Path, content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(go_language())?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| ModelError::NoTree {
            path: path.to_path_buf(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let bad = first_error_node(root).unwrap_or(root);
        let position = bad.start_position();
        return Err(ModelError::Parse {
            path: path.to_path_buf(),
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    Ok(tree)
}

/// Find the first ERROR or MISSING node in document order
fn first_error_node(root: Node) -> Option<Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_source() {
        let tree = parse_go(Path::new("ok.go"), "package ok\n\ntype A struct{}\n").unwrap();
        assert_eq!(tree.root_node().kind(), "source_file");
    }

    #[test]
    fn test_parse_reports_error_position() {
        let err = parse_go(Path::new("bad.go"), "package bad\n\ntype A struct {\n").unwrap_err();
        match err {
            ModelError::Parse { path, line, .. } => {
                assert_eq!(path, Path::new("bad.go"));
                assert!(line >= 3, "error should be reported at or after the open struct");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
