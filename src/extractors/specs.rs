use std::sync::Arc;
use tracing::debug;
use tree_sitter::Node;

use crate::model::{Value, ValueKind, BLANK_ALIAS};
use crate::printer::Span;

/// Extraction of import, variable, and constant specifications
impl super::DeclarationExtractor {
    /// `(path, alias)` with the path unquoted; alias is empty for default imports
    pub(super) fn extract_import_spec(&self, node: Node) -> Option<(String, String)> {
        let path = node.child_by_field_name("path")?;
        let raw = self.node_text(&path);
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|p| p.strip_suffix('"'))
            .or_else(|| raw.strip_prefix('`').and_then(|p| p.strip_suffix('`')))
            .unwrap_or(raw.as_str())
            .to_string();

        let alias = node
            .child_by_field_name("name")
            .map(|name| self.node_text(&name))
            .unwrap_or_default();

        Some((unquoted, alias))
    }

    /// One Value per declared name; the i-th name takes the i-th initializer.
    ///
    /// Missing initializers (iota continuation lines, short expression lists)
    /// leave `initializer` empty instead of failing the scan.
    pub(super) fn extract_value_spec(
        &self,
        node: Node,
        kind: ValueKind,
        comment: String,
    ) -> Vec<Value> {
        let mut name_cursor = node.walk();
        let names: Vec<Node> = node
            .children_by_field_name("name", &mut name_cursor)
            .filter(|name| name.kind() == "identifier")
            .collect();

        let ty = node
            .child_by_field_name("type")
            .map(|ty| self.classify_type(ty));

        let initializers: Vec<Span> = node
            .child_by_field_name("value")
            .map(|list| {
                let mut cursor = list.walk();
                list.named_children(&mut cursor)
                    .filter(|expr| expr.kind() != "comment")
                    .map(|expr| Span::of(&expr))
                    .collect()
            })
            .unwrap_or_default();

        if !initializers.is_empty() && initializers.len() < names.len() {
            debug!(
                "{}: {} names but {} initializers at byte {}",
                self.origin.location.display(),
                names.len(),
                initializers.len(),
                node.start_byte()
            );
        }

        names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let name = self.node_text(name);
                if name == BLANK_ALIAS {
                    return None;
                }
                Some(Value::new(
                    name,
                    kind,
                    ty.clone(),
                    initializers.get(index).copied(),
                    comment.clone(),
                    Arc::clone(&self.printer),
                ))
            })
            .collect()
    }
}
