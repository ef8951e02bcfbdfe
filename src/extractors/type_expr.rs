use tree_sitter::Node;

use crate::model::{PrimitiveKind, TypeExpr, TypeKind, ERROR_IDENT};
use crate::printer::Span;

/// Classification of type expression nodes, done once per node
impl super::DeclarationExtractor {
    pub(super) fn classify_type(&self, node: Node) -> TypeExpr {
        TypeExpr::new(Span::of(&node), self.type_kind(node))
    }

    fn type_kind(&self, node: Node) -> TypeKind {
        match node.kind() {
            // older grammars emit primitive_type for builtin names
            "type_identifier" | "primitive_type" => {
                let name = self.node_text(&node);
                if name == ERROR_IDENT {
                    TypeKind::Error
                } else if let Some(kind) = PrimitiveKind::from_ident(&name) {
                    TypeKind::Primitive(kind)
                } else {
                    TypeKind::Named {
                        package: None,
                        name,
                    }
                }
            }
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => TypeKind::Named {
                        package: Some(self.node_text(&package)),
                        name: self.node_text(&name),
                    },
                    _ => TypeKind::Other,
                }
            }
            "pointer_type" => match node.named_child(0) {
                Some(inner) => TypeKind::Pointer(Box::new(self.classify_type(inner))),
                None => TypeKind::Other,
            },
            "slice_type" => match node.child_by_field_name("element") {
                Some(elem) => TypeKind::Slice(Box::new(self.classify_type(elem))),
                None => TypeKind::Other,
            },
            "array_type" | "implicit_length_array_type" => {
                match node.child_by_field_name("element") {
                    Some(elem) => TypeKind::Array(Box::new(self.classify_type(elem))),
                    None => TypeKind::Other,
                }
            }
            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => TypeKind::Map {
                    key: Box::new(self.classify_type(key)),
                    value: Box::new(self.classify_type(value)),
                },
                _ => TypeKind::Other,
            },
            _ => TypeKind::Other,
        }
    }
}
