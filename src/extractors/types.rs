use std::sync::Arc;
use tree_sitter::Node;

use crate::model::{Interface, Method, Struct};
use crate::printer::Span;

/// Type declaration extraction for Go (structs and interfaces)
impl super::DeclarationExtractor {
    pub(super) fn extract_struct(&self, name: Node, struct_type: Node, comment: String) -> Struct {
        let mut cursor = struct_type.walk();
        let fields = struct_type
            .named_children(&mut cursor)
            .find(|child| child.kind() == "field_declaration_list")
            .map(|list| self.field_args(list))
            .unwrap_or_default();

        Struct::new(
            self.node_text(&name),
            comment,
            fields,
            Span::of(&struct_type),
            Arc::clone(&self.origin),
            Arc::clone(&self.printer),
        )
    }

    /// Methods are kept in source order. Embedded interfaces and type set
    /// elements are skipped, not flattened.
    pub(super) fn extract_interface(
        &self,
        name: Node,
        interface_type: Node,
        comment: String,
    ) -> Interface {
        let mut methods = Vec::new();
        let mut cursor = interface_type.walk();
        for child in interface_type.named_children(&mut cursor) {
            match child.kind() {
                // method_spec is the pre-generics grammar name
                "method_elem" | "method_spec" => {
                    if let Some(method) = self.extract_method(child) {
                        methods.push(method);
                    }
                }
                _ => {}
            }
        }

        Interface::new(
            self.node_text(&name),
            comment,
            methods,
            Span::of(&interface_type),
            Arc::clone(&self.printer),
        )
    }

    fn extract_method(&self, node: Node) -> Option<Method> {
        let name = node.child_by_field_name("name")?;

        let inputs = node
            .child_by_field_name("parameters")
            .map(|params| self.parameter_args(params, "arg"))
            .unwrap_or_default();
        let outputs = node
            .child_by_field_name("result")
            .map(|result| self.result_args(result))
            .unwrap_or_default();

        Some(Method {
            name: self.node_text(&name),
            comment: self.printer.comment_text(&node),
            inputs,
            outputs,
        })
    }
}
