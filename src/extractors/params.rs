use std::sync::Arc;
use tree_sitter::Node;

use crate::model::{Arg, TypeExpr, TypeKind};
use crate::printer::Span;

/// Field and parameter lists → ordered Args
///
/// Unnamed slots are called `<prefix><i>` where `i` is the zero-based index
/// of the declaration inside its list, so `func(int, string)` yields
/// `arg0, arg1` and `(bool, error)` results yield `ret0, ret1`.
impl super::DeclarationExtractor {
    pub(super) fn field_args(&self, list: Node) -> Vec<Arg> {
        // field_declaration
        //   field_identifier* (X, Y float32 share one declaration)
        //   type
        //   [optional] field_tag
        // embedded fields carry no names and an optional leading '*'
        let mut args = Vec::new();
        let mut cursor = list.walk();
        let declarations = list
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "field_declaration");

        for (index, field) in declarations.enumerate() {
            let Some(type_node) = field.child_by_field_name("type") else {
                continue;
            };
            let comment = self.printer.comment_text(&field);
            let tag = field
                .child_by_field_name("tag")
                .map(|tag| self.node_text(&tag));

            let mut name_cursor = field.walk();
            let names: Vec<Node> = field
                .children_by_field_name("name", &mut name_cursor)
                .filter(|name| name.kind() == "field_identifier")
                .collect();

            if names.is_empty() {
                let ty = match field.child(0).filter(|first| first.kind() == "*") {
                    Some(star) => TypeExpr::new(
                        Span::covering(&star, &type_node),
                        TypeKind::Pointer(Box::new(self.classify_type(type_node))),
                    ),
                    None => self.classify_type(type_node),
                };
                args.push(
                    Arg::new(format!("arg{index}"), ty, comment, Arc::clone(&self.printer))
                        .with_tag(tag),
                );
                continue;
            }

            let ty = self.classify_type(type_node);
            for name in names {
                args.push(
                    Arg::new(
                        self.node_text(&name),
                        ty.clone(),
                        comment.clone(),
                        Arc::clone(&self.printer),
                    )
                    .with_tag(tag.clone()),
                );
            }
        }
        args
    }

    pub(super) fn parameter_args(&self, list: Node, prefix: &str) -> Vec<Arg> {
        let mut args = Vec::new();
        let mut cursor = list.walk();
        let declarations = list.named_children(&mut cursor).filter(|child| {
            matches!(
                child.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            )
        });

        for (index, param) in declarations.enumerate() {
            let Some(ty) = self.parameter_type(param) else {
                continue;
            };
            let comment = self.printer.comment_text(&param);

            let mut name_cursor = param.walk();
            let names: Vec<Node> = param
                .children_by_field_name("name", &mut name_cursor)
                .filter(|name| name.kind() == "identifier")
                .collect();

            if names.is_empty() {
                args.push(Arg::new(
                    format!("{prefix}{index}"),
                    ty,
                    comment,
                    Arc::clone(&self.printer),
                ));
                continue;
            }

            for name in names {
                args.push(Arg::new(
                    self.node_text(&name),
                    ty.clone(),
                    comment.clone(),
                    Arc::clone(&self.printer),
                ));
            }
        }
        args
    }

    /// Results are either a parameter list or a single bare type
    pub(super) fn result_args(&self, result: Node) -> Vec<Arg> {
        if result.kind() == "parameter_list" {
            return self.parameter_args(result, "ret");
        }
        vec![Arg::new(
            "ret0",
            self.classify_type(result),
            String::new(),
            Arc::clone(&self.printer),
        )]
    }

    /// Variadic parameters keep the `...` inside their span
    fn parameter_type(&self, param: Node) -> Option<TypeExpr> {
        let type_node = param.child_by_field_name("type")?;
        if param.kind() != "variadic_parameter_declaration" {
            return Some(self.classify_type(type_node));
        }

        let mut cursor = param.walk();
        let ellipsis = param
            .children(&mut cursor)
            .find(|child| child.kind() == "...")?;
        Some(TypeExpr::new(
            Span::covering(&ellipsis, &type_node),
            TypeKind::Variadic(Box::new(self.classify_type(type_node))),
        ))
    }
}
