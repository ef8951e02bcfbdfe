mod params;
mod specs;
mod type_expr;
mod types;

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use tree_sitter::Node;

use crate::model::{Interface, Origin, Struct, Value, ValueKind};
use crate::printer::Printer;

/// Everything the extractor pulls out of one `source_file` node
#[derive(Debug, Default)]
pub struct Declarations {
    pub comment: String,
    pub imports: BTreeMap<String, String>,
    pub values: Vec<Value>,
    pub interfaces: Vec<Interface>,
    pub structs: Vec<Arc<Struct>>,
}

/// Pending unit of work for the declaration walk
enum Work<'tree> {
    Node(Node<'tree>),
    /// A named type declaration whose type expression is still to be inspected
    Type {
        spec: Node<'tree>,
        name: Node<'tree>,
        ty: Node<'tree>,
    },
}

/// Go declaration extractor that handles top-level constructs:
/// - Structs and interfaces (named type declarations only)
/// - Constants and variables
/// - Imports and the package clause
///
/// Functions and methods with receivers are not part of the model.
pub struct DeclarationExtractor {
    printer: Arc<Printer>,
    origin: Arc<Origin>,
}

impl DeclarationExtractor {
    pub fn new(printer: Arc<Printer>, origin: Arc<Origin>) -> Self {
        Self { printer, origin }
    }

    /// Package name declared by the file, read before the extractor exists
    /// because every Struct carries it in its Origin
    pub fn package_name(printer: &Printer, root: Node) -> Option<String> {
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_clause")?;
        let mut clause_cursor = clause.walk();
        let ident = clause
            .named_children(&mut clause_cursor)
            .find(|child| child.kind() == "package_identifier")?;
        Some(printer.node_text(&ident).to_string())
    }

    /// Walk top-level declarations with an explicit work list.
    ///
    /// The comment of a declaration group is remembered when the group is
    /// popped and given to every struct, interface or value found inside it,
    /// unless the individual spec carries a comment of its own.
    pub fn extract(&self, root: Node) -> Declarations {
        let mut out = Declarations::default();

        let mut cursor = root.walk();
        let top_level: Vec<Node> = root.named_children(&mut cursor).collect();
        let mut stack: Vec<Work> = top_level.into_iter().rev().map(Work::Node).collect();

        let mut last_comment = String::new();
        let mut value_kind = ValueKind::Const;

        while let Some(work) = stack.pop() {
            match work {
                Work::Node(node) => match node.kind() {
                    "package_clause" => {
                        out.comment = self.printer.comment_text(&node);
                    }
                    "type_declaration" | "const_declaration" | "var_declaration"
                    | "import_declaration" => {
                        last_comment = self.printer.comment_text(&node);
                        if node.kind() == "var_declaration" {
                            value_kind = ValueKind::Var;
                        } else if node.kind() == "const_declaration" {
                            value_kind = ValueKind::Const;
                        }
                        let specs = self.group_specs(node);
                        stack.extend(specs.into_iter().rev().map(Work::Node));
                    }
                    "type_spec" | "type_alias" => {
                        match (
                            node.child_by_field_name("name"),
                            node.child_by_field_name("type"),
                        ) {
                            (Some(name), Some(ty)) => stack.push(Work::Type {
                                spec: node,
                                name,
                                ty,
                            }),
                            _ => debug!(
                                "{}: type spec without name or type at byte {}",
                                self.origin.location.display(),
                                node.start_byte()
                            ),
                        }
                    }
                    "const_spec" | "var_spec" => {
                        let comment = self.spec_comment(&node, &last_comment);
                        out.values
                            .extend(self.extract_value_spec(node, value_kind, comment));
                    }
                    "import_spec" => {
                        if let Some((path, alias)) = self.extract_import_spec(node) {
                            out.imports.insert(path, alias);
                        }
                    }
                    _ => {}
                },
                Work::Type { spec, name, ty } => match ty.kind() {
                    "struct_type" => {
                        let comment = self.spec_comment(&spec, &last_comment);
                        out.structs
                            .push(Arc::new(self.extract_struct(name, ty, comment)));
                    }
                    "interface_type" => {
                        let comment = self.spec_comment(&spec, &last_comment);
                        out.interfaces
                            .push(self.extract_interface(name, ty, comment));
                    }
                    "parenthesized_type" => {
                        if let Some(inner) = ty.named_child(0) {
                            stack.push(Work::Type {
                                spec,
                                name,
                                ty: inner,
                            });
                        }
                    }
                    _ => {}
                },
            }
        }

        debug!(
            "Extracted {} structs, {} interfaces, {} values from {}",
            out.structs.len(),
            out.interfaces.len(),
            out.values.len(),
            self.origin.location.display()
        );
        out
    }

    /// Specs of a declaration group, flattening `*_spec_list` wrappers
    fn group_specs<'tree>(&self, group: Node<'tree>) -> Vec<Node<'tree>> {
        let mut specs = Vec::new();
        let mut cursor = group.walk();
        for child in group.named_children(&mut cursor) {
            if child.kind().ends_with("_spec_list") {
                let mut nested = child.walk();
                specs.extend(
                    child
                        .named_children(&mut nested)
                        .filter(|n| n.kind() != "comment"),
                );
            } else if child.kind() != "comment" {
                specs.push(child);
            }
        }
        specs
    }

    /// A spec's own comment wins over its group's comment
    fn spec_comment(&self, spec: &Node, group_comment: &str) -> String {
        let own = self.printer.comment_text(spec);
        if own.is_empty() {
            group_comment.to_string()
        } else {
            own
        }
    }

    pub(crate) fn node_text(&self, node: &Node) -> String {
        self.printer.node_text(node).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_go;
    use crate::model::TypeKind;
    use std::path::{Path, PathBuf};

    fn extract(source: &str) -> Declarations {
        let tree = parse_go(Path::new("t.go"), source).unwrap();
        let root = tree.root_node();
        let printer = Arc::new(Printer::new(source.to_string(), &tree));
        let package = DeclarationExtractor::package_name(&printer, root).unwrap();
        let origin = Arc::new(Origin::new(PathBuf::from("/src/t.go"), package, None));
        DeclarationExtractor::new(printer, origin).extract(root)
    }

    fn names(args: &[crate::model::Arg]) -> Vec<&str> {
        args.iter().map(|arg| arg.name.as_str()).collect()
    }

    #[test]
    fn test_struct_fields_embedded_and_grouped() {
        let decls = extract(
            "package p\n\ntype Shape struct {\n\t*Base\n\tio.Reader\n\tX, Y float32 `json:\"pos\"`\n}\n",
        );
        let shape = &decls.structs[0];
        assert_eq!(names(&shape.fields), vec!["arg0", "arg1", "X", "Y"]);

        let base = &shape.fields[0];
        assert_eq!(base.golang_type(), "*Base");
        assert!(base.is_pointer());
        assert_eq!(base.ty.pointee().unwrap().kind, TypeKind::Named {
            package: None,
            name: "Base".to_string(),
        });

        assert_eq!(shape.fields[1].go_pkg_type(), ("io", "Reader"));

        for field in &shape.fields[2..] {
            assert_eq!(field.golang_type(), "float32");
            assert!(field.is_float());
            assert_eq!(field.tag.as_deref(), Some("`json:\"pos\"`"));
        }
        assert_eq!(shape.fields[0].tag, None);
    }

    #[test]
    fn test_unnamed_params_and_results() {
        let decls = extract(
            "package p\n\ntype Writer interface {\n\tWrite([]byte, int) (n int, err error)\n\tFlush() error\n}\n",
        );
        let writer = &decls.interfaces[0];

        let write = writer.method("Write").unwrap();
        assert_eq!(names(&write.inputs), vec!["arg0", "arg1"]);
        assert!(write.inputs[0].is_slice());
        assert_eq!(names(&write.outputs), vec!["n", "err"]);
        assert!(write.outputs[1].is_error());

        let flush = writer.method("Flush").unwrap();
        assert_eq!(names(&flush.outputs), vec!["ret0"]);
        assert!(flush.outputs[0].is_error());
    }

    #[test]
    fn test_variadic_parameter_keeps_ellipsis() {
        let decls = extract(
            "package p\n\ntype Logger interface {\n\tLog(format string, args ...any)\n\tPrintf(string, ...any)\n}\n",
        );
        let logger = &decls.interfaces[0];

        let log = logger.method("Log").unwrap();
        assert_eq!(names(&log.inputs), vec!["format", "args"]);
        let args = &log.inputs[1];
        assert_eq!(args.golang_type(), "...any");
        match &args.ty.kind {
            TypeKind::Variadic(inner) => assert_eq!(inner.text(args.printer()), "any"),
            other => panic!("expected variadic, got {other:?}"),
        }

        let printf = logger.method("Printf").unwrap();
        assert_eq!(names(&printf.inputs), vec!["arg0", "arg1"]);
        assert_eq!(printf.inputs[1].golang_type(), "...any");
    }

    #[test]
    fn test_embedded_interfaces_are_skipped() {
        let decls = extract(
            "package p\n\ntype ReadCloser interface {\n\tio.Reader\n\tStringer\n\tClose() error\n}\n",
        );
        let methods: Vec<&str> = decls.interfaces[0]
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(methods, vec!["Close"]);
    }

    #[test]
    fn test_missing_initializers_and_blank_names() {
        let decls = extract(
            "package p\n\nconst (\n\tA = iota\n\tB\n\t_\n\tC\n)\n\nvar x, y = 1\n\nvar _ = 3\n",
        );
        let summary: Vec<(&str, &str, bool)> = decls
            .values
            .iter()
            .map(|v| (v.name.as_str(), v.golang_value(), v.is_const()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", "iota", true),
                ("B", "", true),
                ("C", "", true),
                ("x", "1", false),
                ("y", "", false),
            ]
        );
        assert!(decls.values[1].initializer.is_none());
        assert!(decls.values[4].initializer.is_none());
    }

    #[test]
    fn test_own_comment_overrides_group_comment() {
        let decls = extract(
            "package p\n\n// Shapes share this\ntype (\n\t// Square has its own doc\n\tSquare struct{ Side int }\n\tCircle struct{ R int }\n)\n\n// Limits\nconst (\n\tMin = 1\n\t// Max is inclusive\n\tMax = 9\n)\n",
        );
        assert_eq!(decls.structs[0].name, "Square");
        assert_eq!(decls.structs[0].comment, "Square has its own doc");
        assert_eq!(decls.structs[1].name, "Circle");
        assert_eq!(decls.structs[1].comment, "Shapes share this");

        assert_eq!(decls.values[0].comment, "Limits");
        assert_eq!(decls.values[1].comment, "Max is inclusive");
    }

    #[test]
    fn test_alias_and_generic_structs() {
        let decls = extract(
            "package p\n\ntype Point = struct {\n\tX, Y int\n}\n\ntype Name = string\n\ntype Pair[K comparable, V any] struct {\n\tKey K\n\tVal V\n}\n\nfunc (p Pair[K, V]) First() K { return p.Key }\n",
        );
        let names: Vec<&str> = decls.structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Point", "Pair"]);
        assert_eq!(decls.structs[0].fields.len(), 2);

        let pair = &decls.structs[1];
        assert_eq!(pair.field("Key").unwrap().golang_type(), "K");
        assert_eq!(pair.field("Val").unwrap().golang_type(), "V");
        assert!(decls.interfaces.is_empty());
    }

    #[test]
    fn test_imports_and_package_comment() {
        let decls = extract(
            "// Package p does things.\npackage p\n\nimport (\n\t\"fmt\"\n\tstr \"strings\"\n\t_ \"embed\"\n\t. \"math\"\n)\n\nimport `os`\n",
        );
        assert_eq!(decls.comment, "Package p does things.");

        let imports: Vec<(&str, &str)> = decls
            .imports
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
            .collect();
        assert_eq!(
            imports,
            vec![
                ("embed", "_"),
                ("fmt", ""),
                ("math", "."),
                ("os", ""),
                ("strings", "str"),
            ]
        );
    }
}
