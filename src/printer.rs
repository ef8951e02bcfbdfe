//! Source Printer
//!
//! Maps syntax nodes back to the exact bytes they came from and keeps the
//! comment association for one file. The association is computed once while
//! the tree is alive; afterwards only spans are needed.

use serde::Serialize;
use std::collections::HashMap;
use tree_sitter::{Node, Tree};

/// Byte range `[start, end)` into one file's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn of(node: &Node) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }

    /// Span from the start of `first` to the end of `last`
    pub fn covering(first: &Node, last: &Node) -> Self {
        Self::new(first.start_byte(), last.end_byte())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw file contents plus node → comment association
#[derive(Debug)]
pub struct Printer {
    source: String,
    comments: HashMap<usize, Vec<Span>>,
}

impl Printer {
    pub fn new(source: String, tree: &Tree) -> Self {
        let comments = associate_comments(tree.root_node());
        Self { source, comments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Exact source text of a span; empty if the span is out of range
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or("")
    }

    pub fn node_text(&self, node: &Node) -> &str {
        self.text(Span::of(node))
    }

    /// Comment blocks attached to `node`, in source order
    pub fn comment_spans(&self, node: &Node) -> &[Span] {
        self.comments
            .get(&node.id())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cleaned text of every comment attached to `node`, one line per line
    pub fn comment_text(&self, node: &Node) -> String {
        let lines: Vec<String> = self
            .comment_spans(node)
            .iter()
            .flat_map(|span| comment_lines(self.text(*span)))
            .collect();
        normalize_blank_lines(lines).join("\n")
    }
}

/// Walk the whole tree once and bind every comment to a sibling node.
///
/// A comment that starts on the row where the previous sibling ends trails
/// that sibling. Any other comment leads the next non-comment sibling.
/// Comments with no following sibling (end of a block) stay unattached.
fn associate_comments(root: Node) -> HashMap<usize, Vec<Span>> {
    let mut comments: HashMap<usize, Vec<Span>> = HashMap::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();

        let mut previous: Option<Node> = None;
        let mut pending: Vec<Node> = Vec::new();
        for child in &children {
            if child.kind() == "comment" {
                let trails_previous = pending.is_empty()
                    && previous
                        .is_some_and(|prev| prev.end_position().row == child.start_position().row);
                if let (true, Some(prev)) = (trails_previous, previous) {
                    comments.entry(prev.id()).or_default().push(Span::of(child));
                } else {
                    pending.push(*child);
                }
                continue;
            }

            if !pending.is_empty() {
                let entry = comments.entry(child.id()).or_default();
                entry.extend(pending.drain(..).map(|c| Span::of(&c)));
            }
            previous = Some(*child);
        }

        stack.extend(children.into_iter().filter(|c| c.kind() != "comment"));
    }

    comments
}

/// Strip comment markers the way Go doc tooling does
fn comment_lines(raw: &str) -> Vec<String> {
    if let Some(body) = raw.strip_prefix("//") {
        // compiler directives are not documentation
        if body.starts_with("go:") || body.starts_with("line ") {
            return Vec::new();
        }
        let body = body.strip_prefix(' ').unwrap_or(body);
        return vec![body.trim_end().to_string()];
    }

    let body = raw
        .strip_prefix("/*")
        .and_then(|b| b.strip_suffix("*/"))
        .unwrap_or(raw);
    body.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Drop leading and trailing blank lines, collapse inner runs to one
fn normalize_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && out.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::parse_go;
    use std::path::Path;

    fn printer_for(source: &str) -> (Printer, Tree) {
        let tree = parse_go(Path::new("t.go"), source).unwrap();
        (Printer::new(source.to_string(), &tree), tree)
    }

    #[test]
    fn test_text_is_exact_substring() {
        let source = "package p\n\ntype A struct {\n\tM  map[string]   []int\n}\n";
        let (printer, tree) = printer_for(source);
        let root = tree.root_node();
        let decl = root.named_child(1).unwrap();
        assert_eq!(decl.kind(), "type_declaration");
        assert_eq!(
            printer.node_text(&decl),
            "type A struct {\n\tM  map[string]   []int\n}"
        );
        let start = source.find("map[").unwrap();
        let span = Span::new(start, start + "map[string]   []int".len());
        assert_eq!(printer.text(span), "map[string]   []int");
    }

    #[test]
    fn test_out_of_range_span_is_empty() {
        let (printer, _tree) = printer_for("package p\n");
        assert_eq!(printer.text(Span::new(5, 500)), "");
    }

    #[test]
    fn test_leading_and_trailing_comments() {
        let source = "package p\n\n// Doc line one\n// Doc line two\nconst A = 1 // trailing\n\nconst B = 2\n";
        let (printer, tree) = printer_for(source);
        let root = tree.root_node();
        let mut cursor = root.walk();
        let decls: Vec<Node> = root
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "const_declaration")
            .collect();
        assert_eq!(
            printer.comment_text(&decls[0]),
            "Doc line one\nDoc line two\ntrailing"
        );
        assert_eq!(printer.comment_text(&decls[1]), "");
    }

    #[test]
    fn test_comment_lines_cleanup() {
        assert_eq!(comment_lines("// hello  "), vec!["hello"]);
        assert_eq!(comment_lines("//tight"), vec!["tight"]);
        assert!(comment_lines("//go:generate stringer").is_empty());
        assert_eq!(comment_lines("/* a\n b */"), vec![" a", " b"]);
    }

    #[test]
    fn test_blank_lines_trimmed() {
        let lines = vec![
            String::new(),
            "Some package description".to_string(),
            String::new(),
        ];
        assert_eq!(normalize_blank_lines(lines), vec!["Some package description"]);
    }
}
