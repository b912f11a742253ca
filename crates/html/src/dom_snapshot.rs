use crate::Node;
use std::fmt;

/// Deterministic, indented line rendering of a tree for test comparisons.
/// Not a stable public format.
///
/// Rules:
/// - One line per node; children are indented by two spaces.
/// - Attributes are printed in source order.
/// - Whitespace-only text nodes are dropped when `skip_blank_text` is set.
#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub skip_blank_text: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self {
            skip_blank_text: true,
        }
    }
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Snapshot of a list of sibling nodes, e.g. a parsed fragment.
pub fn snapshot_nodes(nodes: &[Node], options: DomSnapshotOptions) -> String {
    let mut lines = Vec::new();
    for n in nodes {
        walk_snapshot(n, &options, 0, &mut lines);
    }
    lines.join("\n")
}

pub fn assert_dom_eq(expected: &str, actual: &Node) {
    let actual = DomSnapshot::new(actual, DomSnapshotOptions::default()).render();
    let expected = expected
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>();
    let common_indent = expected
        .iter()
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    let expected = expected
        .iter()
        .map(|l| &l[common_indent..])
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(
        expected, actual,
        "DOM mismatch\nexpected:\n{expected}\nactual:\n{actual}"
    );
}

fn walk_snapshot(node: &Node, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Document {
            doctype, children, ..
        } => {
            match doctype {
                Some(dt) => out.push(format!("{indent}#document <!{dt}>")),
                None => out.push(format!("{indent}#document")),
            }
            for c in children {
                walk_snapshot(c, options, depth + 1, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            let mut line = format!("{indent}<{name}");
            for (k, v) in attributes {
                match v {
                    Some(v) => line.push_str(&format!(" {k}=\"{v}\"")),
                    None => line.push_str(&format!(" {k}")),
                }
            }
            line.push('>');
            out.push(line);
            for c in children {
                walk_snapshot(c, options, depth + 1, out);
            }
        }
        Node::Text { text, .. } => {
            if options.skip_blank_text && node.is_whitespace_text() {
                return;
            }
            out.push(format!("{indent}\"{}\"", escape_snapshot_text(text)));
        }
        Node::Comment { text, .. } => out.push(format!("{indent}<!-- {text} -->")),
    }
}

fn escape_snapshot_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn snapshot_indents_children() {
        let dom = parse_document("<ul class=\"x\">\n  <li>a\nb</li>\n</ul>");
        assert_dom_eq(
            r#"
            #document
              <ul class="x">
                <li>
                  "a\nb"
            "#,
            &dom,
        );
    }
}
