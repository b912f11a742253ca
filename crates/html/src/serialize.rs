//! HTML serialization of a [`Node`] tree.
use crate::Node;
use crate::entities::{escape_attr, escape_text};
use crate::tokenizer::{is_rawtext_element, is_void_element};

/// Serializes a whole tree, including the doctype of a document node.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serializes a single node and its descendants.
pub fn outer_html(node: &Node) -> String {
    to_html(node)
}

/// Serializes only the children of `node`.
pub fn inner_html(node: &Node) -> String {
    let mut out = String::new();
    for c in node.children() {
        write_node(c, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Document {
            doctype, children, ..
        } => {
            if let Some(dt) = doctype {
                // Stored without the leading `<!`.
                out.push_str("<!");
                out.push_str(dt);
                out.push('>');
            }
            for c in children {
                write_node(c, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    escape_attr(v, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let raw = is_rawtext_element(name);
            for c in children {
                match c {
                    Node::Text { text, .. } if raw => out.push_str(text),
                    _ => write_node(c, out),
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text, .. } => escape_text(text, out),
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
