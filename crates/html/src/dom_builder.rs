use crate::tokenizer::tokenize;
use crate::types::{Node, Token, TokenStream};

/// Parses a complete document.
pub fn parse_document(input: &str) -> Node {
    build_dom(&tokenize(input))
}

/// Parses markup that is not a full document (e.g. an attribute value holding
/// inline HTML) and returns the top-level nodes.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    match parse_document(input) {
        Node::Document { children, .. } => children,
        other => vec![other],
    }
}

pub fn build_dom(stream: &TokenStream) -> Node {
    let atoms = stream.atoms();
    let mut builder = TreeBuilder::default();

    for token in stream.tokens() {
        match token {
            Token::Doctype(s) => builder.doctype = Some(s.clone()),
            Token::Comment(c) => builder.append(Node::comment(c.clone())),
            Token::Text(txt) => builder.append_text(txt),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::Element {
                    name: atoms.resolve(*name).to_string(),
                    attributes: attributes
                        .iter()
                        .map(|(k, v)| (atoms.resolve(*k).to_string(), v.clone()))
                        .collect(),
                    children: Vec::new(),
                };
                if *self_closing {
                    builder.append(element);
                } else {
                    builder.open.push(element);
                }
            }
            Token::EndTag(name) => builder.close(atoms.resolve(*name)),
        }
    }

    builder.finish()
}

/// Open elements are owned by the stack until they close, then move into
/// their parent. Nothing recurses, so nesting depth is bounded only by memory.
#[derive(Debug, Default)]
struct TreeBuilder {
    doctype: Option<String>,
    top_level: Vec<Node>,
    open: Vec<Node>,
}

impl TreeBuilder {
    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut().and_then(Node::children_mut) {
            Some(children) => children,
            None => &mut self.top_level,
        }
    }

    fn append(&mut self, node: Node) {
        self.current_children().push(node);
    }

    /// Adjacent text tokens are merged into a single text node.
    fn append_text(&mut self, txt: &str) {
        if txt.is_empty() {
            return;
        }
        let children = self.current_children();
        if let Some(Node::Text { text }) = children.last_mut() {
            text.push_str(txt);
        } else {
            children.push(Node::text(txt));
        }
    }

    fn close(&mut self, name: &str) {
        // Stray end tags are ignored rather than closing everything.
        let Some(pos) = self.open.iter().rposition(|n| n.is_element(name)) else {
            log::debug!(target: "html.builder", "ignoring stray </{name}>");
            return;
        };
        while self.open.len() > pos {
            self.pop_open();
        }
    }

    fn pop_open(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(element);
        }
    }

    fn finish(mut self) -> Node {
        while !self.open.is_empty() {
            self.pop_open();
        }
        Node::Document {
            doctype: self.doctype,
            children: self.top_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dom_stress_deep_nesting() {
        let depth: usize = 2_000;
        let input = format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let dom = parse_document(&input);

        let mut current = &dom;
        let mut seen = 0usize;
        loop {
            match current {
                Node::Document { children, .. } => {
                    assert_eq!(children.len(), 1);
                    current = &children[0];
                }
                Node::Element { name, children, .. } => {
                    assert_eq!(name, "div");
                    seen += 1;
                    if seen == depth {
                        assert!(children.is_empty());
                        break;
                    }
                    assert_eq!(children.len(), 1);
                    current = &children[0];
                }
                Node::Text { .. } | Node::Comment { .. } => {
                    panic!("unexpected leaf node before reaching depth");
                }
            }
        }
    }

    #[test]
    fn stray_end_tag_does_not_close_open_elements() {
        let dom = parse_document("<div><p>a</span>b</p></div>");
        let div = &dom.children()[0];
        let p = &div.children()[0];
        assert_eq!(p.text_content(), "ab");
        assert_eq!(p.children().len(), 1, "text runs should merge");
    }

    #[test]
    fn fragment_returns_top_level_nodes() {
        let nodes = parse_fragment("Intro to <code>grid</code>");
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0], Node::Text { text, .. } if text == "Intro to "));
        assert!(nodes[1].is_element("code"));
    }
}
