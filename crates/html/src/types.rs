use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtomId(u32);

/// Interned tag and attribute names. Names are stored ASCII-lowercased.
#[derive(Debug, Default)]
pub struct AtomTable {
    names: Vec<String>,
    index: HashMap<String, AtomId>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_ascii_lowercase(&mut self, name: &str) -> AtomId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let lowered = name.to_ascii_lowercase();
        if let Some(id) = self.index.get(&lowered) {
            return *id;
        }
        let id = AtomId(self.names.len() as u32);
        self.names.push(lowered.clone());
        self.index.insert(lowered, id);
        id
    }

    pub fn resolve(&self, id: AtomId) -> &str {
        &self.names[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: AtomId,
        attributes: Vec<(AtomId, Option<String>)>,
        self_closing: bool,
    },
    EndTag(AtomId),
    Comment(String),
    Text(String),
}

#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    atoms: AtomTable,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, atoms: AtomTable) -> Self {
        Self { tokens, atoms }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document {
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl Node {
    pub fn element(name: impl Into<String>) -> Self {
        Node::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment {
            text: text.into(),
        }
    }

    /// Builder form of [`Node::set_attr`].
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, Some(value.into()));
        self
    }

    /// Builder form of [`Node::append_child`].
    pub fn with_child(mut self, child: Node) -> Self {
        self.append_child(child);
        self
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, tag: &str) -> bool {
        matches!(self, Node::Element { name, .. } if name.eq_ignore_ascii_case(tag))
    }

    /// True for text nodes that contain only ASCII whitespace.
    pub fn is_whitespace_text(&self) -> bool {
        match self {
            Node::Text { text, .. } => text.bytes().all(|b| b.is_ascii_whitespace()),
            _ => false,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Appends `child`; a no-op on text and comment nodes.
    pub fn append_child(&mut self, child: Node) {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
    }

    pub fn clear_children(&mut self) {
        if let Some(children) = self.children_mut() {
            children.clear();
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    pub fn has_attr(&self, key: &str) -> bool {
        match self {
            Node::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
            }
            _ => false,
        }
    }

    pub fn attr_has_token(&self, key: &str, token: &str) -> bool {
        self.attr(key).is_some_and(|v| {
            v.split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }

    /// Sets or replaces an attribute, keeping its original position when present.
    pub fn set_attr(&mut self, key: &str, value: Option<String>) {
        let Node::Element { attributes, .. } = self else {
            return;
        };
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some(slot) => slot.1 = value,
            None => attributes.push((key.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) {
        if let Node::Element { attributes, .. } = self {
            attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        }
    }

    pub fn add_class(&mut self, class: &str) {
        if self.attr_has_token("class", class) {
            return;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr("class", Some(value));
    }

    pub fn rename(&mut self, new_name: &str) {
        if let Node::Element { name, .. } = self {
            *name = new_name.to_ascii_lowercase();
        }
    }

    /// Concatenated text of this node and all descendants, in tree order.
    pub fn text_content(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::Document { children, .. } | Node::Element { children, .. } => {
                    for c in children {
                        walk(c, out);
                    }
                }
                Node::Comment { .. } => {}
            }
        }
        let mut out = String::new();
        walk(self, &mut out);
        out
    }
}
