//! Tree walk that expands `<wpt>` elements in place.
use std::collections::BTreeSet;

use core_types::{Messages, WptDisplay};
use html::Node;

use crate::manifest::TestManifest;
use crate::path_prefix;
use crate::render;

/// Resolved test names listed in an annotation, one per non-blank line.
pub fn test_names(el: &Node, doc_prefix: Option<&str>) -> Vec<String> {
    let prefix = el.attr("pathprefix").or(doc_prefix);
    el.text_content()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| path_prefix::join(prefix, line))
        .collect()
}

/// True when everything after `children[block]` is whitespace text, so a new
/// block appended now would sit directly next to it.
fn directly_follows(children: &[Node], block: usize) -> bool {
    children
        .get(block + 1..)
        .is_some_and(|rest| rest.iter().all(Node::is_whitespace_text))
}

pub(crate) struct Scanner<'a> {
    pub manifest: &'a TestManifest,
    pub messages: &'a mut Messages,
    pub display: WptDisplay,
    pub doc_prefix: Option<&'a str>,
    pub seen: &'a mut BTreeSet<String>,
    /// Non-hidden annotations encountered so far.
    pub visible: usize,
}

impl Scanner<'_> {
    /// Rebuilds the child list of `node`, recursing into everything that is
    /// not itself an annotation.
    pub fn scan(&mut self, node: &mut Node) {
        let Some(children) = node.children_mut() else {
            return;
        };
        let old = std::mem::take(children);
        let mut last_block: Option<usize> = None;
        for mut child in old {
            if child.is_element("wpt") {
                self.expand(child, children, &mut last_block);
            } else {
                self.scan(&mut child);
                children.push(child);
            }
        }
    }

    fn expand(&mut self, el: Node, out: &mut Vec<Node>, last_block: &mut Option<usize>) {
        let names = self.resolve(&el);

        if el.has_attr("hidden") {
            log::trace!(target: "specpress::wpt", "dropping hidden annotation with {} tests", names.len());
            return;
        }
        self.visible += 1;

        if let Some(block) = last_block.filter(|&i| directly_follows(out, i)) {
            log::trace!(target: "specpress::wpt", "merging {} tests into the previous block", names.len());
            render::extend_block(&mut out[block], &names, self.manifest, self.messages);
            return;
        }

        match render::create_block(el, &names, self.manifest, self.display, self.messages) {
            Some(block) => {
                out.push(block);
                *last_block = Some(out.len() - 1);
            }
            None => *last_block = None,
        }
    }

    /// Names found in the manifest; every other name is a fatal error.
    fn resolve(&mut self, el: &Node) -> Vec<String> {
        let mut found = Vec::new();
        for name in test_names(el, self.doc_prefix) {
            if self.manifest.contains(&name) {
                self.seen.insert(name.clone());
                found.push(name);
            } else {
                self.messages.die_at(
                    format!("Couldn't find WPT test '{name}' - did you misspell something?"),
                    html::outer_html(el),
                );
            }
        }
        found
    }
}
