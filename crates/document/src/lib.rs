//! The document-processing context shared by every pass.
//!
//! A [`Document`] owns the parsed tree, its metadata, the message sink and
//! the asset registry for exactly one processing run. Nothing here outlives
//! the run.
mod data_files;

pub use data_files::{DataFileError, DataFiles, DirDataFiles};

use core_types::{Messages, Metadata};
use html::{Node, find_all_by, node_at_mut};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("did not generate, due to {count} fatal error(s)")]
pub struct FatalErrors {
    pub count: usize,
}

/// Simultaneous borrows of the pieces a tree pass works with.
pub struct DocumentParts<'a> {
    pub dom: &'a mut Node,
    pub md: &'a Metadata,
    pub messages: &'a mut Messages,
    pub data_files: &'a dyn DataFiles,
}

pub struct Document {
    pub dom: Node,
    pub md: Metadata,
    pub messages: Messages,
    data_files: Box<dyn DataFiles>,
    extra_styles: IndexMap<String, String>,
    extra_scripts: IndexMap<String, String>,
    other_metadata: IndexMap<String, Vec<Node>>,
    finished: bool,
}

impl Document {
    pub fn new(dom: Node, md: Metadata, data_files: Box<dyn DataFiles>) -> Self {
        Self {
            dom,
            md,
            messages: Messages::new(),
            data_files,
            extra_styles: IndexMap::new(),
            extra_scripts: IndexMap::new(),
            other_metadata: IndexMap::new(),
            finished: false,
        }
    }

    pub fn parse(source: &str, md: Metadata, data_files: Box<dyn DataFiles>) -> Self {
        Self::new(html::parse_document(source), md, data_files)
    }

    pub fn data_files(&self) -> &dyn DataFiles {
        self.data_files.as_ref()
    }

    pub fn parts_mut(&mut self) -> DocumentParts<'_> {
        DocumentParts {
            dom: &mut self.dom,
            md: &self.md,
            messages: &mut self.messages,
            data_files: self.data_files.as_ref(),
        }
    }

    /// Registers a stylesheet under `key`. The first registration wins.
    pub fn add_style(&mut self, key: &str, css: impl Into<String>) {
        self.extra_styles
            .entry(key.to_string())
            .or_insert_with(|| css.into());
    }

    /// Registers a script under `key`. The first registration wins.
    pub fn add_script(&mut self, key: &str, js: impl Into<String>) {
        self.extra_scripts
            .entry(key.to_string())
            .or_insert_with(|| js.into());
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        self.extra_styles.get(key).map(String::as_str)
    }

    pub fn script(&self, key: &str) -> Option<&str> {
        self.extra_scripts.get(key).map(String::as_str)
    }

    /// Appends a node to a named metadata entry (e.g. "Test Suite").
    pub fn append_metadata(&mut self, key: &str, node: Node) {
        self.other_metadata
            .entry(key.to_string())
            .or_default()
            .push(node);
    }

    pub fn other_metadata(&self) -> &IndexMap<String, Vec<Node>> {
        &self.other_metadata
    }

    /// Fails when any fatal message was reported, unless `force` is set.
    pub fn check_fatal(&self, force: bool) -> Result<(), FatalErrors> {
        let count = self.messages.fatal_count();
        if count > 0 && !force {
            return Err(FatalErrors { count });
        }
        Ok(())
    }

    /// Moves registered assets and metadata into the tree. Runs once.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let mut head_nodes = Vec::new();
        for (key, css) in &self.extra_styles {
            head_nodes.push(
                Node::element("style").with_child(Node::text(format!("/* {key} */\n{css}"))),
            );
        }
        for (key, js) in &self.extra_scripts {
            head_nodes.push(
                Node::element("script").with_child(Node::text(format!("/* {key} */\n{js}"))),
            );
        }
        if !head_nodes.is_empty() {
            log::debug!(target: "specpress::document", "inserting {} head assets", head_nodes.len());
            match ensure_head(&mut self.dom) {
                Some(head) => head_nodes.into_iter().for_each(|n| head.append_child(n)),
                None => log::warn!(target: "specpress::document", "no place to insert head assets"),
            }
        }

        if !self.other_metadata.is_empty() {
            self.fill_metadata_block();
        }
    }

    pub fn to_html(&self) -> String {
        html::to_html(&self.dom)
    }

    fn fill_metadata_block(&mut self) {
        let Some(path) = find_all_by(&self.dom, &|n: &Node| {
            n.is_element("dl") && n.attr("data-fill-with") == Some("spec-metadata")
        })
        .into_iter()
        .next() else {
            log::debug!(
                target: "specpress::document",
                "no spec-metadata block; leaving {} entries on the document",
                self.other_metadata.len()
            );
            return;
        };
        let Some(dl) = node_at_mut(&mut self.dom, &path) else {
            return;
        };
        for (key, nodes) in &self.other_metadata {
            dl.append_child(Node::element("dt").with_child(Node::text(format!("{key}:"))));
            for node in nodes {
                dl.append_child(node.clone());
            }
        }
    }
}

/// Returns the `<head>` element, creating it under `<html>` (or at the top of
/// the document) when the source had none.
fn ensure_head(dom: &mut Node) -> Option<&mut Node> {
    if html::find_first(dom, "head").is_none() {
        let head = Node::element("head");
        match html::find_first_mut(dom, "html").and_then(Node::children_mut) {
            Some(children) => children.insert(0, head),
            None => {
                if let Some(children) = dom.children_mut() {
                    children.insert(0, head);
                }
            }
        }
    }
    html::find_first_mut(dom, "head")
}
