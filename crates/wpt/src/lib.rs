//! Expansion of `<wpt>` and `<wpt-rest>` test annotations.
//!
//! Annotations name tests from the web-platform-tests suite. Each one is
//! checked against the cached test manifest and replaced by a block of links
//! to the test's results, live runner and source. The pass also reports
//! tests under the document's path prefix that were never mentioned.
pub mod assets;
pub mod manifest;
pub mod path_prefix;
pub mod render;
pub mod report;
mod scan;

use std::collections::BTreeSet;

use core_types::WptDisplay;
use document::{DataFileError, Document, DocumentParts};
use html::{Node, find_all, node_at_mut};
use thiserror::Error;

pub use manifest::{MANIFEST_NAME, ManifestCell, TestKind, TestManifest};
pub use render::{ListTitle, UnknownTestKind, render_test_item};
pub use scan::test_names;

use scan::Scanner;

#[derive(Debug, Error)]
pub enum WptError {
    #[error("couldn't load the WPT test manifest: {0}")]
    Manifest(#[from] DataFileError),
}

/// What the pass learned about the document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WptSummary {
    /// Every annotated test that exists in the manifest.
    pub seen: BTreeSet<String>,
    /// The prefix in effect at the end of the pass, explicit or inferred.
    pub path_prefix: Option<String>,
    /// Non-hidden `<wpt>` and `<wpt-rest>` elements that were expanded.
    pub visible: usize,
}

/// Expands every test annotation in `doc`.
///
/// Author mistakes are reported through `doc.messages`; only a manifest that
/// can't be loaded aborts the pass.
pub fn process_wpt_elements(doc: &mut Document) -> Result<WptSummary, WptError> {
    let mut cell = ManifestCell::new();
    process_with_manifest(doc, &mut cell)
}

/// Like [`process_wpt_elements`], reusing an already populated manifest cell.
pub fn process_with_manifest(doc: &mut Document, cell: &mut ManifestCell) -> Result<WptSummary, WptError> {
    let mut summary = WptSummary {
        path_prefix: doc.md.wpt_path_prefix.clone(),
        ..WptSummary::default()
    };
    let annotated = html::find_first(&doc.dom, "wpt").is_some() || html::find_first(&doc.dom, "wpt-rest").is_some();
    if !annotated && summary.path_prefix.is_none() {
        return Ok(summary);
    }

    let display = doc.md.wpt_display;
    let DocumentParts {
        dom,
        messages,
        data_files,
        ..
    } = doc.parts_mut();
    let manifest = cell.get_or_load(data_files)?;

    let mut scanner = Scanner {
        manifest,
        messages: &mut *messages,
        display,
        doc_prefix: summary.path_prefix.as_deref(),
        seen: &mut summary.seen,
        visible: 0,
    };
    scanner.scan(dom);
    summary.visible = scanner.visible;

    let rest_paths = find_all(dom, "wpt-rest");
    if rest_paths.len() > 1 {
        messages.die(format!(
            "Only one <wpt-rest> element allowed per document, you have {}.",
            rest_paths.len()
        ));
        for path in rest_paths[1..].iter().rev() {
            remove_at(dom, path);
        }
    }
    let has_rest = !rest_paths.is_empty();
    if let Some(path) = rest_paths.first() {
        if let Some(local) = node_at_mut(dom, path).and_then(|el| el.attr("pathprefix").map(str::to_string)) {
            summary.path_prefix = Some(local);
        }
        let Some(prefix) = summary.path_prefix.as_deref() else {
            messages.die("Can't use <wpt-rest> without either a pathprefix=\"\" attribute or a 'WPT Path Prefix' metadata.");
            return Ok(summary);
        };
        let names: Vec<String> = manifest
            .paths()
            .filter(|p| path_prefix::is_under_prefix(Some(prefix), p) && !summary.seen.contains(*p))
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            messages.die(format!("Couldn't find any tests with the path prefix '{prefix}'."));
            return Ok(summary);
        }
        summary.visible += 1;
        if let Some(el) = remove_at(dom, path) {
            if let Some(block) = render::create_block(el, &names, manifest, display, messages) {
                insert_at(dom, path, block);
            }
        }
        messages.warn(
            "<wpt-rest> is intended for debugging only. Move the tests to <wpt> elements next to what they're testing.",
        );
    }

    if summary.path_prefix.is_none() {
        summary.path_prefix = path_prefix::longest_common_prefix(summary.seen.iter().map(String::as_str));
    }
    if !has_rest {
        if let Some(prefix) = summary.path_prefix.as_deref() {
            report::report_omissions(manifest, prefix, &summary.seen, messages);
        }
    }

    if !summary.seen.is_empty() {
        if let Some(dd) = summary.path_prefix.as_deref().and_then(report::overview_link) {
            doc.append_metadata("Test Suite", dd);
        }
    }
    if summary.visible > 0 && display != WptDisplay::None {
        doc.add_style(assets::STYLE_KEY, assets::WPT_STYLE);
        doc.add_script(assets::SCRIPT_KEY, assets::wpt_script(summary.path_prefix.as_deref()));
    }

    log::debug!(
        target: "specpress::wpt",
        "expanded {} annotations covering {} tests (prefix {:?})",
        summary.visible,
        summary.seen.len(),
        summary.path_prefix
    );
    Ok(summary)
}

fn remove_at(dom: &mut Node, path: &[usize]) -> Option<Node> {
    let (&last, parent) = path.split_last()?;
    let children = node_at_mut(dom, parent)?.children_mut()?;
    (last < children.len()).then(|| children.remove(last))
}

fn insert_at(dom: &mut Node, path: &[usize], node: Node) {
    let Some((&last, parent)) = path.split_last() else {
        return;
    };
    if let Some(children) = node_at_mut(dom, parent).and_then(Node::children_mut) {
        children.insert(last.min(children.len()), node);
    }
}
