//! End-of-pass reporting: tests the document forgot and the suite overview.
use std::collections::BTreeSet;

use core_types::Messages;
use html::Node;

use crate::manifest::TestManifest;
use crate::path_prefix::is_under_prefix;

pub const TENTATIVE_MARKER: &str = ".tentative.";
pub const OVERVIEW_BASE: &str = "https://wpt.fyi/results";

const MAX_LISTED: usize = 10;

/// Non-tentative manifest tests under `prefix` that the document never
/// mentioned, sorted.
pub fn omitted_tests<'m>(manifest: &'m TestManifest, prefix: &str, seen: &BTreeSet<String>) -> Vec<&'m str> {
    let mut unseen: Vec<&str> = manifest
        .paths()
        .filter(|path| !path.contains(TENTATIVE_MARKER))
        .filter(|path| is_under_prefix(Some(prefix), path))
        .filter(|path| !seen.contains(*path))
        .collect();
    unseen.sort_unstable();
    unseen
}

/// Warns about omitted tests; never fatal.
pub fn report_omissions(manifest: &TestManifest, prefix: &str, seen: &BTreeSet<String>, messages: &mut Messages) {
    let unseen = omitted_tests(manifest, prefix, seen);
    let count = unseen.len();
    if count == 0 {
        return;
    }
    if count < MAX_LISTED {
        let listing: Vec<String> = unseen.iter().map(|path| format!("  {path}")).collect();
        messages.warn(format!(
            "There are {count} WPT tests underneath your path prefix '{prefix}' that aren't in your document and must be added:\n{}",
            listing.join("\n")
        ));
    } else {
        messages.warn(format!(
            "There are {count} WPT tests (too many to display individually) underneath your path prefix '{prefix}' that aren't in your document."
        ));
    }
}

/// `<dd>` linking the suite's results page, or `None` for the registry root.
pub fn overview_link(prefix: &str) -> Option<Node> {
    let prefix = if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    };
    if prefix == "/" {
        return None;
    }
    let url = format!("{OVERVIEW_BASE}{prefix}");
    Some(
        Node::element("dd")
            .with_attr("class", "wpt-overview")
            .with_child(
                Node::element("a")
                    .with_attr("href", url.clone())
                    .with_child(Node::text(url)),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::TestKind;

    fn seen(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn manifest(paths: &[&str]) -> TestManifest {
        paths.iter().map(|p| (*p, TestKind::Testharness)).collect()
    }

    #[test]
    fn warns_about_exactly_the_unseen_test() {
        let m = manifest(&["a/1", "a/2"]);
        let mut messages = Messages::new();
        report_omissions(&m, "a/", &seen(&["a/1"]), &mut messages);
        assert_eq!(messages.warning_count(), 1);
        let text = &messages.entries()[0].text;
        assert!(text.ends_with(":\n  a/2"), "{text}");

        let mut messages = Messages::new();
        report_omissions(&m, "a/", &seen(&["a/1", "a/2"]), &mut messages);
        assert!(messages.entries().is_empty());
    }

    #[test]
    fn tentative_tests_are_never_reported() {
        let m = manifest(&["a/1.html", "a/2.tentative.html"]);
        assert!(omitted_tests(&m, "/a", &seen(&["a/1.html"])).is_empty());
    }

    #[test]
    fn listing_is_sorted_and_scoped_to_prefix() {
        let m = manifest(&["a/z", "b/x", "a/c", "a/m"]);
        assert_eq!(omitted_tests(&m, "a", &BTreeSet::new()), ["a/c", "a/m", "a/z"]);
    }

    #[test]
    fn ten_or_more_only_reports_the_count() {
        let paths: Vec<String> = (0..10).map(|i| format!("a/{i}.html")).collect();
        let m: TestManifest = paths.iter().map(|p| (p.as_str(), TestKind::Reftest)).collect();
        let mut messages = Messages::new();
        report_omissions(&m, "a/", &BTreeSet::new(), &mut messages);
        let text = &messages.entries()[0].text;
        assert!(text.starts_with("There are 10 WPT tests (too many"), "{text}");
        assert!(!text.contains("a/0.html"));
    }

    #[test]
    fn overview_link_skips_the_root() {
        assert!(overview_link("/").is_none());
        assert!(overview_link("").is_none());
        let dd = overview_link("css/grid/").expect("non-root prefix");
        assert_eq!(
            html::outer_html(&dd),
            r#"<dd class="wpt-overview"><a href="https://wpt.fyi/results/css/grid/">https://wpt.fyi/results/css/grid/</a></dd>"#
        );
    }
}
