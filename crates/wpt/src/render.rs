//! Builds the `<details>` blocks that replace test annotations.
use core_types::{Messages, WptDisplay};
use html::Node;
use thiserror::Error;

use crate::manifest::{TestKind, TestManifest};

pub const RESULTS_BASE: &str = "https://wpt.fyi/results/";
pub const LIVE_HOST: &str = "wpt.live";
pub const SOURCE_BASE: &str = "https://github.com/web-platform-tests/wpt/blob/master/";

const SECURE_MARKERS: [&str; 2] = [".https.", ".serviceworker."];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Programming error, the WPT test {name} has an unknown test type {kind}.")]
pub struct UnknownTestKind {
    pub name: String,
    pub kind: String,
}

/// Heading shown above a test list, taken from the annotation's `title`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListTitle {
    pub html: String,
    pub lang: Option<String>,
    pub dir: Option<String>,
}

impl ListTitle {
    pub fn from_annotation(el: &Node) -> Option<Self> {
        let html = el.attr("title").filter(|t| !t.is_empty())?;
        Some(Self {
            html: html.to_string(),
            lang: el.attr("lang").map(str::to_string),
            dir: el.attr("dir").map(str::to_string),
        })
    }

    fn to_node(&self) -> Node {
        let mut p = Node::element("p");
        if let Some(lang) = &self.lang {
            p.set_attr("lang", Some(lang.clone()));
        }
        if let Some(dir) = &self.dir {
            p.set_attr("dir", Some(dir.clone()));
        }
        for child in html::parse_fragment(&self.html) {
            p.append_child(child);
        }
        p
    }
}

pub fn live_scheme(path: &str) -> &'static str {
    if SECURE_MARKERS.iter().any(|m| path.contains(m)) {
        "https"
    } else {
        "http"
    }
}

fn leaf(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn results_link(path: &str, titled: bool) -> Node {
    let mut a = Node::element("a")
        .with_attr("href", format!("{RESULTS_BASE}{path}"))
        .with_attr("class", "wpt-name");
    if titled {
        a.set_attr("title", Some(path.to_string()));
    }
    a.with_child(Node::text(leaf(path)))
}

fn live_link(path: &str) -> Node {
    Node::element("a")
        .with_attr("href", format!("{}://{LIVE_HOST}/{path}", live_scheme(path)))
        .with_attr("class", "wpt-live")
        .with_child(Node::element("small").with_child(Node::text("(live test)")))
}

fn source_link(path: &str) -> Node {
    Node::element("a")
        .with_attr("href", format!("{SOURCE_BASE}{path}"))
        .with_attr("class", "wpt-source")
        .with_child(Node::element("small").with_child(Node::text("(source)")))
}

/// Renders one `<li>` for a test.
pub fn render_test_item(path: &str, kind: &TestKind) -> Result<Node, UnknownTestKind> {
    let li = Node::element("li").with_attr("class", "wpt-test");
    let li = match kind {
        TestKind::Crashtest | TestKind::PrintReftest | TestKind::Reftest | TestKind::Testharness => li
            .with_child(results_link(path, true))
            .with_child(Node::text(" "))
            .with_child(live_link(path))
            .with_child(Node::text(" "))
            .with_child(source_link(path)),
        TestKind::Manual | TestKind::Visual => li
            .with_child(
                Node::element("span")
                    .with_attr("class", "wpt-name")
                    .with_child(Node::text(format!("{} ({kind} test) ", leaf(path)))),
            )
            .with_child(source_link(path)),
        TestKind::Wdspec => li
            .with_child(results_link(path, false))
            .with_child(Node::text(" "))
            .with_child(source_link(path)),
        TestKind::Other(raw) => {
            return Err(UnknownTestKind {
                name: path.to_string(),
                kind: raw.clone(),
            });
        }
    };
    Ok(li)
}

/// Appends an item per test to `ul`. Names missing from the manifest are
/// warned about and skipped; unknown categories are fatal and skipped.
pub fn append_test_items(ul: &mut Node, names: &[String], manifest: &TestManifest, messages: &mut Messages) {
    for name in names {
        let Some(kind) = manifest.get(name) else {
            messages.warn(format!("Cannot find '{name}' in the test data."));
            continue;
        };
        match render_test_item(name, kind) {
            Ok(li) => ul.append_child(li),
            Err(err) => messages.die(err.to_string()),
        }
    }
}

/// Appends the optional title, the test list and the closing rule to `block`.
pub fn append_test_list(
    block: &mut Node,
    names: &[String],
    manifest: &TestManifest,
    title: Option<&ListTitle>,
    messages: &mut Messages,
) {
    if let Some(title) = title {
        block.append_child(title.to_node());
    }
    let mut ul = Node::element("ul").with_attr("class", "wpt-tests-list");
    append_test_items(&mut ul, names, manifest, messages);
    block.append_child(ul);
    if title.is_some() {
        block.append_child(Node::element("hr"));
    }
}

/// Extends the last test list of an already rendered block.
pub fn extend_block(block: &mut Node, names: &[String], manifest: &TestManifest, messages: &mut Messages) {
    let list = block
        .children_mut()
        .and_then(|children| {
            children
                .iter_mut()
                .rev()
                .find(|c| c.is_element("ul") && c.attr_has_token("class", "wpt-tests-list"))
        });
    match list {
        Some(ul) => append_test_items(ul, names, manifest, messages),
        None => append_test_list(block, names, manifest, None, messages),
    }
}

/// Turns an annotation element into a rendered block, or `None` when the
/// display mode hides test lists.
pub fn create_block(
    mut el: Node,
    names: &[String],
    manifest: &TestManifest,
    display: WptDisplay,
    messages: &mut Messages,
) -> Option<Node> {
    if display == WptDisplay::None {
        return None;
    }
    let title = ListTitle::from_annotation(&el);
    el.rename("details");
    el.add_class("wpt-tests-block");
    el.remove_attr("pathprefix");
    el.remove_attr("title");
    el.set_attr("lang", Some("en".to_string()));
    el.set_attr("dir", Some("ltr".to_string()));
    if display.starts_open() {
        el.set_attr("open", None);
    }
    el.clear_children();
    el.append_child(Node::element("summary").with_child(Node::text("Tests")));
    append_test_list(&mut el, names, manifest, title.as_ref(), messages);
    Some(el)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> TestManifest {
        [
            ("css/a.html", TestKind::Testharness),
            ("css/b.https.html", TestKind::Reftest),
            ("css/m.html", TestKind::Manual),
            ("webdriver/s.py", TestKind::Wdspec),
            ("css/odd.html", TestKind::Other("support".into())),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn live_scheme_follows_secure_markers() {
        assert_eq!(live_scheme("foo/bar.https.any.js"), "https");
        assert_eq!(live_scheme("foo/bar.serviceworker.html"), "https");
        assert_eq!(live_scheme("foo/bar.any.js"), "http");
    }

    #[test]
    fn testharness_item_links_results_live_and_source() {
        let li = render_test_item("foo/bar.https.any.js", &TestKind::Testharness).unwrap();
        assert_eq!(
            html::outer_html(&li),
            concat!(
                r#"<li class="wpt-test">"#,
                r#"<a href="https://wpt.fyi/results/foo/bar.https.any.js" class="wpt-name" title="foo/bar.https.any.js">bar.https.any.js</a> "#,
                r#"<a href="https://wpt.live/foo/bar.https.any.js" class="wpt-live"><small>(live test)</small></a> "#,
                r#"<a href="https://github.com/web-platform-tests/wpt/blob/master/foo/bar.https.any.js" class="wpt-source"><small>(source)</small></a>"#,
                "</li>"
            )
        );
    }

    #[test]
    fn manual_item_has_label_and_source_only() {
        let li = render_test_item("css/m.html", &TestKind::Manual).unwrap();
        let out = html::outer_html(&li);
        assert!(out.contains(r#"<span class="wpt-name">m.html (manual test) </span>"#), "{out}");
        assert!(!out.contains("wpt.live"));
        assert!(!out.contains("wpt.fyi"));
    }

    #[test]
    fn wdspec_item_has_no_live_link() {
        let li = render_test_item("webdriver/s.py", &TestKind::Wdspec).unwrap();
        let out = html::outer_html(&li);
        assert!(out.contains("wpt.fyi/results/webdriver/s.py"));
        assert!(out.contains("wpt-source"));
        assert!(!out.contains("wpt-live"));
    }

    #[test]
    fn unknown_category_is_fatal_and_skipped() {
        let mut messages = Messages::new();
        let mut ul = Node::element("ul");
        let names = ["css/a.html".to_string(), "css/odd.html".to_string()];
        append_test_items(&mut ul, &names, &manifest(), &mut messages);
        assert_eq!(ul.children().len(), 1);
        assert_eq!(messages.fatal_count(), 1);
        assert!(messages.entries()[0].text.contains("unknown test type support"));
    }

    #[test]
    fn missing_name_only_warns() {
        let mut messages = Messages::new();
        let mut ul = Node::element("ul");
        append_test_items(&mut ul, &["css/gone.html".to_string()], &manifest(), &mut messages);
        assert!(ul.children().is_empty());
        assert_eq!(messages.warning_count(), 1);
        assert_eq!(messages.fatal_count(), 0);
    }

    #[test]
    fn titled_list_gets_paragraph_and_rule() {
        let mut messages = Messages::new();
        let el = Node::element("wpt")
            .with_attr("title", "Grid <i>tests</i>")
            .with_attr("lang", "fr")
            .with_child(Node::text("css/a.html"));
        let block = create_block(
            el,
            &["css/a.html".to_string()],
            &manifest(),
            WptDisplay::Open,
            &mut messages,
        )
        .expect("visible");
        let names: Vec<_> = block.children().iter().filter_map(Node::name).collect();
        assert_eq!(names, ["summary", "p", "ul", "hr"]);
        assert_eq!(block.name(), Some("details"));
        assert!(block.has_attr("open"));
        assert_eq!(block.attr("lang"), Some("en"));
        assert!(!block.has_attr("title"));
        let p = &block.children()[1];
        assert_eq!(p.attr("lang"), Some("fr"));
        assert_eq!(html::inner_html(p), "Grid <i>tests</i>");
    }

    #[test]
    fn empty_title_adds_neither_paragraph_nor_rule() {
        let mut messages = Messages::new();
        let el = Node::element("wpt").with_attr("title", "").with_child(Node::text("css/a.html"));
        assert_eq!(ListTitle::from_annotation(&el), None);
        let block = create_block(
            el,
            &["css/a.html".to_string()],
            &manifest(),
            WptDisplay::Open,
            &mut messages,
        )
        .expect("visible");
        let names: Vec<_> = block.children().iter().filter_map(Node::name).collect();
        assert_eq!(names, ["summary", "ul"]);
        let out = html::outer_html(&block);
        assert!(!out.contains("<hr>"), "{out}");
        assert!(!out.contains("<p>"), "{out}");
    }

    #[test]
    fn closed_display_omits_open_and_none_drops_block() {
        let mut messages = Messages::new();
        let block = create_block(Node::element("wpt"), &[], &manifest(), WptDisplay::Closed, &mut messages)
            .expect("visible");
        assert!(!block.has_attr("open"));
        assert_eq!(block.children().len(), 2);
        assert!(create_block(Node::element("wpt"), &[], &manifest(), WptDisplay::None, &mut messages).is_none());
    }
}
