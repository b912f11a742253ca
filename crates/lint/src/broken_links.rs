//! Requests every external link and warns about the ones that fail.
use document::Document;
use html::{find_all, node_at, outer_html};
use indexmap::IndexMap;
use net::LinkProbe;

/// Tally of one link-checking run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Distinct URLs requested.
    pub requested: usize,
    /// Anchors whose URL answered with an error status.
    pub bad_status: usize,
    /// Anchors whose URL could not be requested at all.
    pub failed: usize,
}

impl LinkReport {
    pub fn is_clean(&self) -> bool {
        self.bad_status == 0 && self.failed == 0
    }
}

/// Local fragments and `mailto:` links can't be requested.
pub fn is_checkable_href(href: &str) -> bool {
    !(href.is_empty() || href.starts_with('#') || href.starts_with("mailto:"))
}

/// Runs [`check_links`] when the document opted into broken-link complaints.
pub fn broken_links(doc: &mut Document, probe: &mut dyn LinkProbe) -> Option<LinkReport> {
    if !doc.md.complain_about.broken_links {
        log::debug!(target: "specpress::lint", "broken-link checking is off");
        return None;
    }
    Some(check_links(doc, probe))
}

/// Requests each distinct link once, in document order, and warns about every
/// anchor whose link failed. Problems are never fatal.
pub fn check_links(doc: &mut Document, probe: &mut dyn LinkProbe) -> LinkReport {
    let mut anchors: IndexMap<String, Vec<String>> = IndexMap::new();
    for path in find_all(&doc.dom, "a") {
        let Some(el) = node_at(&doc.dom, &path) else {
            continue;
        };
        let Some(href) = el.attr("href").filter(|h| is_checkable_href(h)) else {
            continue;
        };
        anchors
            .entry(href.to_string())
            .or_default()
            .push(outer_html(el));
    }

    doc.messages.say("Checking links, this may take a while...");
    let mut report = LinkReport::default();
    for (url, uses) in &anchors {
        report.requested += 1;
        match probe.probe(url) {
            Ok(result) if result.is_success() => {
                log::trace!(target: "specpress::lint", "{url} -> {}", result.status);
            }
            Ok(result) => {
                for markup in uses {
                    doc.messages.warn(format!(
                        "Got a {} status when fetching the link for:\n{markup}",
                        result.status
                    ));
                }
                report.bad_status += uses.len();
            }
            Err(err) => {
                for markup in uses {
                    doc.messages.warn(format!(
                        "The following link caused an error when I tried to request it:\n{markup}\n{err}"
                    ));
                }
                report.failed += uses.len();
            }
        }
    }
    doc.messages.say("Done checking links!");
    log::info!(
        target: "specpress::lint",
        "checked {} links: {} bad status, {} failed",
        report.requested,
        report.bad_status,
        report.failed
    );
    report
}
