mod common;

use common::{FakeProbe, document};
use core_types::Severity;
use lint::{LinkReport, broken_links, check_links};

#[test]
fn disabled_by_default() {
    let mut doc = document(r#"<a href="https://gone.example/">x</a>"#, false);
    let mut probe = FakeProbe::default();
    assert_eq!(broken_links(&mut doc, &mut probe), None);
    assert!(probe.requested.is_empty());
    assert!(doc.messages.entries().is_empty());
}

#[test]
fn skips_local_and_mail_links() {
    let mut doc = document(
        r##"<a href="#top">t</a><a href="">e</a><a>none</a><a href="mailto:a@b.c">m</a>"##,
        true,
    );
    let mut probe = FakeProbe::default();
    let report = broken_links(&mut doc, &mut probe).expect("enabled");
    assert_eq!(report, LinkReport::default());
    assert!(probe.requested.is_empty());
    assert_eq!(
        doc.messages.texts(Severity::Info),
        ["Checking links, this may take a while...", "Done checking links!"]
    );
}

#[test]
fn error_statuses_warn_per_anchor() {
    let mut doc = document(
        concat!(
            r#"<p><a href="https://ok.example/">ok</a></p>"#,
            r#"<a href="https://moved.example/">moved</a>"#,
            r#"<a href="https://missing.example/">one</a>"#,
            r#"<a href="https://missing.example/">two</a>"#,
        ),
        true,
    );
    let mut probe = FakeProbe::default()
        .with("https://ok.example/", 200)
        .with("https://moved.example/", 301)
        .with("https://missing.example/", 404);
    let report = broken_links(&mut doc, &mut probe).expect("enabled");

    assert_eq!(probe.requested.len(), 3, "each URL is requested once");
    assert_eq!(report.requested, 3);
    assert_eq!(report.bad_status, 2);
    assert!(!report.is_clean());
    assert_eq!(
        doc.messages.texts(Severity::Warning),
        [
            "Got a 404 status when fetching the link for:\n<a href=\"https://missing.example/\">one</a>",
            "Got a 404 status when fetching the link for:\n<a href=\"https://missing.example/\">two</a>",
        ]
    );
    assert_eq!(doc.messages.fatal_count(), 0);
}

#[test]
fn request_failures_are_warnings() {
    let mut doc = document(r#"<a href="https://down.example/">down</a>"#, true);
    let mut probe = FakeProbe::default();
    let report = check_links(&mut doc, &mut probe);
    assert_eq!(report.failed, 1);
    let warnings = doc.messages.texts(Severity::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(
        warnings[0].starts_with(
            "The following link caused an error when I tried to request it:\n<a href=\"https://down.example/\">down</a>\n"
        ),
        "{}",
        warnings[0]
    );
    assert!(doc.check_fatal(false).is_ok());
}
