#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use core_types::{Metadata, WptDisplay};
use document::{DataFileError, DataFiles, Document};

pub const MANIFEST: &str = "\
wpt-tests.txt generated listing
testharness css/grid/a.html
reftest css/grid/b.https.html
manual css/grid/m.html
testharness css/grid/c.tentative.html
crashtest css/grid/sub/crash.html
wdspec webdriver/session.py
support misc/odd.html
";

/// Serves one manifest text and counts how often it was fetched.
pub struct CountingFiles {
    manifest: Option<String>,
    calls: Rc<Cell<usize>>,
}

impl CountingFiles {
    pub fn new(manifest: Option<&str>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let files = Self {
            manifest: manifest.map(str::to_string),
            calls: Rc::clone(&calls),
        };
        (files, calls)
    }
}

impl DataFiles for CountingFiles {
    fn fetch(&self, name: &str) -> Result<String, DataFileError> {
        self.calls.set(self.calls.get() + 1);
        match (&self.manifest, name) {
            (Some(text), wpt::MANIFEST_NAME) => Ok(text.clone()),
            _ => Err(DataFileError {
                name: name.to_string(),
                location: "test fixture".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in fixture"),
            }),
        }
    }
}

pub fn metadata(prefix: Option<&str>, display: WptDisplay) -> Metadata {
    Metadata {
        wpt_path_prefix: prefix.map(str::to_string),
        wpt_display: display,
        ..Metadata::default()
    }
}

pub fn document(src: &str, md: Metadata) -> (Document, Rc<Cell<usize>>) {
    let (files, calls) = CountingFiles::new(Some(MANIFEST));
    (Document::parse(src, md, Box::new(files)), calls)
}

pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
