//! The cached manifest of known web-platform-tests paths.
//!
//! The resource is plain text: a header line, then one `<category> <path>`
//! entry per line.
use std::fmt;

use document::{DataFileError, DataFiles};
use indexmap::IndexMap;

pub const MANIFEST_NAME: &str = "wpt-tests.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestKind {
    Crashtest,
    PrintReftest,
    Reftest,
    Testharness,
    Manual,
    Visual,
    Wdspec,
    /// A category this tool does not know how to render.
    Other(String),
}

impl TestKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "crashtest" => TestKind::Crashtest,
            "print-reftest" => TestKind::PrintReftest,
            "reftest" => TestKind::Reftest,
            "testharness" => TestKind::Testharness,
            "manual" => TestKind::Manual,
            "visual" => TestKind::Visual,
            "wdspec" => TestKind::Wdspec,
            other => TestKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TestKind::Crashtest => "crashtest",
            TestKind::PrintReftest => "print-reftest",
            TestKind::Reftest => "reftest",
            TestKind::Testharness => "testharness",
            TestKind::Manual => "manual",
            TestKind::Visual => "visual",
            TestKind::Wdspec => "wdspec",
            TestKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Test path to category, in manifest order.
#[derive(Clone, Debug, Default)]
pub struct TestManifest {
    tests: IndexMap<String, TestKind>,
}

impl TestManifest {
    pub fn parse(src: &str) -> Self {
        let mut tests = IndexMap::new();
        for line in src.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (kind, path) = line.split_once(' ').unwrap_or((line, ""));
            let path = path.trim();
            if path.is_empty() {
                log::debug!(target: "specpress::wpt", "manifest line without a path: {line:?}");
                continue;
            }
            tests.insert(path.to_string(), TestKind::parse(kind));
        }
        Self { tests }
    }

    pub fn get(&self, path: &str) -> Option<&TestKind> {
        self.tests.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tests.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, TestKind)> for TestManifest {
    fn from_iter<T: IntoIterator<Item = (S, TestKind)>>(iter: T) -> Self {
        Self {
            tests: iter.into_iter().map(|(p, k)| (p.into(), k)).collect(),
        }
    }
}

/// Holds the manifest for one document pass. The resource is fetched on the
/// first request and never again.
#[derive(Debug, Default)]
pub struct ManifestCell {
    loaded: Option<TestManifest>,
}

impl ManifestCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn get(&self) -> Option<&TestManifest> {
        self.loaded.as_ref()
    }

    pub fn get_or_load(&mut self, files: &dyn DataFiles) -> Result<&TestManifest, DataFileError> {
        match &mut self.loaded {
            Some(manifest) => Ok(manifest),
            slot => {
                let manifest = TestManifest::parse(&files.fetch(MANIFEST_NAME)?);
                log::debug!(target: "specpress::wpt", "loaded {} tests from {MANIFEST_NAME}", manifest.len());
                Ok(slot.insert(manifest))
            }
        }
    }
}
