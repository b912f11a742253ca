use std::collections::HashMap;

use core_types::Metadata;
use document::{DataFileError, DataFiles, Document};
use net::{LinkProbe, NetError, ProbeResult};

pub struct NoFiles;

impl DataFiles for NoFiles {
    fn fetch(&self, name: &str) -> Result<String, DataFileError> {
        Err(DataFileError {
            name: name.to_string(),
            location: "test fixture".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no data files"),
        })
    }
}

/// Answers from a fixed table; URLs missing from it fail like a dead host.
#[derive(Default)]
pub struct FakeProbe {
    statuses: HashMap<String, u16>,
    pub requested: Vec<String>,
}

impl FakeProbe {
    pub fn with(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }
}

impl LinkProbe for FakeProbe {
    fn probe(&mut self, url: &str) -> Result<ProbeResult, NetError> {
        self.requested.push(url.to_string());
        match self.statuses.get(url) {
            Some(&status) => Ok(ProbeResult {
                requested_url: url.to_string(),
                url: url.to_string(),
                status,
                duration_ms: 0,
            }),
            None => Err(NetError::UnsupportedScheme("unreachable".to_string())),
        }
    }
}

pub fn document(src: &str, broken_links: bool) -> Document {
    let mut md = Metadata::default();
    md.complain_about.broken_links = broken_links;
    Document::parse(src, md, Box::new(NoFiles))
}
