use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("couldn't load data file '{name}' from {location}: {source}")]
pub struct DataFileError {
    pub name: String,
    pub location: String,
    #[source]
    pub source: std::io::Error,
}

/// Source of named text resources (cached manifests and similar data).
pub trait DataFiles {
    fn fetch(&self, name: &str) -> Result<String, DataFileError>;
}

/// Reads data files from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirDataFiles {
    root: PathBuf,
}

impl DirDataFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataFiles for DirDataFiles {
    fn fetch(&self, name: &str) -> Result<String, DataFileError> {
        let path = self.root.join(name);
        log::debug!(target: "specpress::data", "reading {}", path.display());
        std::fs::read_to_string(&path).map_err(|source| DataFileError {
            name: name.to_string(),
            location: self.root.display().to_string(),
            source,
        })
    }
}
