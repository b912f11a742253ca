//! Per-document metadata consumed by the processing passes.
//!
//! Loaded from a TOML file with kebab-case keys:
//!
//! ```toml
//! wpt-path-prefix = "/css/css-grid/"
//! wpt-display = "closed"
//!
//! [complain-about]
//! broken-links = true
//!
//! [link-check]
//! verify-certificates = false
//! timeout-secs = 30
//! ```
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid metadata in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
#[error("unknown WPT display value '{0}' (expected none, inline, open or closed)")]
pub struct InvalidWptDisplay(pub String);

/// How test-annotation blocks are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WptDisplay {
    /// Blocks are removed and no assets are attached.
    #[default]
    None,
    Inline,
    Open,
    Closed,
}

impl WptDisplay {
    pub fn as_str(self) -> &'static str {
        match self {
            WptDisplay::None => "none",
            WptDisplay::Inline => "inline",
            WptDisplay::Open => "open",
            WptDisplay::Closed => "closed",
        }
    }

    /// Whether rendered blocks start expanded.
    pub fn starts_open(self) -> bool {
        matches!(self, WptDisplay::Open | WptDisplay::Inline)
    }
}

impl fmt::Display for WptDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WptDisplay {
    type Err = InvalidWptDisplay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(WptDisplay::None),
            "inline" => Ok(WptDisplay::Inline),
            "open" => Ok(WptDisplay::Open),
            "closed" => Ok(WptDisplay::Closed),
            _ => Err(InvalidWptDisplay(s.to_string())),
        }
    }
}

/// Optional lint categories. All off unless requested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ComplainAbout {
    pub broken_links: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct LinkCheckOptions {
    /// Defaults to off.
    pub verify_certificates: bool,
    /// `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Metadata {
    pub wpt_path_prefix: Option<String>,
    pub wpt_display: WptDisplay,
    pub complain_about: ComplainAbout,
    pub link_check: LinkCheckOptions,
}

impl Metadata {
    pub fn from_toml_str(src: &str, origin: &str) -> Result<Self, MetadataError> {
        toml::from_str(src).map_err(|source| MetadataError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let display = path.display().to_string();
        let src = std::fs::read_to_string(path).map_err(|source| MetadataError::Read {
            path: display.clone(),
            source,
        })?;
        let md = Self::from_toml_str(&src, &display)?;
        log::debug!(target: "specpress::metadata", "loaded metadata from {display}: {md:?}");
        Ok(md)
    }
}
