//! Blocking HTTP status probing for link checks.
//!
//! Requests run strictly one at a time on the calling thread.
use std::time::{Duration, Instant};

use thiserror::Error;
use url::Url;

const USER_AGENT: &str = concat!("specpress/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum NetError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("client build error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{0}")]
    Request(#[source] reqwest::Error),
}

#[derive(Clone, Debug, Default)]
pub struct ProbeOptions {
    pub verify_certificates: bool,
    /// `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

/// Outcome of a single GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeResult {
    pub requested_url: String,
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub duration_ms: u128,
}

impl ProbeResult {
    /// 2XX and 3XX count as reachable.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// Issues one GET and reports the response status.
pub trait LinkProbe {
    fn probe(&mut self, url: &str) -> Result<ProbeResult, NetError>;
}

pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(options: &ProbeOptions) -> Result<Self, NetError> {
        if !options.verify_certificates {
            log::debug!(target: "net", "certificate validation disabled for link probes");
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!options.verify_certificates)
            .timeout(options.timeout)
            .build()
            .map_err(NetError::Client)?;
        Ok(Self { client })
    }
}

impl LinkProbe for HttpProbe {
    fn probe(&mut self, url: &str) -> Result<ProbeResult, NetError> {
        let parsed = parse_http_url(url)?;
        let start = Instant::now();
        let resp = self
            .client
            .get(parsed)
            .send()
            .map_err(NetError::Request)?;
        let result = ProbeResult {
            requested_url: url.to_string(),
            url: resp.url().to_string(),
            status: resp.status().as_u16(),
            duration_ms: start.elapsed().as_millis(),
        };
        log::debug!(
            target: "net",
            "GET {} -> {} in {}ms",
            result.requested_url,
            result.status,
            result.duration_ms
        );
        Ok(result)
    }
}

/// Only absolute `http`/`https` URLs can be probed.
pub fn parse_http_url(url: &str) -> Result<Url, NetError> {
    let parsed = Url::parse(url).map_err(|source| NetError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(NetError::UnsupportedScheme(other.to_string())),
    }
}
