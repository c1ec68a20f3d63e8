use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::roster::tools::error::{Result, ToolError};

/// Where a spreadsheet is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote resource fetched over HTTP(S).
    Url(String),
    /// Workbook on the local filesystem.
    Path(PathBuf),
}

impl Source {
    /// Interprets `http://` and `https://` locations as URLs and anything
    /// else as a filesystem path.
    pub fn parse(location: &str) -> Self {
        let lowered = location.trim_start().to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Source::Url(location.trim().to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Blocking byte loader shared by both sources of a run.
pub struct Fetcher {
    http: reqwest::blocking::Client,
}

impl Fetcher {
    /// Builds a fetcher whose HTTP requests give up after `timeout`.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("roster-tools/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Loads the raw bytes behind `source`.
    #[instrument(level = "info", skip_all, fields(source = %source))]
    pub fn fetch(&self, source: &Source) -> Result<Vec<u8>> {
        let bytes = match source {
            Source::Url(url) => self.fetch_url(url)?,
            Source::Path(path) => fs::read(path)?,
        };
        info!(bytes = bytes.len(), "source retrieved");
        Ok(bytes)
    }

    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(ToolError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}
