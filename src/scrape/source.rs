// src/scrape/source.rs
use std::fs;
use std::path::PathBuf;

use crate::config::options::ScrapeOptions;
use crate::core::net::HttpClient;
use crate::error::NetError;

/// Where ranking HTML comes from.
pub trait PageSource: Send + Sync {
    fn describe(&self) -> String;

    fn fetch_html(&self) -> Result<String, NetError>;
}

/// The live ranking page.
pub struct HttpSource {
    url: String,
    client: HttpClient,
}

impl HttpSource {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, NetError> {
        Ok(Self {
            url: opts.url.clone(),
            client: HttpClient::new(&opts.user_agent, opts.timeout)?,
        })
    }
}

impl PageSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch_html(&self) -> Result<String, NetError> {
        self.client.get_text(&self.url)
    }
}

/// A saved copy of the page.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_html(&self) -> Result<String, NetError> {
        fs::read_to_string(&self.path)
            .map_err(|source| NetError::File { path: self.path.clone(), source })
    }
}
