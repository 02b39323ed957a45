// src/error.rs
//! Error taxonomy for the scrape pipeline.
//!
//! Every kind here is recoverable at some layer: rows are skipped, scrapes fall
//! back to snapshots, store failures are logged. Only `ConfigError` is fatal,
//! and only at startup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fetching the ranking page failed.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read page from {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The page does not have the shape the parser expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("ranking table not found (selector `{selector}`)")]
    TableNotFound { selector: String },

    #[error("ranking table has no body")]
    BodyNotFound,
}

/// Why a single table row produced no record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowError {
    #[error("row has {found} cells, need at least {needed}")]
    TooFewCells { found: usize, needed: usize },

    #[error("empty login")]
    EmptyLogin,

    #[error("invalid {field}: {value:?}")]
    BadNumber { field: &'static str, value: String },
}

/// A scrape produced no dataset.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no valid records ({raw_rows} rows inspected)")]
    NoRecords { raw_rows: usize },
}

/// Reading or writing a snapshot failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("snapshot {path} did not materialize on disk")]
    NotMaterialized { path: PathBuf },

    #[error("malformed snapshot {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        StoreError::Csv { path: path.into(), source }
    }
}

/// The configuration cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid selector `{selector}`")]
    Selector { selector: String },

    #[error("cannot set up HTTP client: {0}")]
    Http(#[source] NetError),

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
