// src/scrape/scrape.rs
use std::collections::HashSet;

use scraper::Html;
use tracing::{info, warn};

use crate::config::options::ScrapeOptions;
use crate::data::Dataset;
use crate::error::{ConfigError, ScrapeError};
use crate::specs::ranking::RankingSpec;

use super::source::{HttpSource, PageSource};

/// Result of one successful scrape.
#[derive(Clone, Debug)]
pub struct Scrape {
    pub dataset: Dataset,
    /// `<tr>` rows seen in the table body.
    pub raw_rows: usize,
    /// Rows dropped as malformed.
    pub rejected_rows: usize,
    /// Rows dropped because their login was already seen.
    pub duplicate_rows: usize,
}

/// Parse one ranking page into a dataset sorted by points.
///
/// Zero valid rows is a failure, not an empty success.
pub fn scrape_document(html: &str, spec: &RankingSpec) -> Result<Scrape, ScrapeError> {
    let doc = Html::parse_document(html);
    let rows = spec.table.rows(&doc).inspect_err(|e| warn!("ranking page unusable: {e}"))?;

    let mut records = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let (mut raw_rows, mut rejected_rows, mut duplicate_rows) = (0usize, 0usize, 0usize);

    for (ix, row) in rows.enumerate() {
        raw_rows += 1;
        match spec.rows.normalize(row) {
            Ok(rec) => {
                if seen.insert(rec.login.clone()) {
                    records.push(rec);
                } else {
                    duplicate_rows += 1;
                    warn!("row {ix}: duplicate login {:?}, skipped", rec.login);
                }
            }
            Err(e) => {
                rejected_rows += 1;
                warn!("row {ix}: {e}, skipped");
            }
        }
    }

    if records.is_empty() {
        warn!("no valid records in {raw_rows} rows");
        return Err(ScrapeError::NoRecords { raw_rows });
    }

    let dataset = match spec.days {
        Some(n) => Dataset::with_days(n, records),
        None => Dataset::from_records(records),
    }
    .sorted_by_points();

    info!(
        "parsed {} records ({} rows, {} rejected, {} duplicate), {} days",
        dataset.len(), raw_rows, rejected_rows, duplicate_rows, dataset.days()
    );
    Ok(Scrape { dataset, raw_rows, rejected_rows, duplicate_rows })
}

/// Scrape orchestrator: one fetch, one parse, no retries.
pub struct Scraper<S> {
    source: S,
    spec: RankingSpec,
}

impl Scraper<HttpSource> {
    /// Orchestrator for the live page described by `opts`.
    pub fn from_options(opts: &ScrapeOptions) -> Result<Self, ConfigError> {
        let spec = RankingSpec::from_options(opts)?;
        let source = HttpSource::new(opts).map_err(ConfigError::Http)?;
        Ok(Self::new(source, spec))
    }
}

impl<S: PageSource> Scraper<S> {
    pub fn new(source: S, spec: RankingSpec) -> Self {
        Self { source, spec }
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    pub fn fetch(&self) -> Result<Scrape, ScrapeError> {
        let origin = self.source.describe();
        info!("scraping {origin}");
        let html = self
            .source
            .fetch_html()
            .inspect_err(|e| warn!("fetch from {origin} failed: {e}"))?;
        scrape_document(&html, &self.spec)
            .inspect_err(|e| warn!("scrape of {origin} failed: {e}"))
    }
}
