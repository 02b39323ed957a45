// src/specs/ranking.rs
//! Scraping *spec* for the ranking page.
//!
//! Page shape:
//! ```text
//! <table id="rankingTable">
//!   <thead>…</thead>
//!   <tbody>
//!     <tr><td>login</td><td>campus</td><td>streak</td><td>points</td><td>day 1</td>…</tr>
//! ```
//! Day cells hold zero to two marker elements (see `specs::stars`).
//!
//! Responsibilities:
//! - Locate the table and its body, hand out row handles lazily.
//! - Turn one row into a `ParticipantRecord`, or say why it can't.
//!
//! Non-Responsibilities: fetching, sorting, dedup, persistence.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::consts::{LEADING_CELLS, MAX_DAYS, MIN_ROW_CELLS};
use crate::config::options::ScrapeOptions;
use crate::core::html::{children_named, selector, text_of};
use crate::core::sanitize::numeric_text;
use crate::data::{is_known_campus, ParticipantRecord};
use crate::error::{ConfigError, ParseError, RowError};

use super::stars::StarCounter;

/// Locates the ranking table by a CSS selector.
pub struct RankingTable {
    css: String,
    table: Selector,
}

impl RankingTable {
    pub fn new(css: &str) -> Result<Self, ConfigError> {
        Ok(Self { css: s!(css), table: selector(css)? })
    }

    /// Row handles of the table body, in page order.
    pub fn rows<'a>(
        &self,
        doc: &'a Html,
    ) -> Result<impl Iterator<Item = ElementRef<'a>> + use<'a>, ParseError> {
        let table = doc
            .select(&self.table)
            .next()
            .ok_or_else(|| ParseError::TableNotFound { selector: self.css.clone() })?;
        let body = children_named(table, "tbody").next().ok_or(ParseError::BodyNotFound)?;
        Ok(children_named(body, "tr"))
    }
}

/// Turns one `<tr>` into a typed record.
pub struct RowNormalizer {
    stars: StarCounter,
    max_days: usize,
}

impl RowNormalizer {
    pub fn new(stars: StarCounter, days: Option<usize>) -> Self {
        Self { stars, max_days: days.unwrap_or(MAX_DAYS).min(MAX_DAYS) }
    }

    pub fn normalize(&self, row: ElementRef<'_>) -> Result<ParticipantRecord, RowError> {
        let cells: Vec<ElementRef<'_>> = children_named(row, "td").collect();
        if cells.len() < MIN_ROW_CELLS {
            return Err(RowError::TooFewCells { found: cells.len(), needed: MIN_ROW_CELLS });
        }

        let login = text_of(cells[0]);
        if login.is_empty() {
            return Err(RowError::EmptyLogin);
        }
        let campus = text_of(cells[1]);
        if !is_known_campus(&campus) {
            debug!("unknown campus {campus:?} for {login}");
        }
        let streak = parse_streak(&text_of(cells[2]))?;
        let points = parse_points(&text_of(cells[3]))?;

        let day_cells = &cells[LEADING_CELLS..];
        if day_cells.len() > self.max_days {
            debug!("{login}: ignoring {} day cells past day {}", day_cells.len() - self.max_days, self.max_days);
        }
        let days: Vec<u8> = day_cells
            .iter()
            .take(self.max_days)
            .map(|&cell| self.stars.day_value(cell))
            .collect();

        Ok(ParticipantRecord::new(login, campus, streak, points, days))
    }
}

/// Everything needed to read a ranking page, compiled once from options.
pub struct RankingSpec {
    pub table: RankingTable,
    pub rows: RowNormalizer,
    /// Configured day count, if any.
    pub days: Option<usize>,
}

impl RankingSpec {
    pub fn from_options(opts: &ScrapeOptions) -> Result<Self, ConfigError> {
        let table = RankingTable::new(&opts.table_selector)?;
        let stars = StarCounter::new(&opts.markers)?;
        debug!(
            "ranking spec: table `{}`, markers [{}]",
            opts.table_selector,
            stars.classes().collect::<Vec<_>>().join(", ")
        );
        Ok(Self { table, rows: RowNormalizer::new(stars, opts.days), days: opts.days })
    }
}

/* ---------- helpers ---------- */

fn parse_streak(text: &str) -> Result<u32, RowError> {
    numeric_text(text)
        .parse::<u32>()
        .map_err(|_| RowError::BadNumber { field: "streak", value: s!(text) })
}

fn parse_points(text: &str) -> Result<f64, RowError> {
    match numeric_text(text).parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(RowError::BadNumber { field: "points", value: s!(text) }),
    }
}
