// src/specs/stars.rs
//! Star-marker counting for day cells.
//!
//! The page draws up to two glyphs per day. Depending on the site revision the
//! tier is encoded either by cardinality of a single class (`star1` once =
//! silver, twice = gold) or by two distinct classes. Both are covered by a
//! class → weight table: each class count is clamped to 2, weighted, summed,
//! and the day value is capped at 2.

use scraper::{ElementRef, Selector};

use crate::config::consts::{MAX_DAY_VALUE, MAX_MARKERS_PER_CLASS};
use crate::config::options::MarkerRule;
use crate::core::html::selector;
use crate::error::ConfigError;

struct CompiledMarker {
    class: String,
    selector: Selector,
    weight: u8,
}

/// Marker table compiled into selectors once, then reused for every cell.
pub struct StarCounter {
    markers: Vec<CompiledMarker>,
}

impl StarCounter {
    pub fn new(rules: &[MarkerRule]) -> Result<Self, ConfigError> {
        let mut markers = Vec::with_capacity(rules.len());
        for rule in rules {
            let class = rule.class.trim();
            markers.push(CompiledMarker {
                class: s!(class),
                selector: selector(&format!(".{class}"))?,
                weight: rule.weight,
            });
        }
        Ok(Self { markers })
    }

    /// Star value (0, 1 or 2) of one day cell.
    pub fn day_value(&self, cell: ElementRef<'_>) -> u8 {
        let mut sum = 0usize;
        for m in &self.markers {
            let n = cell.select(&m.selector).take(MAX_MARKERS_PER_CLASS + 1).count();
            if n > MAX_MARKERS_PER_CLASS {
                tracing::debug!("clamping {n}+ `{}` markers to {MAX_MARKERS_PER_CLASS}", m.class);
            }
            sum += n.min(MAX_MARKERS_PER_CLASS) * m.weight as usize;
        }
        sum.min(MAX_DAY_VALUE as usize) as u8
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(|m| m.class.as_str())
    }
}
