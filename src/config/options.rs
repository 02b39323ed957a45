// src/config/options.rs
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use super::consts::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub store: StoreOptions,
    pub cache: CacheOptions,
    pub log: LogOptions,
}

impl AppOptions {
    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        info!("opening config '{}'", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options: AppOptions = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scrape.validate()?;
        self.store.validate()?;
        if self.cache.ttl.is_zero() {
            info!("cache ttl is zero; every access will refetch");
        }
        Ok(())
    }
}

/* ---------------- Scrape ---------------- */

/// One recognized star-marker class and how many stars each occurrence is worth.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MarkerRule {
    pub class: String,
    pub weight: u8,
}

impl MarkerRule {
    pub fn new(class: &str, weight: u8) -> Self {
        Self { class: s!(class), weight }
    }
}

pub fn default_markers() -> Vec<MarkerRule> {
    DEFAULT_MARKERS.iter().map(|&(class, weight)| MarkerRule::new(class, weight)).collect()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub url: String,
    #[serde(rename = "timeout_secs", deserialize_with = "deserialize_seconds")]
    pub timeout: Duration,
    pub user_agent: String,
    pub table_selector: String,
    /// Number of published days. `None` infers it from the widest row.
    pub days: Option<usize>,
    pub markers: Vec<MarkerRule>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(RANKING_URL),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            table_selector: s!(TABLE_SELECTOR),
            days: None,
            markers: default_markers(),
        }
    }
}

impl ScrapeOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid(s!("scrape.url is empty")));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid(s!("scrape.timeout_secs must be > 0")));
        }
        if let Some(days) = self.days {
            if days == 0 || days > MAX_DAYS {
                return Err(ConfigError::Invalid(format!(
                    "scrape.days must be in 1..={MAX_DAYS}, got {days}"
                )));
            }
        }
        if self.markers.is_empty() {
            return Err(ConfigError::Invalid(s!("scrape.markers is empty")));
        }
        for m in &self.markers {
            if m.class.trim().is_empty() {
                return Err(ConfigError::Invalid(s!("marker class is empty")));
            }
            if m.weight == 0 || m.weight > MAX_DAY_VALUE {
                return Err(ConfigError::Invalid(format!(
                    "marker `{}` weight must be 1 or 2, got {}",
                    m.class, m.weight
                )));
            }
        }
        // Selectors are compiled once here so bad ones fail at startup.
        crate::specs::ranking::RankingTable::new(&self.table_selector)?;
        crate::specs::stars::StarCounter::new(&self.markers)?;
        Ok(())
    }
}

/* ---------------- Store ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub dir: PathBuf,
    pub prefix: String,
    pub ext: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(SNAPSHOT_DIR),
            prefix: s!(SNAPSHOT_PREFIX),
            ext: s!(SNAPSHOT_EXT),
        }
    }
}

impl StoreOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!("bad snapshot prefix {:?}", self.prefix)));
        }
        if self.ext.is_empty() || self.ext.contains(['.', '/', '\\']) {
            return Err(ConfigError::Invalid(format!("bad snapshot extension {:?}", self.ext)));
        }
        Ok(())
    }
}

/* ---------------- Cache / log ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    #[serde(rename = "ttl_secs", deserialize_with = "deserialize_seconds")]
    pub ttl: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { ttl: Duration::from_secs(CACHE_TTL_SECS) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self { file: None, level: s!(LOG_LEVEL) }
    }
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}
