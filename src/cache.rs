// src/cache.rs
//! Short-TTL cache in front of the scrape orchestrator.
//!
//! Miss path: scrape → (write snapshot, prune older) | fall back to the latest
//! snapshot | report `Unavailable`. The cached entry (load + fetch instant) is
//! swapped as one `Arc`, and at most one refresh runs at a time.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use tracing::{error, info, warn};

use crate::config::options::CacheOptions;
use crate::data::Dataset;
use crate::scrape::{PageSource, Scraper};
use crate::store::SnapshotStore;

pub const WARN_STALE: &str = "Could not fetch new data. Showing latest saved data.";
pub const WARN_UNAVAILABLE: &str = "Could not fetch new data or load backup.";

/// Where the data handed to consumers came from.
#[derive(Clone, Debug, PartialEq)]
pub enum DataOrigin {
    Live { fetched_at: NaiveDateTime },
    Snapshot { taken_at: NaiveDateTime, path: PathBuf },
    /// Neither a live scrape nor a snapshot was available.
    Unavailable,
}

/// What `get()` hands out.
#[derive(Clone, Debug)]
pub struct Load {
    pub dataset: Arc<Dataset>,
    pub origin: DataOrigin,
    /// User-facing message when the data is not fresh.
    pub warning: Option<String>,
}

impl Load {
    pub fn is_available(&self) -> bool {
        self.origin != DataOrigin::Unavailable
    }

    fn unavailable() -> Self {
        Self {
            dataset: Arc::new(Dataset::empty()),
            origin: DataOrigin::Unavailable,
            warning: Some(s!(WARN_UNAVAILABLE)),
        }
    }
}

struct Entry {
    load: Load,
    stored_at: Instant,
}

pub struct DatasetCache<S> {
    scraper: Scraper<S>,
    store: SnapshotStore,
    ttl: Duration,
    entry: RwLock<Option<Arc<Entry>>>,
    refresh: Mutex<()>,
}

impl<S: PageSource> DatasetCache<S> {
    pub fn new(scraper: Scraper<S>, store: SnapshotStore, opts: &CacheOptions) -> Self {
        Self {
            scraper,
            store,
            ttl: opts.ttl,
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Cached data if fresh, otherwise one refresh.
    pub fn get(&self) -> Load {
        if let Some(load) = self.fresh() {
            return load;
        }

        let _guard = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have refreshed while we waited.
        if let Some(load) = self.fresh() {
            return load;
        }

        let load = self.load();
        if load.is_available() {
            let entry = Arc::new(Entry { load: load.clone(), stored_at: Instant::now() });
            *self.entry.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
        }
        load
    }

    /// Drop the cached entry; the next `get()` refreshes.
    pub fn invalidate(&self) {
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn fresh(&self) -> Option<Load> {
        let entry = self.entry.read().unwrap_or_else(PoisonError::into_inner).clone()?;
        (entry.stored_at.elapsed() < self.ttl).then(|| entry.load.clone())
    }

    fn load(&self) -> Load {
        info!("starting data load");
        match self.scraper.fetch() {
            Ok(scrape) => {
                let fetched_at = Local::now().naive_local();
                match self.store.write_at(&scrape.dataset, fetched_at) {
                    Ok(path) => {
                        info!("fresh data saved to {}", path.display());
                        self.store.prune(&path);
                    }
                    Err(e) => error!("failed to save snapshot: {e}"),
                }
                Load {
                    dataset: Arc::new(scrape.dataset),
                    origin: DataOrigin::Live { fetched_at },
                    warning: None,
                }
            }
            Err(e) => {
                warn!("scraping {} failed ({e}), attempting to load backup data", self.scraper.describe());
                match self.store.latest() {
                    Some(snap) => {
                        info!("loaded backup data from {}", snap.path.display());
                        Load {
                            dataset: Arc::new(snap.dataset),
                            origin: DataOrigin::Snapshot { taken_at: snap.taken_at, path: snap.path },
                            warning: Some(s!(WARN_STALE)),
                        }
                    }
                    None => {
                        error!("both scraping and backup loading failed");
                        Load::unavailable()
                    }
                }
            }
        }
    }
}
