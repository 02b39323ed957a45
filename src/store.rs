// src/store.rs
//! Snapshot store: one CSV per successful scrape, named
//! `<prefix>_<YYYYMMDDHHMMSS>.<ext>`, newest = lexicographically greatest.
//!
//! Writes go to a temporary name in the same directory and are renamed into
//! place, so `latest()` never observes a half-written snapshot.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info, warn};

use crate::config::consts::{SNAPSHOT_TS_FORMAT, SNAPSHOT_TS_LEN};
use crate::config::options::StoreOptions;
use crate::csv::{read_dataset, write_dataset};
use crate::data::Dataset;
use crate::error::StoreError;

/// A loaded snapshot.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub dataset: Dataset,
    pub taken_at: NaiveDateTime,
    pub path: PathBuf,
}

/// A snapshot file on disk, not yet loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotFile {
    pub path: PathBuf,
    pub taken_at: NaiveDateTime,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: usize,
    /// Leftover `.tmp` files from interrupted writes.
    pub temp_removed: usize,
    pub failed: usize,
}

pub struct SnapshotStore {
    opts: StoreOptions,
}

impl SnapshotStore {
    pub fn new(opts: StoreOptions) -> Self {
        Self { opts }
    }

    pub fn dir(&self) -> &Path {
        &self.opts.dir
    }

    /// File name for a snapshot taken at `ts`.
    pub fn file_name(&self, ts: NaiveDateTime) -> String {
        format!("{}_{}.{}", self.opts.prefix, ts.format(SNAPSHOT_TS_FORMAT), self.opts.ext)
    }

    /// Timestamp embedded in a snapshot file name, if it is one of ours.
    pub fn parse_file_name(&self, name: &str) -> Option<NaiveDateTime> {
        let stem = name.strip_suffix(&join!(".", &self.opts.ext))?;
        let ts = stem.strip_prefix(&self.opts.prefix)?.strip_prefix('_')?;
        if ts.len() != SNAPSHOT_TS_LEN || !ts.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDateTime::parse_from_str(ts, SNAPSHOT_TS_FORMAT).ok()
    }

    /// Whether `name` looks like one of our snapshots, timestamp valid or not.
    fn is_snapshot_name(&self, name: &str) -> bool {
        name.starts_with(&join!(&self.opts.prefix, "_")) && name.ends_with(&join!(".", &self.opts.ext))
    }

    /// Temporary name of an interrupted [`write_at`](Self::write_at).
    fn is_temp_name(&self, name: &str) -> bool {
        name.starts_with(&join!(".", &self.opts.prefix, "_"))
            && name.ends_with(&join!(".", &self.opts.ext, ".tmp"))
    }

    /// Persist `ds` stamped with the current local time.
    pub fn write(&self, ds: &Dataset) -> Result<PathBuf, StoreError> {
        self.write_at(ds, Local::now().naive_local())
    }

    /// Persist `ds` under the name for `ts`. Returns the final path.
    pub fn write_at(&self, ds: &Dataset, ts: NaiveDateTime) -> Result<PathBuf, StoreError> {
        let dir = &self.opts.dir;
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let path = dir.join(self.file_name(ts));
        let tmp = dir.join(join!(".", &self.file_name(ts), ".tmp"));

        if let Err(e) = write_synced(&tmp, ds) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(&path, e)
        })?;

        if !path.is_file() {
            return Err(StoreError::NotMaterialized { path });
        }
        info!("wrote snapshot {} ({} records)", path.display(), ds.len());
        Ok(path)
    }

    /// All snapshot files with a valid timestamp, oldest first.
    pub fn list(&self) -> Result<Vec<SnapshotFile>, StoreError> {
        let dir = &self.opts.dir;
        let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(dir, e))?;
            let path = entry.path();
            if !path.is_file() { continue; }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else { continue };
            match self.parse_file_name(name) {
                Some(taken_at) => out.push(SnapshotFile { path: path.clone(), taken_at }),
                None if self.is_snapshot_name(name) => debug!("skipping {name}: no timestamp"),
                None => {}
            }
        }
        // Fixed-width timestamps: name order is time order.
        out.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(out)
    }

    /// The newest snapshot, or `None` when there is no usable backup.
    pub fn latest(&self) -> Option<Snapshot> {
        let files = match self.list() {
            Ok(f) => f,
            Err(e) => {
                warn!("no snapshots available: {e}");
                return None;
            }
        };
        let Some(newest) = files.into_iter().last() else {
            warn!("no snapshot files in {}", self.opts.dir.display());
            return None;
        };

        match load(&newest.path) {
            Ok(dataset) => {
                info!(
                    "found latest snapshot {} from {} ({} records)",
                    newest.path.display(), newest.taken_at, dataset.len()
                );
                Some(Snapshot { dataset, taken_at: newest.taken_at, path: newest.path })
            }
            Err(e) => {
                error!("failed to load snapshot {}: {e}", newest.path.display());
                None
            }
        }
    }

    /// Delete every snapshot except `keep`, plus stale temp files.
    /// Only call after `keep` was written.
    pub fn prune(&self, keep: &Path) -> PruneReport {
        let mut report = PruneReport::default();
        let entries = match fs::read_dir(&self.opts.dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot scan {} for pruning: {e}", self.opts.dir.display());
                return report;
            }
        };
        let keep_name = keep.file_name();

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else { continue };
            let temp = self.is_temp_name(name);
            if !(temp || self.is_snapshot_name(name)) || path.file_name() == keep_name {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) if temp => {
                    report.temp_removed += 1;
                    info!("deleted stale temp file {}", path.display());
                }
                Ok(()) => {
                    report.removed += 1;
                    info!("deleted old snapshot {}", path.display());
                }
                Err(e) => {
                    report.failed += 1;
                    error!("error deleting {}: {e}", path.display());
                }
            }
        }
        if report.removed > 0 {
            info!("cleaned up {} old snapshots", report.removed);
        }
        report
    }
}

/* ---------- helpers ---------- */

fn write_synced(path: &Path, ds: &Dataset) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_dataset(&mut out, ds).map_err(|e| StoreError::csv(path, e))?;
    out.flush().map_err(|e| StoreError::io(path, e))?;
    let file = out.into_inner().map_err(|e| StoreError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| StoreError::io(path, e))
}

fn load(path: &Path) -> Result<Dataset, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    read_dataset(BufReader::new(file), path)
}
