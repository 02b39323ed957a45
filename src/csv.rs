// src/csv.rs
use std::io::{Read, Write};
use std::path::Path;

use crate::config::consts::MAX_DAYS;
use crate::data::{
    day_column_index, Dataset, ParticipantRecord, COL_CAMPUS, COL_LOGIN, COL_POINTS, COL_STREAK,
};
use crate::error::StoreError;

/* ---------------- Writing ---------------- */

/// Write headers + one row per record.
pub fn write_dataset<W: Write>(w: W, ds: &Dataset) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(w);
    out.write_record(ds.headers())?;
    for rec in ds {
        out.write_record(rec.to_row())?;
    }
    out.flush()?;
    Ok(())
}

/* ---------------- Parsing ---------------- */

/// Column positions resolved from a header row.
struct Layout {
    login: usize,
    campus: usize,
    streak: usize,
    points: usize,
    /// (day number, column index)
    days: Vec<(usize, usize)>,
    n_days: usize,
}

impl Layout {
    fn from_headers(h: &csv::StringRecord) -> Result<Self, String> {
        let find = |name: &str| {
            h.iter().position(|c| c.trim() == name).ok_or_else(|| format!("missing column `{name}`"))
        };
        let days: Vec<(usize, usize)> = h
            .iter()
            .enumerate()
            .filter_map(|(ix, c)| day_column_index(c.trim()).map(|d| (d, ix)))
            .collect();
        if let Some(&(d, _)) = days.iter().find(|&&(d, _)| d > MAX_DAYS) {
            return Err(format!("column `day_{d}` past day {MAX_DAYS}"));
        }
        let n_days = days.iter().map(|&(d, _)| d).max().unwrap_or(0);
        Ok(Self {
            login: find(COL_LOGIN)?,
            campus: find(COL_CAMPUS)?,
            streak: find(COL_STREAK)?,
            points: find(COL_POINTS)?,
            days,
            n_days,
        })
    }

    fn record(&self, row: &csv::StringRecord) -> Result<ParticipantRecord, String> {
        let cell = |ix: usize| row.get(ix).map(str::trim).unwrap_or("");

        let login = cell(self.login);
        if login.is_empty() {
            return Err(s!("empty login"));
        }
        let streak = cell(self.streak)
            .parse::<u32>()
            .map_err(|_| format!("bad streak {:?}", cell(self.streak)))?;
        let points = cell(self.points)
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| format!("bad points {:?}", cell(self.points)))?;

        let mut days = vec![0u8; self.n_days];
        for &(day, ix) in &self.days {
            days[day - 1] = parse_day(cell(ix)).ok_or_else(|| format!("bad day_{day} {:?}", cell(ix)))?;
        }
        Ok(ParticipantRecord::new(s!(login), s!(cell(self.campus)), streak, points, days))
    }
}

/// Day values may have been written as "2" or "2.0" by other tools.
fn parse_day(s: &str) -> Option<u8> {
    if s.is_empty() {
        return Some(0);
    }
    if let Ok(v) = s.parse::<u8>() {
        return (v <= 2).then_some(v);
    }
    let f = s.parse::<f64>().ok()?;
    (f.fract() == 0.0 && (0.0..=2.0).contains(&f)).then_some(f as u8)
}

/// Read a dataset written by [`write_dataset`]. Derived counters are
/// recomputed from the day columns. `path` is for error context only.
pub fn read_dataset<R: Read>(r: R, path: &Path) -> Result<Dataset, StoreError> {
    let malformed = |reason: String| StoreError::Malformed { path: path.to_path_buf(), reason };

    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(false).from_reader(r);
    let headers = rdr.headers().map_err(|e| StoreError::csv(path, e))?.clone();
    let layout = Layout::from_headers(&headers).map_err(malformed)?;

    let mut records = Vec::new();
    for (ix, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| StoreError::csv(path, e))?;
        let rec = layout.record(&row).map_err(|e| malformed(format!("row {}: {e}", ix + 1)))?;
        records.push(rec);
    }
    Ok(Dataset::with_days(layout.n_days, records))
}
