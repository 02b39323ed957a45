// src/data.rs
//
// Canonical ranking data.
//
// - ParticipantRecord: one leaderboard row, typed, with derived star counters.
// - Dataset: one scrape's records, all carrying the same number of day values.
//
// A Dataset is built once (scrape or snapshot load) and then only shared
// behind an `Arc`; nothing mutates it after it leaves the builder.

use crate::config::consts::{MAX_DAYS, MAX_DAY_VALUE};

/// Campus codes the page is known to publish. Others are kept as-is.
pub const KNOWN_CAMPUSES: &[&str] = &["UDZ", "BCN", "MAL", "MAD"];

pub const COL_LOGIN: &str = "login";
pub const COL_CAMPUS: &str = "campus";
pub const COL_STREAK: &str = "streak";
pub const COL_POINTS: &str = "points";
pub const COL_COMPLETED_DAYS: &str = "completed_days";
pub const COL_GOLD_STARS: &str = "gold_stars";
pub const COL_SILVER_STARS: &str = "silver_stars";
pub const COL_TOTAL_STARS: &str = "total_stars";
pub const DAY_PREFIX: &str = "day_";

pub fn is_known_campus(code: &str) -> bool {
    KNOWN_CAMPUSES.contains(&code)
}

/// Left-to-right accumulator over day values.
///
/// `completed_days` is a high-water mark (highest day with a star), not a count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub completed_days: usize,
    pub gold_stars: usize,
    pub silver_stars: usize,
}

impl Tally {
    /// Account for day `day_index` (1-based) having `value` stars.
    pub fn record(&mut self, day_index: usize, value: u8) {
        match value {
            0 => return,
            1 => self.silver_stars += 1,
            _ => self.gold_stars += 1,
        }
        if day_index > self.completed_days {
            self.completed_days = day_index;
        }
    }

    pub fn total_stars(&self) -> usize {
        self.gold_stars + self.silver_stars
    }

    pub fn from_days(days: &[u8]) -> Self {
        let mut t = Tally::default();
        for (i, &v) in days.iter().enumerate() {
            t.record(i + 1, v);
        }
        t
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantRecord {
    pub login: String,
    pub campus: String,
    pub streak: u32,
    pub points: f64,
    /// `days[0]` is day 1. Each value is 0, 1 or 2.
    pub days: Vec<u8>,
    pub completed_days: usize,
    pub gold_stars: usize,
    pub silver_stars: usize,
    pub total_stars: usize,
}

impl ParticipantRecord {
    /// Build a record; day values are clamped to 0..=2 and counters derived.
    pub fn new(login: String, campus: String, streak: u32, points: f64, mut days: Vec<u8>) -> Self {
        for v in days.iter_mut() {
            *v = (*v).min(MAX_DAY_VALUE);
        }
        let tally = Tally::from_days(&days);
        Self {
            login,
            campus,
            streak,
            points,
            days,
            completed_days: tally.completed_days,
            gold_stars: tally.gold_stars,
            silver_stars: tally.silver_stars,
            total_stars: tally.total_stars(),
        }
    }

    /// Star value for 1-based `day`; days past the end read as 0.
    pub fn day(&self, day: usize) -> u8 {
        day.checked_sub(1).and_then(|i| self.days.get(i)).copied().unwrap_or(0)
    }

    /// Pad with zeros or truncate to exactly `n` days, re-deriving counters.
    fn fit_days(&mut self, n: usize) {
        if self.days.len() == n {
            return;
        }
        self.days.resize(n, 0);
        let tally = Tally::from_days(&self.days);
        self.completed_days = tally.completed_days;
        self.gold_stars = tally.gold_stars;
        self.silver_stars = tally.silver_stars;
        self.total_stars = tally.total_stars();
    }

    /// Values in column order (see [`headers`]).
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(8 + self.days.len());
        row.push(self.login.clone());
        row.push(self.campus.clone());
        row.push(self.streak.to_string());
        row.push(self.points.to_string());
        row.extend(self.days.iter().map(|d| d.to_string()));
        row.push(self.completed_days.to_string());
        row.push(self.gold_stars.to_string());
        row.push(self.silver_stars.to_string());
        row.push(self.total_stars.to_string());
        row
    }
}

/// Column names for a dataset with `days` day columns.
pub fn headers(days: usize) -> Vec<String> {
    let mut h = vec![s!(COL_LOGIN), s!(COL_CAMPUS), s!(COL_STREAK), s!(COL_POINTS)];
    h.extend((1..=days).map(|i| format!("{DAY_PREFIX}{i}")));
    h.extend([COL_COMPLETED_DAYS, COL_GOLD_STARS, COL_SILVER_STARS, COL_TOTAL_STARS].map(String::from));
    h
}

/// Parse `day_<n>` into `n`.
pub fn day_column_index(name: &str) -> Option<usize> {
    name.strip_prefix(DAY_PREFIX)?.parse().ok().filter(|&n| n >= 1)
}

/// Human-readable description of an output column.
pub fn column_description(name: &str) -> Option<String> {
    let d = match name {
        COL_LOGIN => "User login name",
        COL_CAMPUS => "Campus name",
        COL_STREAK => "Current streak of consecutive days completed",
        COL_POINTS => "Total points earned",
        COL_COMPLETED_DAYS => "Highest day number with at least one star",
        COL_GOLD_STARS => "Total number of gold stars (2 per day)",
        COL_SILVER_STARS => "Total number of silver stars (1 per day)",
        COL_TOTAL_STARS => "Total number of stars (silver + gold)",
        other => {
            let n = day_column_index(other).filter(|&n| n <= MAX_DAYS)?;
            return Some(format!("Day {n} completion (0=none, 1=silver star, 2=gold stars)"));
        }
    };
    Some(s!(d))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    days: usize,
    records: Vec<ParticipantRecord>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Dataset with exactly `days` day columns (capped at the event length).
    pub fn with_days(days: usize, mut records: Vec<ParticipantRecord>) -> Self {
        let days = days.min(MAX_DAYS);
        for r in records.iter_mut() {
            r.fit_days(days);
        }
        Self { days, records }
    }

    /// Dataset whose day count is the widest record's.
    pub fn from_records(records: Vec<ParticipantRecord>) -> Self {
        let days = records.iter().map(|r| r.days.len()).max().unwrap_or(0);
        Self::with_days(days, records)
    }

    /// Stable sort, highest points first.
    pub fn sorted_by_points(mut self) -> Self {
        self.records.sort_by(|a, b| b.points.total_cmp(&a.points));
        self
    }

    pub fn days(&self) -> usize { self.days }
    pub fn records(&self) -> &[ParticipantRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, ParticipantRecord> { self.records.iter() }

    pub fn get(&self, login: &str) -> Option<&ParticipantRecord> {
        self.records.iter().find(|r| r.login == login)
    }

    pub fn headers(&self) -> Vec<String> {
        headers(self.days)
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(ParticipantRecord::to_row).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ParticipantRecord;
    type IntoIter = std::slice::Iter<'a, ParticipantRecord>;
    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(login: &str, points: f64, days: Vec<u8>) -> ParticipantRecord {
        ParticipantRecord::new(s!(login), s!("BCN"), 0, points, days)
    }

    #[test]
    fn completed_days_is_high_water_mark() {
        let r = rec("a", 1.0, vec![2, 0, 1, 0, 0]);
        assert_eq!(r.completed_days, 3);
        assert_eq!(r.gold_stars, 1);
        assert_eq!(r.silver_stars, 1);
        assert_eq!(r.total_stars, 2);
    }

    #[test]
    fn no_stars_means_zero_counters() {
        let r = rec("a", 0.0, vec![0, 0, 0]);
        assert_eq!(r.completed_days, 0);
        assert_eq!(r.total_stars, 0);
    }

    #[test]
    fn day_values_clamped() {
        let r = rec("a", 0.0, vec![7]);
        assert_eq!(r.days, vec![2]);
        assert_eq!(r.gold_stars, 1);
    }

    #[test]
    fn with_days_pads_and_truncates() {
        let ds = Dataset::with_days(3, vec![rec("a", 1.0, vec![1]), rec("b", 2.0, vec![2, 2, 2, 2])]);
        assert_eq!(ds.days(), 3);
        assert_eq!(ds.records()[0].days, vec![1, 0, 0]);
        assert_eq!(ds.records()[1].days, vec![2, 2, 2]);
        assert_eq!(ds.records()[1].completed_days, 3);
        assert_eq!(ds.records()[1].gold_stars, 3);
    }

    #[test]
    fn from_records_uses_widest_row() {
        let ds = Dataset::from_records(vec![rec("a", 1.0, vec![1]), rec("b", 2.0, vec![0, 1])]);
        assert_eq!(ds.days(), 2);
        assert_eq!(ds.records()[0].days, vec![1, 0]);
    }

    #[test]
    fn sorted_by_points_desc_and_stable() {
        let ds = Dataset::from_records(vec![
            rec("low", 1.0, vec![]),
            rec("tie1", 5.0, vec![]),
            rec("high", 9.5, vec![]),
            rec("tie2", 5.0, vec![]),
        ])
        .sorted_by_points();
        let order: Vec<_> = ds.iter().map(|r| r.login.as_str()).collect();
        assert_eq!(order, vec!["high", "tie1", "tie2", "low"]);
    }

    #[test]
    fn headers_layout() {
        assert_eq!(
            headers(2),
            vec![
                "login", "campus", "streak", "points", "day_1", "day_2",
                "completed_days", "gold_stars", "silver_stars", "total_stars"
            ]
        );
    }

    #[test]
    fn row_matches_headers() {
        let ds = Dataset::from_records(vec![rec("a", 100.0, vec![2, 1])]);
        let rows = ds.rows();
        assert_eq!(rows[0].len(), ds.headers().len());
        assert_eq!(rows[0], vec!["a", "BCN", "0", "100", "2", "1", "2", "1", "1", "2"]);
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            column_description("completed_days").as_deref(),
            Some("Highest day number with at least one star")
        );
        assert!(column_description("day_7").unwrap().starts_with("Day 7 "));
        assert!(column_description("day_26").is_none());
        assert!(column_description("day_0").is_none());
        assert!(column_description("nope").is_none());
    }
}
