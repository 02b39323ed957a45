// src/summary.rs
//! Aggregate metrics over one dataset: a global section plus one per campus,
//! and per-day completion percentages per campus.

use std::collections::BTreeMap;

use crate::data::{Dataset, ParticipantRecord};

/// Column titles matching [`SectionStats::row`].
pub const SUMMARY_HEADERS: &[&str] = &[
    "Section",
    "Students (Total / Active)",
    "Participation",
    "Points (Avg / Max)",
    "Streak (Avg / Max)",
    "Stars (Gold / Silver)",
    "Success Rate (Total / Active)",
];

pub const GLOBAL_SECTION: &str = "Global";

#[derive(Clone, Debug, PartialEq)]
pub struct SectionStats {
    /// `"Global"` or a campus code.
    pub section: String,
    pub students: usize,
    /// Participants with `points > 0`.
    pub active: usize,
    pub participation_pct: f64,
    pub points_avg: f64,
    pub points_max: f64,
    pub streak_avg: f64,
    pub streak_max: u32,
    pub gold_stars: usize,
    pub silver_stars: usize,
    pub success_rate_total: f64,
    pub success_rate_active: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub days: usize,
    pub global: SectionStats,
    /// Sorted by campus code.
    pub campuses: Vec<SectionStats>,
}

impl Summary {
    /// Global first, then campuses.
    pub fn sections(&self) -> impl Iterator<Item = &SectionStats> {
        std::iter::once(&self.global).chain(self.campuses.iter())
    }
}

/// Completion per day for one campus. `pct[i]` is day `i + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct CampusDaily {
    pub campus: String,
    pub pct: Vec<f64>,
}

pub fn summarize(ds: &Dataset) -> Summary {
    let days = ds.days();
    let all: Vec<&ParticipantRecord> = ds.iter().collect();
    let global = section_stats(GLOBAL_SECTION, &all, days);
    let campuses = by_campus(ds)
        .into_iter()
        .map(|(campus, recs)| section_stats(campus, &recs, days))
        .collect();
    Summary { days, global, campuses }
}

pub fn daily_completion(ds: &Dataset) -> Vec<CampusDaily> {
    let days = ds.days();
    by_campus(ds)
        .into_iter()
        .map(|(campus, recs)| {
            let pct = (1..=days)
                .map(|d| percent(recs.iter().filter(|r| r.day(d) > 0).count(), recs.len()))
                .collect();
            CampusDaily { campus: s!(campus), pct }
        })
        .collect()
}

impl SectionStats {
    /// Display row, one cell per [`SUMMARY_HEADERS`] entry.
    pub fn row(&self) -> Vec<String> {
        vec![
            self.section.clone(),
            format!("{} / {}", self.students, self.active),
            format!("{:.1}%", self.participation_pct),
            format!("{:.1} / {:.1}", self.points_avg, self.points_max),
            format!("{:.1} / {}", self.streak_avg, self.streak_max),
            format!("{} / {}", self.gold_stars, self.silver_stars),
            format!("{:.1}% / {:.1}%", self.success_rate_total, self.success_rate_active),
        ]
    }
}

/* ---------- helpers ---------- */

fn by_campus(ds: &Dataset) -> BTreeMap<&str, Vec<&ParticipantRecord>> {
    let mut map: BTreeMap<&str, Vec<&ParticipantRecord>> = BTreeMap::new();
    for r in ds {
        map.entry(r.campus.as_str()).or_default().push(r);
    }
    map
}

fn section_stats(section: &str, recs: &[&ParticipantRecord], days: usize) -> SectionStats {
    let students = recs.len();
    let active = recs.iter().filter(|r| r.points > 0.0).count();
    let total_stars: usize = recs.iter().map(|r| r.total_stars).sum();
    let possible = days * 2;

    SectionStats {
        section: s!(section),
        students,
        active,
        participation_pct: percent(active, students),
        points_avg: mean(recs.iter().map(|r| r.points), students),
        points_max: recs.iter().map(|r| r.points).fold(0.0, f64::max),
        streak_avg: mean(recs.iter().map(|r| f64::from(r.streak)), students),
        streak_max: recs.iter().map(|r| r.streak).max().unwrap_or(0),
        gold_stars: recs.iter().map(|r| r.gold_stars).sum(),
        silver_stars: recs.iter().map(|r| r.silver_stars).sum(),
        success_rate_total: percent(total_stars, students * possible),
        success_rate_active: percent(total_stars, active * possible),
    }
}

/// `part / whole * 100`, 0 when `whole` is 0.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    if n == 0 { 0.0 } else { values.sum::<f64>() / n as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(login: &str, campus: &str, streak: u32, points: f64, days: Vec<u8>) -> ParticipantRecord {
        ParticipantRecord::new(s!(login), s!(campus), streak, points, days)
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            rec("a", "MAD", 2, 40.0, vec![2, 2]),
            rec("b", "BCN", 1, 10.0, vec![1, 0]),
            rec("c", "BCN", 0, 0.0, vec![0, 0]),
        ])
    }

    #[test]
    fn global_section() {
        let s = summarize(&sample());
        let g = &s.global;
        assert_eq!((g.students, g.active), (3, 2));
        assert!((g.participation_pct - 66.666).abs() < 0.01);
        assert!((g.points_avg - 50.0 / 3.0).abs() < 1e-9);
        assert_eq!(g.points_max, 40.0);
        assert_eq!(g.streak_max, 2);
        assert_eq!((g.gold_stars, g.silver_stars), (2, 1));
        // 3 stars over 3 users × 4 possible
        assert!((g.success_rate_total - 25.0).abs() < 1e-9);
        assert!((g.success_rate_active - 37.5).abs() < 1e-9);
    }

    #[test]
    fn campuses_sorted_by_code() {
        let s = summarize(&sample());
        let names: Vec<_> = s.campuses.iter().map(|c| c.section.as_str()).collect();
        assert_eq!(names, vec!["BCN", "MAD"]);
        assert_eq!(s.campuses[0].students, 2);
        assert_eq!(s.sections().count(), 3);
    }

    #[test]
    fn empty_dataset_has_zero_rates() {
        let s = summarize(&Dataset::empty());
        assert_eq!(s.global.students, 0);
        assert_eq!(s.global.success_rate_total, 0.0);
        assert_eq!(s.global.points_avg, 0.0);
        assert!(s.campuses.is_empty());
    }

    #[test]
    fn daily_completion_per_campus() {
        let daily = daily_completion(&sample());
        assert_eq!(daily[0], CampusDaily { campus: s!("BCN"), pct: vec![50.0, 0.0] });
        assert_eq!(daily[1].pct, vec![100.0, 100.0]);
    }

    #[test]
    fn row_formatting() {
        let s = summarize(&sample());
        let row = s.campuses[1].row();
        assert_eq!(row.len(), SUMMARY_HEADERS.len());
        assert_eq!(row[1], "1 / 1");
        assert_eq!(row[6], "100.0% / 100.0%");
    }
}
