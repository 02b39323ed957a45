// tests/scrape_pipeline.rs
use std::fs;
use std::path::PathBuf;

use aoc_scrape::config::{MarkerRule, ScrapeOptions};
use aoc_scrape::error::{ParseError, ScrapeError};
use aoc_scrape::scrape::{scrape_document, FileSource, Scraper};
use aoc_scrape::specs::ranking::RankingSpec;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("aoc_scrape_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn spec() -> RankingSpec {
    RankingSpec::from_options(&ScrapeOptions::default()).unwrap()
}

const GOLD2: &str = r#"<td><span class="star-gold"></span><span class="star-gold"></span></td>"#;
const SILVER1: &str = r#"<td><span class="star-silver"></span></td>"#;
const EMPTY: &str = "<td></td>";

fn page(rows: &str) -> String {
    format!(
        r#"<html><body>
        <table id="summary"><tbody><tr><td>not this one</td></tr></tbody></table>
        <table id="rankingTable">
          <thead><tr><th>Login</th><th>Campus</th><th>Streak</th><th>Points</th></tr></thead>
          <tbody>{rows}</tbody>
        </table>
        </body></html>"#
    )
}

#[test]
fn single_row_with_gold_and_silver_days() {
    let html = page(&format!(
        "<tr><td> user_a </td><td>CampusX</td><td>5</td><td>100.0</td>{GOLD2}{SILVER1}</tr>"
    ));
    let out = scrape_document(&html, &spec()).unwrap();
    assert_eq!(out.dataset.len(), 1);

    let r = out.dataset.get("user_a").unwrap();
    assert_eq!(r.campus, "CampusX");
    assert_eq!((r.streak, r.points), (5, 100.0));
    assert_eq!(r.days, vec![2, 1]);
    assert_eq!(r.completed_days, 2);
    assert_eq!((r.gold_stars, r.silver_stars, r.total_stars), (1, 1, 2));
}

#[test]
fn page_without_table_fails() {
    let err = scrape_document("<html><body><p>maintenance</p></body></html>", &spec()).unwrap_err();
    assert!(matches!(err, ScrapeError::Parse(ParseError::TableNotFound { .. })));
}

#[test]
fn short_row_is_dropped_and_scrape_continues() {
    let html = page(&format!(
        "<tr><td>a</td><td>BCN</td><td>1</td><td>7</td>{SILVER1}</tr>\
         <tr><td>b</td><td>BCN</td><td>3</td></tr>\
         <tr><td>c</td><td>MAD</td><td>0</td><td>9.5</td>{EMPTY}</tr>"
    ));
    let out = scrape_document(&html, &spec()).unwrap();
    assert_eq!(out.raw_rows, 3);
    assert_eq!(out.rejected_rows, 1);
    assert_eq!(out.dataset.len(), 2);
    assert!(out.dataset.get("b").is_none());
    // sorted by points
    assert_eq!(out.dataset.records()[0].login, "c");
}

#[test]
fn no_markers_means_nothing_completed() {
    let html = page(&format!("<tr><td>z</td><td>MAL</td><td>0</td><td>0</td>{EMPTY}{EMPTY}</tr>"));
    let r = scrape_document(&html, &spec()).unwrap().dataset.records()[0].clone();
    assert_eq!((r.completed_days, r.total_stars), (0, 0));
}

#[test]
fn completed_days_is_high_water_mark() {
    let html = page(&format!(
        "<tr><td>z</td><td>MAL</td><td>1</td><td>3</td>{EMPTY}{EMPTY}{SILVER1}{EMPTY}</tr>"
    ));
    let r = scrape_document(&html, &spec()).unwrap().dataset.records()[0].clone();
    assert_eq!(r.completed_days, 3);
    assert_eq!(r.days.len(), 4);
}

#[test]
fn custom_marker_scheme() {
    let opts = ScrapeOptions {
        markers: vec![MarkerRule::new("done", 2), MarkerRule::new("half", 1)],
        ..ScrapeOptions::default()
    };
    let spec = RankingSpec::from_options(&opts).unwrap();
    let html = page(
        r#"<tr><td>q</td><td>UDZ</td><td>2</td><td>4</td>
           <td><i class="done"></i></td><td><i class="half"></i></td><td><i class="star-gold"></i></td></tr>"#,
    );
    let r = scrape_document(&html, &spec).unwrap().dataset.records()[0].clone();
    assert_eq!(r.days, vec![2, 1, 0]);
}

#[test]
fn file_source_parses_saved_page() {
    let dir = tmp_dir("file_source");
    let path = dir.join("ranking.html");
    fs::write(&path, page(&format!("<tr><td>f</td><td>BCN</td><td>1</td><td>2</td>{GOLD2}</tr>"))).unwrap();

    let out = Scraper::new(FileSource::new(&path), spec()).fetch().unwrap();
    assert_eq!(out.dataset.len(), 1);
    assert_eq!(out.dataset.records()[0].gold_stars, 1);
}

#[test]
fn missing_file_is_net_error() {
    let out = Scraper::new(FileSource::new("/definitely/not/here.html"), spec()).fetch();
    assert!(matches!(out, Err(ScrapeError::Net(_))));
}
