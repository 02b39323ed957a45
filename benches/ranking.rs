// benches/ranking.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use aoc_scrape::config::ScrapeOptions;
use aoc_scrape::scrape::scrape_document;
use aoc_scrape::specs::ranking::RankingSpec;

const CAMPUSES: [&str; 4] = ["UDZ", "BCN", "MAL", "MAD"];

/// Ranking page with `rows` participants and 25 days of mixed markers.
fn synthetic_page(rows: usize) -> String {
    let mut body = String::new();
    for i in 0..rows {
        body.push_str(&format!(
            "<tr><td>user_{i}</td><td>{}</td><td>{}</td><td>{}.5</td>",
            CAMPUSES[i % CAMPUSES.len()], i % 25, (rows - i) * 3
        ));
        for d in 0..25 {
            let cell = match (i + d) % 3 {
                0 => r#"<td><span class="star-gold"></span><span class="star-gold"></span></td>"#,
                1 => r#"<td><span class="star-silver"></span></td>"#,
                _ => "<td></td>",
            };
            body.push_str(cell);
        }
        body.push_str("</tr>");
    }
    format!(r#"<html><body><table id="rankingTable"><thead></thead><tbody>{body}</tbody></table></body></html>"#)
}

fn bench_ranking(c: &mut Criterion) {
    let spec = RankingSpec::from_options(&ScrapeOptions::default()).expect("default spec");
    let doc = synthetic_page(1_000);

    c.bench_function("ranking_1000_rows", |b| {
        b.iter(|| {
            let out = scrape_document(black_box(&doc), &spec).expect("parse");
            black_box(out.dataset.len())
        })
    });
}

criterion_group!(benches, bench_ranking);
criterion_main!(benches);
