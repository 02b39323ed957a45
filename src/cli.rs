// src/cli.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use tracing::info;

use crate::cache::{DataOrigin, DatasetCache};
use crate::config::consts::LOG_FILE;
use crate::config::AppOptions;
use crate::csv::write_dataset;
use crate::data::Dataset;
use crate::scrape::{FileSource, Scraper};
use crate::specs::ranking::RankingSpec;
use crate::store::SnapshotStore;
use crate::summary::{summarize, SUMMARY_HEADERS};

#[derive(Parser, Debug)]
#[command(name = "aoc_scrape")]
#[command(about = "Scrape the coding-challenge leaderboard into timestamped CSV snapshots", long_about = None)]
pub struct Cli {
    /// JSON config file; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Ranking page URL
    #[arg(long, global = true)]
    url: Option<String>,
    /// Snapshot directory
    #[arg(long, global = true)]
    dir: Option<PathBuf>,
    /// Number of published days (default: inferred from the page)
    #[arg(long, global = true)]
    days: Option<usize>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Cache TTL in seconds
    #[arg(long, global = true)]
    ttl: Option<u64>,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the live page, save a snapshot and prune older ones
    Scrape {
        /// Also export the dataset to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the newest snapshot
    Latest,
    /// Parse a saved copy of the page
    Parse {
        html: PathBuf,
        /// Output CSV (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print summary metrics, falling back to the latest snapshot
    Summary,
    /// List snapshot files, oldest first
    List,
}

impl Cli {
    /// Config file (if any) with flag overrides applied, validated.
    fn options(&self) -> color_eyre::Result<AppOptions> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::read(path)?,
            None => AppOptions::default(),
        };
        if let Some(url) = &self.url { opts.scrape.url = url.clone(); }
        if let Some(dir) = &self.dir { opts.store.dir = dir.clone(); }
        if let Some(days) = self.days { opts.scrape.days = Some(days); }
        if let Some(t) = self.timeout { opts.scrape.timeout = Duration::from_secs(t); }
        if let Some(t) = self.ttl { opts.cache.ttl = Duration::from_secs(t); }
        if self.verbose { opts.log.level = s!("debug"); }
        if opts.log.file.is_none() { opts.log.file = Some(PathBuf::from(LOG_FILE)); }

        opts.validate()?;
        Ok(opts)
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    let opts = cli.options()?;
    crate::log::init(&opts.log)?;

    let store = SnapshotStore::new(opts.store.clone());

    match cli.command {
        Command::Scrape { out } => {
            let scraper = Scraper::from_options(&opts.scrape)?;
            let scrape = scraper.fetch().wrap_err("scrape failed")?;
            let path = store.write(&scrape.dataset)?;
            store.prune(&path);
            println!(
                "Wrote {} ({} records, {} days)",
                path.display(), scrape.dataset.len(), scrape.dataset.days()
            );
            if let Some(out) = out {
                export(&scrape.dataset, &out)?;
                println!("Exported {}", out.display());
            }
        }
        Command::Latest => {
            let Some(snap) = store.latest() else {
                bail!("no usable snapshot in {}", store.dir().display());
            };
            println!("{}", snap.path.display());
            println!("taken at {}, {} records", snap.taken_at, snap.dataset.len());
        }
        Command::Parse { html, out } => {
            let spec = RankingSpec::from_options(&opts.scrape)?;
            let scrape = Scraper::new(FileSource::new(&html), spec).fetch()?;
            info!("{} rejected, {} duplicate rows", scrape.rejected_rows, scrape.duplicate_rows);
            match out {
                Some(out) => {
                    export(&scrape.dataset, &out)?;
                    println!("Wrote {} ({} records)", out.display(), scrape.dataset.len());
                }
                None => write_dataset(io::stdout().lock(), &scrape.dataset)?,
            }
        }
        Command::Summary => {
            let cache = DatasetCache::new(Scraper::from_options(&opts.scrape)?, store, &opts.cache);
            let load = cache.get();
            if let Some(w) = &load.warning {
                eprintln!("warning: {w}");
            }
            match &load.origin {
                DataOrigin::Live { fetched_at } => println!("live data, fetched {fetched_at}"),
                DataOrigin::Snapshot { taken_at, path } => {
                    println!("snapshot {} from {taken_at}", path.display())
                }
                DataOrigin::Unavailable => bail!("no data available"),
            }
            let summary = summarize(&load.dataset);
            let rows: Vec<Vec<String>> = summary.sections().map(|s| s.row()).collect();
            print_table(SUMMARY_HEADERS, &rows);
        }
        Command::List => {
            let files = store.list()?;
            if files.is_empty() {
                println!("No snapshots in {}", store.dir().display());
            }
            for f in files {
                println!("{}\t{}", f.taken_at, f.path.display());
            }
        }
    }
    Ok(())
}

/* ---------- helpers ---------- */

fn export(ds: &Dataset, path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_dataset(&mut out, ds)?;
    out.flush()?;
    Ok(())
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    print_row(headers.iter().copied(), &widths);
    for row in rows {
        print_row(row.iter().map(String::as_str), &widths);
    }
}

fn print_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells.zip(widths).map(|(c, &w)| format!("{c:<w$}")).collect();
    println!("{}", padded.join("  ").trim_end());
}
