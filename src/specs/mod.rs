// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific scraping specifications**. Each spec
//! encodes *where the ground truth lives in the HTML* and *how to extract it
//! robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the ranking page (`ranking`).
//! - **Star-marker recognition** for day cells (`stars`), driven by a
//!   configurable class → weight table instead of literals in the parser.
//!
//! ## What does **not** live here
//! - **Fetching** (`core::net`, `scrape::source`).
//! - **Snapshots / caching** (`store`, `cache`).
//! - **Sorting, dedup, dataset shaping** – `scrape` owns that.
//!
//! ## Typical call chain
//! ```text
//! cache::DatasetCache::get → scrape::Scraper::fetch → specs::ranking (rows → records)
//!                                                 ↘ store::SnapshotStore (write / latest)
//! ```
//!
//! ## Conventions & invariants
//! - A missing table/body is a `ParseError`, a bad row is a `RowError`; neither panics.
//! - Rows are dropped whole, never partially kept.
//! - Day values are always in `0..=2`.
//!
//! ## Testing notes
//! Specs are tested **offline** against inline HTML fixtures.
pub mod ranking;
pub mod stars;
