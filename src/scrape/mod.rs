// src/scrape/mod.rs
mod scrape;
pub mod source;

pub use scrape::{scrape_document, Scrape, Scraper};
pub use source::{FileSource, HttpSource, PageSource};
