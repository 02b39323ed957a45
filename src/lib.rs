// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod log;
pub mod scrape;
pub mod specs;
pub mod store;
pub mod summary;
