// src/config/consts.rs

// Net config
pub const RANKING_URL: &str = "https://aoc.42barcelona.com/ranking/es";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Page layout
pub const TABLE_SELECTOR: &str = "table#rankingTable";
pub const MAX_DAYS: usize = 25;
pub const MIN_ROW_CELLS: usize = 5;
pub const LEADING_CELLS: usize = 4;

// Star markers (class, weight)
pub const DEFAULT_MARKERS: &[(&str, u8)] = &[
    ("star1", 1),
    ("star-gold", 1),
    ("star-silver", 1),
];
pub const MAX_MARKERS_PER_CLASS: usize = 2;
pub const MAX_DAY_VALUE: u8 = 2;

// Snapshots
pub const SNAPSHOT_DIR: &str = "data";
pub const SNAPSHOT_PREFIX: &str = "aoc_rankings";
pub const SNAPSHOT_EXT: &str = "csv";
pub const SNAPSHOT_TS_FORMAT: &str = "%Y%m%d%H%M%S";
pub const SNAPSHOT_TS_LEN: usize = 14;

// Cache
pub const CACHE_TTL_SECS: u64 = 300;

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
pub const LOG_LEVEL: &str = "info";
