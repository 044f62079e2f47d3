//! Local high-score table, persisted as JSON in browser local storage.
//!
//! Encoding and ranking are plain data operations so they stay testable off
//! the browser; the storage round-trip itself lives in the app glue.

use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "wok-hero.leaderboard";
pub const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub score: u32,
    pub date: String,
    pub time: String,
}

/// Insert keeping descending score order. Ties rank below existing entries
/// with the same score, so an older run keeps its place.
pub fn insert(entries: &mut Vec<Entry>, entry: Entry) {
    let pos = entries
        .iter()
        .position(|e| e.score < entry.score)
        .unwrap_or(entries.len());
    entries.insert(pos, entry);
    entries.truncate(MAX_ENTRIES);
}

/// Decode a stored table. Corrupt or missing data yields an empty table
/// rather than an error; losing old scores beats refusing to start.
pub fn decode(raw: Option<&str>) -> Vec<Entry> {
    match raw {
        Some(text) => serde_json::from_str(text).unwrap_or_default(),
        None => Vec::new(),
    }
}

pub fn encode(entries: &[Entry]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_owned())
}
