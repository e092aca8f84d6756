//! Diff records.
//!
//! - `DiffResult`: full comparison of two commits, oldest first
//! - `FileChange`: per-file status and line counts
//! - `DiffStats`: aggregate counts across a whole diff

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    Typechange,
    Unreadable,
    Conflicted,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub additions: usize,
    pub deletions: usize,
    pub status: DiffStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    /// Resolved id of the older commit.
    pub ref1: String,
    /// Resolved id of the newer commit.
    pub ref2: String,
    pub stats: DiffStats,
    pub files: Vec<FileChange>,
    pub patch: String,
}
