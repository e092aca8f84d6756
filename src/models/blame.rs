//! Blame records.
//!
//! Per-line author attribution for a file at a specific commit. Blame is a
//! pure function of (blob id, ancestry of the resolved commit), so `FileBlame`
//! carries both ids for callers that cache results.

use serde::Serialize;

use super::SignatureInfo;

/// Complete blame for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileBlame {
    /// Path of the file relative to the repository root
    pub path: String,
    /// Commit the blame was anchored at
    pub commit_id: String,
    /// Blob holding the file content at that commit
    pub blob_id: String,
    /// Per-line attribution, one entry per content line
    pub lines: Vec<BlameLine>,
}

/// Blame information for a single line.
#[derive(Debug, Clone, Serialize)]
pub struct BlameLine {
    /// Line number (1-indexed)
    pub line_number: usize,
    /// Content of the line
    pub content: String,
    /// Commit and author that last touched the line, absent when no hunk
    /// covers it
    pub attribution: Option<BlameAttribution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlameAttribution {
    pub commit_id: String,
    pub author: SignatureInfo,
}
