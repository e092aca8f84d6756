//! Tree and blob records.
//!
//! - `PathTarget`: what a path resolves to, a directory listing or a file
//! - `TreeEntry`: single entry in a directory listing
//! - `BlobContent`: file metadata plus best-effort decoded text

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Tree,
    Blob,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    /// Path relative to the traversal root, resolvable back to this entry.
    pub path: String,
    pub kind: EntryKind,
    pub id: String,
    /// Byte size, blobs only.
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobContent {
    pub name: String,
    pub id: String,
    pub path: String,
    pub size: u64,
    pub is_binary: bool,
    /// Text content with undecodable sequences replaced.
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathTarget {
    Directory(Vec<TreeEntry>),
    File(BlobContent),
}
