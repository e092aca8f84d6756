use serde::{Deserialize, Serialize};

use super::{DiffStats, FileChange};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureInfo {
    pub name: String,
    pub email: String,
    pub time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub id: String,
    pub message: String,
    pub author: SignatureInfo,
    pub committer: SignatureInfo,
    pub time: i64,
    pub tree_id: String,
    pub parents: Vec<String>,
    pub diff_stats: DiffStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub id: String,
    pub message: String,
    pub author: SignatureInfo,
    pub committer: SignatureInfo,
    pub time: i64,
    pub tree_id: String,
    pub parents: Vec<String>,
    pub diff_stats: DiffStats,
    pub changed_files: Vec<FileChange>,
    pub patch: Option<String>,
}
