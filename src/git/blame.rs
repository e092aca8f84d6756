//! Per-line blame. Cost grows with the file's history depth, so callers
//! should treat this as on-demand and cache by blob id.

use std::path::Path;

use git2::BlameOptions;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::git::repository::{resolve_commit, signature_info, GitRepository};
use crate::git::tree::walk_path;
use crate::models::{BlameAttribution, BlameLine, FileBlame, PathTarget};

impl GitRepository {
    /// Blames `path` at `refspec`. Any failure along the way, a ref that
    /// does not resolve, a missing path, or a directory, reports the path
    /// as not found.
    pub fn get_blame(&self, refspec: &str, path: &str) -> Result<FileBlame> {
        self.with_repo(|repo| {
            let not_found = || AppError::PathNotFound(path.to_string());

            let commit = resolve_commit(repo, refspec).map_err(|_| not_found())?;
            let tree = commit.tree().map_err(|_| not_found())?;

            let rel = path.trim_matches('/');
            let blob = match walk_path(repo, tree, rel).map_err(|_| not_found())? {
                PathTarget::File(blob) => blob,
                PathTarget::Directory(_) => return Err(not_found()),
            };

            debug!("blaming {} at {}", rel, commit.id());

            let mut opts = BlameOptions::new();
            opts.newest_commit(commit.id());
            let blame = repo
                .blame_file(Path::new(rel), Some(&mut opts))
                .map_err(|_| not_found())?;

            let content_lines: Vec<&str> = blob.content.lines().collect();
            let mut attributions: Vec<Option<BlameAttribution>> =
                vec![None; content_lines.len()];

            for hunk in blame.iter() {
                let start = hunk.final_start_line().saturating_sub(1);
                if start >= attributions.len() {
                    continue;
                }
                let end = (start + hunk.lines_in_hunk()).min(attributions.len());
                let attribution = BlameAttribution {
                    commit_id: hunk.final_commit_id().to_string(),
                    // the hunk signature saves an object lookup per hunk
                    author: signature_info(&hunk.final_signature()),
                };
                for slot in &mut attributions[start..end] {
                    *slot = Some(attribution.clone());
                }
            }

            let lines = content_lines
                .iter()
                .zip(attributions)
                .enumerate()
                .map(|(i, (content, attribution))| BlameLine {
                    line_number: i + 1,
                    content: content.to_string(),
                    attribution,
                })
                .collect();

            Ok(FileBlame {
                path: rel.to_string(),
                commit_id: commit.id().to_string(),
                blob_id: blob.id,
                lines,
            })
        })
    }
}
