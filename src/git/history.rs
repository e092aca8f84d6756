use git2::{DiffFindOptions, Repository, Sort};

use crate::error::Result;
use crate::git::diff::{collect_file_changes, diff_stats, patch_to_string, SIMILARITY_THRESHOLD};
use crate::git::repository::{resolve_commit, signature_info, GitRepository};
use crate::models::{CommitDetail, CommitEntry, DiffStats};

impl GitRepository {
    /// Walks ancestry from a ref in time order, skipping `skip` commits and
    /// returning at most `limit`. Each entry carries stats against its first
    /// parent; only aggregate counts are computed on this path, never
    /// patch text.
    pub fn get_commits(
        &self,
        start_ref: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<CommitEntry>> {
        self.with_repo(|repo| {
            let start = resolve_commit(repo, start_ref)?;

            let mut revwalk = repo.revwalk()?;
            revwalk.set_sorting(Sort::TIME)?;
            revwalk.push(start.id())?;

            let mut commits = Vec::new();
            for (n, oid) in revwalk.enumerate() {
                let oid = oid?;
                if n < skip {
                    continue;
                }
                if commits.len() >= limit {
                    break;
                }
                let commit = repo.find_commit(oid)?;
                let stats = first_parent_stats(repo, &commit)?;
                commits.push(commit_to_entry(&commit, stats));
            }

            Ok(commits)
        })
    }

    /// Single-commit drill-down: identity fields plus the full change set
    /// against the first parent, with rename detection and patch text.
    pub fn get_commit(&self, spec: &str) -> Result<CommitDetail> {
        self.with_repo(|repo| {
            let commit = resolve_commit(repo, spec)?;

            let (stats, changed_files, patch) = if commit.parent_count() > 0 {
                let parent_tree = commit.parent(0)?.tree()?;
                let tree = commit.tree()?;
                let mut diff =
                    repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;

                let stats = diff_stats(&diff)?;

                let mut find_opts = DiffFindOptions::new();
                find_opts
                    .renames(true)
                    .copies(true)
                    .rename_threshold(SIMILARITY_THRESHOLD)
                    .copy_threshold(SIMILARITY_THRESHOLD);
                diff.find_similar(Some(&mut find_opts))?;

                let changed_files = collect_file_changes(&diff)?;
                let patch = patch_to_string(&diff)?;
                (stats, changed_files, Some(patch))
            } else {
                (DiffStats::default(), Vec::new(), None)
            };

            let entry = commit_to_entry(&commit, stats);
            Ok(CommitDetail {
                id: entry.id,
                message: entry.message,
                author: entry.author,
                committer: entry.committer,
                time: entry.time,
                tree_id: entry.tree_id,
                parents: entry.parents,
                diff_stats: entry.diff_stats,
                changed_files,
                patch,
            })
        })
    }
}

fn first_parent_stats(repo: &Repository, commit: &git2::Commit) -> Result<DiffStats> {
    if commit.parent_count() == 0 {
        return Ok(DiffStats::default());
    }
    let parent_tree = commit.parent(0)?.tree()?;
    let tree = commit.tree()?;
    let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;
    diff_stats(&diff)
}

fn commit_to_entry(commit: &git2::Commit, diff_stats: DiffStats) -> CommitEntry {
    CommitEntry {
        id: commit.id().to_string(),
        message: commit.message().unwrap_or("").trim().to_string(),
        author: signature_info(&commit.author()),
        committer: signature_info(&commit.committer()),
        time: commit.time().seconds(),
        tree_id: commit.tree_id().to_string(),
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        diff_stats,
    }
}
