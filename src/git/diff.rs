use git2::{Delta, Diff, DiffFindOptions, DiffFormat, DiffOptions, Patch};

use crate::error::{AppError, Result};
use crate::git::repository::{resolve_commit, GitRepository};
use crate::models::{DiffResult, DiffStats, DiffStatus, FileChange};

/// Similarity score (out of 100) above which a delete/add pair becomes a
/// rename or copy.
pub(crate) const SIMILARITY_THRESHOLD: u16 = 50;

impl GitRepository {
    /// Diffs two commit-ish refs. `ref1` defaults to the commit before HEAD
    /// and `ref2` to HEAD. The result is always oldest to newest: if the
    /// resolved `ref1` is younger than `ref2` the pair is swapped.
    pub fn get_diff(
        &self,
        ref1: Option<&str>,
        ref2: Option<&str>,
        context_lines: u32,
        interhunk_lines: u32,
    ) -> Result<DiffResult> {
        let spec1 = ref1.unwrap_or("HEAD~1");
        let spec2 = ref2.unwrap_or("HEAD");

        self.with_repo(|repo| {
            let mut older = resolve_commit(repo, spec1).map_err(|_| AppError::InvalidDiffSpec {
                param: "ref1",
                spec: spec1.to_string(),
            })?;
            let mut newer = resolve_commit(repo, spec2).map_err(|_| AppError::InvalidDiffSpec {
                param: "ref2",
                spec: spec2.to_string(),
            })?;

            if older.time().seconds() > newer.time().seconds() {
                std::mem::swap(&mut older, &mut newer);
            }

            let old_tree = older.tree()?;
            let new_tree = newer.tree()?;

            let mut opts = DiffOptions::new();
            opts.context_lines(context_lines);
            opts.interhunk_lines(interhunk_lines);

            let mut diff =
                repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))?;

            // aggregate stats come from the plain diff, before rename
            // detection collapses delete/add pairs
            let stats = diff_stats(&diff)?;

            let mut find_opts = DiffFindOptions::new();
            find_opts
                .renames(true)
                .copies(true)
                .rename_threshold(SIMILARITY_THRESHOLD)
                .copy_threshold(SIMILARITY_THRESHOLD);
            diff.find_similar(Some(&mut find_opts))?;

            let files = collect_file_changes(&diff)?;
            let patch = patch_to_string(&diff)?;

            Ok(DiffResult {
                ref1: older.id().to_string(),
                ref2: newer.id().to_string(),
                stats,
                files,
                patch,
            })
        })
    }
}

pub(crate) fn diff_stats(diff: &Diff) -> Result<DiffStats> {
    let stats = diff.stats()?;
    Ok(DiffStats {
        files_changed: stats.files_changed(),
        insertions: stats.insertions(),
        deletions: stats.deletions(),
    })
}

/// One record per delta. The path prefers the new side, falling back to the
/// old side for deletions; line counts come from the delta's own patch.
pub(crate) fn collect_file_changes(diff: &Diff) -> Result<Vec<FileChange>> {
    let mut files = Vec::new();

    for (idx, delta) in diff.deltas().enumerate() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let (additions, deletions) = match Patch::from_diff(diff, idx)? {
            Some(patch) => {
                let (_context, additions, deletions) = patch.line_stats()?;
                (additions, deletions)
            }
            None => (0, 0),
        };

        files.push(FileChange {
            path,
            additions,
            deletions,
            status: delta_status(delta.status()),
        });
    }

    Ok(files)
}

pub(crate) fn delta_status(delta: Delta) -> DiffStatus {
    match delta {
        Delta::Added => DiffStatus::Added,
        Delta::Deleted => DiffStatus::Deleted,
        Delta::Modified => DiffStatus::Modified,
        Delta::Renamed => DiffStatus::Renamed,
        Delta::Copied => DiffStatus::Copied,
        Delta::Typechange => DiffStatus::Typechange,
        Delta::Unreadable => DiffStatus::Unreadable,
        Delta::Conflicted => DiffStatus::Conflicted,
        _ => DiffStatus::Unknown,
    }
}

/// Renders the whole diff as unified patch text.
pub(crate) fn patch_to_string(diff: &Diff) -> Result<String> {
    let mut out = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => out.push(line.origin()),
            _ => {}
        }
        out.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(out)
}
