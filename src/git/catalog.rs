//! Discovery of bare repositories under a root directory.

use std::fs;
use std::path::Path;

use git2::Repository;
use tracing::debug;

use crate::models::RepositoryEntry;

/// External mapping from repository name to owner, consulted when the
/// repository config carries no owner of its own.
pub trait OwnerLookup {
    fn owner_for(&self, repo_name: &str) -> Option<String>;
}

/// Scans the immediate subdirectories of `root` for bare repositories.
/// A missing root yields an empty list, and a subdirectory that fails to
/// open is skipped rather than failing the scan.
pub fn discover_repositories(
    root: &Path,
    owners: Option<&dyn OwnerLookup>,
) -> Vec<RepositoryEntry> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut repos = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let repo = match Repository::open(&path) {
            Ok(repo) => repo,
            Err(_) => {
                debug!("skipping {}: not a repository", path.display());
                continue;
            }
        };
        if !repo.is_bare() {
            continue;
        }
        if config_bool(&repo, "gitshelf.hidden").unwrap_or(false) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let owner = config_string(&repo, "gitshelf.owner")
            .or_else(|| owners.and_then(|lookup| lookup.owner_for(&name)));
        let description = read_description(&path.join("description"));
        let display_path = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());

        repos.push(RepositoryEntry {
            name,
            path: display_path.to_string_lossy().to_string(),
            description,
            owner,
            is_bare: true,
        });
    }

    // owned repos group first, then by owner, then by name
    repos.sort_by_key(|r| {
        (
            r.owner.as_deref().is_none_or(|o| o.trim().is_empty()),
            r.owner.as_deref().unwrap_or("").to_lowercase(),
            r.name.to_lowercase(),
        )
    });

    debug!("discovered {} bare repositories under {}", repos.len(), root.display());

    repos
}

fn config_string(repo: &Repository, key: &str) -> Option<String> {
    repo.config().ok()?.get_string(key).ok()
}

fn config_bool(repo: &Repository, key: &str) -> Option<bool> {
    repo.config().ok()?.get_bool(key).ok()
}

fn read_description(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let text = text.trim();
    // git seeds new repositories with this placeholder
    if text.is_empty() || text.starts_with("Unnamed repository;") {
        return None;
    }
    Some(text.to_string())
}
