use git2::{ObjectType, Repository, Tree};

use crate::error::{AppError, Result};
use crate::git::repository::{resolve_tree, GitRepository};
use crate::models::{BlobContent, EntryKind, PathTarget, TreeEntry};

impl GitRepository {
    /// Resolves a slash-separated path under a ref to a directory listing
    /// or a file. An empty path is the root listing.
    pub fn resolve_path(&self, refspec: &str, path: &str) -> Result<PathTarget> {
        self.with_repo(|repo| {
            let root = resolve_tree(repo, refspec)?;
            walk_path(repo, root, path)
        })
    }
}

/// Descends one segment at a time, only through tree entries. An absent
/// segment, or one the current object cannot provide, is `PathNotFound`.
pub(crate) fn walk_path<'r>(
    repo: &'r Repository,
    root: Tree<'r>,
    path: &str,
) -> Result<PathTarget> {
    let rel = path.trim_matches('/');
    if rel.is_empty() {
        return Ok(PathTarget::Directory(list_entries(repo, &root, "")));
    }

    let segments: Vec<&str> = rel.split('/').collect();
    let mut tree = root;

    for (i, &segment) in segments.iter().enumerate() {
        // take the id and kind so the entry's borrow of `tree` ends before
        // the tree is replaced for the next segment
        let (id, kind) = match tree.get_name(segment) {
            Some(entry) => (entry.id(), entry.kind()),
            None => return Err(AppError::PathNotFound(rel.to_string())),
        };
        let last = i + 1 == segments.len();

        match kind {
            Some(ObjectType::Tree) => {
                let subtree = repo
                    .find_tree(id)
                    .map_err(|_| AppError::PathNotFound(rel.to_string()))?;
                if last {
                    return Ok(PathTarget::Directory(list_entries(repo, &subtree, rel)));
                }
                tree = subtree;
            }
            Some(ObjectType::Blob) if last => {
                let blob = repo
                    .find_blob(id)
                    .map_err(|_| AppError::PathNotFound(rel.to_string()))?;
                return Ok(PathTarget::File(blob_to_content(segment, rel, &blob)));
            }
            _ => return Err(AppError::PathNotFound(rel.to_string())),
        }
    }

    Err(AppError::PathNotFound(rel.to_string()))
}

pub(crate) fn list_entries(repo: &Repository, tree: &Tree, base_path: &str) -> Vec<TreeEntry> {
    let mut entries = Vec::new();

    for entry in tree.iter() {
        let kind = match entry.kind() {
            Some(ObjectType::Tree) => EntryKind::Tree,
            Some(ObjectType::Blob) => EntryKind::Blob,
            // submodules and other exotic entries are not resolvable paths
            _ => continue,
        };
        let name = entry.name().unwrap_or("").to_string();
        let path = if base_path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", base_path, name)
        };
        let size = if kind == EntryKind::Blob {
            entry
                .to_object(repo)
                .ok()
                .and_then(|obj| obj.as_blob().map(|b| b.size() as u64))
        } else {
            None
        };

        entries.push(TreeEntry {
            name,
            path,
            kind,
            id: entry.id().to_string(),
            size,
        });
    }

    // Sort: directories first, then files, alphabetically
    entries.sort_by(|a, b| match (&a.kind, &b.kind) {
        (EntryKind::Tree, EntryKind::Tree) => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        (EntryKind::Tree, _) => std::cmp::Ordering::Less,
        (_, EntryKind::Tree) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });

    entries
}

fn blob_to_content(name: &str, path: &str, blob: &git2::Blob) -> BlobContent {
    BlobContent {
        name: name.to_string(),
        id: blob.id().to_string(),
        path: path.to_string(),
        size: blob.size() as u64,
        is_binary: blob.is_binary(),
        content: String::from_utf8_lossy(blob.content()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fixtures;

    fn setup() -> (tempfile::TempDir, GitRepository) {
        let (dir, repo) = fixtures::init_bare();
        fixtures::commit(
            &repo,
            &[],
            &[
                ("README.md", "# hello\n"),
                ("src/main.rs", "fn main() {}\n"),
                ("src/lib.rs", "pub mod git;\n"),
                ("docs/guide.md", "guide\n"),
            ],
            "init",
            1000,
        );
        let handle = GitRepository::open(dir.path()).unwrap();
        (dir, handle)
    }

    #[test]
    fn test_root_listing_dirs_first() {
        let (_dir, handle) = setup();
        let target = handle.resolve_path("HEAD", "").unwrap();

        let entries = match target {
            PathTarget::Directory(entries) => entries,
            PathTarget::File(_) => panic!("expected directory"),
        };
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "src", "README.md"]);
        assert_eq!(entries[0].kind, EntryKind::Tree);
        assert_eq!(entries[2].kind, EntryKind::Blob);
        assert_eq!(entries[2].size, Some("# hello\n".len() as u64));
    }

    #[test]
    fn test_subdirectory_listing_carries_full_paths() {
        let (_dir, handle) = setup();
        let target = handle.resolve_path("HEAD", "src").unwrap();

        let entries = match target {
            PathTarget::Directory(entries) => entries,
            PathTarget::File(_) => panic!("expected directory"),
        };
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["src/lib.rs", "src/main.rs"]);
    }

    #[test]
    fn test_file_resolution() {
        let (_dir, handle) = setup();
        let target = handle.resolve_path("HEAD", "/src/main.rs/").unwrap();

        let blob = match target {
            PathTarget::File(blob) => blob,
            PathTarget::Directory(_) => panic!("expected file"),
        };
        assert_eq!(blob.name, "main.rs");
        assert_eq!(blob.path, "src/main.rs");
        assert_eq!(blob.content, "fn main() {}\n");
        assert_eq!(blob.size, "fn main() {}\n".len() as u64);
        assert!(!blob.is_binary);
    }

    #[test]
    fn test_reresolving_listed_paths_keeps_kind() {
        let (_dir, handle) = setup();
        let entries = match handle.resolve_path("HEAD", "").unwrap() {
            PathTarget::Directory(entries) => entries,
            PathTarget::File(_) => panic!("expected directory"),
        };

        for entry in entries {
            let again = handle.resolve_path("HEAD", &entry.path).unwrap();
            match (entry.kind, again) {
                (EntryKind::Tree, PathTarget::Directory(_)) => {}
                (EntryKind::Blob, PathTarget::File(_)) => {}
                _ => panic!("{} resolved to a different kind", entry.path),
            }
        }
    }

    #[test]
    fn test_non_utf8_blob_decoded_lossily() {
        let (dir, repo) = fixtures::init_bare();
        fixtures::commit_bytes(&repo, &[], "data.txt", &[0x66, 0x6f, 0xff, 0x6f, 0x0a], "add data", 1000);
        let handle = GitRepository::open(dir.path()).unwrap();

        let blob = match handle.resolve_path("HEAD", "data.txt").unwrap() {
            PathTarget::File(blob) => blob,
            PathTarget::Directory(_) => panic!("expected file"),
        };
        assert_eq!(blob.size, 5);
        // the invalid byte becomes the replacement character
        assert_eq!(blob.content, "fo\u{fffd}o\n");
    }

    #[test]
    fn test_absent_path_not_found() {
        let (_dir, handle) = setup();
        let result = handle.resolve_path("HEAD", "src/missing.rs");
        assert!(matches!(result, Err(AppError::PathNotFound(_))));
    }

    #[test]
    fn test_descent_through_blob_not_found() {
        let (_dir, handle) = setup();
        let result = handle.resolve_path("HEAD", "README.md/nested");
        assert!(matches!(result, Err(AppError::PathNotFound(_))));
    }

    #[test]
    fn test_tree_ref_resolves_directly() {
        let (_dir, handle) = setup();
        let target = handle.resolve_path("HEAD^{tree}", "docs").unwrap();
        assert!(matches!(target, PathTarget::Directory(_)));
    }

    #[test]
    fn test_bad_ref_is_invalid() {
        let (_dir, handle) = setup();
        let result = handle.resolve_path("no-such-ref", "");
        assert!(matches!(result, Err(AppError::InvalidRef(_))));
    }
}
