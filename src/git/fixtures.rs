//! Test helpers that build real bare repositories with deterministic
//! signatures, so history order and blame output are stable.

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

pub(crate) fn init_bare() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init_bare(dir.path()).unwrap();
    (dir, repo)
}

pub(crate) fn signature(name: &str, time: i64) -> Signature<'static> {
    let email = format!("{}@example.com", name.to_lowercase());
    Signature::new(name, &email, &Time::new(time, 0)).unwrap()
}

/// Writes a tree from (path, content) pairs. Paths may contain `/`; parent
/// trees are created as needed.
pub(crate) fn build_tree(repo: &Repository, files: &[(&str, &str)]) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    let mut subdirs: Vec<(&str, Vec<(&str, &str)>)> = Vec::new();

    for &(path, content) in files {
        match path.split_once('/') {
            None => {
                let blob = repo.blob(content.as_bytes()).unwrap();
                builder.insert(path, blob, 0o100644).unwrap();
            }
            Some((dir, rest)) => match subdirs.iter_mut().find(|(name, _)| *name == dir) {
                Some((_, entries)) => entries.push((rest, content)),
                None => subdirs.push((dir, vec![(rest, content)])),
            },
        }
    }

    for (dir, entries) in subdirs {
        let subtree = build_tree(repo, &entries);
        builder.insert(dir, subtree, 0o040000).unwrap();
    }

    builder.write().unwrap()
}

pub(crate) fn commit(
    repo: &Repository,
    parents: &[Oid],
    files: &[(&str, &str)],
    message: &str,
    time: i64,
) -> Oid {
    commit_by(repo, parents, files, message, time, "Alice")
}

pub(crate) fn commit_by(
    repo: &Repository,
    parents: &[Oid],
    files: &[(&str, &str)],
    message: &str,
    time: i64,
    author: &str,
) -> Oid {
    let tree = repo.find_tree(build_tree(repo, files)).unwrap();
    let sig = signature(author, time);
    let parent_commits: Vec<git2::Commit> = parents
        .iter()
        .map(|&oid| repo.find_commit(oid).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Commits a single root-level file with raw bytes, for content that is
/// not valid UTF-8.
pub(crate) fn commit_bytes(
    repo: &Repository,
    parents: &[Oid],
    path: &str,
    bytes: &[u8],
    message: &str,
    time: i64,
) -> Oid {
    let blob = repo.blob(bytes).unwrap();
    let mut builder = repo.treebuilder(None).unwrap();
    builder.insert(path, blob, 0o100644).unwrap();
    let tree = repo.find_tree(builder.write().unwrap()).unwrap();
    let sig = signature("Alice", time);
    let parent_commits: Vec<git2::Commit> = parents
        .iter()
        .map(|&oid| repo.find_commit(oid).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

pub(crate) fn annotated_tag(repo: &Repository, name: &str, target: Oid, time: i64) -> Oid {
    let obj = repo.find_object(target, None).unwrap();
    let sig = signature("Alice", time);
    repo.tag(name, &obj, &sig, &format!("release {name}"), false)
        .unwrap()
}

pub(crate) fn lightweight_tag(repo: &Repository, name: &str, target: Oid) {
    repo.reference(&format!("refs/tags/{name}"), target, false, "tag")
        .unwrap();
}
