use std::cmp::Reverse;

use git2::{ObjectType, Oid, Repository};

use crate::error::{AppError, Result};
use crate::git::repository::{signature_info, GitRepository};
use crate::models::{ReferenceEntry, SignatureInfo};

impl GitRepository {
    /// True when the spec resolves to any object at all.
    pub fn validate_ref(&self, spec: &str) -> bool {
        self.with_repo(|repo| Ok(repo.revparse_single(spec.trim()).is_ok()))
            .unwrap_or(false)
    }

    /// True when the spec resolves to a commit, or to something that peels
    /// to one (annotated tags, branches). Trees and blobs fail.
    pub fn validate_ref_as_commit(&self, spec: &str) -> bool {
        self.with_repo(|repo| {
            let obj = match repo.revparse_single(spec.trim()) {
                Ok(obj) => obj,
                Err(_) => return Ok(false),
            };
            if obj.kind() == Some(ObjectType::Commit) {
                return Ok(true);
            }
            Ok(obj.peel(ObjectType::Commit).is_ok())
        })
        .unwrap_or(false)
    }

    /// Lists every reference with its resolved target, newest commit first.
    /// Refs that fail to resolve are dropped, not fatal.
    pub fn list_references(&self) -> Result<Vec<ReferenceEntry>> {
        self.with_repo(|repo| {
            let mut refs = Vec::new();

            // HEAD lives outside the refs/ namespace, add it up front
            if let Ok(head) = repo.head() {
                if let Some(target) = head.target() {
                    refs.push(ReferenceEntry {
                        name: "HEAD".to_string(),
                        shorthand: "HEAD".to_string(),
                        target: target.to_string(),
                        author: commit_author(repo, target),
                    });
                }
            }

            for reference in repo.references()?.flatten() {
                let resolved = match reference.resolve() {
                    Ok(resolved) => resolved,
                    Err(_) => continue,
                };
                let target = match resolved.target() {
                    Some(target) => target,
                    None => continue,
                };

                refs.push(ReferenceEntry {
                    name: resolved.name().unwrap_or("").to_string(),
                    shorthand: resolved.shorthand().unwrap_or("").to_string(),
                    target: target.to_string(),
                    author: commit_author(repo, target),
                });
            }

            refs.sort_by_key(|r| Reverse(r.author.as_ref().map_or(0, |a| a.time)));

            Ok(refs)
        })
    }
}

/// Author of the commit behind a ref target: commits directly, annotated
/// tags by peeling. Anything else has no author.
fn commit_author(repo: &Repository, target: Oid) -> Option<SignatureInfo> {
    let obj = repo.find_object(target, None).ok()?;
    let commit = match obj.kind() {
        Some(ObjectType::Commit) => obj.into_commit().ok()?,
        Some(ObjectType::Tag) => obj.peel(ObjectType::Commit).ok()?.into_commit().ok()?,
        _ => return None,
    };
    Some(signature_info(&commit.author()))
}

/// Rejects names that could escape the repository root when joined onto a
/// base path, and hidden names.
pub fn validate_repo_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") || name.starts_with('.') {
        return false;
    }
    !name
        .chars()
        .any(|c| matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*'))
}

/// Strips surrounding slashes and rejects any traversal segment. Empty
/// input is the repository root.
pub fn sanitize_path(path: &str) -> Result<String> {
    let path = path.trim_matches('/');
    if path.is_empty() {
        return Ok(String::new());
    }
    if path.split('/').any(|segment| segment.contains("..")) {
        return Err(AppError::InvalidPath(path.to_string()));
    }
    Ok(path.to_string())
}
