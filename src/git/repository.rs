use git2::{ObjectType, Repository};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::SignatureInfo;

/// Handle to a repository on disk. Holds only the path; every operation
/// opens its own read-only libgit2 handle and drops it on return, so
/// nothing is shared between calls.
pub struct GitRepository {
    path: PathBuf,
}

impl GitRepository {
    /// Probes the path so a missing repository fails here rather than on
    /// first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Repository::open(&path)
            .map_err(|_| AppError::RepoNotFound(path.to_string_lossy().to_string()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = Repository::open(&self.path)
            .map_err(|_| AppError::RepoNotFound(self.path.to_string_lossy().to_string()))?;
        f(&repo)
    }
}

/// Resolves a revision spec to a commit, peeling tags as needed. Trees and
/// blobs do not peel to commits and report `InvalidRef`.
pub fn resolve_commit<'r>(repo: &'r Repository, spec: &str) -> Result<git2::Commit<'r>> {
    let obj = repo
        .revparse_single(spec.trim())
        .map_err(|_| AppError::InvalidRef(spec.to_string()))?;
    obj.peel(ObjectType::Commit)
        .map_err(|_| AppError::InvalidRef(spec.to_string()))?
        .into_commit()
        .map_err(|_| AppError::InvalidRef(spec.to_string()))
}

/// Resolves a revision spec to a tree: commits yield their root tree, trees
/// pass through, tags peel to whatever they designate.
pub fn resolve_tree<'r>(repo: &'r Repository, spec: &str) -> Result<git2::Tree<'r>> {
    let obj = repo
        .revparse_single(spec.trim())
        .map_err(|_| AppError::InvalidRef(spec.to_string()))?;
    obj.peel(ObjectType::Tree)
        .map_err(|_| AppError::InvalidRef(spec.to_string()))?
        .into_tree()
        .map_err(|_| AppError::InvalidRef(spec.to_string()))
}

pub fn signature_info(sig: &git2::Signature) -> SignatureInfo {
    SignatureInfo {
        name: sig.name().unwrap_or("Unknown").to_string(),
        email: sig.email().unwrap_or("").to_string(),
        time: sig.when().seconds(),
    }
}
