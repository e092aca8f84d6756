//! Engine error types.
//!
//! `AppError` covers every failure the engines report to callers:
//! - `RepoNotFound`, `PathNotFound`: the named thing does not exist
//! - `InvalidRef`, `InvalidPath`, `InvalidDiffSpec`: bad caller input
//! - `Git`: unexpected libgit2 failure

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Invalid ref: {0}")]
    InvalidRef(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Cannot resolve {param}: {spec}")]
    InvalidDiffSpec { param: &'static str, spec: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
