//! Read-only navigation and history engine for bare git repositories:
//! repository discovery, reference resolution, tree traversal, commit
//! walking, diffs with rename detection, and per-line blame.
//!
//! Every operation opens its own short-lived libgit2 handle and never
//! writes to a repository, so all of it is safe to call concurrently.

pub mod error;
pub mod git;
pub mod models;

pub use error::{AppError, Result};
pub use git::GitRepository;

/// Version of the libgit2 library backing all repository access.
pub fn backend_version() -> String {
    let (major, minor, rev) = git2::Version::get().libgit2_version();
    format!("{}.{}.{}", major, minor, rev)
}
