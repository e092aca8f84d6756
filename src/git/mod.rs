pub mod blame;
pub mod catalog;
pub mod diff;
pub mod history;
pub mod refs;
pub mod repository;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{discover_repositories, OwnerLookup};
pub use refs::{sanitize_path, validate_repo_name};
pub use repository::GitRepository;
