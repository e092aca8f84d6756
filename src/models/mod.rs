//! Serialization-ready records returned by the engines.
//!
//! These carry raw data only (ids, unix timestamps, byte sizes), never
//! derived formatting.
//! - `repository`: RepositoryEntry from catalog scans
//! - `reference`: ReferenceEntry with optional commit author
//! - `commit`: CommitEntry, CommitDetail, SignatureInfo
//! - `tree`: PathTarget, TreeEntry, BlobContent
//! - `diff`: DiffResult, FileChange, DiffStats, DiffStatus
//! - `blame`: FileBlame, BlameLine for per-line attribution

pub mod blame;
pub mod commit;
pub mod diff;
pub mod reference;
pub mod repository;
pub mod tree;

pub use blame::*;
pub use commit::*;
pub use diff::*;
pub use reference::*;
pub use repository::*;
pub use tree::*;
