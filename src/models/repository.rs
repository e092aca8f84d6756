use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub is_bare: bool,
}
