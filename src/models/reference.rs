use serde::{Deserialize, Serialize};

use super::SignatureInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub shorthand: String,
    pub target: String,
    /// Author of the commit the ref points at, when it points at one.
    pub author: Option<SignatureInfo>,
}
