//! Group records and their write shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named bundle of mock endpoints owned by a single tenant.
///
/// `(owner, slug)` is unique; the slug is the second segment of every
/// resolvable path under this group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Store-allocated identity.
    pub id: i64,
    /// Owning tenant, supplied by the identity collaborator.
    pub owner: String,
    /// Display name.
    pub name: String,
    /// URL slug, a single path segment.
    pub slug: String,
    /// Inactive groups are hidden from resolution but stay visible to the
    /// owner's management operations.
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input shape for creating a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub slug: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Partial update for a group; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}
