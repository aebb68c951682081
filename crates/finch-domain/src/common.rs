//! Shared traits and enums for taxonomy primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator used between segments of a category path, both for display
/// names and machine names.
pub const PATH_SEPARATOR: &str = " > ";

/// Opaque category identifier as issued by the category service.
///
/// The service is free to use any string scheme (`"cat_42"`, a UUID, a
/// database key); nothing here parses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh random id for records that arrive without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// How a taxonomy build treats a category whose parent does not exist.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Fail the build with a malformed taxonomy error.
    #[default]
    Reject,
    /// Surface the orphan at the root level and keep going.
    PromoteToRoot,
}

impl OrphanPolicy {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "reject" | "strict" => Some(OrphanPolicy::Reject),
            "promote_to_root" | "promote" | "root" => Some(OrphanPolicy::PromoteToRoot),
            _ => None,
        }
    }
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrphanPolicy::Reject => "reject",
            OrphanPolicy::PromoteToRoot => "promote_to_root",
        };
        f.write_str(label)
    }
}
