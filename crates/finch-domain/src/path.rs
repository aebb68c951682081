//! Resolved category paths and the selection payload handed to callers.

use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    common::{CategoryId, PATH_SEPARATOR},
};

/// Fully-qualified location of a chosen leaf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryPath {
    /// Display names joined with [`PATH_SEPARATOR`], e.g. `Food > Groceries`.
    pub full_path: String,
    /// Machine names from root to leaf.
    pub categories: Vec<String>,
    /// Machine name of the top-level category.
    pub root: String,
    /// Machine name of the leaf's direct parent, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl CategoryPath {
    /// Machine names joined with [`PATH_SEPARATOR`].
    pub fn machine_path(&self) -> String {
        self.categories.join(PATH_SEPARATOR)
    }

    /// Machine name of the leaf.
    pub fn leaf(&self) -> &str {
        self.categories.last().map(String::as_str).unwrap_or(&self.root)
    }

    pub fn depth(&self) -> usize {
        self.categories.len()
    }
}

/// Splits a joined path back into its segments.
pub fn split_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(PATH_SEPARATOR).map(str::to_string).collect()
}

/// What the transaction-entry form receives once a leaf is picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySelection {
    /// Stored as the transaction's `category_id`.
    pub category_id: CategoryId,
    /// Stored as the transaction's `category` field.
    pub category: String,
    pub selected: Category,
    pub path: CategoryPath,
}

impl CategorySelection {
    pub fn new(selected: Category, path: CategoryPath) -> Self {
        Self {
            category_id: selected.id.clone(),
            category: path.full_path.clone(),
            selected,
            path,
        }
    }
}
