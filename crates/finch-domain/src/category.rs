//! Domain types representing taxonomy categories and the category fetch payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use crate::common::*;

/// One node of the category taxonomy.
///
/// Leaf and branch status is not stored here; it depends on the index the
/// category is navigated through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default = "CategoryId::generate")]
    pub id: CategoryId,
    pub name: String,
    pub display_name: String,
    #[serde(
        default,
        alias = "parent_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_name: Option<String>,
    #[serde(default, alias = "icon", skip_serializing_if = "Option::is_none")]
    pub icon_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u32>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub ai_suggested: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            display_name: display_name.into(),
            parent_name: None,
            icon_key: None,
            color: None,
            usage_count: None,
            is_default: false,
            ai_suggested: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<CategoryId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn with_icon(mut self, icon_key: impl Into<String>) -> Self {
        self.icon_key = Some(icon_key.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_usage_count(mut self, count: u32) -> Self {
        self.usage_count = Some(count);
        self
    }

    /// Parent reference with empty strings treated as absent.
    pub fn parent(&self) -> Option<&str> {
        self.parent_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Returns `true` when the record carries no parent reference.
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        match self.usage_count {
            Some(count) if count > 0 => format!("{} ({} uses)", self.display_name, count),
            _ => self.display_name.clone(),
        }
    }
}

/// Payload returned by the category service.
///
/// `hierarchy` is the server's own grouping; clients rebuild it from
/// `categories` and only use this copy for verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryResponse {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub hierarchy: BTreeMap<String, Vec<Category>>,
}

impl CategoryResponse {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            hierarchy: BTreeMap::new(),
        }
    }

    /// Builds a response whose hierarchy map is derived from the flat list,
    /// mirroring what a well-behaved server returns.
    pub fn with_derived_hierarchy(categories: Vec<Category>) -> Self {
        let mut hierarchy: BTreeMap<String, Vec<Category>> = BTreeMap::new();
        for category in &categories {
            if let Some(parent) = category.parent() {
                hierarchy
                    .entry(parent.to_string())
                    .or_default()
                    .push(category.clone());
            }
        }
        Self {
            categories,
            hierarchy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r##"{
            "id": "6f1c1f1e-8c1a-4c55-9f7e-2b6f5b0b9a10",
            "name": "groceries",
            "display_name": "Groceries",
            "parent_category": "food",
            "icon": "shopping-cart",
            "color": "#4CAF50",
            "usage_count": 3
        }"##;

        let category: Category = serde_json::from_str(json).expect("deserialize");
        assert_eq!(category.id.as_str(), "6f1c1f1e-8c1a-4c55-9f7e-2b6f5b0b9a10");
        assert_eq!(category.parent_name.as_deref(), Some("food"));
        assert_eq!(category.color.as_deref(), Some("#4CAF50"));
        assert_eq!(category.icon_key.as_deref(), Some("shopping-cart"));
        assert_eq!(category.usage_count, Some(3));
        assert!(!category.is_default);
    }

    #[test]
    fn service_issued_ids_need_not_be_uuids() {
        let json = r#"{ "id": "cat_42", "name": "food", "display_name": "Food" }"#;
        let category: Category = serde_json::from_str(json).expect("deserialize");
        assert_eq!(category.id, CategoryId::new("cat_42"));

        let reencoded = serde_json::to_value(&category).unwrap();
        assert_eq!(reencoded["id"], "cat_42");
    }

    #[test]
    fn missing_id_is_generated() {
        let json = r#"{ "name": "food", "display_name": "Food" }"#;
        let category: Category = serde_json::from_str(json).expect("deserialize");
        assert!(!category.id.as_str().is_empty());
    }

    #[test]
    fn empty_parent_counts_as_root() {
        let mut category = Category::new("food", "Food");
        category.parent_name = Some("  ".into());
        assert!(category.is_root());
        assert_eq!(category.parent(), None);
    }

    #[test]
    fn response_hierarchy_defaults_to_empty() {
        let json = r#"{ "categories": [] }"#;
        let response: CategoryResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.hierarchy.is_empty());
    }

    #[test]
    fn derived_hierarchy_groups_children() {
        let response = CategoryResponse::with_derived_hierarchy(vec![
            Category::new("food", "Food"),
            Category::new("groceries", "Groceries").with_parent("food"),
            Category::new("coffee_shops", "Coffee Shops").with_parent("food"),
        ]);

        let names: Vec<&str> = response.hierarchy["food"]
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["groceries", "coffee_shops"]);
        assert_eq!(response.hierarchy.len(), 1);
    }
}
