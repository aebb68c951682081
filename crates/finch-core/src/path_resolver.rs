use finch_domain::{Category, CategoryPath, PATH_SEPARATOR};

use crate::{error::NavigationError, index::CategoryIndex};

/// Turns a breadcrumb plus a chosen leaf into the stored category value.
pub struct PathResolver;

impl PathResolver {
    pub fn resolve(breadcrumb: &[Category], leaf: &Category) -> CategoryPath {
        let full_path = breadcrumb
            .iter()
            .chain(std::iter::once(leaf))
            .map(|category| category.display_name.as_str())
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR);
        let categories: Vec<String> = breadcrumb
            .iter()
            .chain(std::iter::once(leaf))
            .map(|category| category.name.clone())
            .collect();
        let root = breadcrumb
            .first()
            .map(|category| category.name.clone())
            .unwrap_or_else(|| leaf.name.clone());
        let parent = breadcrumb.last().map(|category| category.name.clone());

        CategoryPath {
            full_path,
            categories,
            root,
            parent,
        }
    }

    /// Resolves any indexed category through its lineage, without navigating.
    pub fn resolve_name(
        index: &CategoryIndex,
        name: &str,
    ) -> Result<CategoryPath, NavigationError> {
        let leaf = index
            .get(name)
            .ok_or_else(|| NavigationError::UnknownCategory(name.to_string()))?;
        Ok(Self::resolve(&index.lineage(name), leaf))
    }
}
