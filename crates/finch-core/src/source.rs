//! Collaborator seam for fetching the taxonomy.

use finch_domain::{default_categories, Category, CategoryResponse, OrphanPolicy};

use crate::{error::SourceError, session::PickerSession};

/// Anything that can produce the complete taxonomy in one call.
pub trait CategorySource {
    fn fetch(&self) -> Result<CategoryResponse, SourceError>;

    /// Short human-readable origin, used in logs and the shell banner.
    fn describe(&self) -> String;

    fn open_session(&self, policy: OrphanPolicy) -> Result<PickerSession, SourceError> {
        let response = self.fetch()?;
        Ok(PickerSession::open(&response, policy))
    }
}

/// In-memory taxonomy.
#[derive(Debug, Clone, Default)]
pub struct StaticCategorySource {
    response: CategoryResponse,
}

impl StaticCategorySource {
    pub fn new(response: CategoryResponse) -> Self {
        Self { response }
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self::new(CategoryResponse::new(categories))
    }

    /// The seed taxonomy with a server-style hierarchy map.
    pub fn defaults() -> Self {
        Self::new(CategoryResponse::with_derived_hierarchy(default_categories()))
    }
}

impl CategorySource for StaticCategorySource {
    fn fetch(&self) -> Result<CategoryResponse, SourceError> {
        Ok(self.response.clone())
    }

    fn describe(&self) -> String {
        format!("built-in taxonomy ({} categories)", self.response.categories.len())
    }
}
