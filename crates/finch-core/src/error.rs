use thiserror::Error;

/// Integrity failures detected while building a [`crate::CategoryIndex`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedTaxonomyError {
    #[error("category `{category}` references unknown parent `{parent}`")]
    DanglingParent { category: String, parent: String },
    #[error("category name `{0}` appears more than once")]
    DuplicateName(String),
    #[error("category `{0}` lists itself as its parent")]
    SelfParent(String),
    #[error("categories form a parent cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("breadcrumb index {index} is out of range for depth {depth}")]
    InvalidBreadcrumbIndex { index: i64, depth: usize },
    #[error("Category not found: {0}")]
    UnknownCategory(String),
    #[error("Category `{0}` is not displayed at the current level")]
    NotInCurrentLevel(String),
    #[error("picker session is closed")]
    SessionClosed,
}

/// Failures raised by a [`crate::CategorySource`] while fetching the taxonomy.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Category source not found: {0}")]
    NotFound(String),
}
