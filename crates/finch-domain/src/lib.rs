//! finch-domain
//!
//! Pure domain models for the category taxonomy (Category, CategoryResponse,
//! CategoryPath, selection payloads). No I/O, no CLI, no navigation logic.

pub mod category;
pub mod common;
pub mod defaults;
pub mod path;

pub use category::*;
pub use common::*;
pub use defaults::default_categories;
pub use path::*;
