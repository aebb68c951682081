//! finch-core
//!
//! Navigation engine for the category taxonomy: adjacency index, drill-down
//! state machine, path and icon resolution, picker sessions.
//! Depends on finch-domain. No terminal I/O, no direct storage interactions.

pub mod error;
pub mod icons;
pub mod index;
pub mod navigation;
pub mod path_resolver;
pub mod session;
pub mod source;


pub use error::{MalformedTaxonomyError, NavigationError, SourceError};
pub use icons::{IconId, IconResolver};
pub use index::{normalize_category_name, CategoryIndex};
pub use navigation::*;
pub use path_resolver::PathResolver;
pub use session::{PickOutcome, PickerSession};
pub use source::{CategorySource, StaticCategorySource};
