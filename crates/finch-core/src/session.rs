//! Lifetime of one open category picker.

use finch_domain::{Category, CategoryResponse, CategorySelection, OrphanPolicy};
use tracing::{debug, error, info, warn};

use crate::{
    error::{MalformedTaxonomyError, NavigationError},
    index::CategoryIndex,
    navigation::{Breadcrumb, BreadcrumbTarget, DrillDownController, NavigationState, Transition},
};

/// Result of a selection made through a [`PickerSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// A branch was opened; the picker stays open.
    Navigated,
    /// A leaf was chosen; the session is now closed.
    Chosen(CategorySelection),
}

/// Owns one index snapshot and the navigation state built on it.
///
/// A session is opened fresh for each picker, closes when a leaf is chosen or
/// the picker is cancelled, and never sees a second index. A refetched
/// taxonomy means a new session.
#[derive(Debug, Clone)]
pub struct PickerSession {
    index: CategoryIndex,
    state: Option<NavigationState>,
    degraded: Option<MalformedTaxonomyError>,
    hierarchy_warnings: Vec<String>,
}

impl PickerSession {
    /// Rebuilds the index from `response` and seeds the root level.
    ///
    /// A taxonomy rejected by the build is logged and replaced by its root
    /// categories, so the picker still opens.
    pub fn open(response: &CategoryResponse, policy: OrphanPolicy) -> Self {
        let (index, degraded) =
            match CategoryIndex::build_with_policy(&response.categories, policy) {
                Ok(index) => (index, None),
                Err(err) => {
                    error!("category taxonomy rejected, showing root categories only: {err}");
                    (CategoryIndex::roots_only(&response.categories), Some(err))
                }
            };

        let hierarchy_warnings = if degraded.is_none() && !response.hierarchy.is_empty() {
            index.verify_hierarchy(&response.hierarchy)
        } else {
            Vec::new()
        };
        for warning in &hierarchy_warnings {
            warn!("{}", warning);
        }

        info!(
            categories = index.len(),
            roots = index.root_categories().len(),
            degraded = degraded.is_some(),
            "picker session opened"
        );
        let state = Some(NavigationState::at_root(&index));
        Self {
            index,
            state,
            degraded,
            hierarchy_warnings,
        }
    }

    pub fn from_index(index: CategoryIndex) -> Self {
        let state = Some(NavigationState::at_root(&index));
        Self {
            index,
            state,
            degraded: None,
            hierarchy_warnings: Vec::new(),
        }
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// The build error that forced the roots-only fallback, if any.
    pub fn degraded(&self) -> Option<&MalformedTaxonomyError> {
        self.degraded.as_ref()
    }

    pub fn hierarchy_warnings(&self) -> &[String] {
        &self.hierarchy_warnings
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }

    pub fn current_level(&self) -> &[Category] {
        self.state
            .as_ref()
            .map(NavigationState::current_level)
            .unwrap_or(&[])
    }

    pub fn breadcrumb(&self) -> Option<&Breadcrumb> {
        self.state.as_ref().map(NavigationState::breadcrumb)
    }

    /// Selects a category displayed at the current level by machine name.
    pub fn select(&mut self, name: &str) -> Result<PickOutcome, NavigationError> {
        let state = self.open_state()?;
        if !self.index.contains(name) {
            return Err(NavigationError::UnknownCategory(name.to_string()));
        }
        let category = state
            .find_in_level(name)
            .cloned()
            .ok_or_else(|| NavigationError::NotInCurrentLevel(name.to_string()))?;
        let transition = DrillDownController::new(&self.index).select_category(state, &category)?;
        Ok(self.apply(transition))
    }

    /// Selects the entry at `position` (zero based) of the current level.
    pub fn select_at(&mut self, position: usize) -> Result<PickOutcome, NavigationError> {
        let state = self.open_state()?;
        let category = state
            .current_level()
            .get(position)
            .cloned()
            .ok_or_else(|| NavigationError::NotInCurrentLevel(format!("#{}", position + 1)))?;
        let transition = DrillDownController::new(&self.index).select_category(state, &category)?;
        Ok(self.apply(transition))
    }

    /// Breadcrumb click using the UI convention: `-1` is root.
    pub fn select_breadcrumb(&mut self, index: i64) -> Result<(), NavigationError> {
        let state = self.open_state()?;
        let target = BreadcrumbTarget::from_index(index, state.breadcrumb().len())?;
        let next = DrillDownController::new(&self.index).select_breadcrumb(state, target)?;
        self.state = Some(next);
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), NavigationError> {
        let state = self.open_state()?;
        let next = DrillDownController::new(&self.index).back(state)?;
        self.state = Some(next);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), NavigationError> {
        self.select_breadcrumb(-1)
    }

    /// Moves straight to `name`, or finishes if it is a leaf.
    pub fn jump_to(&mut self, name: &str) -> Result<PickOutcome, NavigationError> {
        self.open_state()?;
        let transition = DrillDownController::new(&self.index).jump_to(name)?;
        Ok(self.apply(transition))
    }

    /// Closes the picker without a selection.
    pub fn cancel(&mut self) {
        if self.state.take().is_some() {
            debug!("picker cancelled");
        }
    }

    fn open_state(&self) -> Result<&NavigationState, NavigationError> {
        self.state.as_ref().ok_or(NavigationError::SessionClosed)
    }

    fn apply(&mut self, transition: Transition) -> PickOutcome {
        match transition {
            Transition::Descended(next) => {
                self.state = Some(next);
                PickOutcome::Navigated
            }
            Transition::LeafChosen(choice) => {
                self.state = None;
                let path = choice.resolve();
                info!("category chosen: {}", path.full_path);
                PickOutcome::Chosen(CategorySelection::new(choice.leaf, path))
            }
        }
    }
}
