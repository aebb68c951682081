//! Drill-down state machine over a [`CategoryIndex`].
//!
//! `NavigationState` is a value: every transition takes the current state by
//! reference and hands back a new one, or a [`LeafChoice`] once a category
//! without children is picked.

use finch_domain::{Category, CategoryPath};
use tracing::{debug, warn};

use crate::{error::NavigationError, index::CategoryIndex, path_resolver::PathResolver};

/// Root-first stack of the branch categories visited on the way down.
///
/// Only the controller can change it: descending pushes one entry, choosing
/// a breadcrumb truncates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breadcrumb {
    entries: Vec<Category>,
}

impl Breadcrumb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&Category> {
        self.entries.last()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub(crate) fn push(&mut self, category: Category) {
        self.entries.push(category);
    }

    /// Keeps entries `0..=index`.
    pub(crate) fn truncate_through(&mut self, index: usize) {
        self.entries.truncate(index + 1);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    AtRoot,
    AtLevel { depth: usize },
}

/// What the picker currently shows and how it got there.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    current_level: Vec<Category>,
    breadcrumb: Breadcrumb,
    generation: u64,
}

impl NavigationState {
    /// Fresh state showing the root categories of `index`.
    pub fn at_root(index: &CategoryIndex) -> Self {
        Self {
            current_level: index.root_categories().to_vec(),
            breadcrumb: Breadcrumb::new(),
            generation: index.generation(),
        }
    }

    pub fn current_level(&self) -> &[Category] {
        &self.current_level
    }

    pub fn breadcrumb(&self) -> &Breadcrumb {
        &self.breadcrumb
    }

    /// Generation of the index this state was last computed from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> NavigationPhase {
        if self.breadcrumb.is_empty() {
            NavigationPhase::AtRoot
        } else {
            NavigationPhase::AtLevel {
                depth: self.breadcrumb.len(),
            }
        }
    }

    pub fn is_at_root(&self) -> bool {
        self.breadcrumb.is_empty()
    }

    /// The branch whose children are displayed, `None` at root.
    pub fn current_parent(&self) -> Option<&Category> {
        self.breadcrumb.last()
    }

    pub fn find_in_level(&self, name: &str) -> Option<&Category> {
        self.current_level
            .iter()
            .find(|category| category.name == name)
    }
}

/// Where a breadcrumb click should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreadcrumbTarget {
    Root,
    Level(usize),
}

impl BreadcrumbTarget {
    /// Maps the UI's integer convention (`-1` for root) onto a target,
    /// rejecting anything outside `-1..depth`.
    pub fn from_index(index: i64, depth: usize) -> Result<Self, NavigationError> {
        match index {
            -1 => Ok(BreadcrumbTarget::Root),
            i if i >= 0 && (i as u64) < depth as u64 => Ok(BreadcrumbTarget::Level(i as usize)),
            _ => Err(NavigationError::InvalidBreadcrumbIndex { index, depth }),
        }
    }
}

/// A leaf was picked; the picker is done.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafChoice {
    pub leaf: Category,
    pub breadcrumb: Vec<Category>,
}

impl LeafChoice {
    pub fn resolve(&self) -> CategoryPath {
        PathResolver::resolve(&self.breadcrumb, &self.leaf)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Descended(NavigationState),
    LeafChosen(LeafChoice),
}

/// Computes state transitions against one index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DrillDownController<'a> {
    index: &'a CategoryIndex,
}

impl<'a> DrillDownController<'a> {
    pub fn new(index: &'a CategoryIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a CategoryIndex {
        self.index
    }

    pub fn start(&self) -> NavigationState {
        NavigationState::at_root(self.index)
    }

    /// Descends into a branch or finishes on a leaf.
    ///
    /// Leaf status is looked up in the index on every call.
    pub fn select_category(
        &self,
        state: &NavigationState,
        category: &Category,
    ) -> Result<Transition, NavigationError> {
        self.check_generation(state);
        if !self.index.contains(&category.name) {
            return Err(NavigationError::UnknownCategory(category.name.clone()));
        }

        let children = self.index.children_of(&category.name);
        if children.is_empty() {
            debug!(category = %category.name, "leaf chosen");
            return Ok(Transition::LeafChosen(LeafChoice {
                leaf: category.clone(),
                breadcrumb: state.breadcrumb.entries().to_vec(),
            }));
        }

        let mut next = state.clone();
        next.breadcrumb.push(category.clone());
        next.current_level = children.to_vec();
        next.generation = self.index.generation();
        debug!(
            category = %category.name,
            depth = next.breadcrumb.len(),
            "descended into category"
        );
        Ok(Transition::Descended(next))
    }

    /// Jumps back to root or to a category already on the breadcrumb.
    pub fn select_breadcrumb(
        &self,
        state: &NavigationState,
        target: BreadcrumbTarget,
    ) -> Result<NavigationState, NavigationError> {
        self.check_generation(state);
        let mut next = state.clone();
        match target {
            BreadcrumbTarget::Root => {
                next.breadcrumb.clear();
                next.current_level = self.index.root_categories().to_vec();
            }
            BreadcrumbTarget::Level(position) => {
                let depth = state.breadcrumb.len();
                let Some(entry) = state.breadcrumb.get(position) else {
                    return Err(NavigationError::InvalidBreadcrumbIndex {
                        index: position as i64,
                        depth,
                    });
                };
                next.current_level = self.index.children_of(&entry.name).to_vec();
                next.breadcrumb.truncate_through(position);
            }
        }
        next.generation = self.index.generation();
        debug!(crumb = ?target, depth = next.breadcrumb.len(), "breadcrumb selected");
        Ok(next)
    }

    /// One level up. At root the state is returned unchanged.
    pub fn back(&self, state: &NavigationState) -> Result<NavigationState, NavigationError> {
        match state.breadcrumb.len() {
            0 => Ok(state.clone()),
            1 => self.select_breadcrumb(state, BreadcrumbTarget::Root),
            depth => self.select_breadcrumb(state, BreadcrumbTarget::Level(depth - 2)),
        }
    }

    /// Positions the picker directly on `name`, as if the user had drilled
    /// down to it.
    pub fn jump_to(&self, name: &str) -> Result<Transition, NavigationError> {
        let category = self
            .index
            .get(name)
            .ok_or_else(|| NavigationError::UnknownCategory(name.to_string()))?;
        let mut state = self.start();
        for ancestor in self.index.lineage(name) {
            state.breadcrumb.push(ancestor);
        }
        self.select_category(&state, category)
    }

    fn check_generation(&self, state: &NavigationState) {
        if state.generation != self.index.generation() {
            warn!(
                "navigation state from index generation {} used with generation {}",
                state.generation,
                self.index.generation()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> CategoryIndex {
        CategoryIndex::build(&[
            Category::new("food", "Food"),
            Category::new("groceries", "Groceries").with_parent("food"),
            Category::new("fresh_produce", "Fresh Produce").with_parent("groceries"),
            Category::new("coffee_shops", "Coffee Shops").with_parent("food"),
            Category::new("gifts", "Gifts"),
        ])
        .expect("build")
    }

    fn names(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    fn descend(
        controller: &DrillDownController<'_>,
        state: &NavigationState,
        name: &str,
    ) -> NavigationState {
        let category = controller.index().get(name).expect("category").clone();
        match controller.select_category(state, &category).expect("select") {
            Transition::Descended(next) => next,
            other => panic!("expected descent, got {other:?}"),
        }
    }

    #[test]
    fn start_is_at_root() {
        let index = taxonomy();
        let state = DrillDownController::new(&index).start();
        assert_eq!(state.phase(), NavigationPhase::AtRoot);
        assert_eq!(names(state.current_level()), vec!["food", "gifts"]);
        assert!(state.current_parent().is_none());
    }

    #[test]
    fn selecting_root_leaf_finishes_with_empty_breadcrumb() {
        let index = taxonomy();
        let controller = DrillDownController::new(&index);
        let state = controller.start();
        let gifts = index.get("gifts").unwrap().clone();

        match controller.select_category(&state, &gifts).unwrap() {
            Transition::LeafChosen(choice) => {
                assert!(choice.breadcrumb.is_empty());
                assert_eq!(choice.resolve().full_path, "Gifts");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let index = taxonomy();
        let controller = DrillDownController::new(&index);
        let stranger = Category::new("stranger", "Stranger");
        let err = controller
            .select_category(&controller.start(), &stranger)
            .unwrap_err();
        assert_eq!(err, NavigationError::UnknownCategory("stranger".into()));
    }

    #[test]
    fn back_walks_up_one_level() {
        let index = taxonomy();
        let controller = DrillDownController::new(&index);
        let state = descend(&controller, &controller.start(), "food");
        let state = descend(&controller, &state, "groceries");
        assert_eq!(state.phase(), NavigationPhase::AtLevel { depth: 2 });

        let up = controller.back(&state).unwrap();
        assert_eq!(up.breadcrumb().names(), vec!["food"]);
        assert_eq!(names(up.current_level()), vec!["groceries", "coffee_shops"]);

        let top = controller.back(&up).unwrap();
        assert!(top.is_at_root());
        assert_eq!(controller.back(&top).unwrap(), top);
    }

    #[test]
    fn breadcrumb_index_must_be_in_range() {
        let index = taxonomy();
        let controller = DrillDownController::new(&index);
        let state = descend(&controller, &controller.start(), "food");

        let err = controller
            .select_breadcrumb(&state, BreadcrumbTarget::Level(1))
            .unwrap_err();
        assert_eq!(err, NavigationError::InvalidBreadcrumbIndex { index: 1, depth: 1 });
    }

    #[test]
    fn integer_breadcrumb_targets() {
        assert_eq!(BreadcrumbTarget::from_index(-1, 0).unwrap(), BreadcrumbTarget::Root);
        assert_eq!(BreadcrumbTarget::from_index(1, 2).unwrap(), BreadcrumbTarget::Level(1));
        assert_eq!(
            BreadcrumbTarget::from_index(2, 2).unwrap_err(),
            NavigationError::InvalidBreadcrumbIndex { index: 2, depth: 2 }
        );
        assert!(BreadcrumbTarget::from_index(-2, 3).is_err());
    }

    #[test]
    fn jump_to_branch_rebuilds_breadcrumb() {
        let index = taxonomy();
        let controller = DrillDownController::new(&index);

        match controller.jump_to("groceries").unwrap() {
            Transition::Descended(state) => {
                assert_eq!(state.breadcrumb().names(), vec!["food", "groceries"]);
                assert_eq!(names(state.current_level()), vec!["fresh_produce"]);
            }
            other => panic!("unexpected {other:?}"),
        }

        match controller.jump_to("fresh_produce").unwrap() {
            Transition::LeafChosen(choice) => {
                assert_eq!(names(&choice.breadcrumb), vec!["food", "groceries"]);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(controller.jump_to("nowhere").is_err());
    }

    #[test]
    fn leaf_status_follows_the_index_in_use() {
        let before = taxonomy();
        let state = DrillDownController::new(&before).start();
        let gifts = before.get("gifts").unwrap().clone();

        let after = CategoryIndex::build(&[
            Category::new("food", "Food"),
            gifts.clone(),
            Category::new("birthday", "Birthday").with_parent("gifts"),
        ])
        .expect("rebuild");

        match DrillDownController::new(&after).select_category(&state, &gifts).unwrap() {
            Transition::Descended(next) => {
                assert_eq!(names(next.current_level()), vec!["birthday"]);
                assert_eq!(next.generation(), after.generation());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
