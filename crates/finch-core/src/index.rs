//! Immutable parent → children adjacency built from a flat category list.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::atomic::{AtomicU64, Ordering},
};

use finch_domain::{Category, OrphanPolicy};
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::error::MalformedTaxonomyError;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Read-only snapshot of the taxonomy.
///
/// An index is never updated in place: a changed category list means a new
/// call to [`CategoryIndex::build`]. Every snapshot gets its own
/// [`generation`](CategoryIndex::generation) so holders can tell them apart.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    positions: HashMap<String, usize>,
    children: HashMap<String, Vec<Category>>,
    parents: HashMap<String, String>,
    roots: Vec<Category>,
    generation: u64,
}

impl CategoryIndex {
    /// Builds the index, rejecting dangling parent references.
    pub fn build(categories: &[Category]) -> Result<Self, MalformedTaxonomyError> {
        Self::build_with_policy(categories, OrphanPolicy::Reject)
    }

    /// Builds the index, treating dangling parent references per `policy`.
    ///
    /// Duplicate names, self-parenting and cycles are rejected regardless of
    /// the policy. Children keep their relative input order.
    pub fn build_with_policy(
        categories: &[Category],
        policy: OrphanPolicy,
    ) -> Result<Self, MalformedTaxonomyError> {
        let mut positions = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            if positions.insert(category.name.clone(), position).is_some() {
                return Err(MalformedTaxonomyError::DuplicateName(
                    category.name.clone(),
                ));
            }
        }

        let mut parents = HashMap::new();
        for category in categories {
            let Some(parent) = category.parent() else {
                continue;
            };
            if parent == category.name {
                return Err(MalformedTaxonomyError::SelfParent(category.name.clone()));
            }
            if positions.contains_key(parent) {
                parents.insert(category.name.clone(), parent.to_string());
                continue;
            }
            match policy {
                OrphanPolicy::Reject => {
                    return Err(MalformedTaxonomyError::DanglingParent {
                        category: category.name.clone(),
                        parent: parent.to_string(),
                    });
                }
                OrphanPolicy::PromoteToRoot => {
                    warn!(
                        "category `{}` references unknown parent `{}`; showing it at the root level",
                        category.name, parent
                    );
                }
            }
        }

        detect_cycle(categories, &parents)?;

        let mut children: HashMap<String, Vec<Category>> = HashMap::new();
        let mut roots = Vec::new();
        for category in categories {
            match parents.get(&category.name) {
                Some(parent) => children
                    .entry(parent.clone())
                    .or_default()
                    .push(category.clone()),
                None => roots.push(category.clone()),
            }
        }

        let index = Self {
            categories: categories.to_vec(),
            positions,
            children,
            parents,
            roots,
            generation: next_generation(),
        };
        debug!(
            generation = index.generation,
            categories = index.categories.len(),
            roots = index.roots.len(),
            "category index built"
        );
        Ok(index)
    }

    /// Degraded index holding only the parentless categories, all of them leaves.
    pub fn roots_only(categories: &[Category]) -> Self {
        let mut positions = HashMap::new();
        let mut kept: Vec<Category> = Vec::new();
        for category in categories.iter().filter(|category| category.is_root()) {
            if positions.contains_key(&category.name) {
                warn!("skipping duplicate root category `{}`", category.name);
                continue;
            }
            positions.insert(category.name.clone(), kept.len());
            kept.push(category.clone());
        }
        Self {
            roots: kept.clone(),
            categories: kept,
            positions,
            children: HashMap::new(),
            parents: HashMap::new(),
            generation: next_generation(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All indexed categories in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Direct children of `name` in display order.
    ///
    /// An empty slice is the one definition of "leaf" used everywhere; unknown
    /// names also yield an empty slice.
    pub fn children_of(&self, name: &str) -> &[Category] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories without a resolved parent, in input order.
    pub fn root_categories(&self) -> &[Category] {
        &self.roots
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.positions
            .get(name)
            .map(|&position| &self.categories[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn is_leaf(&self, name: &str) -> bool {
        self.children_of(name).is_empty()
    }

    pub fn is_branch(&self, name: &str) -> bool {
        !self.is_leaf(name)
    }

    pub fn parent_of(&self, name: &str) -> Option<&Category> {
        self.parents.get(name).and_then(|parent| self.get(parent))
    }

    /// Parent, grandparent and so on, nearest first.
    pub fn ancestors(&self, name: &str) -> Vec<&Category> {
        let mut ancestors = Vec::new();
        let mut current = name;
        while let Some(parent) = self.parent_of(current) {
            ancestors.push(parent);
            current = &parent.name;
        }
        ancestors
    }

    /// Root-first ancestors of `name`: the breadcrumb that leads to it.
    pub fn lineage(&self, name: &str) -> Vec<Category> {
        self.ancestors(name).into_iter().rev().cloned().collect()
    }

    /// Every category below `name`, depth-first in display order.
    pub fn descendants(&self, name: &str) -> Vec<&Category> {
        let mut found = Vec::new();
        let mut stack: Vec<&Category> = self.children_of(name).iter().rev().collect();
        while let Some(category) = stack.pop() {
            found.push(category);
            stack.extend(self.children_of(&category.name).iter().rev());
        }
        found
    }

    pub fn is_descendant_of(&self, name: &str, ancestor: &str) -> bool {
        self.ancestors(name)
            .iter()
            .any(|category| category.name == ancestor)
    }

    /// Selectable end points, in input order.
    pub fn leaves(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| self.is_leaf(&category.name))
            .collect()
    }

    /// Compares a server-supplied grouping with the rebuilt adjacency.
    ///
    /// The rebuilt index stays authoritative; the returned lines only describe
    /// where the server disagrees.
    pub fn verify_hierarchy(&self, hierarchy: &BTreeMap<String, Vec<Category>>) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut groups: Vec<&String> = self.children.keys().collect();
        groups.sort();
        for parent in groups {
            let expected: Vec<&str> = self
                .children_of(parent)
                .iter()
                .map(|category| category.name.as_str())
                .collect();
            let Some(reported) = hierarchy.get(parent.as_str()) else {
                warnings.push(format!("server hierarchy is missing group `{}`", parent));
                continue;
            };
            let reported: Vec<&str> = reported
                .iter()
                .map(|category| category.name.as_str())
                .collect();
            let expected_set: HashSet<&str> = expected.iter().copied().collect();
            let reported_set: HashSet<&str> = reported.iter().copied().collect();

            let missing: Vec<&str> = expected
                .iter()
                .copied()
                .filter(|name| !reported_set.contains(name))
                .collect();
            if !missing.is_empty() {
                warnings.push(format!(
                    "server group `{}` is missing {}",
                    parent,
                    missing.join(", ")
                ));
            }
            let extra: Vec<&str> = reported
                .iter()
                .copied()
                .filter(|name| !expected_set.contains(name))
                .collect();
            if !extra.is_empty() {
                warnings.push(format!(
                    "server group `{}` lists unexpected {}",
                    parent,
                    extra.join(", ")
                ));
            }
        }

        for (parent, members) in hierarchy {
            if !members.is_empty() && !self.children.contains_key(parent) {
                warnings.push(format!("server hierarchy has unexpected group `{}`", parent));
            }
        }

        warnings
    }

    /// Finds categories matching `query`.
    ///
    /// Exact matches come first, then substring matches on the machine or
    /// display name, then names within `max_distance` edits. Ties keep input
    /// order.
    pub fn search(&self, query: &str, max_distance: usize) -> Vec<&Category> {
        let normalized = normalize_category_name(query);
        if normalized.is_empty() {
            return Vec::new();
        }
        let lowered = query.trim().to_lowercase();

        let mut ranked: Vec<(u8, usize, usize, &Category)> = Vec::new();
        for (position, category) in self.categories.iter().enumerate() {
            let display = category.display_name.to_lowercase();
            if category.name == normalized || display == lowered {
                ranked.push((0, 0, position, category));
            } else if category.name.contains(&normalized) || display.contains(&lowered) {
                ranked.push((1, 0, position, category));
            } else {
                let distance = levenshtein(&category.name, &normalized);
                if distance <= max_distance {
                    ranked.push((2, distance, position, category));
                }
            }
        }
        ranked.sort_by_key(|(tier, distance, position, _)| (*tier, *distance, *position));
        ranked
            .into_iter()
            .map(|(_, _, _, category)| category)
            .collect()
    }
}

/// Maps free-form input onto the machine-name convention
/// (`"Fresh Produce"` → `"fresh_produce"`).
pub fn normalize_category_name(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| if ch == ' ' || ch == '-' { '_' } else { ch })
        .collect()
}

fn detect_cycle(
    categories: &[Category],
    parents: &HashMap<String, String>,
) -> Result<(), MalformedTaxonomyError> {
    let mut settled: HashSet<&str> = HashSet::new();
    for category in categories {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = Some(category.name.as_str());
        while let Some(name) = current {
            if settled.contains(name) {
                break;
            }
            if let Some(start) = chain.iter().position(|seen| *seen == name) {
                let mut cycle: Vec<String> =
                    chain[start..].iter().map(|seen| seen.to_string()).collect();
                cycle.push(name.to_string());
                return Err(MalformedTaxonomyError::Cycle(cycle));
            }
            chain.push(name);
            current = parents.get(name).map(String::as_str);
        }
        settled.extend(chain);
    }
    Ok(())
}
