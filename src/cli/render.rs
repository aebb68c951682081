//! Plain-text views of the taxonomy: level listings, trees and breadcrumbs.

use finch_core::{Breadcrumb, CategoryIndex, IconResolver};
use finch_domain::{Category, Displayable, PATH_SEPARATOR};

const BRANCH_MARKER: &str = " >";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub icons: bool,
    pub usage_counts: bool,
}

pub fn category_label(category: &Category, options: RenderOptions) -> String {
    let name = if options.usage_counts {
        category.display_label()
    } else {
        category.display_name.clone()
    };
    if options.icons {
        format!("{} {}", IconResolver::resolve(category.icon_key.as_deref()), name)
    } else {
        name
    }
}

/// Numbered rows for one level. Branches carry a trailing marker.
pub fn level_lines(
    index: &CategoryIndex,
    level: &[Category],
    options: RenderOptions,
) -> Vec<String> {
    level
        .iter()
        .enumerate()
        .map(|(position, category)| {
            let marker = if index.is_branch(&category.name) {
                BRANCH_MARKER
            } else {
                ""
            };
            format!(
                "{:>3}. {}{}",
                position + 1,
                category_label(category, options),
                marker
            )
        })
        .collect()
}

/// Title for the current level: the breadcrumb trail, or `Categories` at root.
pub fn level_title(breadcrumb: Option<&Breadcrumb>) -> String {
    match breadcrumb {
        Some(crumbs) if !crumbs.is_empty() => trail(crumbs),
        _ => "Categories".to_string(),
    }
}

pub fn trail(breadcrumb: &Breadcrumb) -> String {
    breadcrumb
        .entries()
        .iter()
        .map(|category| category.display_name.as_str())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// One row per clickable breadcrumb entry, keyed by the index `crumb` takes.
pub fn crumb_lines(breadcrumb: &Breadcrumb) -> Vec<String> {
    let mut lines = vec![format!("{:>4}  (root)", -1)];
    lines.extend(
        breadcrumb
            .entries()
            .iter()
            .enumerate()
            .map(|(position, category)| format!("{:>4}  {}", position, category.display_name)),
    );
    lines
}

pub fn render_tree(index: &CategoryIndex, options: RenderOptions) -> String {
    let mut out = String::new();
    for root in index.root_categories() {
        write_node(index, root, options, &mut out);
    }
    out
}

/// Tree rooted at `name`, or `None` when the index has no such category.
pub fn render_subtree(
    index: &CategoryIndex,
    name: &str,
    options: RenderOptions,
) -> Option<String> {
    let category = index.get(name)?;
    let mut out = String::new();
    write_node(index, category, options, &mut out);
    Some(out)
}

fn write_node(
    index: &CategoryIndex,
    category: &Category,
    options: RenderOptions,
    out: &mut String,
) {
    out.push_str(&category_label(category, options));
    out.push('\n');
    write_children(index, &category.name, "", options, out);
}

fn write_children(
    index: &CategoryIndex,
    parent: &str,
    prefix: &str,
    options: RenderOptions,
    out: &mut String,
) {
    let children = index.children_of(parent);
    for (position, child) in children.iter().enumerate() {
        let last = position + 1 == children.len();
        let (connector, extension) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&category_label(child, options));
        out.push('\n');
        write_children(index, &child.name, &format!("{prefix}{extension}"), options, out);
    }
}
