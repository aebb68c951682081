use finch_core::{NavigationError, PathResolver};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

use super::joined_argument;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "tree",
            "Show the whole taxonomy or one branch",
            "tree [name]",
            cmd_tree,
        ),
        CommandEntry::new("find", "Search categories by name", "find <query>", cmd_find),
        CommandEntry::new(
            "path",
            "Show the stored path of any category",
            "path <name>",
            cmd_path,
        ),
        CommandEntry::new(
            "last",
            "Show the most recent selection, optionally as JSON",
            "last [json]",
            cmd_last,
        ),
    ]
}

fn cmd_tree(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = context.session.index();
    let options = context.render_options();
    let rendered = if args.is_empty() {
        render::render_tree(index, options)
    } else {
        let name = context.index_name(&args.join(" "));
        render::render_subtree(index, &name, options)
            .ok_or(NavigationError::UnknownCategory(name))?
    };
    output::section("Taxonomy");
    print!("{rendered}");
    Ok(())
}

fn cmd_find(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = joined_argument(args, "find <query>")?;
    let index = context.session.index();
    let matches = index.search(&query, context.config.search_max_distance);
    if matches.is_empty() {
        output::info(format!("No categories match `{}`.", query.trim()));
        return Ok(());
    }

    output::section(format!("Matches for `{}`", query.trim()));
    for category in matches {
        let path = PathResolver::resolve_name(index, &category.name)?;
        let kind = if index.is_leaf(&category.name) {
            "leaf"
        } else {
            "branch"
        };
        output::line(format!(
            "  {:<20} {} ({})",
            category.name, path.full_path, kind
        ));
    }
    Ok(())
}

fn cmd_path(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = joined_argument(args, "path <name>")?;
    let name = context.index_name(&input);
    let index = context.session.index();
    let path = PathResolver::resolve_name(index, &name)?;

    output::section(format!("Path: {}", name));
    output::line(format!("  full    : {}", path.full_path));
    output::line(format!("  machine : {}", path.machine_path()));
    output::line(format!("  root    : {}", path.root));
    output::line(format!(
        "  parent  : {}",
        path.parent.as_deref().unwrap_or("(none)")
    ));
    output::line(format!("  depth   : {}", path.depth()));
    if index.is_branch(&name) {
        output::hint("This is a branch; transactions are filed under its leaves.");
    }
    Ok(())
}

fn cmd_last(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selection = context
        .last_selection
        .as_ref()
        .ok_or_else(|| CommandError::Message("No category has been selected yet.".into()))?;

    if args.first().is_some_and(|arg| arg.eq_ignore_ascii_case("json")) {
        output::line(serde_json::to_string_pretty(selection)?);
        return Ok(());
    }

    output::section("Last selection");
    output::line(format!("  category    : {}", selection.category));
    output::line(format!("  category_id : {}", selection.category_id));
    output::line(format!("  machine     : {}", selection.path.machine_path()));
    Ok(())
}
