use dialoguer::Select;
use finch_core::PickOutcome;
use tracing::debug;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

use super::joined_argument;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("ls", "List categories at the current level", "ls", cmd_ls),
        CommandEntry::new(
            "open",
            "Open a branch or choose a leaf from the current level",
            "open <name|#>",
            cmd_open,
        ),
        CommandEntry::new("up", "Go up one level", "up", cmd_up),
        CommandEntry::new("root", "Return to the root categories", "root", cmd_root),
        CommandEntry::new(
            "crumb",
            "Jump to a breadcrumb entry (-1 for root)",
            "crumb <index>",
            cmd_crumb,
        ),
        CommandEntry::new("where", "Show the breadcrumb trail", "where", cmd_where),
        CommandEntry::new(
            "jump",
            "Go straight to any category by name",
            "jump <name>",
            cmd_jump,
        ),
        CommandEntry::new("pick", "Drill down with an arrow-key menu", "pick", cmd_pick),
    ]
}

pub(crate) fn print_level(context: &ShellContext) {
    output::section(render::level_title(context.session.breadcrumb()));
    let level = context.session.current_level();
    if level.is_empty() {
        output::info("No categories at this level.");
        return;
    }
    for line in render::level_lines(context.session.index(), level, context.render_options()) {
        output::line(line);
    }
}

fn cmd_ls(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_level(context);
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = joined_argument(args, "open <name|#>")?;
    let outcome = match input.trim().parse::<usize>() {
        Ok(0) => {
            return Err(CommandError::InvalidArguments(
                "Entries are numbered from 1.".into(),
            ))
        }
        Ok(number) => context.session.select_at(number - 1)?,
        Err(_) => {
            let name = context.level_name(&input);
            context.session.select(&name)?
        }
    };
    context.apply_outcome(outcome);
    Ok(())
}

fn cmd_up(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.back()?;
    print_level(context);
    Ok(())
}

fn cmd_root(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.reset()?;
    print_level(context);
    Ok(())
}

fn cmd_crumb(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("Usage: crumb <index>".into()))?;
    let index = raw.parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a breadcrumb index"))
    })?;
    context.session.select_breadcrumb(index)?;
    print_level(context);
    Ok(())
}

fn cmd_where(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(breadcrumb) = context.session.breadcrumb() else {
        return Err(CommandError::Message("No picker is open.".into()));
    };
    output::section("Breadcrumb");
    for line in render::crumb_lines(breadcrumb) {
        output::line(line);
    }
    Ok(())
}

fn cmd_jump(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = joined_argument(args, "jump <name>")?;
    let name = context.index_name(&input);
    let outcome = context.session.jump_to(&name)?;
    context.apply_outcome(outcome);
    Ok(())
}

enum PickerRow {
    Category(usize),
    Back,
    Cancel,
}

fn cmd_pick(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "`pick` needs an interactive terminal; use `open` in scripts.".into(),
        ));
    }

    loop {
        let title = render::level_title(context.session.breadcrumb());
        let mut labels = render::level_lines(
            context.session.index(),
            context.session.current_level(),
            context.render_options(),
        );
        let mut rows: Vec<PickerRow> = (0..labels.len()).map(PickerRow::Category).collect();
        let at_root = context
            .session
            .breadcrumb()
            .map_or(true, |crumbs| crumbs.is_empty());
        if !at_root {
            labels.push("  ← Back".into());
            rows.push(PickerRow::Back);
        }
        labels.push("  ✕ Cancel".into());
        rows.push(PickerRow::Cancel);

        let choice = Select::with_theme(&context.theme)
            .with_prompt(title)
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match choice.and_then(|position| rows.get(position)) {
            Some(PickerRow::Category(position)) => {
                let outcome = context.session.select_at(*position)?;
                if let PickOutcome::Chosen(_) = outcome {
                    context.apply_outcome(outcome);
                    return Ok(());
                }
            }
            Some(PickerRow::Back) => context.session.back()?,
            Some(PickerRow::Cancel) | None => {
                debug!("interactive picker dismissed");
                context.session.cancel();
                context.reopen_session();
                output::info("Picker cancelled.");
                return Ok(());
            }
        }
    }
}
