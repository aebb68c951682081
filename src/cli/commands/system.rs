use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

use super::navigation::print_level;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "reload",
            "Fetch the taxonomy again and restart the picker",
            "reload",
            cmd_reload,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.command(&command) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_reload(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.reload()?;
    output::success(format!(
        "Reloaded {} categories from {}.",
        context.session.index().len(),
        context.source.describe()
    ));
    print_level(context);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Finch {}", meta.version));
    output::line(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::line(format!("  Built at     : {}", meta.timestamp));
    output::line(format!("  Target       : {}", meta.target));
    output::line(format!("  Profile      : {}", meta.profile));
    output::line(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
