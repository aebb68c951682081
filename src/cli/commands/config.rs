use finch_config::Config;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change picker preferences",
        "config [show|path|get <key>|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "path" => {
            output::line(context.config_manager.config_path().display());
            Ok(())
        }
        "get" => {
            let key = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: config get <key>".into())
            })?;
            output::line(context.config.get(key)?);
            Ok(())
        }
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            set_config_value(context, key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        output::line(format!("  {:<20} {}", key, context.config.get(key)?));
    }
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let previous_policy = context.config.orphan_policy;
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.commit_config(updated)?;

    match key {
        "ui_color_enabled" => {
            output::set_color_enabled(context.config.ui_color_enabled);
        }
        "orphan_policy" if context.config.orphan_policy != previous_policy => {
            context.reopen_session();
            context.report_session();
            output::info("Picker restarted with the new orphan policy.");
        }
        _ => {}
    }

    output::success(format!("{} set to {}.", key, context.config.get(key)?));
    Ok(())
}
