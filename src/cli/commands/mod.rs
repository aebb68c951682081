pub mod config;
pub mod lookup;
pub mod navigation;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(navigation::definitions())
        .chain(lookup::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}

/// Joins the remaining arguments so unquoted multi-word names still work.
pub(crate) fn joined_argument(args: &[&str], usage: &str) -> Result<String, CommandError> {
    let joined = args.join(" ");
    if joined.trim().is_empty() {
        return Err(CommandError::InvalidArguments(format!("Usage: {usage}")));
    }
    Ok(joined)
}
