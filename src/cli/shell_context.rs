use dialoguer::theme::ColorfulTheme;
use finch_config::{Config, ConfigManager};
use finch_core::{CategorySource, PickerSession};
use finch_domain::{CategoryResponse, CategorySelection};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a shell command can read or change.
///
/// `response` is the last successful fetch. Every session is opened from it,
/// so a chosen leaf or a cancelled picker can start over without refetching.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub source: Box<dyn CategorySource>,
    pub response: CategoryResponse,
    pub session: PickerSession,
    pub last_selection: Option<CategorySelection>,
    pub last_command: Option<String>,
    pub running: bool,
}
