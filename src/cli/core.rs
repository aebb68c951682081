//! Core CLI loop, dispatch, and shell context helpers.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use finch_config::{Config, ConfigError, ConfigManager};
use finch_core::{
    normalize_category_name, CategorySource, NavigationError, PickOutcome, PickerSession,
    SourceError, StaticCategorySource,
};
use finch_source_json::JsonCategorySource;
use strsim::levenshtein;
use tracing::{debug, info};

pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::render::RenderOptions;

const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Builds the shell from the user's config file.
    ///
    /// `source_path` wins over the configured `default_source`; with neither,
    /// the built-in taxonomy is used.
    pub fn new(mode: CliMode, source_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config_manager = ConfigManager::default_location();
        let config = config_manager.load()?;
        let source: Box<dyn CategorySource> =
            match source_path.or_else(|| config.default_source.clone()) {
                Some(path) => Box::new(JsonCategorySource::new(path)),
                None => Box::new(StaticCategorySource::defaults()),
            };
        Self::with_parts(mode, config_manager, config, source)
    }

    /// Assembles a shell from an already loaded `config`; `config_manager` is
    /// only written to when a `config set` succeeds.
    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        source: Box<dyn CategorySource>,
    ) -> Result<Self, CliError> {
        output::set_color_enabled(config.ui_color_enabled);

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let response = source.fetch()?;
        info!(source = %source.describe(), "category source loaded");
        let session = PickerSession::open(&response, config.orphan_policy);

        let context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            source,
            response,
            session,
            last_selection: None,
            last_command: None,
            running: true,
        };
        context.report_session();
        Ok(context)
    }

    pub(crate) fn prompt(&self) -> String {
        match self.session.breadcrumb() {
            Some(crumbs) if !crumbs.is_empty() => {
                format!("finch [{}]> ", super::render::trail(crumbs))
            }
            _ => "finch> ".to_string(),
        }
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            icons: self.config.theme.shows_icons(),
            usage_counts: self.config.show_usage_counts,
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Starts a fresh picker on the last fetched taxonomy.
    pub(crate) fn reopen_session(&mut self) {
        self.session = PickerSession::open(&self.response, self.config.orphan_policy);
    }

    /// Refetches the taxonomy. The current session survives a failed fetch.
    pub(crate) fn reload(&mut self) -> CommandResult {
        let response = self.source.fetch()?;
        self.response = response;
        self.reopen_session();
        self.report_session();
        Ok(())
    }

    pub(crate) fn report_session(&self) {
        if let Some(err) = self.session.degraded() {
            output::warning(format!(
                "Taxonomy rejected ({err}); showing root categories only."
            ));
        }
        for warning in self.session.hierarchy_warnings() {
            output::warning(warning);
        }
    }

    /// Prints the result of a selection. A chosen leaf starts a new session.
    pub(crate) fn apply_outcome(&mut self, outcome: PickOutcome) {
        match outcome {
            PickOutcome::Navigated => commands::navigation::print_level(self),
            PickOutcome::Chosen(selection) => {
                output::success(format!("Selected: {}", selection.category));
                output::line(format!("  id   : {}", selection.category_id));
                output::line(format!("  path : {}", selection.path.machine_path()));
                self.last_selection = Some(selection);
                self.reopen_session();
            }
        }
    }

    /// Saves `updated` and only then makes it the live config.
    pub(crate) fn commit_config(&mut self, updated: Config) -> CommandResult {
        self.config_manager.save(&updated)?;
        self.config = updated;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            debug!(command, "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &lowered), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= MAX_SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Navigation(NavigationError::UnknownCategory(name)) => {
                output::error(format!("Category not found: {name}"));
                let matches = self
                    .session
                    .index()
                    .search(&name, self.config.search_max_distance);
                if let Some(best) = matches.first() {
                    output::hint(format!("Did you mean `{}`?", best.name));
                }
            }
            CommandError::Navigation(err @ NavigationError::NotInCurrentLevel(_)) => {
                output::error(err);
                output::hint("Use `ls` to list this level or `jump <name>` to go there directly.");
            }
            other => output::error(other),
        }
        Ok(())
    }

    /// Maps user input onto a machine name shown at the current level.
    ///
    /// Accepts the machine name or the display name in any case. Input
    /// matching nothing on this level is normalized and passed through, so
    /// the session can tell unknown names from names on other levels.
    pub(crate) fn level_name(&self, input: &str) -> String {
        let trimmed = input.trim();
        self.session
            .current_level()
            .iter()
            .find(|category| {
                category.name == trimmed || category.display_name.eq_ignore_ascii_case(trimmed)
            })
            .map(|category| category.name.clone())
            .unwrap_or_else(|| self.index_name(trimmed))
    }

    /// Like [`ShellContext::level_name`] but searching the whole index.
    pub(crate) fn index_name(&self, input: &str) -> String {
        let trimmed = input.trim();
        let index = self.session.index();
        if index.contains(trimmed) {
            return trimmed.to_string();
        }
        index
            .iter()
            .find(|category| category.display_name.eq_ignore_ascii_case(trimmed))
            .map(|category| category.name.clone())
            .unwrap_or_else(|| normalize_category_name(trimmed))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    context: &mut ShellContext,
    lines: &[&str],
) -> Result<(), CommandError> {
    for line in lines {
        match context.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finch_domain::{default_categories, Category, OrphanPolicy};
    use tempfile::TempDir;

    fn context_with(source: StaticCategorySource) -> (ShellContext, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let manager = ConfigManager::new(dir.path().join("config.json"));
        let context = ShellContext::with_parts(
            CliMode::Script,
            manager,
            Config::default(),
            Box::new(source),
        )
        .expect("context");
        (context, dir)
    }

    fn default_context() -> (ShellContext, TempDir) {
        context_with(StaticCategorySource::defaults())
    }

    fn level(context: &ShellContext) -> Vec<&str> {
        context
            .session
            .current_level()
            .iter()
            .map(|category| category.name.as_str())
            .collect()
    }

    #[test]
    fn open_by_display_name_descends() {
        let (mut context, _dir) = default_context();
        process_script(&mut context, &["open \"Food & Dining\""]).expect("script");

        assert_eq!(
            level(&context),
            vec!["groceries", "restaurant", "fast_food", "coffee_shops"]
        );
        assert_eq!(context.prompt(), "finch [Food & Dining]> ");
    }

    #[test]
    fn choosing_leaf_records_selection_and_restarts() {
        let (mut context, _dir) = default_context();
        process_script(&mut context, &["open food", "open 2"]).expect("script");

        let selection = context.last_selection.as_ref().expect("selection");
        assert_eq!(selection.category, "Food & Dining > Restaurants");
        assert!(!context.session.is_closed());
        assert!(context.session.breadcrumb().expect("open").is_empty());
    }

    #[test]
    fn navigation_errors_come_back_typed() {
        let (mut context, _dir) = default_context();

        let err = context.process_line("open groceries").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Navigation(NavigationError::NotInCurrentLevel(_))
        ));

        let err = context.process_line("open nowhere").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Navigation(NavigationError::UnknownCategory(_))
        ));

        let err = context.process_line("crumb 0").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Navigation(NavigationError::InvalidBreadcrumbIndex { index: 0, depth: 0 })
        ));
    }

    #[test]
    fn up_and_root_walk_back() {
        let categories = vec![
            Category::new("food", "Food"),
            Category::new("groceries", "Groceries").with_parent("food"),
            Category::new("fresh_produce", "Fresh Produce").with_parent("groceries"),
        ];
        let (mut context, _dir) = context_with(StaticCategorySource::from_categories(categories));

        process_script(&mut context, &["open food", "open groceries", "up"]).expect("script");
        assert_eq!(level(&context), vec!["groceries"]);

        process_script(&mut context, &["jump fresh_produce"]).expect("script");
        assert_eq!(
            context.last_selection.as_ref().unwrap().category,
            "Food > Groceries > Fresh Produce"
        );

        process_script(&mut context, &["open food", "root"]).expect("script");
        assert_eq!(level(&context), vec!["food"]);
    }

    #[test]
    fn config_set_reopens_with_new_policy() {
        let mut categories = default_categories();
        categories.push(Category::new("orphan", "Orphan").with_parent("ghost"));
        let (mut context, dir) = context_with(StaticCategorySource::from_categories(categories));
        assert!(context.session.degraded().is_some());

        process_script(&mut context, &["config set orphan_policy promote_to_root"])
            .expect("script");
        assert!(context.session.degraded().is_none());
        assert_eq!(context.config.orphan_policy, OrphanPolicy::PromoteToRoot);

        let saved = ConfigManager::new(dir.path().join("config.json"))
            .load()
            .expect("load");
        assert_eq!(saved.orphan_policy, OrphanPolicy::PromoteToRoot);
    }

    #[test]
    fn given_config_is_used_without_reading_the_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write");
        let config = Config {
            orphan_policy: OrphanPolicy::PromoteToRoot,
            ..Config::default()
        };

        let context = ShellContext::with_parts(
            CliMode::Script,
            ConfigManager::new(path),
            config,
            Box::new(StaticCategorySource::defaults()),
        )
        .expect("context");
        assert_eq!(context.config.orphan_policy, OrphanPolicy::PromoteToRoot);
    }

    #[test]
    fn exit_stops_script() {
        let (mut context, _dir) = default_context();
        let control = context.process_line("exit").expect("exit");
        assert_eq!(control, LoopControl::Exit);
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let (mut context, _dir) = default_context();
        let control = context.process_line("lss").expect("suggest");
        assert_eq!(control, LoopControl::Continue);
    }
}
