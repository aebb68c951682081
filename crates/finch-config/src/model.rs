use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use finch_domain::OrphanPolicy;

use crate::ConfigError;

/// Stores user-configurable picker preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub orphan_policy: OrphanPolicy,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub show_usage_counts: bool,
    #[serde(default = "Config::default_search_max_distance")]
    pub search_max_distance: usize,
    /// Category file loaded when the CLI is started without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            orphan_policy: OrphanPolicy::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            show_usage_counts: false,
            search_max_distance: Self::default_search_max_distance(),
            default_source: None,
        }
    }
}

impl Config {
    pub const KEYS: &'static [&'static str] = &[
        "theme",
        "orphan_policy",
        "ui_color_enabled",
        "show_usage_counts",
        "search_max_distance",
        "default_source",
    ];

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_search_max_distance() -> usize {
        2
    }

    /// Updates one setting from its textual form, as typed in the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "theme" => self.theme = Theme::from_str(value),
            "orphan_policy" => {
                self.orphan_policy = OrphanPolicy::from_str(value).ok_or_else(invalid)?;
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(value).ok_or_else(invalid)?,
            "show_usage_counts" => {
                self.show_usage_counts = parse_bool(value).ok_or_else(invalid)?;
            }
            "search_max_distance" => {
                self.search_max_distance = value.trim().parse().map_err(|_| invalid())?;
            }
            "default_source" => {
                let trimmed = value.trim();
                self.default_source = if trimmed.is_empty() || trimmed == "none" {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Current value of one setting in the same textual form `set` accepts.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "theme" => self.theme.to_string(),
            "orphan_policy" => self.orphan_policy.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "show_usage_counts" => self.show_usage_counts.to_string(),
            "search_max_distance" => self.search_max_distance.to_string(),
            "default_source" => self
                .default_source
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "none".into()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Whether category rows carry icon glyphs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Plain,
    Iconic,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::from_str(v.trim()))
            .unwrap_or_else(Theme::default)
    }

    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Theme::Plain,
            _ => Theme::Iconic,
        }
    }

    pub fn shows_icons(self) -> bool {
        matches!(self, Theme::Iconic)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Iconic
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Plain => "plain",
            Theme::Iconic => "iconic",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}
