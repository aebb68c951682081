#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const FOOD_TAXONOMY: &str = r#"{
  "categories": [
    { "name": "food", "display_name": "Food", "icon": "utensils" },
    { "name": "groceries", "display_name": "Groceries", "parent_category": "food" },
    { "name": "fresh_produce", "display_name": "Fresh Produce", "parent_category": "groceries" },
    { "name": "restaurants", "display_name": "Restaurants", "parent_category": "food" },
    { "name": "travel", "display_name": "Travel" }
  ]
}"#;

/// A scratch directory holding a config path and optional taxonomy files.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    pub fn write_taxonomy(&self, file_name: &str, json: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        std::fs::write(&path, json).expect("write taxonomy");
        path
    }

    /// `finch_cli` in script mode with config isolated to this sandbox.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("finch_cli").expect("binary");
        cmd.env("FINCH_CLI_SCRIPT", "1")
            .env("FINCH_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
