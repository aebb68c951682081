mod common;

use common::{Sandbox, FOOD_TAXONOMY};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn script_mode_drills_down_to_a_leaf() {
    let sandbox = Sandbox::new();
    let taxonomy = sandbox.write_taxonomy("categories.json", FOOD_TAXONOMY);

    sandbox
        .cli()
        .arg(&taxonomy)
        .write_stdin("ls\nopen food\nopen Groceries\nopen 1\nexit\n")
        .assert()
        .success()
        .stdout(contains("2. 📁 Travel"))
        .stdout(contains("=== Food > Groceries ==="))
        .stdout(contains("Selected: Food > Groceries > Fresh Produce"))
        .stdout(contains("path : food > groceries > fresh_produce"));
}

#[test]
fn built_in_taxonomy_is_used_without_a_file() {
    let sandbox = Sandbox::new();

    sandbox
        .cli()
        .write_stdin("jump coffee_shops\n")
        .assert()
        .success()
        .stdout(contains("Selected: Food & Dining > Coffee Shops"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let sandbox = Sandbox::new();

    sandbox
        .cli()
        .write_stdin("lss\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lss`"))
        .stdout(contains("Suggestion: `ls`?"));
}

#[test]
fn navigation_errors_do_not_stop_the_script() {
    let sandbox = Sandbox::new();
    let taxonomy = sandbox.write_taxonomy("categories.json", FOOD_TAXONOMY);

    sandbox
        .cli()
        .arg(&taxonomy)
        .write_stdin("crumb 4\nopen groceries\nopen grocerys\nwhere\n")
        .assert()
        .success()
        .stdout(contains("breadcrumb index 4 is out of range for depth 0"))
        .stdout(contains("not displayed at the current level"))
        .stdout(contains("Did you mean `groceries`?"))
        .stdout(contains("(root)"));
}

#[test]
fn rejected_taxonomy_falls_back_to_roots() {
    let sandbox = Sandbox::new();
    let taxonomy = sandbox.write_taxonomy(
        "orphans.json",
        r#"[
            { "name": "food", "display_name": "Food" },
            { "name": "groceries", "display_name": "Groceries", "parent_category": "food" },
            { "name": "lost", "display_name": "Lost", "parent_category": "ghost" }
        ]"#,
    );

    sandbox
        .cli()
        .arg(&taxonomy)
        .write_stdin("ls\nopen food\n")
        .assert()
        .success()
        .stdout(contains("Taxonomy rejected"))
        .stdout(contains("Selected: Food"))
        .stdout(contains("Lost").not());
}

#[test]
fn config_changes_are_persisted() {
    let sandbox = Sandbox::new();

    sandbox
        .cli()
        .write_stdin("config set search_max_distance 4\nconfig get search_max_distance\n")
        .assert()
        .success()
        .stdout(contains("search_max_distance set to 4."));

    let saved = std::fs::read_to_string(sandbox.config_path()).expect("config written");
    assert!(saved.contains("\"search_max_distance\": 4"));
}

#[test]
fn missing_source_file_fails_startup() {
    let sandbox = Sandbox::new();

    sandbox
        .cli()
        .arg(sandbox.path().join("absent.json"))
        .write_stdin("ls\n")
        .assert()
        .failure()
        .stderr(contains("Category source not found"));
}

#[test]
fn last_selection_prints_transaction_payload() {
    let sandbox = Sandbox::new();
    let taxonomy = sandbox.write_taxonomy("categories.json", FOOD_TAXONOMY);

    sandbox
        .cli()
        .arg(&taxonomy)
        .write_stdin("last\njump restaurants\nlast json\n")
        .assert()
        .success()
        .stdout(contains("No category has been selected yet."))
        .stdout(contains("\"category\": \"Food > Restaurants\""))
        .stdout(contains("\"root\": \"food\""));
}
