mod common;

use finch::cli::render::{render_subtree, render_tree, RenderOptions};
use finch_core::CategoryIndex;
use finch_source_json::parse_response;

fn food_index() -> CategoryIndex {
    let response = parse_response(common::FOOD_TAXONOMY).expect("parse taxonomy");
    CategoryIndex::build(&response.categories).expect("build index")
}

#[test]
fn tree_lists_every_category_under_its_parent() {
    let rendered = render_tree(&food_index(), RenderOptions::default());

    insta::assert_snapshot!(rendered, @r###"
    Food
    ├── Groceries
    │   └── Fresh Produce
    └── Restaurants
    Travel
    "###);
}

#[test]
fn subtree_starts_at_the_named_branch() {
    let rendered = render_subtree(&food_index(), "groceries", RenderOptions::default())
        .expect("groceries is indexed");

    insta::assert_snapshot!(rendered, @r###"
    Groceries
    └── Fresh Produce
    "###);
}

#[test]
fn iconic_tree_prefixes_glyphs() {
    let options = RenderOptions {
        icons: true,
        usage_counts: false,
    };
    let rendered = render_tree(&food_index(), options);

    assert!(rendered.lines().all(|line| !line.trim().is_empty()));
    assert!(rendered.contains("📁 Travel"));
    assert!(rendered.contains("└── 📁 Restaurants"));
}
