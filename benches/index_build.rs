use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finch_core::{CategoryIndex, PickerSession};
use finch_domain::{default_categories, Category, CategoryResponse, OrphanPolicy};

/// Balanced taxonomy: `width` roots, each with `width` branches of `width` leaves.
fn synthetic_taxonomy(width: usize) -> Vec<Category> {
    let mut categories = Vec::with_capacity(width + width * width + width * width * width);
    for r in 0..width {
        let root = format!("root_{r}");
        categories.push(Category::new(root.clone(), format!("Root {r}")));
        for b in 0..width {
            let branch = format!("{root}_branch_{b}");
            categories.push(
                Category::new(branch.clone(), format!("Branch {r}.{b}")).with_parent(root.clone()),
            );
            for l in 0..width {
                categories.push(
                    Category::new(format!("{branch}_leaf_{l}"), format!("Leaf {r}.{b}.{l}"))
                        .with_parent(branch.clone()),
                );
            }
        }
    }
    categories
}

fn bench_index_build(c: &mut Criterion) {
    let defaults = default_categories();
    c.bench_function("index_build_defaults", |b| {
        b.iter(|| CategoryIndex::build(black_box(&defaults)).expect("build"))
    });

    let large = synthetic_taxonomy(20);
    c.bench_function("index_build_8420", |b| {
        b.iter(|| CategoryIndex::build(black_box(&large)).expect("build"))
    });
}

fn bench_session(c: &mut Criterion) {
    let response = CategoryResponse::with_derived_hierarchy(synthetic_taxonomy(12));
    c.bench_function("session_open_and_pick", |b| {
        b.iter(|| {
            let mut session = PickerSession::open(black_box(&response), OrphanPolicy::Reject);
            session.select("root_3").expect("root");
            session.select("root_3_branch_4").expect("branch");
            session.select("root_3_branch_4_leaf_5").expect("leaf")
        })
    });

    let index = CategoryIndex::build(&synthetic_taxonomy(12)).expect("build");
    c.bench_function("search_fuzzy", |b| {
        b.iter(|| index.search(black_box("leaf 7.3.1"), 2).len())
    });
}

criterion_group!(benches, bench_index_build, bench_session);
criterion_main!(benches);
