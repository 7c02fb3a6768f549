//! Stress test for memoized unions over a binary tree of sets.
//!
//! Builds a complete binary tree bottom-up: 2^depth leaf sets, each
//! holding one distinct value, unioned pairwise up to a single root.
//! A second pass over the same operands is answered entirely from the
//! per-set memo tables and must return the same root without allocating.
//!
//! Run with:
//! ```bash
//! cargo run --release --example union_tree -- [depth]
//! ```

use std::time::Instant;

use clap::Parser;
use nested_sets::family::Family;
use nested_sets::reference::SetRef;

#[derive(Debug, Parser)]
#[command(author, version, about = "Binary union tree stress test")]
struct Cli {
    /// Tree depth (the tree has 2^depth leaves)
    #[arg(default_value = "4")]
    depth: u32,

    /// Item table size in bits (buckets = 2^bits) for detailed analysis
    #[arg(long, default_value = "12")]
    bits: usize,
}

fn main() {
    let cli = Cli::parse();

    println!("=== Binary Union Tree Stress Test ===\n");

    let depths = [2, 4, 6, 8, 10];

    println!(
        "{:>8} {:>10} {:>10} {:>10} {:>12} {:>12}",
        "Depth", "Sets", "Items", "Root len", "Build (ms)", "Replay (ms)"
    );
    println!("{}", "-".repeat(68));

    for &depth in &depths {
        let mut family = Family::new(cli.bits);
        let leaves = grow_leaves(&mut family, depth);

        let start = Instant::now();
        let root = union_up(&mut family, leaves.clone());
        let build = start.elapsed();

        let sets_after_build = family.num_sets();

        let start = Instant::now();
        let replayed = union_up(&mut family, leaves);
        let replay = start.elapsed();

        assert_eq!(replayed, root, "memoized replay diverged at depth {}", depth);
        assert_eq!(family.num_sets(), sets_after_build, "replay allocated sets at depth {}", depth);

        println!(
            "{:>8} {:>10} {:>10} {:>10} {:>12.2} {:>12.2}",
            depth,
            family.num_sets(),
            family.num_items(),
            family.len(root),
            build.as_secs_f64() * 1000.0,
            replay.as_secs_f64() * 1000.0,
        );
    }

    println!("\n{}", "=".repeat(68));

    // Detailed analysis for the specified depth
    println!("\nDetailed Analysis (depth={})\n", cli.depth);

    let num_leaves = 1usize << cli.depth;
    let mut family = Family::new(cli.bits);
    let leaves = grow_leaves(&mut family, cli.depth);
    let first_leaf = leaves[0];

    let start = Instant::now();
    let root = union_up(&mut family, leaves);
    let elapsed = start.elapsed();

    assert_eq!(family.len(root), num_leaves, "root must hold every leaf value");
    assert_eq!(
        family.num_child_sets(root),
        2 * num_leaves - 2,
        "root must sit above every other set"
    );

    println!("  Sets:          {}", family.num_sets());
    println!("  Items:         {}", family.num_items());
    println!("  Root:          {} (len={})", root, family.len(root));
    println!("  Root children: {}", family.num_child_sets(root));
    println!("  Leaf parents:  {}", family.num_parent_sets(first_leaf));
    println!("  Time:          {:.2} ms", elapsed.as_secs_f64() * 1000.0);

    let failures = family.verify_hierarchy();
    assert!(failures.is_empty(), "hierarchy check failed: {:?}", failures);
    println!("  Hierarchy check: ok");
}

/// Create one leaf set per value.
fn grow_leaves(family: &mut Family<u64>, depth: u32) -> Vec<SetRef> {
    (0..1u64 << depth)
        .map(|value| {
            let leaf = family.new_set();
            family.add_item(leaf, value);
            leaf
        })
        .collect()
}

/// Union adjacent pairs level by level until a single root remains.
fn union_up(family: &mut Family<u64>, mut level: Vec<SetRef>) -> SetRef {
    while level.len() > 1 {
        level = level.chunks(2).map(|pair| family.union_with(pair[0], pair[1])).collect();
    }
    level[0]
}
