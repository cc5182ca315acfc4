//! # Tutorial: Clustering a Small Land-Use Map
//!
//! This example walks through clustering a 6×8 land-use raster, where each
//! cell holds a category code (water, forest, field, town).
//!
//! ## What You'll Learn
//!
//! 1. **Rasters**: How a grid of category codes is wrapped for clustering
//! 2. **Granularity**: How the grid is cut into leaves that run in parallel
//! 3. **Joins**: How regions split across leaves are stitched back together
//! 4. **Results**: How to read clusters back out
//!
//! ## The Picture
//!
//! Two cells belong to the same cluster when they hold the same code and are
//! connected through a chain of north/south/east/west neighbors with that
//! code. Diagonal contact does not count.
//!
//! With a granularity of 2, the grid is split down to 2×2 leaves. Each leaf
//! finds its local clusters; the river below crosses many leaves, so it is
//! only recognised as one cluster after the joins along leaf boundaries.
//!
//! ## Running This Example
//!
//! ```bash
//! cargo run --example tutorial_landuse
//! ```

use rasclust_core::{ClusterBuilder, CountingObserver, Raster};

// =============================================================================
// CONFIGURATION
// =============================================================================

const HEIGHT: usize = 6;
const WIDTH: usize = 8;

/// Leaves stop splitting once their longer side is at most this many cells.
const GRANULARITY: usize = 2;

const WATER: u8 = 0;
const FOREST: u8 = 1;
const FIELD: u8 = 2;
const TOWN: u8 = 3;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn symbol(code: u8) -> char {
    match code {
        WATER => '~',
        FOREST => '^',
        FIELD => '.',
        TOWN => '#',
        _ => '?',
    }
}

fn print_map(values: &[u8]) {
    for row in values.chunks(WIDTH) {
        let line: String = row.iter().map(|&v| symbol(v)).collect();
        println!("    {line}");
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> Result<(), rasclust_core::Error> {
    #[rustfmt::skip]
    let values = vec![
        WATER,  FOREST, FOREST, FIELD,  FIELD,  FIELD,  TOWN,   TOWN,
        WATER,  WATER,  FOREST, FIELD,  FOREST, FIELD,  TOWN,   TOWN,
        FOREST, WATER,  WATER,  WATER,  FOREST, FIELD,  FIELD,  FIELD,
        FOREST, FOREST, FOREST, WATER,  FOREST, FOREST, FIELD,  TOWN,
        FIELD,  FIELD,  FOREST, WATER,  WATER,  WATER,  WATER,  WATER,
        FIELD,  TOWN,   FOREST, FOREST, FOREST, FOREST, FOREST, FOREST,
    ];

    println!("Land-use map ({HEIGHT}x{WIDTH}):");
    print_map(&values);

    // -------------------------------------------------------------------------
    // Step 1: wrap the buffer
    // -------------------------------------------------------------------------
    let raster = Raster::from_row_major(values, HEIGHT, WIDTH)?;
    println!("\nCategories present: {:?}", raster.unique_values());
    println!("Equal neighbor pairs: {}", raster.count_equal_edges());

    // -------------------------------------------------------------------------
    // Step 2: cluster with a counting observer attached
    // -------------------------------------------------------------------------
    let clusterer = ClusterBuilder::new()
        .granularity(GRANULARITY)
        .observer(CountingObserver::new())
        .build()?;
    let clusters = clusterer.run(&raster)?;

    let counts = clusterer.observer().counts();
    println!("\nReduction:");
    println!("    leaves:         {}", counts.leaves);
    println!("    joins:          {}", counts.joins);
    println!("    boundary pairs: {}", counts.boundary_pairs);
    println!("    unions:         {}", counts.unions);

    // -------------------------------------------------------------------------
    // Step 3: read the clusters
    // -------------------------------------------------------------------------
    println!("\n{} clusters:", clusters.len());
    for cluster in clusters.iter() {
        let code = raster.value(cluster.representative);
        println!(
            "    {} x{:<3} rooted at {}",
            symbol(code),
            cluster.len(),
            cluster.representative
        );
    }

    // The river is a single cluster even though no leaf holds all of it.
    let river = clusters
        .iter()
        .filter(|c| raster.value(c.representative) == WATER)
        .max_by_key(|c| c.len());
    if let Some(river) = river {
        println!("\nLargest water body: {} cells", river.len());
    }

    Ok(())
}
