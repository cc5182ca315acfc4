//! Timing harness for rasclust layouts and schedules.
//!
//! Builds the same land-use grid under row-major, blocked and Morton storage,
//! then times clustering and neighbor scans over each. Every set runs all
//! tests once in a fresh random order so drift in machine state does not
//! favour whichever test runs first.
//!
//! # Usage
//!
//! ```bash
//! # Synthetic 1000x1000 grid with 100 land-use types
//! cargo run --release -p rasclust-bench -- --size 1000 --depth 100
//!
//! # Ten sets of five iterations each, as CSV
//! cargo run --release -p rasclust-bench -- --iter 5 --count 10 --csv
//!
//! # A raw u8 grid stored bottom-up
//! cargo run --release -p rasclust-bench -- --input grid.raw --height 512 --width 768 --bottom-up
//! ```

mod stats;
mod timing;

use std::fs::File;
use std::hint::black_box;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rasclust_core::{
    cluster_dense, synthetic, Blocked, ClusterBuilder, Clusterer, Layout, Morton, Raster,
    RowOrder, DEFAULT_GRANULARITY,
};

use crate::timing::{CsvSink, RunMetadata, TableSink, TimingRecord, TimingSink};

#[derive(Parser, Debug)]
#[command(name = "rasclust-bench")]
#[command(about = "Timing harness for rasclust layouts and schedules")]
struct Args {
    /// Length of a side of the synthetic raster
    #[arg(short, long, default_value_t = 100)]
    size: usize,

    /// Number of land-use types in the synthetic raster
    #[arg(short, long, default_value_t = 100)]
    depth: usize,

    /// Tile side for the blocked layout
    #[arg(short, long, default_value_t = 32)]
    block: usize,

    /// Number of times to run a test during a single timing
    #[arg(short, long, default_value_t = 1)]
    iter: usize,

    /// Number of sets of timings of all tests
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Leaf size for the parallel tests
    #[arg(short, long, default_value_t = DEFAULT_GRANULARITY)]
    granularity: usize,

    /// Dedicated thread pool size (global pool if omitted)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Seed for the test order shuffle
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output results as CSV to stdout
    #[arg(long)]
    csv: bool,

    /// Raw u8 grid to load instead of generating one
    #[arg(long, requires_all = ["height", "width"])]
    input: Option<PathBuf>,

    /// Rows in the raw grid
    #[arg(long)]
    height: Option<usize>,

    /// Columns in the raw grid
    #[arg(long)]
    width: Option<usize>,

    /// The raw grid stores its last row first
    #[arg(long)]
    bottom_up: bool,
}

/// A named closure timed by the harness. Returns a count so the work cannot
/// be optimized away.
struct Subject {
    name: String,
    run: Box<dyn Fn() -> rasclust_core::Result<usize>>,
}

impl Subject {
    fn new(
        name: impl Into<String>,
        run: impl Fn() -> rasclust_core::Result<usize> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    fn time(&self, iterations: usize) -> Result<TimingRecord> {
        let start = Instant::now();
        for _ in 0..iterations {
            black_box((self.run)().with_context(|| format!("test {} failed", self.name))?);
        }
        Ok(TimingRecord {
            iterations,
            elapsed: start.elapsed(),
        })
    }
}

fn load_raster(args: &Args) -> Result<Raster> {
    if let Some(path) = &args.input {
        let (height, width) = args
            .height
            .zip(args.width)
            .context("--input needs --height and --width")?;
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let order = if args.bottom_up {
            RowOrder::BottomUp
        } else {
            RowOrder::TopDown
        };
        let raster = Raster::read_raw(BufReader::new(file), height, width, order)
            .with_context(|| format!("failed to read {}x{} grid from {}", height, width, path.display()))?;
        info!(path = %path.display(), height, width, "loaded raw grid");
        return Ok(raster);
    }

    let depth = u8::try_from(args.depth)
        .ok()
        .filter(|&d| d > 0)
        .with_context(|| format!("--depth must be between 1 and 255, got {}", args.depth))?;
    let raster = synthetic::checkerboard(args.size, args.size, 0..depth)
        .context("failed to build synthetic grid")?;
    info!(size = args.size, depth = args.depth, "generated synthetic grid");
    Ok(raster)
}

/// Tests for one layout: neighbor scan plus serial clustering over arenas
/// addressed by that layout.
fn layout_subjects<L: Layout + 'static>(name: &str, raster: Raster<L>, out: &mut Vec<Subject>) {
    let raster = Rc::new(raster);
    let scan = Rc::clone(&raster);
    out.push(Subject::new(format!("{name}/equal_edges"), move || {
        Ok(scan.count_equal_edges())
    }));
    out.push(Subject::new(format!("{name}/serial"), move || {
        cluster_dense(&*raster).map(|c| c.len())
    }));
}

fn build_subjects(args: &Args, raster: Raster) -> Result<Vec<Subject>> {
    let (height, width) = (raster.height(), raster.width());
    let blocked = raster.relayout(Blocked::new(height, width, args.block)?)?;
    let morton = raster.relayout(Morton::new(height, width)?)?;

    let mut builder = ClusterBuilder::new().granularity(args.granularity);
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }
    let clusterer: Rc<Clusterer> = Rc::new(builder.build().context("invalid cluster config")?);

    let mut subjects = Vec::new();
    let single = Rc::new(raster.clone());
    let uniques = Rc::clone(&single);
    subjects.push(Subject::new("single/unique_values", move || {
        Ok(uniques.unique_values().len())
    }));
    {
        let raster = Rc::clone(&single);
        let clusterer = Rc::clone(&clusterer);
        subjects.push(Subject::new("single/parallel", move || {
            clusterer.run(&*raster).map(|c| c.len())
        }));
    }
    {
        let morton = Rc::new(morton.clone());
        subjects.push(Subject::new("morton/parallel", move || {
            clusterer.run(&*morton).map(|c| c.len())
        }));
    }
    layout_subjects("single", raster, &mut subjects);
    layout_subjects("blocked", blocked, &mut subjects);
    layout_subjects("morton", morton, &mut subjects);
    Ok(subjects)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    ensure!(args.iter > 0, "--iter must be at least 1");

    let raster = load_raster(&args)?;
    let (height, width) = (raster.height(), raster.width());
    let subjects = build_subjects(&args, raster)?;

    // Run all tests, randomizing the order for each set.
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let mut order: Vec<usize> = (0..subjects.len()).collect();
    let mut results: Vec<Vec<TimingRecord>> = vec![Vec::with_capacity(args.count); subjects.len()];
    for set in 0..args.count {
        order.shuffle(&mut rng);
        debug!(set, ?order, "starting set");
        for &which in &order {
            results[which].push(subjects[which].time(args.iter)?);
        }
    }

    let meta = RunMetadata::new(height, width, args.threads)
        .with("depth", args.depth)
        .with("block", args.block)
        .with("granularity", args.granularity)
        .with("iterations", args.iter)
        .with("sets", args.count)
        .with("seed", args.seed);
    let stdout = io::stdout().lock();
    let mut sink: Box<dyn TimingSink> = if args.csv {
        Box::new(CsvSink::new(stdout))
    } else {
        Box::new(TableSink::new(stdout))
    };

    sink.begin(&meta)?;
    for (subject, records) in subjects.iter().zip(&results) {
        sink.record(&subject.name, records)?;
    }
    sink.finish()?;
    Ok(())
}
