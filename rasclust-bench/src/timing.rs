//! Timing records and the sinks that persist them.
//!
//! A run produces, per named test, one [`TimingRecord`] per set. Sinks see
//! the [`RunMetadata`] first, then each test's records, then `finish`.

use std::io::{self, Write};
use std::time::Duration;

use crate::stats::{group_digits, Summary};

/// One timed set: `iterations` back-to-back calls took `elapsed` in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRecord {
    pub iterations: usize,
    pub elapsed: Duration,
}

impl TimingRecord {
    /// Mean time per call.
    pub fn per_iteration(&self) -> Duration {
        match u32::try_from(self.iterations) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.elapsed / n,
            Err(_) => Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.iterations as f64),
        }
    }
}

/// Provenance stored alongside the timings.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    pub version: &'static str,
    /// Dedicated pool size, or `None` for the global pool.
    pub threads: Option<usize>,
    pub height: usize,
    pub width: usize,
    pub extra: Vec<(String, String)>,
}

impl RunMetadata {
    pub fn new(height: usize, width: usize, threads: Option<usize>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            threads,
            height,
            width,
            extra: Vec::new(),
        }
    }

    /// Adds a free-form key/value pair.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push((key.into(), value.to_string()));
        self
    }

    fn pairs(&self) -> Vec<(String, String)> {
        let threads = self
            .threads
            .map_or_else(|| "global".to_string(), |t| t.to_string());
        let mut pairs = vec![
            ("version".to_string(), self.version.to_string()),
            ("threads".to_string(), threads),
            ("height".to_string(), self.height.to_string()),
            ("width".to_string(), self.width.to_string()),
        ];
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

/// Destination for timing results.
pub trait TimingSink {
    fn begin(&mut self, meta: &RunMetadata) -> io::Result<()>;

    fn record(&mut self, test: &str, records: &[TimingRecord]) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// CSV rows `test,set,iterations,elapsed_ns`, preceded by `# key=value`
/// metadata comments.
pub struct CsvSink<W: Write> {
    out: W,
}

pub const CSV_HEADER: &str = "test,set,iterations,elapsed_ns";

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TimingSink for CsvSink<W> {
    fn begin(&mut self, meta: &RunMetadata) -> io::Result<()> {
        for (key, value) in meta.pairs() {
            writeln!(self.out, "# {key}={value}")?;
        }
        writeln!(self.out, "{CSV_HEADER}")
    }

    fn record(&mut self, test: &str, records: &[TimingRecord]) -> io::Result<()> {
        for (set, r) in records.iter().enumerate() {
            writeln!(
                self.out,
                "{},{},{},{}",
                test,
                set,
                r.iterations,
                r.elapsed.as_nanos()
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Aligned per-test latency table, written on `finish`.
///
/// Besides call times it reports the median cost per grid cell, so runs on
/// different grid sizes can be compared.
pub struct TableSink<W: Write> {
    out: W,
    cells: usize,
    rows: Vec<(String, Summary)>,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: 0,
            rows: Vec::new(),
        }
    }
}

fn micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1e6
}

impl<W: Write> TimingSink for TableSink<W> {
    fn begin(&mut self, meta: &RunMetadata) -> io::Result<()> {
        self.cells = meta.height * meta.width;
        writeln!(
            self.out,
            "rasclust {} - {}x{} grid ({} cells)",
            meta.version,
            meta.height,
            meta.width,
            group_digits(self.cells)
        )?;
        for (key, value) in meta.pairs().into_iter().skip(1) {
            writeln!(self.out, "  {key:<12} {value}")?;
        }
        writeln!(self.out)
    }

    fn record(&mut self, test: &str, records: &[TimingRecord]) -> io::Result<()> {
        self.rows
            .push((test.to_string(), Summary::from_records(records)));
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        let header = format!(
            "{:<24} {:>10} {:>12} {:>12} {:>12} {:>12} {:>10}",
            "test", "calls", "mean_us", "p50_us", "p95_us", "max_us", "ns/cell"
        );
        writeln!(self.out, "{header}")?;
        writeln!(self.out, "{}", "-".repeat(header.len()))?;
        for (name, s) in &self.rows {
            writeln!(
                self.out,
                "{:<24} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>10.2}",
                name,
                group_digits(s.calls),
                micros(s.mean),
                micros(s.median),
                micros(s.p95),
                micros(s.max),
                s.ns_per_cell(self.cells)
            )?;
        }
        self.out.flush()
    }
}
