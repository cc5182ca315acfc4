//! Per-test summaries of timing records.

use std::time::Duration;

use crate::timing::TimingRecord;

/// Call-time summary of one test across all of its sets.
///
/// Each set contributes its mean call time once; percentiles are taken over
/// those set means by nearest rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Calls made across every set.
    pub calls: usize,
    /// Total elapsed time divided by `calls`.
    pub mean: Duration,
    pub median: Duration,
    pub p95: Duration,
    pub max: Duration,
}

impl Summary {
    pub fn from_records(records: &[TimingRecord]) -> Self {
        let mut per_call: Vec<Duration> =
            records.iter().map(TimingRecord::per_iteration).collect();
        let Some(&max) = per_call.iter().max() else {
            return Self::default();
        };
        per_call.sort_unstable();

        let total = TimingRecord {
            iterations: records.iter().map(|r| r.iterations).sum(),
            elapsed: records.iter().map(|r| r.elapsed).sum(),
        };
        Self {
            calls: total.iterations,
            mean: total.per_iteration(),
            median: nearest_rank(&per_call, 50),
            p95: nearest_rank(&per_call, 95),
            max,
        }
    }

    /// Median call time spread over `cells`, in nanoseconds.
    pub fn ns_per_cell(&self, cells: usize) -> f64 {
        if cells == 0 {
            return 0.0;
        }
        self.median.as_nanos() as f64 / cells as f64
    }
}

/// Smallest value with at least `percent`% of `sorted` at or below it.
fn nearest_rank(sorted: &[Duration], percent: usize) -> Duration {
    let rank = (percent * sorted.len()).div_ceil(100).clamp(1, sorted.len());
    sorted[rank - 1]
}

/// Decimal digits of `n` in groups of three: `1234567` becomes `1,234,567`.
pub fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
