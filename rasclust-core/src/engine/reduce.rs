//! Fork-join reduction: split, cluster leaves, join siblings bottom-up.

use crate::disjoint_set::{CoordMap, DisjointSet};
use crate::domain::{Basis, Bounds, Coord, EdgeKind, SharedEdge};
use crate::error::Result;

use super::observer::{JoinReport, Observer};
use super::serial;
use super::{Reconcile, Schedule};

/// Lifecycle of a [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskState {
    /// Created for a non-divisible basis, pass not yet run.
    Leaf,
    /// Absorbing a sibling.
    Joining,
    /// Holds a complete disjoint set for its bounds.
    Done,
}

/// Accumulated result for one subtree of the split.
#[derive(Debug)]
pub(crate) struct Task<P, R> {
    pub(crate) bounds: Bounds,
    pub(crate) dset: DisjointSet<P, R>,
    /// Every leaf folded into this task so far.
    pub(crate) seen: Vec<Bounds>,
    state: TaskState,
}

/// Read-only inputs shared by every task of one reduction.
pub(crate) struct Context<'a, F, O> {
    pub(crate) equal: &'a F,
    pub(crate) observer: &'a O,
    pub(crate) reconcile: Reconcile,
    pub(crate) schedule: Schedule,
}

/// Reduces `basis` to a single task covering its current bounds.
pub(crate) fn reduce<P, R, F, O>(basis: Basis, ctx: &Context<'_, F, O>) -> Result<Task<P, R>>
where
    P: CoordMap<Coord> + Default + Send,
    R: CoordMap<u32> + Default + Send,
    F: Fn(Coord, Coord) -> bool + Sync,
    O: Observer,
{
    let Some((lo, hi)) = basis.split() else {
        return leaf(basis, ctx);
    };
    ctx.observer
        .on_split(basis.current(), lo.current(), hi.current());

    let (left, right) = match ctx.schedule {
        Schedule::Parallel => rayon::join(|| reduce(lo, ctx), || reduce(hi, ctx)),
        Schedule::Sequential => (reduce(lo, ctx), reduce(hi, ctx)),
    };
    let mut left = left?;
    left.join(right?, ctx)?;
    Ok(left)
}

fn leaf<P, R, F, O>(basis: Basis, ctx: &Context<'_, F, O>) -> Result<Task<P, R>>
where
    P: CoordMap<Coord> + Default,
    R: CoordMap<u32> + Default,
    F: Fn(Coord, Coord) -> bool,
    O: Observer,
{
    let bounds = basis.current();
    let mut task = Task {
        bounds,
        dset: DisjointSet::with_maps(P::default(), R::default()),
        seen: vec![bounds],
        state: TaskState::Leaf,
    };
    let stats = serial::run(&basis, ctx.equal, &mut task.dset)?;
    task.state = TaskState::Done;
    ctx.observer.on_leaf(bounds, &stats);
    Ok(task)
}

impl<P, R> Task<P, R>
where
    P: CoordMap<Coord>,
    R: CoordMap<u32>,
{
    /// Absorbs a finished sibling and unions matching pairs across every
    /// newly adjacent pair of seen regions.
    fn join<F, O>(&mut self, other: Task<P, R>, ctx: &Context<'_, F, O>) -> Result<()>
    where
        F: Fn(Coord, Coord) -> bool,
        O: Observer,
    {
        debug_assert_eq!(self.state, TaskState::Done);
        debug_assert_eq!(other.state, TaskState::Done);
        self.state = TaskState::Joining;

        let Task {
            bounds: other_bounds,
            dset: other_dset,
            seen: other_seen,
            ..
        } = other;
        self.dset.merge_maps(other_dset)?;

        let edges = match (ctx.reconcile, self.bounds.shared_edge(&other_bounds)) {
            (Reconcile::Frontier, Some(split)) => frontier_edges(&self.seen, &other_seen, split),
            _ => exhaustive_edges(&self.seen, &other_seen),
        };

        let mut pairs = 0;
        let mut unions = 0;
        for edge in &edges {
            for (a, b) in edge.pairs() {
                pairs += 1;
                if (ctx.equal)(a, b) && self.dset.union(a, b)? {
                    unions += 1;
                }
            }
        }

        let report = JoinReport {
            bounds: self.bounds.hull(&other_bounds),
            regions_left: self.seen.len(),
            regions_right: other_seen.len(),
            edges: edges.len(),
            pairs,
            unions,
        };
        self.seen.extend(other_seen);
        self.bounds = report.bounds;
        self.state = TaskState::Done;
        ctx.observer.on_join(&report);
        Ok(())
    }
}

/// Every adjacent pair between the two seen lists.
pub(crate) fn exhaustive_edges(left: &[Bounds], right: &[Bounds]) -> Vec<SharedEdge> {
    right
        .iter()
        .flat_map(|r| left.iter().filter_map(move |s| s.shared_edge(r)))
        .collect()
}

/// Adjacent pairs restricted to regions touching the sibling split line.
///
/// `left` belongs to the upper/left sibling. Regions of one sibling can only
/// meet regions of the other on the line separating them, and along that line
/// each side's regions tile it without overlap. Sorting both sides by span lets a two-pointer sweep find every
/// overlapping pair, the same set [`exhaustive_edges`] finds.
pub(crate) fn frontier_edges(left: &[Bounds], right: &[Bounds], split: SharedEdge) -> Vec<SharedEdge> {
    let line = split.line;
    let (mut near, mut far): (Vec<&Bounds>, Vec<&Bounds>) = match split.kind {
        EdgeKind::Vertical => (
            left.iter().filter(|s| s.cols().end == line).collect(),
            right.iter().filter(|r| r.cols().start == line).collect(),
        ),
        EdgeKind::Horizontal => (
            left.iter().filter(|s| s.rows().end == line).collect(),
            right.iter().filter(|r| r.rows().start == line).collect(),
        ),
    };
    let span = |b: &Bounds| match split.kind {
        EdgeKind::Vertical => b.rows(),
        EdgeKind::Horizontal => b.cols(),
    };
    near.sort_unstable_by_key(|b| span(b).start);
    far.sort_unstable_by_key(|b| span(b).start);

    let mut edges = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < near.len() && j < far.len() {
        if let Some(edge) = near[i].shared_edge(far[j]) {
            edges.push(edge);
        }
        let (a_end, b_end) = (span(near[i]).end, span(far[j]).end);
        if a_end <= b_end {
            i += 1;
        }
        if b_end <= a_end {
            j += 1;
        }
    }
    edges
}
