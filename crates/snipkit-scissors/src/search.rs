//! Priority-first shortest-path expansion.
//!
//! Classic Dijkstra over the pixel graph: settle the cheapest frontier
//! node, relax its neighbors, record predecessor links. Heap entries carry
//! an insertion sequence number so cost ties break by insertion order and
//! two runs over the same inputs produce identical paths.
//!
//! The same expansion drives two modes:
//! - the background full-tree search (every reachable node settled, so the
//!   live wire to *any* target is a snapshot lookup afterwards), and
//! - a synchronous point-to-point search that exits early once the target
//!   settles (used for re-routing segments during edits).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;

use snipkit_core::{Point, PolyLine, SearchError};

use crate::cost::CostField;
use crate::snapshot::SearchSnapshot;

const NO_PRED: u32 = u32::MAX;
const UNREACHED: u64 = u64::MAX;

/// A min-heap entry: tentative cost, then insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    cost: u64,
    seq: u64,
    node: u32,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the cheapest first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Internal terminal result of one expansion run.
pub(crate) enum RunOutcome {
    /// Expansion ran to its natural end (all nodes, or the target, settled).
    Completed { pred: Vec<u32>, dist: Vec<u64> },
    /// The cancellation flag was observed.
    Cancelled,
}

/// Expansion parameters. `target` enables early exit; `snapshot`, `cancel`
/// and `on_progress` are only used by the background mode.
pub(crate) struct RunParams<'a> {
    pub anchor: u32,
    pub target: Option<u32>,
    pub snapshot: Option<&'a SearchSnapshot>,
    pub cancel: Option<&'a AtomicBool>,
    pub on_progress: Option<&'a (dyn Fn(u8) + Send + Sync)>,
}

pub(crate) fn run(field: &CostField, params: RunParams<'_>) -> RunOutcome {
    let n = field.node_count();
    let mut dist = vec![UNREACHED; n];
    let mut pred = vec![NO_PRED; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    let mut settled_count = 0usize;
    let mut last_percent = 0u8;

    dist[params.anchor as usize] = 0;
    heap.push(HeapEntry {
        cost: 0,
        seq,
        node: params.anchor,
    });
    if let Some(snap) = params.snapshot {
        snap.mark_frontier(params.anchor);
    }

    while let Some(entry) = heap.pop() {
        let node = entry.node;
        if settled[node as usize] {
            // Stale heap entry; the node settled at a lower cost already.
            continue;
        }
        settled[node as usize] = true;
        settled_count += 1;
        if let Some(snap) = params.snapshot {
            snap.mark_settled(node);
        }

        // Cooperative cancellation, polled once per settled node so the
        // cancellation latency stays bounded regardless of image size.
        if let Some(cancel) = params.cancel {
            if cancel.load(atomic::Ordering::Acquire) {
                return RunOutcome::Cancelled;
            }
        }

        if let Some(cb) = params.on_progress {
            let percent = ((settled_count * 100) / n) as u8;
            if percent > last_percent {
                last_percent = percent;
                cb(percent);
            }
        }

        if params.target == Some(node) {
            break;
        }

        let base = dist[node as usize];
        for next in field.neighbors(node) {
            if settled[next as usize] {
                continue;
            }
            let candidate = base + field.edge_cost(node, next);
            if candidate < dist[next as usize] {
                dist[next as usize] = candidate;
                pred[next as usize] = node;
                seq += 1;
                heap.push(HeapEntry {
                    cost: candidate,
                    seq,
                    node: next,
                });
                if let Some(snap) = params.snapshot {
                    snap.mark_frontier(next);
                }
            }
        }
    }

    RunOutcome::Completed { pred, dist }
}

/// The completed result of a full-tree search: minimum-cost paths from one
/// anchor to every reachable image point.
#[derive(Debug, Clone)]
pub struct PathTree {
    anchor: Point,
    field: Arc<CostField>,
    pred: Vec<u32>,
    dist: Vec<u64>,
}

impl PathTree {
    pub(crate) fn new(anchor: Point, field: Arc<CostField>, pred: Vec<u32>, dist: Vec<u64>) -> Self {
        Self {
            anchor,
            field,
            pred,
            dist,
        }
    }

    /// The point all paths start from.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The minimum path cost to `target`, if it was reached.
    pub fn cost_to(&self, target: Point) -> Option<u64> {
        let node = self.field.node(target)?;
        let d = self.dist[node as usize];
        (d != UNREACHED).then_some(d)
    }

    /// Reconstructs the minimum-cost path from the anchor to `target`.
    pub fn path_to(&self, target: Point) -> Result<PolyLine, SearchError> {
        let node = self.field.node(target).ok_or(SearchError::OutOfBounds {
            point: target,
            width: self.field.width(),
            height: self.field.height(),
        })?;
        if self.dist[node as usize] == UNREACHED {
            return Err(SearchError::NoPath {
                from: self.anchor,
                to: target,
            });
        }

        let mut points = Vec::new();
        let mut cur = node;
        loop {
            points.push(self.field.point(cur));
            let prev = self.pred[cur as usize];
            if prev == NO_PRED {
                break;
            }
            cur = prev;
        }
        points.reverse();
        PolyLine::new(points).map_err(|_| SearchError::NoPath {
            from: self.anchor,
            to: target,
        })
    }
}

/// Synchronous minimum-cost path between two points, exiting as soon as the
/// target settles.
pub fn find_path(
    field: &Arc<CostField>,
    anchor: Point,
    target: Point,
) -> Result<PolyLine, SearchError> {
    let oob = |point: Point| SearchError::OutOfBounds {
        point,
        width: field.width(),
        height: field.height(),
    };
    let a = field.node(anchor).ok_or_else(|| oob(anchor))?;
    let t = field.node(target).ok_or_else(|| oob(target))?;

    let outcome = run(
        field,
        RunParams {
            anchor: a,
            target: Some(t),
            snapshot: None,
            cancel: None,
            on_progress: None,
        },
    );
    match outcome {
        RunOutcome::Completed { pred, dist } => {
            PathTree::new(anchor, Arc::clone(field), pred, dist).path_to(target)
        }
        // No cancellation flag was supplied.
        RunOutcome::Cancelled => unreachable!("synchronous search cannot be cancelled"),
    }
}
