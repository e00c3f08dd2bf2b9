//! Lock-free search progress snapshot.
//!
//! While a search runs, observers may ask "has this pixel been settled or
//! merely discovered?" for progress visualization. The snapshot is written
//! only by the search worker; readers see each per-pixel class through a
//! single atomic load, so a half-updated frontier is never observable.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use snipkit_core::Point;

/// Search classification of one image point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeClass {
    /// Not yet reached by the search.
    Undiscovered = 0,
    /// Reached, but its optimal cost is not final.
    Frontier = 1,
    /// Optimal cost finalized.
    Settled = 2,
}

/// Shared read view into a running (or finished) search.
#[derive(Debug)]
pub struct SearchSnapshot {
    width: u32,
    height: u32,
    classes: Vec<AtomicU8>,
    settled: AtomicUsize,
}

impl SearchSnapshot {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        let mut classes = Vec::with_capacity(len);
        classes.resize_with(len, || AtomicU8::new(NodeClass::Undiscovered as u8));
        Self {
            width,
            height,
            classes,
            settled: AtomicUsize::new(0),
        }
    }

    /// The classification of point `p`. Out-of-bounds points are reported
    /// as undiscovered.
    pub fn class_at(&self, p: Point) -> NodeClass {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.width || p.y as u32 >= self.height {
            return NodeClass::Undiscovered;
        }
        let i = (p.y as u32 * self.width + p.x as u32) as usize;
        match self.classes[i].load(Ordering::Acquire) {
            2 => NodeClass::Settled,
            1 => NodeClass::Frontier,
            _ => NodeClass::Undiscovered,
        }
    }

    /// Number of settled nodes so far.
    pub fn settled_count(&self) -> usize {
        self.settled.load(Ordering::Acquire)
    }

    /// Monotonic completion estimate in `0..=100`: the percentage of image
    /// points settled.
    pub fn percent_done(&self) -> u8 {
        let total = self.classes.len();
        if total == 0 {
            return 100;
        }
        ((self.settled_count() * 100) / total) as u8
    }

    pub(crate) fn mark_frontier(&self, node: u32) {
        // Never demote a settled node; frontier marks only first discovery.
        let _ = self.classes[node as usize].compare_exchange(
            NodeClass::Undiscovered as u8,
            NodeClass::Frontier as u8,
            Ordering::AcqRel,
            Ordering::Relaxed,
        );
    }

    pub(crate) fn mark_settled(&self, node: u32) {
        self.classes[node as usize].store(NodeClass::Settled as u8, Ordering::Release);
        self.settled.fetch_add(1, Ordering::AcqRel);
    }
}
