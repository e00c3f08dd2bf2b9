//! Background search runner.
//!
//! A search runs on its own worker thread: the caller keeps a
//! [`SearchHandle`] to observe progress, cancel cooperatively, and collect
//! the outcome without ever blocking on the expansion itself. The engine
//! owns the cost field, so restarting from a new anchor never re-derives
//! it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use snipkit_core::{ImageSource, Point, PolyLine, SearchError};

use crate::cost::CostField;
use crate::search::{self, PathTree, RunOutcome, RunParams};
use crate::snapshot::SearchSnapshot;

/// Progress observer invoked from the worker thread on each whole-percent
/// increase.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Terminal outcome of one background search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The search settled every reachable node.
    Completed(PathTree),
    /// The cancellation flag was raised before completion.
    Cancelled,
}

/// The boundary search engine for one image.
#[derive(Debug, Clone)]
pub struct BoundaryEngine {
    field: Arc<CostField>,
}

impl BoundaryEngine {
    /// Derives the cost field for `image` and builds an engine over it.
    pub fn new(image: &dyn ImageSource) -> Self {
        Self {
            field: Arc::new(CostField::from_image(image)),
        }
    }

    /// Builds an engine over an existing field.
    pub fn from_field(field: Arc<CostField>) -> Self {
        Self { field }
    }

    /// The shared cost field.
    pub fn cost_field(&self) -> &Arc<CostField> {
        &self.field
    }

    /// Synchronous minimum-cost path between two points (early exit once
    /// the target settles). Used for segment re-routing during edits.
    pub fn find_path(&self, anchor: Point, target: Point) -> Result<PolyLine, SearchError> {
        search::find_path(&self.field, anchor, target)
    }

    /// Starts a background full-tree search from `anchor`.
    ///
    /// Fails immediately if `anchor` is outside the image; otherwise the
    /// worker settles every reachable node, reporting progress through
    /// `progress` when supplied.
    pub fn spawn_search(
        &self,
        anchor: Point,
        progress: Option<ProgressFn>,
    ) -> Result<SearchHandle, SearchError> {
        let anchor_node = self.field.node(anchor).ok_or(SearchError::OutOfBounds {
            point: anchor,
            width: self.field.width(),
            height: self.field.height(),
        })?;

        let field = Arc::clone(&self.field);
        let snapshot = Arc::new(SearchSnapshot::new(field.width(), field.height()));
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let worker_snapshot = Arc::clone(&snapshot);
        let worker_cancel = Arc::clone(&cancel);
        let join = std::thread::spawn(move || {
            tracing::debug!(?anchor, "boundary search started");
            let outcome = search::run(
                &field,
                RunParams {
                    anchor: anchor_node,
                    target: None,
                    snapshot: Some(&worker_snapshot),
                    cancel: Some(&worker_cancel),
                    on_progress: progress.as_deref(),
                },
            );
            let outcome = match outcome {
                RunOutcome::Completed { pred, dist } => {
                    tracing::debug!(?anchor, "boundary search completed");
                    SearchOutcome::Completed(PathTree::new(anchor, field, pred, dist))
                }
                RunOutcome::Cancelled => {
                    tracing::debug!(?anchor, "boundary search cancelled");
                    SearchOutcome::Cancelled
                }
            };
            // The receiver may already be gone if the handle was dropped.
            let _ = tx.send(outcome);
        });

        Ok(SearchHandle {
            anchor,
            snapshot,
            cancel,
            rx,
            join: Some(join),
        })
    }
}

/// Caller-side handle to a running background search.
pub struct SearchHandle {
    anchor: Point,
    snapshot: Arc<SearchSnapshot>,
    cancel: Arc<AtomicBool>,
    rx: mpsc::Receiver<SearchOutcome>,
    join: Option<JoinHandle<()>>,
}

impl SearchHandle {
    /// The anchor this search expands from.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The live settled/frontier snapshot.
    pub fn snapshot(&self) -> Arc<SearchSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Current completion percentage.
    pub fn progress(&self) -> u8 {
        self.snapshot.percent_done()
    }

    /// Raises the cancellation flag. Safe at any time; the worker observes
    /// it within one settled node.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Non-blocking poll for the outcome.
    pub fn try_outcome(&mut self) -> Option<SearchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::warn!("search worker vanished without an outcome");
                self.join();
                Some(SearchOutcome::Cancelled)
            }
        }
    }

    /// Blocks until the search completes or acknowledges cancellation.
    pub fn wait(mut self) -> SearchOutcome {
        let outcome = match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("search worker vanished without an outcome");
                SearchOutcome::Cancelled
            }
        };
        self.join();
        outcome
    }

    /// Cancels and waits for the worker to stop.
    pub fn cancel_and_wait(self) -> SearchOutcome {
        self.cancel();
        self.wait()
    }

    fn join(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        // Never leave a detached worker burning CPU.
        self.cancel();
        self.join();
    }
}

impl std::fmt::Debug for SearchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHandle")
            .field("anchor", &self.anchor)
            .field("progress", &self.progress())
            .finish()
    }
}
