//! Intelligent-scissors tracing: segments are minimum-cost paths along
//! image edges, computed by the boundary search engine.
//!
//! Committing an anchor starts a background full-tree search from it; the
//! model sits in `Processing` until the tree is solved, then the live wire
//! to any cursor position is a constant-time lookup. The worker thread
//! never touches the model's lists - its outcome enters the model only
//! through `poll_search`/`wait_search` on the caller's thread, and its
//! progress is republished through the model's notifier.

use std::sync::Arc;

use snipkit_core::{
    ModelEvent, Point, PolyLine, Result, SearchError, SelectionError, SelectionState,
};
use snipkit_scissors::{BoundaryEngine, PathTree, SearchHandle, SearchOutcome, SearchSnapshot};

use crate::model::Core;

/// A searched path to the anchor itself is a single point; widen it so
/// every committed segment carries at least two points like the other
/// strategies' segments do.
fn as_segment(path: PolyLine) -> PolyLine {
    if path.len() >= 2 {
        path
    } else {
        PolyLine::line(path.start(), path.start())
    }
}

pub(crate) struct ScissorsTracer {
    engine: Option<BoundaryEngine>,
    handle: Option<SearchHandle>,
    tree: Option<PathTree>,
}

impl ScissorsTracer {
    pub(crate) fn new() -> Self {
        Self {
            engine: None,
            handle: None,
            tree: None,
        }
    }

    /// The engine for the model's current image, deriving the cost field
    /// on first use.
    fn ensure_engine(&mut self, core: &Core) -> Result<&BoundaryEngine> {
        if self.engine.is_none() {
            let image = core.image.as_ref().ok_or(SelectionError::NoImage)?;
            self.engine = Some(BoundaryEngine::new(image.as_ref()));
        }
        Ok(self.engine.as_ref().expect("engine just ensured"))
    }

    /// Starts a background search from `anchor` and enters `Processing`.
    fn spawn_from(&mut self, core: &mut Core, anchor: Point) -> Result<()> {
        let engine = self.ensure_engine(core)?;
        let notifier = Arc::clone(&core.notifier);
        let handle = engine.spawn_search(
            anchor,
            Some(Arc::new(move |percent| {
                notifier.publish(&ModelEvent::Progress { percent });
            })),
        )?;
        self.handle = Some(handle);
        self.tree = None;
        core.set_state(SelectionState::Processing);
        Ok(())
    }

    /// Applies a terminal search outcome on the caller's thread.
    fn apply_outcome(&mut self, core: &mut Core, outcome: SearchOutcome) {
        self.handle = None;
        match outcome {
            SearchOutcome::Completed(tree) => {
                self.tree = Some(tree);
            }
            SearchOutcome::Cancelled => {
                self.tree = None;
            }
        }
        core.set_state(SelectionState::Selecting);
    }

    /// The solved path tree, or the not-solved error while one is pending.
    fn tree(&self) -> Result<&PathTree> {
        self.tree.as_ref().ok_or_else(|| SearchError::NotSolved.into())
    }

    pub(crate) fn start(&mut self, core: &mut Core, p: Point) -> Result<()> {
        // Validate the spawn before recording the anchor so a rejected
        // start leaves the model untouched.
        self.spawn_from(core, p)?;
        core.control_points.push(p);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn append(&mut self, core: &mut Core, p: Point) -> Result<()> {
        let path = as_segment(self.tree()?.path_to(p)?);
        self.spawn_from(core, p)?;
        core.segments.push(path);
        core.control_points.push(p);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn live_wire(&self, _core: &Core, p: Point) -> Result<PolyLine> {
        Ok(as_segment(self.tree()?.path_to(p)?))
    }

    pub(crate) fn undo(&mut self, core: &mut Core) -> Result<()> {
        if core.state.is_processing() {
            // Undo during a search is cancellation.
            return self.cancel_processing(core);
        }

        if core.segments.is_empty() {
            // Only the starting anchor remains.
            self.abandon_search();
            core.control_points.clear();
            core.set_state(SelectionState::NoSelection);
            core.notify_selection();
            return Ok(());
        }

        if core.state.is_finished() {
            // Drop the closing path and resume searching from the last
            // anchor so the live wire works again. Spawn first: a rejected
            // spawn must leave the boundary untouched.
            let last = core.last_point().ok_or(SelectionError::NoStartingPoint)?;
            self.spawn_from(core, last)?;
            core.segments.pop();
            core.notify_selection();
            return Ok(());
        }

        // The anchor to resume from once the newest point is dropped.
        let anchor = core.control_points[core.control_points.len() - 2];
        self.spawn_from(core, anchor)?;
        core.segments.pop();
        core.control_points.pop();
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn finish(&mut self, core: &mut Core) -> Result<()> {
        let first = core.control_points[0];
        let path = as_segment(self.tree()?.path_to(first)?);
        core.segments.push(path);
        self.abandon_search();
        core.set_state(SelectionState::Selected);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn move_point(&mut self, core: &mut Core, index: usize, p: Point) -> Result<()> {
        // Re-route the two adjacent paths synchronously; a finished
        // boundary has no background search to stay consistent with.
        let n = core.segments.len();
        let cps_len = core.control_points.len();
        let prev = core.control_points[(index + cps_len - 1) % cps_len];
        let next = core.control_points[(index + 1) % cps_len];

        let engine = self.ensure_engine(core)?;
        let incoming_path = as_segment(engine.find_path(prev, p)?);
        let outgoing_path = as_segment(engine.find_path(p, next)?);

        let incoming = if index == 0 { n - 1 } else { index - 1 };
        core.control_points[index] = p;
        core.segments[incoming] = incoming_path;
        core.segments[index] = outgoing_path;
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn cancel_processing(&mut self, core: &mut Core) -> Result<()> {
        let handle = self.handle.take().ok_or(SelectionError::InvalidState {
            op: "cancel processing",
            state: core.state,
        })?;
        // Completion may win the race; either terminal outcome is fine and
        // neither commits a segment.
        let outcome = handle.cancel_and_wait();
        self.apply_outcome(core, outcome);
        Ok(())
    }

    pub(crate) fn poll_search(&mut self, core: &mut Core) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            return false;
        };
        match handle.try_outcome() {
            Some(outcome) => {
                self.apply_outcome(core, outcome);
                true
            }
            None => false,
        }
    }

    pub(crate) fn wait_search(&mut self, core: &mut Core) {
        if let Some(handle) = self.handle.take() {
            let outcome = handle.wait();
            self.apply_outcome(core, outcome);
        }
    }

    pub(crate) fn progress(&self) -> Option<u8> {
        self.handle.as_ref().map(|h| h.progress())
    }

    pub(crate) fn snapshot(&self) -> Option<Arc<SearchSnapshot>> {
        self.handle.as_ref().map(|h| h.snapshot())
    }

    /// Cancels any in-flight search and forgets the solved tree. The
    /// engine (and its cost field) survives; it belongs to the image.
    pub(crate) fn abandon_search(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.cancel_and_wait();
        }
        self.tree = None;
    }

    /// Drops everything derived from the old image.
    pub(crate) fn drop_engine(&mut self) {
        self.abandon_search();
        self.engine = None;
    }
}
