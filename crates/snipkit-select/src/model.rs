//! The selection model: shared lifecycle driver for every tracing
//! strategy.
//!
//! `SelectionModel` owns the control points, the boundary segments, the
//! lifecycle state, the associated image, and the change notifier. Every
//! operation validates its precondition through the state's capability
//! predicates, then delegates the geometry work to the active
//! [`Tracer`](crate::tracer::Tracer). Operations either fully apply or
//! fully reject; observers are notified after the model is internally
//! consistent.

use std::io::Write;
use std::sync::Arc;

use snipkit_core::{
    ChangeNotifier, Error, ImageSource, ModelEvent, Point, PolyLine, Result, SelectionError,
    SelectionState,
};
use snipkit_scissors::{NodeClass, SearchSnapshot};

use crate::extract;
use crate::tracer::{Tracer, TracerKind};

/// The shared data every strategy hook operates on: the point and segment
/// lists, the lifecycle state, the image, and the notifier.
pub(crate) struct Core {
    pub(crate) control_points: Vec<Point>,
    pub(crate) segments: Vec<PolyLine>,
    pub(crate) state: SelectionState,
    pub(crate) image: Option<Arc<dyn ImageSource>>,
    pub(crate) notifier: Arc<ChangeNotifier>,
}

impl Core {
    fn new() -> Self {
        Self {
            control_points: Vec::new(),
            segments: Vec::new(),
            state: SelectionState::NoSelection,
            image: None,
            notifier: Arc::new(ChangeNotifier::new()),
        }
    }

    /// Transition to `new` and notify observers. No-op when the state is
    /// unchanged, so observers see one event per actual transition.
    pub(crate) fn set_state(&mut self, new: SelectionState) {
        if self.state == new {
            return;
        }
        let old = self.state;
        self.state = new;
        tracing::debug!(?old, ?new, "selection state transition");
        self.notifier.publish(&ModelEvent::State { old, new });
    }

    /// Notify observers that the selection geometry changed.
    pub(crate) fn notify_selection(&self) {
        self.notifier.publish(&ModelEvent::Selection {
            segments: self.segments.clone(),
        });
    }

    pub(crate) fn last_point(&self) -> Option<Point> {
        self.control_points.last().copied()
    }
}

/// A selection-in-progress over one image, driven by one tracing strategy.
///
/// Create one model per tracing session; to switch strategies, use
/// [`SelectionModel::convert_to`], which builds a fresh model rather than
/// mutating this one in place.
pub struct SelectionModel {
    core: Core,
    tracer: Tracer,
}

impl SelectionModel {
    /// Creates an empty model using the given strategy.
    pub fn new(kind: TracerKind) -> Self {
        Self {
            core: Core::new(),
            tracer: Tracer::new(kind),
        }
    }

    /// Creates an empty model with an image attached.
    pub fn with_image(kind: TracerKind, image: Arc<dyn ImageSource>) -> Self {
        let mut model = Self::new(kind);
        model.set_image(image);
        model
    }

    /// The strategy this model traces with.
    pub fn kind(&self) -> TracerKind {
        self.tracer.kind()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SelectionState {
        self.core.state
    }

    /// The user-placed anchor points, in insertion order.
    pub fn control_points(&self) -> &[Point] {
        &self.core.control_points
    }

    /// The boundary segments, in boundary order.
    pub fn segments(&self) -> &[PolyLine] {
        &self.core.segments
    }

    /// The associated image, if any.
    pub fn image(&self) -> Option<&Arc<dyn ImageSource>> {
        self.core.image.as_ref()
    }

    /// The model's change notifier, for subscribing to property events.
    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.core.notifier
    }

    /// Associates a new image with the model.
    ///
    /// Any selection in progress is discarded (its coordinates belong to
    /// the old image). Observers receive an `Image` event.
    pub fn set_image(&mut self, image: Arc<dyn ImageSource>) {
        self.reset();
        self.tracer.on_image_changed();
        let (width, height) = (image.width(), image.height());
        self.core.image = Some(image);
        self.core
            .notifier
            .publish(&ModelEvent::Image { width, height });
    }

    /// Starts a new selection at `p`.
    ///
    /// Valid only from `NoSelection`.
    pub fn start_selection(&mut self, p: Point) -> Result<()> {
        if !self.core.state.is_empty() {
            return Err(SelectionError::InvalidState {
                op: "start a selection",
                state: self.core.state,
            }
            .into());
        }
        self.tracer.start(&mut self.core, p)
    }

    /// Adds `p` as the next control point, extending the boundary the way
    /// the active strategy dictates.
    ///
    /// With no prior point this behaves as [`SelectionModel::start_selection`].
    pub fn add_point(&mut self, p: Point) -> Result<()> {
        if !self.core.state.can_add_point() {
            return Err(SelectionError::InvalidState {
                op: "add a point",
                state: self.core.state,
            }
            .into());
        }
        if self.core.control_points.is_empty() {
            self.tracer.start(&mut self.core, p)
        } else {
            self.tracer.append(&mut self.core, p)
        }
    }

    /// Removes the most recently placed control point (strategy-specific;
    /// during a background search this cancels it instead).
    pub fn undo(&mut self) -> Result<()> {
        if !self.core.state.can_undo() {
            return Err(SelectionError::InvalidState {
                op: "undo",
                state: self.core.state,
            }
            .into());
        }
        self.tracer.undo(&mut self.core)
    }

    /// Closes the boundary and transitions to `Selected`.
    ///
    /// With no segments there is nothing to close; the model resets.
    pub fn finish_selection(&mut self) -> Result<()> {
        if !self.core.state.can_finish() {
            return Err(SelectionError::InvalidState {
                op: "finish the selection",
                state: self.core.state,
            }
            .into());
        }
        if self.core.segments.is_empty() {
            self.reset();
            return Ok(());
        }
        self.tracer.finish(&mut self.core)
    }

    /// Moves control point `index` to `new_pos`, re-routing exactly the
    /// segments whose shape depends on it.
    ///
    /// Valid only when the selection is finished.
    pub fn move_point(&mut self, index: usize, new_pos: Point) -> Result<()> {
        if !self.core.state.can_edit() {
            return Err(SelectionError::InvalidState {
                op: "move a point",
                state: self.core.state,
            }
            .into());
        }
        let len = self.core.control_points.len();
        if index >= len {
            return Err(SelectionError::IndexOutOfRange { index, len }.into());
        }
        self.tracer.move_point(&mut self.core, index, new_pos)
    }

    /// Previews the segment that would be committed if `p` were added
    /// next. Read-only; requires at least one control point.
    pub fn live_wire(&self, p: Point) -> Result<PolyLine> {
        if self.core.control_points.is_empty() {
            return Err(SelectionError::NoStartingPoint.into());
        }
        self.tracer.live_wire(&self.core, p)
    }

    /// The index of the control point within `tolerance` of `p` with the
    /// smallest distance, or `None`.
    pub fn closest_point(&self, p: Point, tolerance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, cp) in self.core.control_points.iter().enumerate() {
            let d = cp.distance_to(&p);
            if d <= tolerance && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Clears the selection entirely. Always valid; calling it twice
    /// leaves the same empty state as once.
    pub fn reset(&mut self) {
        self.tracer.on_reset();
        let had_geometry =
            !self.core.control_points.is_empty() || !self.core.segments.is_empty();
        self.core.control_points.clear();
        self.core.segments.clear();
        self.core.set_state(SelectionState::NoSelection);
        if had_geometry {
            self.core.notify_selection();
        }
    }

    /// Extracts the enclosed region and writes it to `sink` as PNG, with
    /// pixels outside the boundary fully transparent.
    ///
    /// Requires a finished, non-empty selection and an image.
    pub fn save_selection<W: Write>(&self, sink: &mut W) -> Result<()> {
        extract::save_selection(&self.core, sink)
    }

    /// Extracts the enclosed region as an RGBA buffer cropped to the
    /// boundary's bounding box.
    pub fn extract_region(&self) -> Result<image::RgbaImage> {
        extract::extract_region(&self.core).map_err(Error::from)
    }

    /// Builds a fresh model tracing with `kind`, preserving this model's
    /// image, and its selection when the target strategy can represent it
    /// without violating its invariants. Otherwise the new model starts
    /// empty; a boundary is never fabricated.
    ///
    /// An in-flight background search is never carried over.
    pub fn convert_to(&self, kind: TracerKind) -> SelectionModel {
        let mut model = SelectionModel::new(kind);
        model.core.image = self.core.image.clone();

        let cps = self.core.control_points.len();
        let segs = self.core.segments.len();
        let adopted_state = if self.core.state.is_empty() {
            None
        } else if self.core.state.is_finished() && cps == segs && kind.can_adopt(cps, segs, true) {
            Some(SelectionState::Selected)
        } else if !self.core.state.is_finished()
            && cps == segs + 1
            && kind.can_adopt(cps, segs, false)
        {
            // A source still processing contributes its committed points;
            // the pending search result is dropped.
            Some(SelectionState::Selecting)
        } else {
            None
        };

        match adopted_state {
            Some(state) => {
                model.core.control_points = self.core.control_points.clone();
                model.core.segments = self.core.segments.clone();
                model.core.state = state;
            }
            None => {
                if !self.core.state.is_empty() {
                    tracing::warn!(
                        from = ?self.kind(),
                        to = ?kind,
                        "selection cannot be preserved across strategy conversion"
                    );
                }
            }
        }
        model
    }

    // --- background search surface (scissors strategy only) ---

    /// Cancels a running background search, reverting to `Selecting` with
    /// the control points and committed segments unchanged.
    pub fn cancel_processing(&mut self) -> Result<()> {
        if !self.core.state.is_processing() {
            return Err(SelectionError::InvalidState {
                op: "cancel processing",
                state: self.core.state,
            }
            .into());
        }
        self.tracer.cancel_processing(&mut self.core)
    }

    /// Polls a running background search for completion without blocking.
    ///
    /// Returns true if the search reached a terminal outcome and the model
    /// left `Processing`. Hosts call this from their event loop (e.g. on
    /// each `Progress` event).
    pub fn poll_search(&mut self) -> bool {
        self.tracer.poll_search(&mut self.core)
    }

    /// Blocks until a running background search reaches a terminal
    /// outcome. Returns immediately when not processing.
    pub fn wait_search(&mut self) {
        self.tracer.wait_search(&mut self.core);
    }

    /// Background search progress in `0..=100`, while processing.
    pub fn progress(&self) -> Option<u8> {
        self.tracer.progress()
    }

    /// The live settled/frontier snapshot, while processing.
    pub fn search_snapshot(&self) -> Option<Arc<SearchSnapshot>> {
        self.tracer.search_snapshot()
    }

    /// Search classification of `p`, while processing.
    pub fn node_class(&self, p: Point) -> Option<NodeClass> {
        self.tracer.search_snapshot().map(|s| s.class_at(p))
    }
}

impl std::fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("kind", &self.kind())
            .field("state", &self.core.state)
            .field("control_points", &self.core.control_points.len())
            .field("segments", &self.core.segments.len())
            .finish()
    }
}
