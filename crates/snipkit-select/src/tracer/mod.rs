//! Tracing strategies.
//!
//! Each strategy implements the same hook set - start, append, live wire,
//! undo, finish, move - over the model's shared [`Core`]. Dispatch is by
//! variant tag: the model stores one [`Tracer`] and matches on it, so
//! there is no open-ended dynamic typing at the strategy seam.

mod circle;
mod point_to_point;
mod scissors;
mod spline;

use std::sync::Arc;

use snipkit_core::{Point, PolyLine, Result};
use snipkit_scissors::SearchSnapshot;

use crate::model::Core;

pub use circle::CIRCLE_SAMPLES;
pub use spline::SPLINE_SAMPLES_PER_SPAN;

use circle::CircleTracer;
use point_to_point::PointToPointTracer;
use scissors::ScissorsTracer;
use spline::SplineTracer;

/// The available tracing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracerKind {
    /// Straight segments between consecutive anchor points.
    PointToPoint,
    /// A circle from a center and a radius-defining point.
    Circle,
    /// A smoothed Catmull-Rom curve through the anchor points.
    Spline,
    /// Intelligent scissors: minimum-cost paths along image edges.
    Scissors,
}

impl TracerKind {
    /// Whether a borrowed selection with `cps` control points and `segs`
    /// segments (finished or not) satisfies this strategy's invariants.
    ///
    /// The structural invariant (`segs == cps - 1` open, `segs == cps`
    /// finished) is checked by the caller; this adds per-strategy arity
    /// constraints.
    pub fn can_adopt(self, cps: usize, _segs: usize, finished: bool) -> bool {
        match self {
            // The circle is fixed-arity: one center while selecting, and
            // exactly center + radius point when finished.
            TracerKind::Circle => {
                if finished {
                    cps == 2
                } else {
                    cps <= 1
                }
            }
            TracerKind::PointToPoint | TracerKind::Spline | TracerKind::Scissors => true,
        }
    }
}

/// One strategy instance, holding whatever per-session state the strategy
/// needs (e.g. the scissors search handle).
pub(crate) enum Tracer {
    PointToPoint(PointToPointTracer),
    Circle(CircleTracer),
    Spline(SplineTracer),
    Scissors(ScissorsTracer),
}

impl Tracer {
    pub(crate) fn new(kind: TracerKind) -> Self {
        match kind {
            TracerKind::PointToPoint => Tracer::PointToPoint(PointToPointTracer),
            TracerKind::Circle => Tracer::Circle(CircleTracer),
            TracerKind::Spline => Tracer::Spline(SplineTracer),
            TracerKind::Scissors => Tracer::Scissors(ScissorsTracer::new()),
        }
    }

    pub(crate) fn kind(&self) -> TracerKind {
        match self {
            Tracer::PointToPoint(_) => TracerKind::PointToPoint,
            Tracer::Circle(_) => TracerKind::Circle,
            Tracer::Spline(_) => TracerKind::Spline,
            Tracer::Scissors(_) => TracerKind::Scissors,
        }
    }

    pub(crate) fn start(&mut self, core: &mut Core, p: Point) -> Result<()> {
        match self {
            Tracer::Scissors(t) => t.start(core, p),
            Tracer::PointToPoint(_) | Tracer::Circle(_) | Tracer::Spline(_) => {
                point_to_point::start_plain(core, p);
                Ok(())
            }
        }
    }

    pub(crate) fn append(&mut self, core: &mut Core, p: Point) -> Result<()> {
        match self {
            Tracer::PointToPoint(t) => t.append(core, p),
            Tracer::Circle(t) => t.append(core, p),
            Tracer::Spline(t) => t.append(core, p),
            Tracer::Scissors(t) => t.append(core, p),
        }
    }

    pub(crate) fn live_wire(&self, core: &Core, p: Point) -> Result<PolyLine> {
        match self {
            Tracer::PointToPoint(t) => t.live_wire(core, p),
            Tracer::Circle(t) => t.live_wire(core, p),
            Tracer::Spline(t) => t.live_wire(core, p),
            Tracer::Scissors(t) => t.live_wire(core, p),
        }
    }

    pub(crate) fn undo(&mut self, core: &mut Core) -> Result<()> {
        match self {
            Tracer::PointToPoint(t) => t.undo(core),
            Tracer::Circle(t) => t.undo(core),
            Tracer::Spline(t) => t.undo(core),
            Tracer::Scissors(t) => t.undo(core),
        }
    }

    pub(crate) fn finish(&mut self, core: &mut Core) -> Result<()> {
        match self {
            Tracer::PointToPoint(t) => t.finish(core),
            Tracer::Circle(t) => t.finish(core),
            Tracer::Spline(t) => t.finish(core),
            Tracer::Scissors(t) => t.finish(core),
        }
    }

    pub(crate) fn move_point(&mut self, core: &mut Core, index: usize, p: Point) -> Result<()> {
        match self {
            Tracer::PointToPoint(t) => t.move_point(core, index, p),
            Tracer::Circle(t) => t.move_point(core, index, p),
            Tracer::Spline(t) => t.move_point(core, index, p),
            Tracer::Scissors(t) => t.move_point(core, index, p),
        }
    }

    /// Strategy-local cleanup when the model resets.
    pub(crate) fn on_reset(&mut self) {
        if let Tracer::Scissors(t) = self {
            t.abandon_search();
        }
    }

    /// Strategy-local cleanup when the model's image is replaced.
    pub(crate) fn on_image_changed(&mut self) {
        if let Tracer::Scissors(t) = self {
            t.drop_engine();
        }
    }

    pub(crate) fn cancel_processing(&mut self, core: &mut Core) -> Result<()> {
        match self {
            Tracer::Scissors(t) => t.cancel_processing(core),
            // Only the scissors strategy ever enters Processing, so the
            // model's capability check rejects the others first.
            _ => unreachable!("only the scissors strategy processes in the background"),
        }
    }

    pub(crate) fn poll_search(&mut self, core: &mut Core) -> bool {
        match self {
            Tracer::Scissors(t) => t.poll_search(core),
            _ => false,
        }
    }

    pub(crate) fn wait_search(&mut self, core: &mut Core) {
        if let Tracer::Scissors(t) = self {
            t.wait_search(core);
        }
    }

    pub(crate) fn progress(&self) -> Option<u8> {
        match self {
            Tracer::Scissors(t) => t.progress(),
            _ => None,
        }
    }

    pub(crate) fn search_snapshot(&self) -> Option<Arc<SearchSnapshot>> {
        match self {
            Tracer::Scissors(t) => t.snapshot(),
            _ => None,
        }
    }
}
