//! Point-to-point tracing: every pair of consecutive anchors is joined by
//! a straight segment.

use snipkit_core::{Point, PolyLine, Result, SelectionError, SelectionState};

use crate::model::Core;

/// Shared "first point" behavior for the synchronous strategies: record
/// the starting anchor and open the selection.
pub(crate) fn start_plain(core: &mut Core, p: Point) {
    core.control_points.push(p);
    core.set_state(SelectionState::Selecting);
    core.notify_selection();
}

pub(crate) struct PointToPointTracer;

impl PointToPointTracer {
    pub(crate) fn append(&mut self, core: &mut Core, p: Point) -> Result<()> {
        let last = core.last_point().ok_or(SelectionError::NoStartingPoint)?;
        core.segments.push(PolyLine::line(last, p));
        core.control_points.push(p);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn live_wire(&self, core: &Core, p: Point) -> Result<PolyLine> {
        let last = core.last_point().ok_or(SelectionError::NoStartingPoint)?;
        Ok(PolyLine::line(last, p))
    }

    pub(crate) fn undo(&mut self, core: &mut Core) -> Result<()> {
        if core.segments.is_empty() {
            // Only the starting point remains.
            core.control_points.clear();
            core.set_state(SelectionState::NoSelection);
            core.notify_selection();
            return Ok(());
        }
        core.segments.pop();
        if core.state.is_finished() {
            // Dropping the closing segment reopens the boundary; the
            // control points all stay (none of them belonged to it).
            core.set_state(SelectionState::Selecting);
        } else {
            core.control_points.pop();
        }
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn finish(&mut self, core: &mut Core) -> Result<()> {
        let first = core.control_points[0];
        let last = core.last_point().ok_or(SelectionError::NoStartingPoint)?;
        // Close back to the start without duplicating it in the point list.
        core.segments.push(PolyLine::line(last, first));
        core.set_state(SelectionState::Selected);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn move_point(&mut self, core: &mut Core, index: usize, p: Point) -> Result<()> {
        core.control_points[index] = p;

        // The closed boundary has one segment per control point; exactly
        // the segment ending at `index` and the one starting there change.
        let n = core.segments.len();
        let incoming = if index == 0 { n - 1 } else { index - 1 };
        let outgoing = index;
        core.segments[incoming] = PolyLine::line(core.segments[incoming].start(), p);
        core.segments[outgoing] = PolyLine::line(p, core.segments[outgoing].end());
        core.notify_selection();
        Ok(())
    }
}
