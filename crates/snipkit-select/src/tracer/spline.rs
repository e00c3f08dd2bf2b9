//! Smoothed-curve tracing: a uniform Catmull-Rom spline interpolating the
//! anchor points.
//!
//! Each segment (one span between consecutive anchors) is shaped by up to
//! two neighboring anchors on either side, so edits recompute every span
//! whose neighborhood includes the changed anchor, not just the adjacent
//! one. Sampling is fixed and integer-rounded, so identical control points
//! always produce identical boundaries.

use snipkit_core::{Point, PolyLine, Result, SelectionError, SelectionState};

use crate::model::Core;

/// Interior sample count per spline span (a span has this many + 1 points).
pub const SPLINE_SAMPLES_PER_SPAN: usize = 16;

/// Uniform Catmull-Rom interpolation of the span `p1 -> p2` with
/// neighbors `p0` and `p3`.
fn sample_span(p0: Point, p1: Point, p2: Point, p3: Point) -> PolyLine {
    let coord = |a: i32, b: i32, c: i32, d: i32, t: f64| -> f64 {
        let (a, b, c, d) = (a as f64, b as f64, c as f64, d as f64);
        0.5 * ((2.0 * b)
            + (c - a) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t * t
            + (3.0 * b - a - 3.0 * c + d) * t * t * t)
    };

    let mut points = Vec::with_capacity(SPLINE_SAMPLES_PER_SPAN + 1);
    points.push(p1);
    for i in 1..SPLINE_SAMPLES_PER_SPAN {
        let t = (i as f64) / (SPLINE_SAMPLES_PER_SPAN as f64);
        points.push(Point::new(
            coord(p0.x, p1.x, p2.x, p3.x, t).round() as i32,
            coord(p0.y, p1.y, p2.y, p3.y, t).round() as i32,
        ));
    }
    points.push(p2);
    PolyLine::new(points).expect("span is never empty")
}

pub(crate) struct SplineTracer;

impl SplineTracer {
    /// Recomputes span `j` (the segment from anchor `j` to anchor `j+1`,
    /// wrapping when the boundary is closed) from the current anchors.
    fn recompute_span(&self, core: &mut Core, j: usize) {
        let cps = &core.control_points;
        let n = cps.len();
        let closed = core.state.is_finished();

        let at = |i: isize| -> Point {
            if closed {
                cps[(i.rem_euclid(n as isize)) as usize]
            } else {
                cps[i.clamp(0, n as isize - 1) as usize]
            }
        };

        let j = j as isize;
        core.segments[j as usize] = sample_span(at(j - 1), at(j), at(j + 1), at(j + 2));
    }

    /// Recomputes every span whose shape depends on anchor `index`:
    /// spans `index - 2 ..= index + 1`, clamped open or wrapped closed.
    fn recompute_around(&self, core: &mut Core, index: usize) {
        let n_spans = core.segments.len();
        if n_spans == 0 {
            return;
        }
        let closed = core.state.is_finished();
        let mut touched: Vec<usize> = Vec::with_capacity(4);
        for offset in -2isize..=1 {
            let j = index as isize + offset;
            let j = if closed {
                j.rem_euclid(n_spans as isize) as usize
            } else if (0..n_spans as isize).contains(&j) {
                j as usize
            } else {
                continue;
            };
            if !touched.contains(&j) {
                touched.push(j);
            }
        }
        for j in touched {
            self.recompute_span(core, j);
        }
    }

    pub(crate) fn append(&mut self, core: &mut Core, p: Point) -> Result<()> {
        if core.control_points.is_empty() {
            return Err(SelectionError::NoStartingPoint.into());
        }
        core.control_points.push(p);
        let m = core.control_points.len() - 1; // index of the new anchor

        // New span m-1, plus span m-2 whose end tangent now sees `p`.
        let placeholder = PolyLine::line(core.control_points[m - 1], p);
        core.segments.push(placeholder);
        self.recompute_span(core, m - 1);
        if m >= 2 {
            self.recompute_span(core, m - 2);
        }
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn live_wire(&self, core: &Core, p: Point) -> Result<PolyLine> {
        let cps = &core.control_points;
        let n = cps.len();
        let last = cps[n - 1];
        // The span the next append would create, with the same neighbor
        // clamping an open curve would use.
        let p0 = if n >= 2 { cps[n - 2] } else { last };
        Ok(sample_span(p0, last, p, p))
    }

    pub(crate) fn undo(&mut self, core: &mut Core) -> Result<()> {
        if core.segments.is_empty() {
            core.control_points.clear();
            core.set_state(SelectionState::NoSelection);
            core.notify_selection();
            return Ok(());
        }

        if core.state.is_finished() {
            // Reopen: drop the closing span, then fix the spans that were
            // sampled with wraparound neighbors.
            core.segments.pop();
            core.set_state(SelectionState::Selecting);
            let n_spans = core.segments.len();
            self.recompute_span(core, 0);
            if n_spans >= 2 {
                self.recompute_span(core, n_spans - 1);
            }
        } else {
            core.segments.pop();
            core.control_points.pop();
            // The last remaining span lost a tangent neighbor.
            let n_spans = core.segments.len();
            if n_spans > 0 {
                self.recompute_span(core, n_spans - 1);
            }
        }
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn finish(&mut self, core: &mut Core) -> Result<()> {
        let n = core.control_points.len();
        let last = core.control_points[n - 1];
        let first = core.control_points[0];

        // Closing span, then re-sample the spans adjacent to the closure
        // with their wraparound neighbors.
        core.segments.push(PolyLine::line(last, first));
        core.set_state(SelectionState::Selected);
        let n_spans = core.segments.len();
        self.recompute_span(core, n_spans - 1);
        self.recompute_span(core, 0);
        if n_spans >= 2 {
            self.recompute_span(core, n_spans - 2);
        }
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn move_point(&mut self, core: &mut Core, index: usize, p: Point) -> Result<()> {
        core.control_points[index] = p;
        self.recompute_around(core, index);
        core.notify_selection();
        Ok(())
    }
}
