//! Circle tracing: a center anchor plus a radius-defining anchor.
//!
//! The second anchor synthesizes the whole boundary at once as uniform
//! angular samples, so there is no open "selecting many points" phase. The
//! same sample count backs the live preview and the committed ring, so the
//! two are visually identical.

use snipkit_core::{Point, PolyLine, Result, SelectionError, SelectionState};

use crate::model::Core;

/// Number of uniform angular samples on a synthesized circle.
pub const CIRCLE_SAMPLES: usize = 1000;

/// Sampled circle point `i` of [`CIRCLE_SAMPLES`], truncated to pixel
/// coordinates.
fn sample(center: Point, radius: f64, i: usize) -> Point {
    let angle = 2.0 * std::f64::consts::PI * (i as f64) / (CIRCLE_SAMPLES as f64);
    Point::new(
        (center.x as f64 + radius * angle.cos()) as i32,
        (center.y as f64 + radius * angle.sin()) as i32,
    )
}

/// The full ring as one closed polyline (first and last point coincide).
fn ring(center: Point, radius: f64) -> PolyLine {
    let points = (0..=CIRCLE_SAMPLES)
        .map(|i| sample(center, radius, i))
        .collect();
    PolyLine::new(points).expect("ring is never empty")
}

/// The ring split into two half-arcs, keeping one segment per control
/// point for the finished boundary.
fn half_rings(center: Point, radius: f64) -> [PolyLine; 2] {
    let half = CIRCLE_SAMPLES / 2;
    let first = (0..=half).map(|i| sample(center, radius, i)).collect();
    let second = (half..=CIRCLE_SAMPLES)
        .map(|i| sample(center, radius, i))
        .collect();
    [
        PolyLine::new(first).expect("arc is never empty"),
        PolyLine::new(second).expect("arc is never empty"),
    ]
}

pub(crate) struct CircleTracer;

impl CircleTracer {
    pub(crate) fn append(&mut self, core: &mut Core, p: Point) -> Result<()> {
        if core.control_points.is_empty() {
            return Err(SelectionError::NoStartingPoint.into());
        }
        if core.control_points.len() >= 2 {
            return Err(SelectionError::TooManyPoints { max: 2 }.into());
        }

        // Second anchor: synthesize the whole boundary and close it.
        let center = core.control_points[0];
        let radius = center.distance_to(&p);
        core.control_points.push(p);
        core.segments.extend(half_rings(center, radius));
        core.set_state(SelectionState::Selected);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn live_wire(&self, core: &Core, p: Point) -> Result<PolyLine> {
        let center = core.control_points[0];
        Ok(ring(center, center.distance_to(&p)))
    }

    pub(crate) fn undo(&mut self, core: &mut Core) -> Result<()> {
        if core.segments.is_empty() {
            // Only the center remains.
            core.control_points.clear();
            core.set_state(SelectionState::NoSelection);
            core.notify_selection();
            return Ok(());
        }
        // Drop the synthesized ring and the radius point; reopen with the
        // center alone.
        core.segments.clear();
        core.control_points.truncate(1);
        core.set_state(SelectionState::Selecting);
        core.notify_selection();
        Ok(())
    }

    pub(crate) fn finish(&mut self, _core: &mut Core) -> Result<()> {
        // The boundary closes itself on the second anchor; a finishable
        // (open, with segments) circle state does not exist. The model
        // resets empty-segment finishes before delegating here.
        unreachable!("circle selections close on the second control point")
    }

    pub(crate) fn move_point(&mut self, core: &mut Core, index: usize, p: Point) -> Result<()> {
        let center = core.control_points[0];
        let radius_point = core.control_points[1];

        let (new_center, new_radius_point) = if index == 0 {
            // Translate the whole circle, preserving the radius vector.
            let dx = p.x - center.x;
            let dy = p.y - center.y;
            (
                p,
                Point::new(radius_point.x + dx, radius_point.y + dy),
            )
        } else {
            // Keep the center; the new position redefines the radius.
            (center, p)
        };

        core.control_points[0] = new_center;
        core.control_points[1] = new_radius_point;
        let radius = new_center.distance_to(&new_radius_point);
        core.segments.clear();
        core.segments.extend(half_rings(new_center, radius));
        core.notify_selection();
        Ok(())
    }
}
