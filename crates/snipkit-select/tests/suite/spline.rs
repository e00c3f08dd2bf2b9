//! Spline tracing scenarios.

use snipkit_core::{Point, SelectionState};
use snipkit_select::{TracerKind, SPLINE_SAMPLES_PER_SPAN};

use crate::common::{assert_invariant, model};

fn anchors() -> [Point; 4] {
    [
        Point::new(5, 5),
        Point::new(30, 5),
        Point::new(30, 30),
        Point::new(5, 30),
    ]
}

fn selected_spline() -> snipkit_select::SelectionModel {
    let mut m = model(TracerKind::Spline);
    let [a, b, c, d] = anchors();
    m.start_selection(a).unwrap();
    m.add_point(b).unwrap();
    m.add_point(c).unwrap();
    m.add_point(d).unwrap();
    m.finish_selection().unwrap();
    m
}

#[test]
fn test_segments_interpolate_their_anchors() {
    let m = selected_spline();
    assert_eq!(m.state(), SelectionState::Selected);
    assert_invariant(&m);

    let cps = m.control_points();
    for (j, seg) in m.segments().iter().enumerate() {
        assert_eq!(seg.start(), cps[j]);
        assert_eq!(seg.end(), cps[(j + 1) % cps.len()]);
        assert_eq!(seg.len(), SPLINE_SAMPLES_PER_SPAN + 1);
    }
}

#[test]
fn test_identical_anchors_produce_identical_boundaries() {
    let a = selected_spline();
    let b = selected_spline();
    assert_eq!(a.segments(), b.segments());
}

#[test]
fn test_appending_reshapes_the_previous_span() {
    let mut m = model(TracerKind::Spline);
    m.start_selection(Point::new(5, 5)).unwrap();
    m.add_point(Point::new(30, 5)).unwrap();
    let straight = m.segments()[0].clone();

    // The new anchor is far off-axis, so span 0's end tangent changes.
    m.add_point(Point::new(30, 40)).unwrap();
    assert_ne!(m.segments()[0], straight);
    assert_eq!(m.segments()[0].start(), Point::new(5, 5));
    assert_eq!(m.segments()[0].end(), Point::new(30, 5));
    assert_invariant(&m);
}

#[test]
fn test_move_point_only_reshapes_the_neighborhood() {
    let mut m = model(TracerKind::Spline);
    let hexagon = [(30, 5), (50, 15), (50, 35), (30, 45), (10, 35), (10, 15)];
    for (i, &(x, y)) in hexagon.iter().enumerate() {
        let p = Point::new(x, y);
        if i == 0 {
            m.start_selection(p).unwrap();
        } else {
            m.add_point(p).unwrap();
        }
    }
    m.finish_selection().unwrap();
    let before = m.segments().to_vec();

    // Anchor 4 shapes spans 2..=5 of the closed boundary; spans 0 and 1
    // lie outside its neighborhood and must not change.
    m.move_point(4, Point::new(2, 40)).unwrap();
    let after = m.segments();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[1]);
    assert_ne!(after[3], before[3]);
    assert_ne!(after[4], before[4]);
}

#[test]
fn test_undo_from_selected_drops_only_the_closing_span() {
    let mut m = selected_spline();
    m.undo().unwrap();
    assert_eq!(m.state(), SelectionState::Selecting);
    assert_eq!(m.control_points().len(), 4);
    assert_eq!(m.segments().len(), 3);
    assert_invariant(&m);

    // The reopened spans no longer interpolate with wraparound neighbors,
    // but their endpoints still sit on the anchors.
    let cps = m.control_points();
    for (j, seg) in m.segments().iter().enumerate() {
        assert_eq!(seg.start(), cps[j]);
        assert_eq!(seg.end(), cps[j + 1]);
    }
}

#[test]
fn test_undo_while_selecting_keeps_endpoint_interpolation() {
    let mut m = model(TracerKind::Spline);
    m.start_selection(Point::new(5, 5)).unwrap();
    m.add_point(Point::new(30, 5)).unwrap();
    m.add_point(Point::new(30, 30)).unwrap();

    m.undo().unwrap();
    assert_eq!(m.control_points().len(), 2);
    assert_eq!(m.segments().len(), 1);
    assert_eq!(m.segments()[0].start(), Point::new(5, 5));
    assert_eq!(m.segments()[0].end(), Point::new(30, 5));
    assert_invariant(&m);
}

#[test]
fn test_live_wire_starts_at_the_last_anchor() {
    let mut m = model(TracerKind::Spline);
    m.start_selection(Point::new(5, 5)).unwrap();
    m.add_point(Point::new(30, 5)).unwrap();
    let wire = m.live_wire(Point::new(30, 30)).unwrap();
    assert_eq!(wire.start(), Point::new(30, 5));
    assert_eq!(wire.end(), Point::new(30, 30));
}
