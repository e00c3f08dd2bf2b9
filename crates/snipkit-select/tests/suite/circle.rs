//! Circle tracing scenarios.

use snipkit_core::{Point, SelectionState};
use snipkit_select::{TracerKind, CIRCLE_SAMPLES};

use crate::common::{assert_invariant, model};

#[test]
fn test_second_point_synthesizes_the_boundary() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(10, 10)).unwrap();
    assert_eq!(m.state(), SelectionState::Selecting);
    assert_invariant(&m);

    m.add_point(Point::new(13, 10)).unwrap();
    assert_eq!(m.state(), SelectionState::Selected);
    assert_eq!(m.control_points().len(), 2);
    assert_eq!(m.segments().len(), 2);
    assert_invariant(&m);

    // Every boundary point sits on the radius, within pixel truncation.
    let center = Point::new(10, 10);
    let total: usize = m.segments().iter().map(|s| s.len()).sum();
    assert_eq!(total, CIRCLE_SAMPLES + 2);
    for seg in m.segments() {
        for p in seg.points() {
            let d = center.distance_to(p);
            assert!((d - 3.0).abs() <= std::f64::consts::SQRT_2, "{:?} at {}", p, d);
        }
    }

    // The two arcs chain into a closed loop.
    let [a, b] = [&m.segments()[0], &m.segments()[1]];
    assert_eq!(a.end(), b.start());
    assert_eq!(b.end(), a.start());
}

#[test]
fn test_live_wire_previews_the_full_ring() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(20, 20)).unwrap();
    let ring = m.live_wire(Point::new(25, 20)).unwrap();
    assert_eq!(ring.start(), ring.end());
    assert_eq!(ring.len(), CIRCLE_SAMPLES + 1);
    assert!(m.segments().is_empty());
}

#[test]
fn test_third_point_is_rejected() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(10, 10)).unwrap();
    m.add_point(Point::new(13, 10)).unwrap();
    // The boundary is closed; adding is a state violation.
    assert!(m.add_point(Point::new(15, 15)).unwrap_err().is_invalid_state());
}

#[test]
fn test_undo_reopens_with_the_center_alone() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(10, 10)).unwrap();
    m.add_point(Point::new(13, 10)).unwrap();

    m.undo().unwrap();
    assert_eq!(m.state(), SelectionState::Selecting);
    assert_eq!(m.control_points(), &[Point::new(10, 10)]);
    assert!(m.segments().is_empty());
    assert_invariant(&m);

    m.undo().unwrap();
    assert_eq!(m.state(), SelectionState::NoSelection);
    assert_invariant(&m);
}

#[test]
fn test_move_center_translates_the_circle() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(10, 10)).unwrap();
    m.add_point(Point::new(13, 10)).unwrap();

    m.move_point(0, Point::new(30, 30)).unwrap();
    assert_eq!(m.control_points(), &[Point::new(30, 30), Point::new(33, 30)]);
    let center = Point::new(30, 30);
    for seg in m.segments() {
        for p in seg.points() {
            let d = center.distance_to(p);
            assert!((d - 3.0).abs() <= std::f64::consts::SQRT_2);
        }
    }
}

#[test]
fn test_move_radius_point_resizes_the_circle() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(20, 20)).unwrap();
    m.add_point(Point::new(23, 20)).unwrap();

    m.move_point(1, Point::new(30, 20)).unwrap();
    let center = Point::new(20, 20);
    for seg in m.segments() {
        for p in seg.points() {
            let d = center.distance_to(p);
            assert!((d - 10.0).abs() <= std::f64::consts::SQRT_2);
        }
    }
}
