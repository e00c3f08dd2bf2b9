//! Strategy conversion scenarios.

use snipkit_core::{Point, SelectionState};
use snipkit_select::{SelectionModel, TracerKind};

use crate::common::{assert_invariant, finished_square, flat_image, model};

#[test]
fn test_finished_boundary_converts_to_spline() {
    let m = finished_square();
    let converted = m.convert_to(TracerKind::Spline);

    assert_eq!(converted.kind(), TracerKind::Spline);
    assert_eq!(converted.state(), SelectionState::Selected);
    assert_eq!(converted.control_points(), m.control_points());
    assert_eq!(converted.segments(), m.segments());
    assert_invariant(&converted);
}

#[test]
fn test_conversion_preserves_the_image() {
    let m = finished_square();
    let converted = m.convert_to(TracerKind::Scissors);
    assert!(converted.image().is_some());

    let empty = SelectionModel::new(TracerKind::PointToPoint);
    assert!(empty.convert_to(TracerKind::Circle).image().is_none());
}

#[test]
fn test_four_point_boundary_cannot_become_a_circle() {
    let m = finished_square();
    let converted = m.convert_to(TracerKind::Circle);

    // A circle is defined by exactly two anchors; rather than fabricate
    // one, the converted model starts empty.
    assert_eq!(converted.state(), SelectionState::NoSelection);
    assert!(converted.control_points().is_empty());
    assert!(converted.segments().is_empty());
}

#[test]
fn test_circle_boundary_converts_to_point_to_point() {
    let mut m = model(TracerKind::Circle);
    m.start_selection(Point::new(10, 10)).unwrap();
    m.add_point(Point::new(13, 10)).unwrap();

    let converted = m.convert_to(TracerKind::PointToPoint);
    assert_eq!(converted.state(), SelectionState::Selected);
    assert_eq!(converted.segments(), m.segments());
}

#[test]
fn test_lone_starting_point_converts_to_a_circle_center() {
    let mut m = model(TracerKind::PointToPoint);
    m.start_selection(Point::new(7, 7)).unwrap();

    let mut converted = m.convert_to(TracerKind::Circle);
    assert_eq!(converted.state(), SelectionState::Selecting);
    assert_eq!(converted.control_points(), &[Point::new(7, 7)]);

    // The adopted point acts as the center.
    converted.add_point(Point::new(10, 7)).unwrap();
    assert_eq!(converted.state(), SelectionState::Selected);
}

#[test]
fn test_conversion_does_not_mutate_the_source() {
    let m = finished_square();
    let points = m.control_points().to_vec();
    let _ = m.convert_to(TracerKind::Circle);
    let _ = m.convert_to(TracerKind::Spline);
    assert_eq!(m.state(), SelectionState::Selected);
    assert_eq!(m.control_points(), points.as_slice());
}

#[test]
fn test_processing_source_contributes_committed_points_only() {
    let mut m = SelectionModel::with_image(TracerKind::Scissors, flat_image(16));
    m.start_selection(Point::new(3, 3)).unwrap();
    assert_eq!(m.state(), SelectionState::Processing);

    let mut converted = m.convert_to(TracerKind::PointToPoint);
    assert_eq!(converted.state(), SelectionState::Selecting);
    assert_eq!(converted.control_points(), &[Point::new(3, 3)]);
    assert!(converted.segments().is_empty());

    // The pending search stays with the source; the new model has none.
    assert!(converted.search_snapshot().is_none());
    assert!(!converted.poll_search());

    m.wait_search();
}
