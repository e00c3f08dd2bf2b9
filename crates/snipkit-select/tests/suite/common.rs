#![allow(dead_code)]

use std::sync::Arc;

use snipkit_core::{ImageSource, Point, Raster, SelectionState};
use snipkit_select::{SelectionModel, TracerKind};

/// A featureless mid-gray image.
pub fn flat_image(side: u32) -> Arc<dyn ImageSource> {
    Arc::new(Raster::new(image::RgbaImage::from_pixel(
        side,
        side,
        image::Rgba([128, 128, 128, 255]),
    )))
}

/// Black above the middle row, white below: one strong horizontal edge.
pub fn edge_image(side: u32) -> Arc<dyn ImageSource> {
    Arc::new(Raster::new(image::RgbaImage::from_fn(side, side, |_, y| {
        if y < side / 2 {
            image::Rgba([0, 0, 0, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    })))
}

pub fn model(kind: TracerKind) -> SelectionModel {
    SelectionModel::with_image(kind, flat_image(64))
}

/// Drives a point-to-point model to a finished square selection.
pub fn finished_square() -> SelectionModel {
    let mut m = model(TracerKind::PointToPoint);
    m.start_selection(Point::new(2, 2)).unwrap();
    m.add_point(Point::new(12, 2)).unwrap();
    m.add_point(Point::new(12, 12)).unwrap();
    m.add_point(Point::new(2, 12)).unwrap();
    m.finish_selection().unwrap();
    assert_eq!(m.state(), SelectionState::Selected);
    m
}

/// Asserts the structural segment/control-point invariant for `m`.
pub fn assert_invariant(m: &SelectionModel) {
    let cps = m.control_points().len();
    let segs = m.segments().len();
    match m.state() {
        SelectionState::NoSelection => assert_eq!((cps, segs), (0, 0)),
        SelectionState::Selecting | SelectionState::Processing => assert_eq!(segs + 1, cps),
        SelectionState::Selected => assert_eq!(segs, cps),
    }
}
