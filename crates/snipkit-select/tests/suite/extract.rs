//! Region extraction scenarios.

use std::sync::Arc;

use snipkit_core::{ImageSource, Point, Raster};
use snipkit_select::{SelectionModel, TracerKind};

use crate::common::{finished_square, model};

/// An image whose pixel colors encode their own coordinates.
fn coded_image(side: u32) -> Arc<dyn ImageSource> {
    Arc::new(Raster::new(image::RgbaImage::from_fn(side, side, |x, y| {
        image::Rgba([(x * 10) as u8, (y * 10) as u8, 0, 255])
    })))
}

fn finished_triangle(image: Arc<dyn ImageSource>) -> SelectionModel {
    let mut m = SelectionModel::with_image(TracerKind::PointToPoint, image);
    m.start_selection(Point::new(2, 2)).unwrap();
    m.add_point(Point::new(12, 2)).unwrap();
    m.add_point(Point::new(2, 12)).unwrap();
    m.finish_selection().unwrap();
    m
}

#[test]
fn test_region_is_cropped_to_the_bounding_box() {
    let m = finished_square();
    let region = m.extract_region().unwrap();
    assert_eq!((region.width(), region.height()), (11, 11));
}

#[test]
fn test_inside_pixels_carry_source_colors() {
    let m = finished_triangle(coded_image(16));
    let region = m.extract_region().unwrap();

    // Region (1, 1) is image (3, 3), inside the triangle.
    let p = region.get_pixel(1, 1);
    assert_eq!(p.0, [30, 30, 0, 255]);
}

#[test]
fn test_outside_pixels_are_transparent() {
    let m = finished_triangle(coded_image(16));
    let region = m.extract_region().unwrap();

    // Region (8, 8) is image (10, 10), beyond the hypotenuse.
    assert_eq!(region.get_pixel(8, 8).0[3], 0);
}

#[test]
fn test_square_interior_is_fully_opaque() {
    let m = finished_square();
    let region = m.extract_region().unwrap();
    // Pixel centers strictly inside the square boundary are all filled.
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(region.get_pixel(x, y).0[3], 255, "at ({x}, {y})");
        }
    }
}

#[test]
fn test_extraction_requires_a_finished_selection() {
    let mut m = model(TracerKind::PointToPoint);
    assert!(m.extract_region().unwrap_err().is_extract_error());

    m.start_selection(Point::new(2, 2)).unwrap();
    m.add_point(Point::new(12, 2)).unwrap();
    assert!(m.extract_region().unwrap_err().is_extract_error());
}

#[test]
fn test_extraction_requires_an_image() {
    let mut m = SelectionModel::new(TracerKind::PointToPoint);
    m.start_selection(Point::new(2, 2)).unwrap();
    m.add_point(Point::new(12, 2)).unwrap();
    m.add_point(Point::new(2, 12)).unwrap();
    m.finish_selection().unwrap();
    assert!(m.extract_region().unwrap_err().is_extract_error());
}

#[test]
fn test_save_selection_writes_a_decodable_png() {
    let m = finished_square();
    let mut bytes: Vec<u8> = Vec::new();
    m.save_selection(&mut bytes).unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (11, 11));
}

#[test]
fn test_boundary_clamped_to_image_bounds() {
    // Anchors outside the image must not make extraction index past the
    // raster edge.
    let mut m = SelectionModel::with_image(TracerKind::PointToPoint, coded_image(8));
    m.start_selection(Point::new(-3, -3)).unwrap();
    m.add_point(Point::new(20, -3)).unwrap();
    m.add_point(Point::new(20, 20)).unwrap();
    m.add_point(Point::new(-3, 20)).unwrap();
    m.finish_selection().unwrap();

    let region = m.extract_region().unwrap();
    assert_eq!((region.width(), region.height()), (8, 8));
    assert_eq!(region.get_pixel(4, 4).0[3], 255);
}
