//! Region extraction: rasterize the closed boundary as a mask and pull
//! the enclosed pixels out of the image.

use std::io::{Cursor, Write};

use image::{ImageFormat, Rgba, RgbaImage};
use snipkit_core::{ExtractError, Point, Result};

use crate::model::Core;

/// Extracts the selected region as an RGBA buffer cropped to the
/// boundary's bounding box, with pixels outside the boundary fully
/// transparent.
pub(crate) fn extract_region(core: &Core) -> std::result::Result<RgbaImage, ExtractError> {
    if !core.state.is_finished() {
        return Err(ExtractError::NotReady { state: core.state });
    }
    if core.segments.is_empty() {
        return Err(ExtractError::EmptySelection);
    }
    let image = core.image.as_ref().ok_or(ExtractError::NoImage)?;

    // The boundary polygon: every segment's points, in boundary order.
    let polygon: Vec<Point> = core
        .segments
        .iter()
        .flat_map(|seg| seg.points().iter().copied())
        .collect();

    // Bounding box, clamped to the image.
    let max_x_img = image.width() as i32 - 1;
    let max_y_img = image.height() as i32 - 1;
    let min_x = polygon.iter().map(|p| p.x).min().unwrap_or(0).clamp(0, max_x_img);
    let max_x = polygon.iter().map(|p| p.x).max().unwrap_or(0).clamp(0, max_x_img);
    let min_y = polygon.iter().map(|p| p.y).min().unwrap_or(0).clamp(0, max_y_img);
    let max_y = polygon.iter().map(|p| p.y).max().unwrap_or(0).clamp(0, max_y_img);

    let width = (max_x - min_x + 1) as u32;
    let height = (max_y - min_y + 1) as u32;
    let mut out = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    // Even-odd scanline fill. Sampling edge crossings at pixel-row centers
    // (y + 0.5) sidesteps vertices and horizontal edges landing exactly on
    // a scanline.
    for row in 0..height {
        let yc = (min_y + row as i32) as f64 + 0.5;
        let mut crossings: Vec<f64> = Vec::new();
        for w in polygon.windows(2) {
            let (a, b) = (w[0], w[1]);
            let (ya, yb) = (a.y as f64, b.y as f64);
            if (ya <= yc) != (yb <= yc) {
                let t = (yc - ya) / (yb - ya);
                crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
            }
        }
        // Implicit closing edge from the last polygon point to the first.
        if let (Some(&last), Some(&first)) = (polygon.last(), polygon.first()) {
            if last != first {
                let (ya, yb) = (last.y as f64, first.y as f64);
                if (ya <= yc) != (yb <= yc) {
                    let t = (yc - ya) / (yb - ya);
                    crossings.push(last.x as f64 + t * (first.x as f64 - last.x as f64));
                }
            }
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let (x0, x1) = (pair[0], pair[1]);
            for col in 0..width {
                let xc = (min_x + col as i32) as f64 + 0.5;
                if xc >= x0 && xc <= x1 {
                    let sx = (min_x + col as i32) as u32;
                    let sy = (min_y + row as i32) as u32;
                    out.put_pixel(col, row, Rgba(image.rgba(sx, sy)));
                }
            }
        }
    }

    Ok(out)
}

/// Extracts the selected region and writes it to `sink` as PNG.
pub(crate) fn save_selection<W: Write>(core: &Core, sink: &mut W) -> Result<()> {
    let region = extract_region(core)?;

    // PNG encoding needs a seekable writer; encode to memory, then hand
    // the bytes to the caller's sink.
    let mut buffer = Cursor::new(Vec::new());
    region
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(ExtractError::from)?;
    sink.write_all(buffer.get_ref()).map_err(ExtractError::from)?;
    Ok(())
}
