//! Read-only raster image access.
//!
//! The core needs exactly two capabilities from an image: its dimensions
//! and per-pixel samples. Decoding, encoding, and ownership of pixel
//! buffers belong to the host; [`Raster`] adapts the `image` crate's RGBA
//! buffer to the [`ImageSource`] trait for hosts that use it.

use image::RgbaImage;

use crate::geometry::Point;

/// Read-only pixel access used by geometry clamping and the boundary
/// search cost function.
pub trait ImageSource: Send + Sync {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Luminance sample in `0..=255` at pixel `(x, y)`.
    ///
    /// Callers must only pass in-bounds coordinates.
    fn luma(&self, x: u32, y: u32) -> u8;

    /// RGBA sample at pixel `(x, y)`.
    ///
    /// Sources without color information render their luminance as gray.
    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let l = self.luma(x, y);
        [l, l, l, 255]
    }

    /// Whether `p` lies inside the image bounds.
    fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width() && (p.y as u32) < self.height()
    }
}

/// An RGBA raster backed by the `image` crate.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// Wraps an RGBA buffer.
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Borrow the underlying buffer.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<RgbaImage> for Raster {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

impl ImageSource for Raster {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn luma(&self, x: u32, y: u32) -> u8 {
        // Rec. 601 integer luma
        let p = self.image.get_pixel(x, y);
        let [r, g, b, _] = p.0;
        ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }
}
