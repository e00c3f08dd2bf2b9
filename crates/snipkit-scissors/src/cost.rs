//! Gradient-derived edge costs.
//!
//! The search graph's nodes are image pixels; edges connect 4-connected
//! neighbors. Edge weights are derived from the local luminance gradient so
//! that paths are cheap along strong edges and expensive across flat
//! regions. The field is computed once per image and shared by every
//! search, whatever its anchor.

use snipkit_core::{ImageSource, Point};

/// Precomputed per-pixel gradient magnitudes for one image.
#[derive(Debug, Clone)]
pub struct CostField {
    width: u32,
    height: u32,
    grad: Vec<u32>,
    max_grad: u32,
}

impl CostField {
    /// Derives the cost field from an image.
    ///
    /// Gradient magnitude is `|dx| + |dy|` of the luminance, using central
    /// differences in the interior and one-sided differences at the
    /// borders. Integer arithmetic keeps the field fully deterministic.
    pub fn from_image(image: &dyn ImageSource) -> Self {
        let width = image.width();
        let height = image.height();
        let mut grad = vec![0u32; (width as usize) * (height as usize)];
        let mut max_grad = 0u32;

        for y in 0..height {
            for x in 0..width {
                let left = image.luma(x.saturating_sub(1), y) as i32;
                let right = image.luma((x + 1).min(width - 1), y) as i32;
                let up = image.luma(x, y.saturating_sub(1)) as i32;
                let down = image.luma(x, (y + 1).min(height - 1)) as i32;

                let g = (right - left).unsigned_abs() + (down - up).unsigned_abs();
                let i = (y * width + x) as usize;
                grad[i] = g;
                max_grad = max_grad.max(g);
            }
        }

        tracing::debug!(width, height, max_grad, "cost field derived");
        Self {
            width,
            height,
            grad,
            max_grad,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of nodes in the search graph.
    pub fn node_count(&self) -> usize {
        self.grad.len()
    }

    /// Node index for an in-bounds point.
    pub fn node(&self, p: Point) -> Option<u32> {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.width || p.y as u32 >= self.height {
            return None;
        }
        Some(p.y as u32 * self.width + p.x as u32)
    }

    /// Pixel coordinates of a node index.
    pub fn point(&self, node: u32) -> Point {
        Point::new((node % self.width) as i32, (node / self.width) as i32)
    }

    /// The 4-connected neighbors of `node`, in a fixed left/right/up/down
    /// order so expansion order never varies between runs.
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> {
        let w = self.width;
        let h = self.height;
        let x = node % w;
        let y = node / w;
        [
            (x > 0).then(|| node - 1),
            (x + 1 < w).then(|| node + 1),
            (y > 0).then(|| node - w),
            (y + 1 < h).then(|| node + w),
        ]
        .into_iter()
        .flatten()
    }

    /// Weight of the edge between two adjacent nodes.
    ///
    /// Strictly positive, and smallest where both endpoints sit on strong
    /// edges.
    pub fn edge_cost(&self, a: u32, b: u32) -> u64 {
        let ga = self.grad[a as usize] as u64;
        let gb = self.grad[b as usize] as u64;
        2 * self.max_grad as u64 - ga - gb + 1
    }
}
