//! Geometry primitives shared by every tracing strategy.

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, SelectionResult};

/// A point in image pixel space.
///
/// `Point` is `Copy`, so storing one in a control-point or segment list
/// always stores an independent value; callers can never alias coordinates
/// held by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One drawable piece of selection boundary: an ordered, non-empty sequence
/// of points.
///
/// A straight edge has two points; a sampled curve, arc, or shortest path
/// has as many as its sampling produced. The sequence is immutable once
/// constructed - re-routing a boundary always replaces whole segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyLine {
    points: Vec<Point>,
}

impl PolyLine {
    /// Creates a polyline from an ordered point sequence.
    ///
    /// Fails with [`SelectionError::EmptyPolyLine`] if `points` is empty.
    pub fn new(points: Vec<Point>) -> SelectionResult<Self> {
        if points.is_empty() {
            return Err(SelectionError::EmptyPolyLine);
        }
        Ok(Self { points })
    }

    /// Creates a two-point straight segment.
    pub fn line(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    /// The first point of the segment.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The last point of the segment.
    pub fn end(&self) -> Point {
        *self.points.last().expect("polyline is never empty")
    }

    /// All points of the segment, in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points in the segment.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with the standard collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns a copy of this segment with the point order reversed.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }
}
