//! Pure 2-D geometry over facial landmark coordinates.
//!
//! Landmarks arrive normalized to `[0, 1]` in both axes; callers scale them
//! into pixel space before measuring distances so that aspect ratio is
//! accounted for.

use serde::{Deserialize, Serialize};

/// A 2-D point, normalized or pixel-space depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Scale a normalized point into pixel space.
    pub fn scaled(&self, width: f64, height: f64) -> Point2 {
        Point2::new(self.x * width, self.y * height)
    }
}

/// Arithmetic mean of a set of points. An empty slice yields the origin.
pub fn centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Point2::new(sum_x / n, sum_y / n)
}
