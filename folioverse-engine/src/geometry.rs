//! Points, sizes and the small amount of 2D math the particle models need
//!
//! Shapes are rotated on the CPU so that a surface only has to understand
//! axis-aligned primitives and point lists.

use serde::{Deserialize, Serialize};

/// A point (or displacement) in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by an offset
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Pixel dimensions of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a point lies inside `[0, width] x [0, height]`
    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Local-to-surface transform: rotate about the origin, then translate.
///
/// Mirrors the `translate` + `rotate` pair a 2D canvas would apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Point,
    sin: f64,
    cos: f64,
}

impl Placement {
    pub fn new(origin: Point, rotation: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self { origin, sin, cos }
    }

    /// Map a point from the shape's local frame to surface coordinates
    pub fn apply(&self, local: Point) -> Point {
        Point::new(
            self.origin.x + local.x * self.cos - local.y * self.sin,
            self.origin.y + local.x * self.sin + local.y * self.cos,
        )
    }

    /// Map an axis-aligned local rectangle to its four transformed corners
    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> [Point; 4] {
        [
            self.apply(Point::new(x, y)),
            self.apply(Point::new(x + w, y)),
            self.apply(Point::new(x + w, y + h)),
            self.apply(Point::new(x, y + h)),
        ]
    }
}

/// Vertices of a regular polygon with the given circumradius, first vertex
/// on the positive x axis of the local frame
pub fn regular_polygon(sides: u32, radius: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = (i as f64 / sides as f64) * std::f64::consts::TAU;
            Point::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}
