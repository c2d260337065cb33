//! Drawing surface abstraction
//!
//! A surface is the only thing the particle models draw into. Shapes arrive
//! already transformed into surface coordinates, so an implementation only
//! needs fills and strokes of simple primitives: a 2D canvas, an SVG
//! document and a call recorder all fit.

use crate::geometry::{Point, Size};
use crate::palette::{Color, Tint};

/// Stroke or fill attributes for one primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    /// Opacity in `[0, 1]`
    pub alpha: f64,
    /// Stroke width in pixels (ignored for fills)
    pub line_width: f64,
}

impl Paint {
    pub fn fill(color: Color, alpha: f64) -> Self {
        Self {
            color,
            alpha,
            line_width: 0.0,
        }
    }

    pub fn stroke(color: Color, alpha: f64, line_width: f64) -> Self {
        Self {
            color,
            alpha,
            line_width,
        }
    }

    pub fn from_tint(tint: Tint, line_width: f64) -> Self {
        Self::stroke(tint.color, tint.alpha, line_width)
    }
}

/// A destination for background frames
pub trait Surface {
    /// Current pixel dimensions
    fn size(&self) -> Size;

    /// Change the pixel dimensions (clears the contents)
    fn resize(&mut self, size: Size);

    /// Erase the whole surface; called once at the start of every frame
    fn clear(&mut self);

    /// Straight line segment
    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint);

    /// Open polyline through `points`
    fn stroke_path(&mut self, points: &[Point], paint: &Paint);

    /// Closed polygon outline
    fn stroke_polygon(&mut self, points: &[Point], paint: &Paint);

    /// Filled closed polygon
    fn fill_polygon(&mut self, points: &[Point], paint: &Paint);

    /// Filled circle
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Filled axis-aligned rectangle with top-left corner `origin`
    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint);
}
