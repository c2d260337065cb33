//! 2D Canvas surface
//!
//! Draws engine primitives onto an HTML canvas through its 2D context.

use folioverse_engine::{Paint, Point, Size, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas-backed drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    /// Wrap a canvas element, sizing its backing store to `size`
    pub fn new(canvas: HtmlCanvasElement, size: Size) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {:?}", e))?
            .ok_or("2d context not available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let mut surface = Self { canvas, ctx, size };
        surface.resize(size);
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn trace(&self, points: &[Point]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        true
    }

    fn apply_stroke(&self, paint: &Paint) {
        self.ctx.set_stroke_style_str(&paint.color.to_css(paint.alpha));
        self.ctx.set_line_width(paint.line_width);
    }

    fn apply_fill(&self, paint: &Paint) {
        self.ctx.set_fill_style_str(&paint.color.to_css(paint.alpha));
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
        self.size = size;
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.stroke_path(&[from, to], paint);
    }

    fn stroke_path(&mut self, points: &[Point], paint: &Paint) {
        if self.trace(points) {
            self.apply_stroke(paint);
            self.ctx.stroke();
        }
    }

    fn stroke_polygon(&mut self, points: &[Point], paint: &Paint) {
        if self.trace(points) {
            self.ctx.close_path();
            self.apply_stroke(paint);
            self.ctx.stroke();
        }
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        if self.trace(points) {
            self.ctx.close_path();
            self.apply_fill(paint);
            self.ctx.fill();
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .ok();
        self.apply_fill(paint);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx.fill_rect(origin.x, origin.y, size.width, size.height);
    }
}
