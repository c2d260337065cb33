//! Host and surface implementations that need no display
//!
//! `HeadlessHost` schedules frames into a single slot that the caller drains
//! with [`BackgroundEngine::pump`]; `RecordingSurface` keeps every draw call
//! so tests and offline renderers can inspect a frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{BackgroundEngine, FrameToken, Host, Overlay};
use crate::geometry::{Point, Size};
use crate::surface::{Paint, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line { from: Point, to: Point, paint: Paint },
    Path { points: Vec<Point>, paint: Paint },
    StrokedPolygon { points: Vec<Point>, paint: Paint },
    FilledPolygon { points: Vec<Point>, paint: Paint },
    Circle { center: Point, radius: f64, paint: Paint },
    Rect { origin: Point, size: Size, paint: Paint },
}

/// Draw calls by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawCounts {
    pub clears: usize,
    pub lines: usize,
    pub paths: usize,
    pub stroked_polygons: usize,
    pub filled_polygons: usize,
    pub circles: usize,
    pub rects: usize,
}

impl DrawCounts {
    /// Everything except clears
    pub fn primitives(&self) -> usize {
        self.lines + self.paths + self.stroked_polygons + self.filled_polygons + self.circles + self.rects
    }

    fn record(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Line { .. } => self.lines += 1,
            DrawOp::Path { .. } => self.paths += 1,
            DrawOp::StrokedPolygon { .. } => self.stroked_polygons += 1,
            DrawOp::FilledPolygon { .. } => self.filled_polygons += 1,
            DrawOp::Circle { .. } => self.circles += 1,
            DrawOp::Rect { .. } => self.rects += 1,
        }
    }
}

/// Surface that remembers the current frame's draw calls
#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    tally: Rc<RefCell<DrawCounts>>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self::with_tally(size, Rc::default())
    }

    fn with_tally(size: Size, tally: Rc<RefCell<DrawCounts>>) -> Self {
        Self {
            size,
            ops: Vec::new(),
            tally,
        }
    }

    /// Draw calls since the last clear
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Counts of the draw calls since the last clear
    pub fn counts(&self) -> DrawCounts {
        let mut counts = DrawCounts::default();
        for op in &self.ops {
            counts.record(op);
        }
        counts
    }

    fn push(&mut self, op: DrawOp) {
        self.tally.borrow_mut().record(&op);
        self.ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.ops.clear();
    }

    fn clear(&mut self) {
        self.tally.borrow_mut().clears += 1;
        self.ops.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.push(DrawOp::Line { from, to, paint: *paint });
    }

    fn stroke_path(&mut self, points: &[Point], paint: &Paint) {
        self.push(DrawOp::Path {
            points: points.to_vec(),
            paint: *paint,
        });
    }

    fn stroke_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.push(DrawOp::StrokedPolygon {
            points: points.to_vec(),
            paint: *paint,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.push(DrawOp::FilledPolygon {
            points: points.to_vec(),
            paint: *paint,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.push(DrawOp::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint) {
        self.push(DrawOp::Rect {
            origin,
            size,
            paint: *paint,
        });
    }
}

type SurfaceFactory<S> = Box<dyn FnMut(Size) -> S>;

/// Host driven by explicit pumping instead of a display refresh
pub struct HeadlessHost<S = RecordingSurface> {
    viewport: Size,
    factory: Option<SurfaceFactory<S>>,
    live_surfaces: usize,
    next_token: u64,
    scheduled: Option<FrameToken>,
    cancelled: Rc<RefCell<Vec<FrameToken>>>,
    overlay: Option<Overlay>,
    tally: Rc<RefCell<DrawCounts>>,
}

impl<S: Surface> HeadlessHost<S> {
    /// Host whose surfaces come from `factory`
    pub fn new(viewport: Size, factory: impl FnMut(Size) -> S + 'static) -> Self {
        Self {
            viewport,
            factory: Some(Box::new(factory)),
            live_surfaces: 0,
            next_token: 0,
            scheduled: None,
            cancelled: Rc::default(),
            overlay: None,
            tally: Rc::default(),
        }
    }

    /// Make every later surface request fail, as on a display without 2D support
    pub fn refuse_surfaces(&mut self) {
        self.factory = None;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// The frame waiting to run
    pub fn scheduled(&self) -> Option<FrameToken> {
        self.scheduled
    }

    /// Remove and return the frame waiting to run
    pub fn take_scheduled(&mut self) -> Option<FrameToken> {
        self.scheduled.take()
    }

    /// Every token the engine has withdrawn, oldest first
    pub fn cancelled(&self) -> Vec<FrameToken> {
        self.cancelled.borrow().clone()
    }

    /// Shared handle to the cancellation log; outlives the host
    pub fn cancel_log(&self) -> Rc<RefCell<Vec<FrameToken>>> {
        Rc::clone(&self.cancelled)
    }

    /// Surfaces handed out and not yet released
    pub fn live_surfaces(&self) -> usize {
        self.live_surfaces
    }

    /// The overlay currently shown
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Draw calls across every surface this host created
    pub fn tally(&self) -> DrawCounts {
        *self.tally.borrow()
    }

    /// Shared handle to the draw tally; outlives the host
    pub fn shared_tally(&self) -> Rc<RefCell<DrawCounts>> {
        Rc::clone(&self.tally)
    }
}

impl HeadlessHost<RecordingSurface> {
    /// Host handing out recording surfaces that feed [`HeadlessHost::tally`]
    pub fn recording(viewport: Size) -> Self {
        let tally: Rc<RefCell<DrawCounts>> = Rc::default();
        let shared = Rc::clone(&tally);
        let mut host = Self::new(viewport, move |size| RecordingSurface::with_tally(size, Rc::clone(&shared)));
        host.tally = tally;
        host
    }
}

impl<S: Surface> Host for HeadlessHost<S> {
    type Surface = S;

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn acquire_surface(&mut self, size: Size, _opacity: f64) -> Option<S> {
        let factory = self.factory.as_mut()?;
        self.live_surfaces += 1;
        Some(factory(size))
    }

    fn release_surface(&mut self, _surface: S) {
        self.live_surfaces = self.live_surfaces.saturating_sub(1);
    }

    fn request_frame(&mut self) -> Option<FrameToken> {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.scheduled = Some(token);
        Some(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.scheduled == Some(token) {
            self.scheduled = None;
        }
        self.cancelled.borrow_mut().push(token);
    }

    fn show_overlay(&mut self, overlay: Option<&Overlay>) {
        self.overlay = overlay.cloned();
    }
}

impl<S: Surface> BackgroundEngine<HeadlessHost<S>> {
    /// Run the scheduled frame, if any. Returns whether a frame was drawn.
    pub fn pump(&mut self) -> bool {
        match self.host_mut().take_scheduled() {
            Some(token) => self.on_frame(token),
            None => false,
        }
    }

    /// Pump up to `frames` frames; returns how many were drawn
    pub fn pump_frames(&mut self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.pump()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::colors;

    #[test]
    fn clear_resets_frame_but_not_tally() {
        let tally: Rc<RefCell<DrawCounts>> = Rc::default();
        let mut surface = RecordingSurface::with_tally(Size::new(10.0, 10.0), Rc::clone(&tally));
        let paint = Paint::fill(colors::GRAY[0], 1.0);
        surface.fill_circle(Point::new(1.0, 1.0), 1.0, &paint);
        surface.fill_rect(Point::new(0.0, 0.0), Size::new(2.0, 2.0), &paint);
        assert_eq!(surface.counts().primitives(), 2);

        surface.clear();
        assert!(surface.ops().is_empty());
        assert_eq!(tally.borrow().primitives(), 2);
        assert_eq!(tally.borrow().clears, 1);
    }

    #[test]
    fn tokens_are_unique_and_cancel_clears_slot() {
        let mut host = HeadlessHost::recording(Size::new(10.0, 10.0));
        let a = host.request_frame().unwrap();
        let b = host.request_frame().unwrap();
        assert_ne!(a, b);
        host.cancel_frame(a);
        assert_eq!(host.scheduled(), Some(b));
        host.cancel_frame(b);
        assert_eq!(host.scheduled(), None);
        assert_eq!(host.cancelled(), vec![a, b]);
    }

    #[test]
    fn refused_host_hands_out_nothing() {
        let mut host = HeadlessHost::recording(Size::new(10.0, 10.0));
        host.refuse_surfaces();
        assert!(host.acquire_surface(Size::new(10.0, 10.0), 0.5).is_none());
        assert_eq!(host.live_surfaces(), 0);
    }
}
