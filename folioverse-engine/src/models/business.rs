//! Business style: slowly rotating bar-charts, arrows and dots drifting
//! over diagonal guide lines.

use rand::Rng;

use super::{Clock, OpacityRange, Particle, ParticleModel, Shape, any_angle, centered, pick, scatter, uniform};
use crate::geometry::{Placement, Point, Size};
use crate::palette::{Palette, Tint};
use crate::style::BackgroundStyle;
use crate::surface::{Paint, Surface};

const COUNT: usize = 60;
const GUIDE_SPACING: f64 = 100.0;
const SPEED_SPAN: f64 = 0.3;
const SPIN_SPAN: f64 = 0.02;
const OPACITY: OpacityRange = OpacityRange {
    dark: (0.1, 0.25),
    light: (0.05, 0.2),
};
const SHAPES: [Shape; 3] = [Shape::Chart, Shape::Arrow, Shape::Dot];

#[derive(Debug, Clone)]
pub struct BusinessModel {
    particles: Vec<Particle>,
    palette: Palette,
}

impl BusinessModel {
    pub fn new<R: Rng + ?Sized>(dark: bool, bounds: Size, rng: &mut R) -> Self {
        let palette = Palette::for_style(BackgroundStyle::Business, dark);
        let particles = (0..COUNT)
            .map(|_| {
                let position = scatter(rng, bounds);
                let velocity = Point::new(centered(rng, SPEED_SPAN), centered(rng, SPEED_SPAN));
                let size = uniform(rng, 5.0, 15.0);
                let opacity = OPACITY.sample(rng, dark);
                let rotation = any_angle(rng);
                let rotation_speed = centered(rng, SPIN_SPAN);
                let shape = pick(rng, &SHAPES);
                Particle {
                    velocity,
                    rotation,
                    rotation_speed,
                    ..Particle::at(position, size, opacity, palette.primary(), shape)
                }
            })
            .collect();

        Self { particles, palette }
    }

    /// Diagonal lines at 45°, one every 100px, sweeping the whole surface
    fn draw_guides(&self, surface: &mut dyn Surface, guide: Tint) {
        let Size { width, height } = surface.size();
        let paint = Paint::from_tint(guide, 1.0);
        let mut x = -height;
        while x < width {
            surface.stroke_line(Point::new(x, 0.0), Point::new(x + height, height), &paint);
            x += GUIDE_SPACING;
        }
    }
}

fn draw_particle(surface: &mut dyn Surface, p: &Particle) {
    let local = Placement::new(p.position, p.rotation);
    match p.shape {
        Shape::Chart => {
            let paint = Paint::fill(p.color, p.opacity);
            for i in 0..3 {
                let height = (i + 1) as f64 * 3.0;
                let bar = local.rect(i as f64 * 4.0 - 6.0, -height, 3.0, height);
                surface.fill_polygon(&bar, &paint);
            }
        }
        Shape::Arrow => {
            let paint = Paint::stroke(p.color, p.opacity, 2.0);
            let half = p.size / 2.0;
            surface.stroke_line(
                local.apply(Point::new(-half, 0.0)),
                local.apply(Point::new(half, 0.0)),
                &paint,
            );
            let head = [
                local.apply(Point::new(half - 5.0, -3.0)),
                local.apply(Point::new(half, 0.0)),
                local.apply(Point::new(half - 5.0, 3.0)),
            ];
            surface.stroke_path(&head, &paint);
        }
        _ => {
            let paint = Paint::fill(p.color, p.opacity);
            surface.fill_circle(p.position, p.size / 4.0, &paint);
        }
    }
}

impl ParticleModel for BusinessModel {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn step(&mut self, bounds: Size, _clock: &Clock) {
        for p in &mut self.particles {
            p.advance(bounds);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if let Some(guide) = self.palette.guide {
            self.draw_guides(surface, guide);
        }
        for p in &self.particles {
            draw_particle(surface, p);
        }
    }
}
