//! Creative style: colorful rotating triangles, circles and squares.

use rand::Rng;

use super::{Clock, OpacityRange, Particle, ParticleModel, Shape, any_angle, centered, pick, scatter, uniform};
use crate::geometry::{Placement, Point, Size};
use crate::palette::Palette;
use crate::style::BackgroundStyle;
use crate::surface::{Paint, Surface};

const COUNT: usize = 50;
const SPEED_SPAN: f64 = 0.4;
const SPIN_SPAN: f64 = 0.03;
const OPACITY: OpacityRange = OpacityRange {
    dark: (0.15, 0.4),
    light: (0.1, 0.25),
};
const SHAPES: [Shape; 3] = [Shape::Triangle, Shape::Circle, Shape::Square];

#[derive(Debug, Clone)]
pub struct CreativeModel {
    particles: Vec<Particle>,
}

impl CreativeModel {
    pub fn new<R: Rng + ?Sized>(dark: bool, bounds: Size, rng: &mut R) -> Self {
        let palette = Palette::for_style(BackgroundStyle::Creative, dark);
        let particles = (0..COUNT)
            .map(|_| {
                let position = scatter(rng, bounds);
                let velocity = Point::new(centered(rng, SPEED_SPAN), centered(rng, SPEED_SPAN));
                let size = uniform(rng, 10.0, 20.0);
                let opacity = OPACITY.sample(rng, dark);
                let color = pick(rng, &palette.accents);
                let rotation = any_angle(rng);
                let rotation_speed = centered(rng, SPIN_SPAN);
                let shape = pick(rng, &SHAPES);
                Particle {
                    velocity,
                    rotation,
                    rotation_speed,
                    ..Particle::at(position, size, opacity, color, shape)
                }
            })
            .collect();

        Self { particles }
    }
}

impl ParticleModel for CreativeModel {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn step(&mut self, bounds: Size, _clock: &Clock) {
        for p in &mut self.particles {
            p.advance(bounds);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            let paint = Paint::fill(p.color, p.opacity);
            let local = Placement::new(p.position, p.rotation);
            let half = p.size / 2.0;
            match p.shape {
                Shape::Triangle => {
                    let corners = [
                        local.apply(Point::new(0.0, -half)),
                        local.apply(Point::new(-half, half)),
                        local.apply(Point::new(half, half)),
                    ];
                    surface.fill_polygon(&corners, &paint);
                }
                Shape::Circle => surface.fill_circle(p.position, half, &paint),
                _ => surface.fill_polygon(&local.rect(-half, -half, p.size, p.size), &paint),
            }
        }
    }
}
