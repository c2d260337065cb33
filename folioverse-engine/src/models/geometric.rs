//! Geometric style: outlined regular polygons turning slowly.

use rand::Rng;

use super::{Clock, OpacityRange, Particle, ParticleModel, Shape, any_angle, centered, scatter, uniform};
use crate::geometry::{Placement, Point, Size, regular_polygon};
use crate::palette::Palette;
use crate::style::BackgroundStyle;
use crate::surface::{Paint, Surface};

const COUNT: usize = 40;
const SPEED_SPAN: f64 = 0.2;
const SPIN_SPAN: f64 = 0.01;
const OPACITY: OpacityRange = OpacityRange {
    dark: (0.1, 0.2),
    light: (0.05, 0.15),
};

#[derive(Debug, Clone)]
pub struct GeometricModel {
    particles: Vec<Particle>,
}

impl GeometricModel {
    pub fn new<R: Rng + ?Sized>(dark: bool, bounds: Size, rng: &mut R) -> Self {
        let color = Palette::for_style(BackgroundStyle::Geometric, dark).primary();
        let particles = (0..COUNT)
            .map(|_| {
                let position = scatter(rng, bounds);
                let velocity = Point::new(centered(rng, SPEED_SPAN), centered(rng, SPEED_SPAN));
                let size = uniform(rng, 15.0, 30.0);
                let opacity = OPACITY.sample(rng, dark);
                let rotation = any_angle(rng);
                let rotation_speed = centered(rng, SPIN_SPAN);
                let sides = rng.gen_range(3..=6);
                Particle {
                    velocity,
                    rotation,
                    rotation_speed,
                    ..Particle::at(position, size, opacity, color, Shape::Polygon { sides })
                }
            })
            .collect();

        Self { particles }
    }
}

impl ParticleModel for GeometricModel {
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
            let Shape::Polygon { sides } = p.shape else {
                continue;
            };
            let local = Placement::new(p.position, p.rotation);
            let outline: Vec<Point> = regular_polygon(sides, p.size / 2.0)
                .into_iter()
                .map(|v| local.apply(v))
                .collect();
            surface.stroke_polygon(&outline, &Paint::stroke(p.color, p.opacity, 1.0));
        }
    }
}
