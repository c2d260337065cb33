//! Minimal style: stationary dots whose opacity breathes slowly.

use rand::Rng;

use super::{Clock, OpacityRange, Particle, ParticleModel, Pulse, Shape, any_angle, scatter, uniform};
use crate::geometry::Size;
use crate::palette::Palette;
use crate::style::BackgroundStyle;
use crate::surface::{Paint, Surface};

const COUNT: usize = 30;
const OPACITY: OpacityRange = OpacityRange {
    dark: (0.15, 0.3),
    light: (0.1, 0.2),
};

#[derive(Debug, Clone)]
pub struct MinimalModel {
    particles: Vec<Particle>,
}

impl MinimalModel {
    pub fn new<R: Rng + ?Sized>(dark: bool, bounds: Size, rng: &mut R) -> Self {
        let color = Palette::for_style(BackgroundStyle::Minimal, dark).primary();
        let particles = (0..COUNT)
            .map(|_| {
                let position = scatter(rng, bounds);
                let size = uniform(rng, 1.0, 3.0);
                let opacity = OPACITY.sample(rng, dark);
                let pulse = Pulse {
                    speed: uniform(rng, 0.01, 0.02),
                    phase: any_angle(rng),
                    center: 0.5,
                    amplitude: 0.5,
                };
                Particle {
                    pulse: Some(pulse),
                    ..Particle::at(position, size, opacity, color, Shape::Dot)
                }
            })
            .collect();

        Self { particles }
    }
}

impl ParticleModel for MinimalModel {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Dots never move; only the pulse is re-evaluated against simulated seconds
    fn step(&mut self, bounds: Size, clock: &Clock) {
        let t = clock.seconds();
        for p in &mut self.particles {
            p.advance(bounds);
            if let Some(pulse) = p.pulse {
                p.opacity = p.base_opacity * pulse.value_at(t);
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            surface.fill_circle(p.position, p.size, &Paint::fill(p.color, p.opacity));
        }
    }
}
