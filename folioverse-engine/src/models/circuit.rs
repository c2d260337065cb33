//! Circuit style: stepped traces with node markers that pulse in place.

use rand::Rng;

use super::{Clock, OpacityRange, Particle, ParticleModel, Pulse, Shape, any_angle, scatter, uniform};
use crate::geometry::{Point, Size};
use crate::palette::Palette;
use crate::style::BackgroundStyle;
use crate::surface::{Paint, Surface};

const COUNT: usize = 20;
const NODE_RADIUS: f64 = 2.0;
const OPACITY: OpacityRange = OpacityRange {
    dark: (0.15, 0.4),
    light: (0.1, 0.25),
};

#[derive(Debug, Clone)]
pub struct CircuitModel {
    particles: Vec<Particle>,
}

impl CircuitModel {
    pub fn new<R: Rng + ?Sized>(dark: bool, bounds: Size, rng: &mut R) -> Self {
        let color = Palette::for_style(BackgroundStyle::Circuit, dark).primary();
        let particles = (0..COUNT)
            .map(|_| {
                let position = scatter(rng, bounds);
                let width = uniform(rng, 50.0, 100.0);
                let height = uniform(rng, 50.0, 100.0);
                let opacity = OPACITY.sample(rng, dark);
                let pulse = Pulse {
                    phase: any_angle(rng),
                    speed: uniform(rng, 0.01, 0.02),
                    center: 0.7,
                    amplitude: 0.3,
                };
                Particle {
                    pulse: Some(pulse),
                    ..Particle::at(position, 0.0, opacity, color, Shape::Trace { width, height })
                }
            })
            .collect();

        Self { particles }
    }
}

/// Corner points of a trace anchored at `origin`
pub fn trace_points(origin: Point, width: f64, height: f64) -> [Point; 6] {
    let (x, y) = (origin.x, origin.y);
    [
        Point::new(x, y),
        Point::new(x + width / 3.0, y),
        Point::new(x + width / 3.0, y + height / 3.0),
        Point::new(x + width * 2.0 / 3.0, y + height / 3.0),
        Point::new(x + width * 2.0 / 3.0, y + height * 2.0 / 3.0),
        Point::new(x + width, y + height * 2.0 / 3.0),
    ]
}

impl ParticleModel for CircuitModel {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The pulse phase advances by `speed` every tick
    fn step(&mut self, bounds: Size, clock: &Clock) {
        let t = clock.ticks() as f64;
        for p in &mut self.particles {
            p.advance(bounds);
            if let Some(pulse) = p.pulse {
                p.opacity = p.base_opacity * pulse.value_at(t);
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            let Shape::Trace { width, height } = p.shape else {
                continue;
            };
            let points = trace_points(p.position, width, height);
            surface.stroke_path(&points, &Paint::stroke(p.color, p.opacity, 1.0));

            let fill = Paint::fill(p.color, p.opacity);
            surface.fill_circle(points[2], NODE_RADIUS, &fill);
            surface.fill_circle(points[4], NODE_RADIUS, &fill);
        }
    }
}
