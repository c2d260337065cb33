//! Tech style: network nodes and data packets over a grid, with proximity
//! connectors between every pair of nearby particles.

use rand::Rng;

use super::{Clock, OpacityRange, Particle, ParticleModel, Shape, centered, pick, scatter, uniform};
use crate::geometry::{Point, Size};
use crate::palette::{Palette, Tint};
use crate::style::BackgroundStyle;
use crate::surface::{Paint, Surface};

/// Pairs closer than this are connected
pub const CONNECT_DISTANCE: f64 = 150.0;

const COUNT: usize = 80;
const GRID_SPACING: f64 = 50.0;
const SPEED_SPAN: f64 = 0.5;
const PACKET_SHARE: f64 = 0.3;
const OPACITY: OpacityRange = OpacityRange {
    dark: (0.2, 0.4),
    light: (0.1, 0.3),
};

/// Connector opacity for two particles `distance` apart.
///
/// Falls off linearly from `factor` at distance zero to nothing at
/// [`CONNECT_DISTANCE`]; `None` when the pair is too far apart.
pub fn connector_opacity(distance: f64, factor: f64) -> Option<f64> {
    (distance < CONNECT_DISTANCE).then(|| (CONNECT_DISTANCE - distance) / CONNECT_DISTANCE * factor)
}

/// A line to draw between two particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub opacity: f64,
}

#[derive(Debug, Clone)]
pub struct TechModel {
    particles: Vec<Particle>,
    palette: Palette,
}

impl TechModel {
    pub fn new<R: Rng + ?Sized>(dark: bool, bounds: Size, rng: &mut R) -> Self {
        let palette = Palette::for_style(BackgroundStyle::Tech, dark);
        let particles = (0..COUNT)
            .map(|_| {
                let position = scatter(rng, bounds);
                let velocity = Point::new(centered(rng, SPEED_SPAN), centered(rng, SPEED_SPAN));
                let size = uniform(rng, 1.0, 2.0);
                let opacity = OPACITY.sample(rng, dark);
                let color = pick(rng, &palette.accents);
                let shape = if rng.r#gen::<f64>() < PACKET_SHARE {
                    Shape::Packet
                } else {
                    Shape::Node
                };
                Particle {
                    velocity,
                    ..Particle::at(position, size, opacity, color, shape)
                }
            })
            .collect();

        Self { particles, palette }
    }

    /// Build from an explicit particle set (used to stage scenes in tests and previews)
    pub fn from_particles(particles: Vec<Particle>, dark: bool) -> Self {
        Self {
            particles,
            palette: Palette::for_style(BackgroundStyle::Tech, dark),
        }
    }

    /// All pairs within [`CONNECT_DISTANCE`], with their line opacity.
    ///
    /// This is a full pairwise pass: 3,160 pairs at the fixed 80 particles.
    pub fn connectors(&self) -> Vec<Connector> {
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.position.distance_to(b.position);
                if let Some(opacity) = connector_opacity(distance, self.palette.connector_factor) {
                    out.push(Connector {
                        from: i,
                        to: j,
                        opacity,
                    });
                }
            }
        }
        out
    }

    fn draw_grid(&self, surface: &mut dyn Surface, guide: Tint) {
        let Size { width, height } = surface.size();
        let paint = Paint::from_tint(guide, 1.0);
        let mut x = 0.0;
        while x < width {
            surface.stroke_line(Point::new(x, 0.0), Point::new(x, height), &paint);
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y < height {
            surface.stroke_line(Point::new(0.0, y), Point::new(width, y), &paint);
            y += GRID_SPACING;
        }
    }
}

impl ParticleModel for TechModel {
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
            self.draw_grid(surface, guide);
        }

        let line_color = self.palette.primary();
        let line_alpha = self.palette.connector_alpha;
        for c in self.connectors() {
            let paint = Paint::stroke(line_color, c.opacity * line_alpha, 1.0);
            surface.stroke_line(self.particles[c.from].position, self.particles[c.to].position, &paint);
        }

        for p in &self.particles {
            let paint = Paint::fill(p.color, p.opacity);
            match p.shape {
                Shape::Packet => surface.fill_rect(
                    p.position.offset(-p.size / 2.0, -p.size / 2.0),
                    Size::new(p.size, p.size),
                    &paint,
                ),
                _ => surface.fill_circle(p.position, p.size, &paint),
            }
        }
    }
}
