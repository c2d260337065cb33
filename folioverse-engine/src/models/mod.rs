//! Particle models, one per background style
//!
//! Every style shares the same particle record and bounce kinematics; they
//! differ in how the initial set is drawn from random ranges and in how a
//! particle is painted. [`Scene`] is the tagged dispatch over the six
//! models, built from a style token by [`Scene::build`].

mod business;
mod circuit;
mod creative;
mod geometric;
mod minimal;
mod tech;

pub use business::BusinessModel;
pub use circuit::CircuitModel;
pub use creative::CreativeModel;
pub use geometric::GeometricModel;
pub use minimal::MinimalModel;
pub use tech::{CONNECT_DISTANCE, Connector, TechModel, connector_opacity};

use rand::Rng;

use crate::geometry::{Point, Size};
use crate::palette::Color;
use crate::style::BackgroundStyle;
use crate::surface::Surface;

/// Monotonic simulation clock advanced once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clock {
    ticks: u64,
}

impl Clock {
    /// Simulated seconds per frame (a 60 Hz display)
    pub const SECONDS_PER_TICK: f64 = 0.016;

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seconds(&self) -> f64 {
        self.ticks as f64 * Self::SECONDS_PER_TICK
    }
}

/// Sinusoidal opacity modulation: `sin(t * speed + phase) * amplitude + center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub speed: f64,
    pub phase: f64,
    pub center: f64,
    pub amplitude: f64,
}

impl Pulse {
    pub fn value_at(&self, t: f64) -> f64 {
        (t * self.speed + self.phase).sin() * self.amplitude + self.center
    }

    /// Length of one cycle in the unit of `t`
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.speed
    }
}

/// Shape family of a particle; determines its draw rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// tech: filled circle of radius `size`
    Node,
    /// tech: filled square of side `size`
    Packet,
    /// business: three ascending bars
    Chart,
    /// business: shaft with arrow head
    Arrow,
    /// business and minimal: small filled dot
    Dot,
    /// creative: filled triangle
    Triangle,
    /// creative: filled circle
    Circle,
    /// creative: filled square
    Square,
    /// geometric: outlined regular polygon
    Polygon { sides: u32 },
    /// circuit: stepped trace spanning `width` x `height`
    Trace { width: f64, height: f64 },
}

/// One simulation element
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    /// Scale of the shape in pixels; zero for traces, which carry their
    /// own extent in [`Shape::Trace`]
    pub size: f64,
    /// Opacity assigned at creation
    pub base_opacity: f64,
    /// Opacity used for the next draw (base modulated by any pulse)
    pub opacity: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub color: Color,
    pub shape: Shape,
    pub pulse: Option<Pulse>,
}

impl Particle {
    /// A motionless particle; models fill in the rest
    pub fn at(position: Point, size: f64, opacity: f64, color: Color, shape: Shape) -> Self {
        Self {
            position,
            velocity: Point::default(),
            size,
            base_opacity: opacity,
            opacity,
            rotation: 0.0,
            rotation_speed: 0.0,
            color,
            shape,
            pulse: None,
        }
    }

    /// Move by one step of velocity, bounce off the bounds and spin
    pub fn advance(&mut self, bounds: Size) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        reflect(&mut self.position.x, &mut self.velocity.x, bounds.width);
        reflect(&mut self.position.y, &mut self.velocity.y, bounds.height);
        self.rotation += self.rotation_speed;
    }
}

/// Bounce one axis: a coordinate outside `[0, extent]` is clamped to the
/// edge it crossed and its velocity is pointed back inside.
fn reflect(position: &mut f64, velocity: &mut f64, extent: f64) {
    let extent = extent.max(0.0);
    if *position < 0.0 {
        *position = 0.0;
        *velocity = velocity.abs();
    } else if *position > extent {
        *position = extent;
        *velocity = -velocity.abs();
    }
}

/// `lo + u * span` with `u` uniform in `[0, 1)`
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, span: f64) -> f64 {
    lo + rng.r#gen::<f64>() * span
}

/// Uniform in `[-span / 2, span / 2)`
pub(crate) fn centered<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.r#gen::<f64>() - 0.5) * span
}

/// Uniform position over the surface
pub(crate) fn scatter<R: Rng + ?Sized>(rng: &mut R, bounds: Size) -> Point {
    Point::new(uniform(rng, 0.0, bounds.width), uniform(rng, 0.0, bounds.height))
}

/// Random initial rotation in `[0, 2π)`
pub(crate) fn any_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    uniform(rng, 0.0, std::f64::consts::TAU)
}

/// Pick one item uniformly
pub(crate) fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// `(lo, span)` opacity ranges for dark and light mode
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpacityRange {
    pub dark: (f64, f64),
    pub light: (f64, f64),
}

impl OpacityRange {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, dark: bool) -> f64 {
        let (lo, span) = if dark { self.dark } else { self.light };
        uniform(rng, lo, span)
    }
}

/// Common capability of all particle models
pub trait ParticleModel {
    /// The live particle set
    fn particles(&self) -> &[Particle];

    /// Advance the simulation by one frame
    fn step(&mut self, bounds: Size, clock: &Clock);

    /// Paint the current state (the surface has already been cleared)
    fn draw(&self, surface: &mut dyn Surface);
}

/// The active particle model of an engine
#[derive(Debug, Clone)]
pub enum Scene {
    Tech(TechModel),
    Business(BusinessModel),
    Creative(CreativeModel),
    Minimal(MinimalModel),
    Geometric(GeometricModel),
    Circuit(CircuitModel),
}

impl Scene {
    /// Build a fresh particle set for `style`
    pub fn build<R: Rng + ?Sized>(
        style: BackgroundStyle,
        dark: bool,
        bounds: Size,
        rng: &mut R,
    ) -> Self {
        match style {
            BackgroundStyle::Tech => Scene::Tech(TechModel::new(dark, bounds, rng)),
            BackgroundStyle::Business => Scene::Business(BusinessModel::new(dark, bounds, rng)),
            BackgroundStyle::Creative => Scene::Creative(CreativeModel::new(dark, bounds, rng)),
            BackgroundStyle::Minimal => Scene::Minimal(MinimalModel::new(dark, bounds, rng)),
            BackgroundStyle::Geometric => Scene::Geometric(GeometricModel::new(dark, bounds, rng)),
            BackgroundStyle::Circuit => Scene::Circuit(CircuitModel::new(dark, bounds, rng)),
        }
    }

    pub fn style(&self) -> BackgroundStyle {
        match self {
            Scene::Tech(_) => BackgroundStyle::Tech,
            Scene::Business(_) => BackgroundStyle::Business,
            Scene::Creative(_) => BackgroundStyle::Creative,
            Scene::Minimal(_) => BackgroundStyle::Minimal,
            Scene::Geometric(_) => BackgroundStyle::Geometric,
            Scene::Circuit(_) => BackgroundStyle::Circuit,
        }
    }

    fn model(&self) -> &dyn ParticleModel {
        match self {
            Scene::Tech(m) => m,
            Scene::Business(m) => m,
            Scene::Creative(m) => m,
            Scene::Minimal(m) => m,
            Scene::Geometric(m) => m,
            Scene::Circuit(m) => m,
        }
    }

    fn model_mut(&mut self) -> &mut dyn ParticleModel {
        match self {
            Scene::Tech(m) => m,
            Scene::Business(m) => m,
            Scene::Creative(m) => m,
            Scene::Minimal(m) => m,
            Scene::Geometric(m) => m,
            Scene::Circuit(m) => m,
        }
    }
}

impl ParticleModel for Scene {
    fn particles(&self) -> &[Particle] {
        self.model().particles()
    }

    fn step(&mut self, bounds: Size, clock: &Clock) {
        self.model_mut().step(bounds, clock);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.model().draw(surface);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    pub fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }
}
