//! folioverse-engine - Animated particle backgrounds for FolioVerse portfolio pages
//!
//! The engine owns the particle simulation and the start/frame/stop lifecycle.
//! Everything platform specific (surfaces, frame scheduling, the overlay
//! image layer) sits behind the [`Host`] and [`Surface`] traits, so the same
//! engine drives a browser canvas, an SVG renderer and the headless test host.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod models;
pub mod palette;
pub mod preferences;
pub mod style;
pub mod surface;

pub use config::{BackgroundConfig, ThemeMode};
pub use engine::{BackgroundEngine, EngineState, FrameToken, Host, Overlay};
pub use error::{EngineError, EngineResult};
pub use geometry::{Point, Size};
pub use headless::{DrawCounts, DrawOp, HeadlessHost, RecordingSurface};
pub use models::{Clock, Particle, ParticleModel, Scene};
pub use palette::{Color, LayerStyle, Palette};
pub use preferences::{BackgroundPreferences, PreferenceStore, SubscriptionId};
pub use style::{BackgroundStyle, Preset, presets};
pub use surface::{Paint, Surface};
