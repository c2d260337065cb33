//! Engine lifecycle: activation, the cooperative frame loop and teardown
//!
//! The engine never owns a timer. On `start` it registers one frame with
//! the host; every frame re-registers the next, and `stop` cancels whatever
//! is pending. Frame tokens make stale callbacks harmless: a callback whose
//! token is not the one currently pending is ignored.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{BackgroundConfig, normalize_url};
use crate::geometry::Size;
use crate::models::{Clock, ParticleModel, Scene};
use crate::surface::Surface;

/// Identifies one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// The dimmed image layer composited beneath the particles
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub url: String,
    pub image_opacity: f64,
    pub scrim_opacity: f64,
}

/// Services an engine consumes from its environment
pub trait Host {
    type Surface: Surface;

    /// Current viewport size in pixels
    fn viewport(&self) -> Size;

    /// Create a full-viewport drawing surface composited at `opacity`;
    /// `None` if none can be had
    fn acquire_surface(&mut self, size: Size, opacity: f64) -> Option<Self::Surface>;

    /// Give a surface back once the engine is done with it
    fn release_surface(&mut self, surface: Self::Surface);

    /// Ask for a callback on the next display refresh
    fn request_frame(&mut self) -> Option<FrameToken>;

    /// Withdraw a pending frame request
    fn cancel_frame(&mut self, token: FrameToken);

    /// Show, replace or (with `None`) remove the overlay layer
    fn show_overlay(&mut self, overlay: Option<&Overlay>);
}

/// Lifecycle position of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Running,
    TornDown,
}

/// Everything that lives exactly as long as one activation
struct Activation<S> {
    surface: S,
    scene: Scene,
    clock: Clock,
    pending: Option<FrameToken>,
    frames: u64,
}

/// Animated background bound to one host
pub struct BackgroundEngine<H: Host> {
    host: H,
    config: BackgroundConfig,
    state: EngineState,
    activation: Option<Activation<H::Surface>>,
    rng: SmallRng,
}

impl<H: Host> BackgroundEngine<H> {
    /// Create an idle engine; `seed` drives every random initial value
    pub fn new(host: H, config: BackgroundConfig, seed: u64) -> Self {
        Self {
            host,
            config,
            state: EngineState::Uninitialized,
            activation: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// The active particle model, if the engine is rendering
    pub fn scene(&self) -> Option<&Scene> {
        self.activation.as_ref().map(|a| &a.scene)
    }

    /// The surface being drawn on, if the engine is rendering
    pub fn surface(&self) -> Option<&H::Surface> {
        self.activation.as_ref().map(|a| &a.surface)
    }

    pub fn particle_count(&self) -> usize {
        self.scene().map_or(0, |s| s.particles().len())
    }

    /// Frames drawn since the current activation began
    pub fn frames_drawn(&self) -> u64 {
        self.activation.as_ref().map_or(0, |a| a.frames)
    }

    /// The token the next frame callback must carry
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.activation.as_ref().and_then(|a| a.pending)
    }

    /// Overlay layer described by the current configuration
    pub fn overlay(&self) -> Option<Overlay> {
        let layers = self.config.layers();
        self.config.overlay_image_url.as_ref().map(|url| Overlay {
            url: url.clone(),
            image_opacity: layers.overlay_image,
            scrim_opacity: layers.overlay_scrim,
        })
    }

    /// Acquire a surface, build the particle set and register the first frame.
    ///
    /// Does nothing if already running. Without a surface the engine still
    /// counts as running but draws nothing.
    pub fn start(&mut self) {
        if self.state == EngineState::Running {
            return;
        }
        self.state = EngineState::Running;
        self.refresh_overlay();

        let viewport = self.host.viewport();
        let opacity = self.config.layers().particle_layer;
        let Some(surface) = self.host.acquire_surface(viewport, opacity) else {
            tracing::debug!("no drawing surface available; background disabled");
            return;
        };

        let scene = Scene::build(
            self.config.style,
            self.config.dark_mode,
            surface.size(),
            &mut self.rng,
        );
        let pending = self.host.request_frame();
        tracing::debug!(
            style = %self.config.style,
            dark = self.config.dark_mode,
            particles = scene.particles().len(),
            "background started"
        );

        self.activation = Some(Activation {
            surface,
            scene,
            clock: Clock::default(),
            pending,
            frames: 0,
        });
    }

    /// Run one frame. Returns false if `token` is stale or nothing is active.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        let Some(act) = self.activation.as_mut() else {
            return false;
        };
        if act.pending != Some(token) {
            tracing::trace!(?token, "ignoring stale frame");
            return false;
        }

        act.clock.advance();
        let bounds = act.surface.size();
        act.scene.step(bounds, &act.clock);
        act.surface.clear();
        act.scene.draw(&mut act.surface);
        act.frames += 1;

        act.pending = self.host.request_frame();
        true
    }

    /// Track a viewport change; particles are not repositioned
    pub fn resize(&mut self, size: Size) {
        if let Some(act) = self.activation.as_mut() {
            tracing::debug!(width = size.width, height = size.height, "background resized");
            act.surface.resize(size);
        }
    }

    /// Cancel the pending frame, release the surface and remove the overlay
    pub fn stop(&mut self) {
        if self.state != EngineState::Running {
            return;
        }
        self.teardown();
        self.host.show_overlay(None);
    }

    /// Apply a new configuration.
    ///
    /// A style or mode change tears the simulation down and starts a new one;
    /// an overlay change only touches the overlay layer.
    pub fn reconfigure(&mut self, mut config: BackgroundConfig) {
        config.overlay_image_url = normalize_url(config.overlay_image_url.take());
        if self.state != EngineState::Running {
            self.config = config;
            return;
        }

        if self.config.requires_rebuild(&config) {
            self.teardown();
            self.config = config;
            self.start();
        } else if self.config.overlay_image_url != config.overlay_image_url {
            self.config = config;
            self.refresh_overlay();
        }
    }

    /// Show, replace or clear the overlay without touching the simulation
    pub fn set_overlay(&mut self, url: Option<String>) {
        let next = BackgroundConfig {
            overlay_image_url: url,
            ..self.config.clone()
        };
        self.reconfigure(next);
    }

    fn teardown(&mut self) {
        if let Some(act) = self.activation.take() {
            if let Some(token) = act.pending {
                self.host.cancel_frame(token);
            }
            self.host.release_surface(act.surface);
            tracing::debug!(frames = act.frames, "background torn down");
        }
        self.state = EngineState::TornDown;
    }

    fn refresh_overlay(&mut self) {
        let overlay = self.overlay();
        self.host.show_overlay(overlay.as_ref());
    }
}

impl<H: Host> Drop for BackgroundEngine<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::headless::HeadlessHost;
    use crate::style::BackgroundStyle;

    const VIEWPORT: Size = Size::new(1280.0, 720.0);

    fn engine(style: BackgroundStyle, dark: bool) -> BackgroundEngine<HeadlessHost> {
        BackgroundEngine::new(
            HeadlessHost::recording(VIEWPORT),
            BackgroundConfig::new(style, dark),
            7,
        )
    }

    #[test]
    fn starts_uninitialized_and_idle() {
        let engine = engine(BackgroundStyle::Tech, true);
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert_eq!(engine.particle_count(), 0);
        assert!(engine.host().scheduled().is_none());
    }

    #[test]
    fn start_builds_scene_and_schedules_a_frame() {
        for style in BackgroundStyle::ALL {
            let mut engine = engine(style, false);
            engine.start();
            assert_eq!(engine.state(), EngineState::Running);
            assert_eq!(engine.particle_count(), style.particle_count());
            assert!(engine.host().scheduled().is_some());
            assert_eq!(engine.surface().unwrap().size(), VIEWPORT);
        }
    }

    #[test]
    fn each_frame_schedules_the_next() {
        let mut engine = engine(BackgroundStyle::Geometric, true);
        engine.start();
        assert_eq!(engine.pump_frames(10), 10);
        assert_eq!(engine.frames_drawn(), 10);
        assert_eq!(engine.host().tally().clears, 10);
        assert!(engine.pending_frame().is_some());
    }

    #[test]
    fn starting_twice_keeps_the_same_activation() {
        let mut engine = engine(BackgroundStyle::Tech, true);
        engine.start();
        engine.pump_frames(3);
        engine.start();
        assert_eq!(engine.frames_drawn(), 3);
        assert_eq!(engine.host().live_surfaces(), 1);
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut engine = engine(BackgroundStyle::Tech, true);
        engine.start();
        let first = engine.pending_frame().unwrap();
        assert!(engine.pump());
        assert!(!engine.on_frame(first));
        assert_eq!(engine.frames_drawn(), 1);
    }

    #[test]
    fn stop_cancels_frame_and_releases_surface() {
        let mut engine = engine(BackgroundStyle::Circuit, true);
        engine.start();
        engine.pump_frames(5);
        let pending = engine.pending_frame().unwrap();

        engine.stop();
        assert_eq!(engine.state(), EngineState::TornDown);
        assert!(engine.host().cancelled().contains(&pending));
        assert!(engine.host().scheduled().is_none());
        assert_eq!(engine.host().live_surfaces(), 0);
        assert_eq!(engine.particle_count(), 0);
    }

    #[test]
    fn no_draw_calls_after_teardown() {
        let mut engine = engine(BackgroundStyle::Tech, false);
        engine.start();
        engine.pump_frames(4);
        let pending = engine.pending_frame().unwrap();
        engine.stop();

        let before = engine.host().tally();
        assert!(!engine.on_frame(pending));
        assert!(!engine.pump());
        assert_eq!(engine.host().tally(), before);
    }

    #[test]
    fn style_switch_discards_previous_particles() {
        let mut engine = engine(BackgroundStyle::Tech, true);
        engine.start();
        engine.pump_frames(2);
        assert_eq!(engine.particle_count(), 80);

        engine.reconfigure(BackgroundConfig::new(BackgroundStyle::Circuit, true));
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.particle_count(), 20);
        assert_eq!(engine.scene().unwrap().style(), BackgroundStyle::Circuit);
        assert_eq!(engine.frames_drawn(), 0);
        assert_eq!(engine.host().live_surfaces(), 1);
        assert_eq!(engine.host().cancelled().len(), 1);
    }

    #[test]
    fn mode_switch_rebuilds_with_new_palette() {
        let mut engine = engine(BackgroundStyle::Minimal, true);
        engine.start();
        engine.reconfigure(BackgroundConfig::new(BackgroundStyle::Minimal, false));
        let light = crate::palette::Palette::for_style(BackgroundStyle::Minimal, false).primary();
        assert!(engine.scene().unwrap().particles().iter().all(|p| p.color == light));
        assert_eq!(engine.host().cancelled().len(), 1);
    }

    #[test]
    fn overlay_change_keeps_the_simulation() {
        let mut engine = engine(BackgroundStyle::Creative, true);
        engine.start();
        engine.pump_frames(3);
        let before = engine.scene().unwrap().particles().to_vec();

        engine.set_overlay(Some("/wallpaper.jpg".to_string()));
        assert_eq!(engine.frames_drawn(), 3);
        assert_eq!(engine.scene().unwrap().particles(), &before[..]);
        assert!(engine.host().cancelled().is_empty());

        let overlay = engine.host().overlay().unwrap();
        assert_eq!(overlay.url, "/wallpaper.jpg");
        assert_eq!(overlay.image_opacity, 0.1);
        assert_eq!(overlay.scrim_opacity, 0.9);

        engine.set_overlay(None);
        assert!(engine.host().overlay().is_none());
        assert_eq!(engine.frames_drawn(), 3);
    }

    #[test]
    fn overlay_survives_style_switch_and_is_removed_on_stop() {
        let mut engine = engine(BackgroundStyle::Tech, false);
        engine.set_overlay(Some("/a.png".to_string()));
        assert!(engine.host().overlay().is_none());

        engine.start();
        assert_eq!(engine.host().overlay().unwrap().image_opacity, 0.15);

        engine.reconfigure(BackgroundConfig::new(BackgroundStyle::Business, true).with_overlay(Some("/a.png")));
        assert_eq!(engine.host().overlay().unwrap().image_opacity, 0.1);

        engine.stop();
        assert!(engine.host().overlay().is_none());
    }

    #[test]
    fn reconfigure_while_idle_only_stores_config() {
        let mut engine = engine(BackgroundStyle::Tech, true);
        engine.reconfigure(BackgroundConfig::new(BackgroundStyle::Minimal, true));
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert!(engine.host().scheduled().is_none());
        engine.start();
        assert_eq!(engine.particle_count(), 30);
    }

    #[test]
    fn restart_after_teardown_builds_fresh_particles() {
        let mut engine = engine(BackgroundStyle::Business, true);
        engine.start();
        engine.pump_frames(20);
        engine.stop();
        engine.start();
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.particle_count(), 60);
        assert_eq!(engine.frames_drawn(), 0);
    }

    #[test]
    fn missing_surface_is_a_silent_no_op() {
        let mut host = HeadlessHost::recording(VIEWPORT);
        host.refuse_surfaces();
        let mut engine = BackgroundEngine::new(host, BackgroundConfig::default(), 1);
        engine.start();
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.particle_count(), 0);
        assert!(engine.host().scheduled().is_none());
        assert!(!engine.pump());
        assert_eq!(engine.host().tally().primitives(), 0);
        engine.stop();
        assert_eq!(engine.state(), EngineState::TornDown);
    }

    #[test]
    fn resize_follows_viewport_without_moving_particles() {
        let mut engine = engine(BackgroundStyle::Tech, true);
        engine.start();
        let before = engine.scene().unwrap().particles().to_vec();
        engine.resize(Size::new(640.0, 360.0));
        assert_eq!(engine.surface().unwrap().size(), Size::new(640.0, 360.0));
        assert_eq!(engine.scene().unwrap().particles(), &before[..]);

        engine.pump_frames(200);
        let bounds = Size::new(640.0, 360.0);
        assert!(engine.scene().unwrap().particles().iter().all(|p| bounds.contains(p.position)));
    }

    #[test]
    fn minimal_dark_scenario() {
        let mut engine = engine(BackgroundStyle::Minimal, true);
        engine.start();
        let particles = engine.scene().unwrap().particles();
        assert_eq!(particles.len(), 30);
        for p in particles {
            assert!(p.opacity >= 0.15 && p.opacity < 0.45);
            assert!(p.size >= 1.0 && p.size < 4.0);
        }

        assert_eq!(engine.pump_frames(1000), 1000);
        assert!(engine.scene().unwrap().particles().iter().all(|p| VIEWPORT.contains(p.position)));
        assert_eq!(engine.frames_drawn(), 1000);
        assert_eq!(engine.host().tally().clears, 1000);

        engine.stop();
        engine.pump_frames(10);
        assert_eq!(engine.host().tally().clears, 1000);
    }

    #[test]
    fn drop_cancels_pending_frame() {
        let mut engine = engine(BackgroundStyle::Tech, true);
        engine.start();
        let tally = engine.host().shared_tally();
        let token = engine.pending_frame().unwrap();
        let cancelled = engine.host().cancel_log();
        drop(engine);
        assert!(cancelled.borrow().contains(&token));
        assert_eq!(tally.borrow().clears, 0);
    }
}
