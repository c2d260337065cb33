//! Headless rendering of a background to SVG

use folioverse_engine::{BackgroundConfig, BackgroundEngine, BackgroundStyle, Color, HeadlessHost, Size};

use crate::svg::{Backdrop, DARK_PAGE, LIGHT_PAGE, SvgSurface};

/// What to render and for how long
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub style: BackgroundStyle,
    pub dark: bool,
    pub overlay_image: Option<String>,
    pub frames: usize,
    pub size: Size,
    pub seed: u64,
    /// Page color override; defaults to the mode's page color
    pub page: Option<Color>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: BackgroundStyle::default(),
            dark: true,
            overlay_image: None,
            frames: 60,
            size: Size::new(1280.0, 720.0),
            seed: 42,
            page: None,
        }
    }
}

/// Run the engine for `options.frames` frames and return the last frame as SVG.
///
/// With zero frames the document holds only the backdrop.
pub fn render_svg(options: &RenderOptions) -> String {
    let config = BackgroundConfig::new(options.style, options.dark).with_overlay(options.overlay_image.clone());
    let host = HeadlessHost::new(options.size, SvgSurface::new);
    let mut engine = BackgroundEngine::new(host, config, options.seed);
    engine.start();
    let drawn = engine.pump_frames(options.frames);
    tracing::debug!(style = %options.style, frames = drawn, "rendered background");

    let backdrop = Backdrop {
        page: options.page.unwrap_or(if options.dark { DARK_PAGE } else { LIGHT_PAGE }),
        particle_opacity: engine.config().layers().particle_layer,
        overlay: engine.host().overlay().cloned(),
    };
    match engine.surface() {
        Some(surface) => surface.to_document(&backdrop),
        None => SvgSurface::new(options.size).to_document(&backdrop),
    }
}
