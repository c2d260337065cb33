//! Preset gallery: one SVG snapshot per preset and mode, indexed by an HTML page

use std::fs;
use std::path::Path;

use askama::Template;
use folioverse_engine::{BackgroundPreferences, BackgroundStyle, ThemeMode, presets};

use crate::render::{RenderOptions, render_svg};

/// One preset card on the gallery page
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub style: BackgroundStyle,
    pub id: &'static str,
    pub name: &'static str,
    pub particles: usize,
    pub dark_file: String,
    pub light_file: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "gallery.html")]
struct GalleryTemplate<'a> {
    entries: &'a [GalleryEntry],
    theme: String,
    custom_background: Option<&'a str>,
    /// Mode the selected preset is shown in first
    prefer_dark: bool,
}

/// Settings for snapshot generation
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryOptions {
    pub frames: usize,
    pub seed: u64,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self { frames: 90, seed: 42 }
    }
}

/// Build the entries for `prefs`, marking the selected preset
pub fn entries(prefs: &BackgroundPreferences) -> Vec<GalleryEntry> {
    presets()
        .into_iter()
        .map(|preset| GalleryEntry {
            style: preset.style,
            id: preset.id,
            name: preset.name,
            particles: preset.style.particle_count(),
            dark_file: format!("{}-dark.svg", preset.id),
            light_file: format!("{}-light.svg", preset.id),
            selected: preset.style == prefs.style,
        })
        .collect()
}

/// Render the gallery page HTML
pub fn render_index(prefs: &BackgroundPreferences, entries: &[GalleryEntry]) -> anyhow::Result<String> {
    let template = GalleryTemplate {
        entries,
        theme: prefs.theme.to_string(),
        custom_background: prefs.custom_background.as_deref(),
        prefer_dark: prefs.theme != ThemeMode::Light,
    };
    Ok(template.render()?)
}

/// Write `index.html` and every snapshot into `output_dir`
pub fn write_gallery(prefs: &BackgroundPreferences, output_dir: &Path, options: &GalleryOptions) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)?;

    let entries = entries(prefs);
    for entry in &entries {
        // The selected preset previews with the custom image, as on the live page
        let overlay_image = if entry.selected { prefs.custom_background.clone() } else { None };
        for (dark, file) in [(true, &entry.dark_file), (false, &entry.light_file)] {
            let svg = render_svg(&RenderOptions {
                style: entry.style,
                dark,
                overlay_image: overlay_image.clone(),
                frames: options.frames,
                seed: options.seed,
                ..RenderOptions::default()
            });
            fs::write(output_dir.join(file), svg)?;
        }
    }

    fs::write(output_dir.join("index.html"), render_index(prefs, &entries)?)?;
    tracing::info!(dir = %output_dir.display(), presets = entries.len(), "wrote gallery");
    Ok(())
}
