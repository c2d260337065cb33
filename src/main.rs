use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use folioverse::gallery::{GalleryOptions, write_gallery};
use folioverse::prefs::{self, PrefsEdit};
use folioverse::render::{RenderOptions, render_svg};
use folioverse::server;
use folioverse_engine::{BackgroundStyle, Color, Size, ThemeMode, presets};
use tracing_subscriber::EnvFilter;

/// Preview studio for FolioVerse animated backgrounds.
#[derive(Parser)]
#[command(name = "folioverse")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the background presets
    Presets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a background headlessly and write the last frame as SVG
    Render {
        /// Background style (tech, business, creative, minimal, geometric, circuit)
        #[arg(short, long, default_value = "tech")]
        style: BackgroundStyle,

        /// Use dark-mode colors
        #[arg(long)]
        dark: bool,

        /// Number of frames to simulate before capturing
        #[arg(long, default_value = "60")]
        frames: usize,

        #[arg(long, default_value = "1280", value_parser = parse_extent)]
        width: f64,

        #[arg(long, default_value = "720", value_parser = parse_extent)]
        height: f64,

        /// Seed for the initial particle placement
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overlay image URL composited beneath the particles
        #[arg(long)]
        image: Option<String>,

        /// Page color as #rrggbb (defaults to the mode's page color)
        #[arg(long)]
        page: Option<Color>,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show or edit a preferences file (.json, .yaml, .yml)
    Prefs {
        /// Preferences file
        file: PathBuf,

        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Write an HTML gallery with a snapshot of every preset
    Gallery {
        /// Preferences file marking the current selection
        #[arg(short, long)]
        prefs: Option<PathBuf>,

        /// Output directory for the gallery
        #[arg(short, long, default_value = "gallery")]
        output: PathBuf,

        /// Frames simulated per snapshot
        #[arg(long, default_value = "90")]
        frames: usize,
    },
    /// Start the gallery preview server with hot reload
    Serve {
        /// Preferences file to watch
        #[arg(short, long)]
        prefs: PathBuf,

        /// Output directory for the gallery
        #[arg(short, long, default_value = "gallery")]
        output: PathBuf,

        /// Port to run the server on
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum PrefsAction {
    /// Print the preferences and the resolved engine configuration
    Show,
    /// Select a preset (clears any custom image)
    Preset { style: BackgroundStyle },
    /// Use a custom background image (resets the preset)
    Image { url: String },
    /// Remove the custom background image
    ClearImage,
    /// Set the theme: light, dark or system
    Theme { mode: ThemeMode },
}

impl PrefsAction {
    fn edit(&self) -> Option<PrefsEdit> {
        match self {
            PrefsAction::Show => None,
            PrefsAction::Preset { style } => Some(PrefsEdit::Preset(*style)),
            PrefsAction::Image { url } => Some(PrefsEdit::Image(url.clone())),
            PrefsAction::ClearImage => Some(PrefsEdit::ClearImage),
            PrefsAction::Theme { mode } => Some(PrefsEdit::Theme(*mode)),
        }
    }
}

/// Surface extents must be finite and positive
fn parse_extent(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a finite size in pixels greater than 0, got {s}"))
    }
}

fn list_presets(json: bool) -> anyhow::Result<()> {
    let presets = presets();
    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }
    for preset in presets {
        println!(
            "{:<10} {:<16} {} particles",
            preset.id,
            preset.name,
            preset.style.particle_count()
        );
    }
    Ok(())
}

fn edit_prefs(file: &Path, action: &PrefsAction) -> anyhow::Result<()> {
    let mut current = prefs::load_or_default(file)?;
    match action.edit() {
        None => {
            println!("{}", serde_json::to_string_pretty(&current)?);
            // `system` resolves to dark here
            let config = current.to_config(true);
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Some(edit) => {
            let changed = edit.apply(&mut current);
            prefs::save(file, &current)?;
            if changed {
                println!("Updated {}", file.display());
            } else {
                println!("No change to {}", file.display());
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Presets { json } => list_presets(json)?,
        Commands::Render {
            style,
            dark,
            frames,
            width,
            height,
            seed,
            image,
            page,
            output,
        } => {
            let svg = render_svg(&RenderOptions {
                style,
                dark,
                overlay_image: image,
                frames,
                size: Size::new(width, height),
                seed,
                page,
            });
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, svg)?;
            println!("Rendered {style} background to {}", output.display());
        }
        Commands::Prefs { file, action } => edit_prefs(&file, &action)?,
        Commands::Gallery {
            prefs: prefs_path,
            output,
            frames,
        } => {
            let current = match prefs_path {
                Some(path) => prefs::load_or_default(&path)?,
                None => Default::default(),
            };
            write_gallery(&current, &output, &GalleryOptions { frames, ..GalleryOptions::default() })?;
            println!("Generated gallery in {}", output.display());
        }
        Commands::Serve { prefs, output, port } => {
            server::serve(&prefs, &output, port, GalleryOptions::default()).await?;
        }
    }

    Ok(())
}
