//! Theme-aware colors for each background style
//!
//! Dark mode generally uses brighter hues and higher opacity so the
//! particles stay visible against a dark page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::style::BackgroundStyle;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgba()` string with the given alpha
    pub fn to_css(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = EngineError;

    /// Parse `#rrggbb` (the leading `#` is optional)
    fn from_str(s: &str) -> EngineResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| EngineError::InvalidColor(s.to_string()))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// A color paired with the opacity it is drawn at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub color: Color,
    pub alpha: f64,
}

impl Tint {
    pub const fn new(color: Color, alpha: f64) -> Self {
        Self { color, alpha }
    }
}

/// Color constants (dark variant first, light variant second)
pub mod colors {
    use super::Color;

    pub const TECH_BLUE: [Color; 2] = [Color::rgb(0x3b, 0x82, 0xf6), Color::rgb(0x1e, 0x40, 0xaf)];
    pub const TECH_CYAN: [Color; 2] = [Color::rgb(0x06, 0xb6, 0xd4), Color::rgb(0x08, 0x91, 0xb2)];

    pub const SLATE: [Color; 2] = [Color::rgb(0x64, 0x74, 0x8b), Color::rgb(0x47, 0x55, 0x69)];
    pub const SLATE_GUIDE: [Color; 2] = [Color::rgb(100, 116, 139), Color::rgb(71, 85, 105)];

    pub const CREATIVE_DARK: [Color; 5] = [
        Color::rgb(0xf5, 0x9e, 0x0b),
        Color::rgb(0xef, 0x44, 0x44),
        Color::rgb(0x8b, 0x5c, 0xf6),
        Color::rgb(0x06, 0xb6, 0xd4),
        Color::rgb(0x10, 0xb9, 0x81),
    ];
    pub const CREATIVE_LIGHT: [Color; 5] = [
        Color::rgb(0xd9, 0x77, 0x06),
        Color::rgb(0xdc, 0x26, 0x26),
        Color::rgb(0x7c, 0x3a, 0xed),
        Color::rgb(0x08, 0x91, 0xb2),
        Color::rgb(0x05, 0x96, 0x69),
    ];

    pub const GRAY: [Color; 2] = [Color::rgb(0x6b, 0x72, 0x80), Color::rgb(0x9c, 0xa3, 0xaf)];
    pub const INDIGO: [Color; 2] = [Color::rgb(0x4f, 0x46, 0xe5), Color::rgb(0x37, 0x30, 0xa3)];
    pub const TRACE_GREEN: [Color; 2] = [Color::rgb(0x00, 0xff, 0x88), Color::rgb(0x05, 0x96, 0x69)];
}

fn pick<const N: usize>(pair: &'static [Color; N], dark: bool) -> Color {
    if dark { pair[0] } else { pair[N - 1] }
}

/// Resolved colors for one style in one mode
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Colors particles are drawn with (chosen per particle when more than one)
    pub accents: Vec<Color>,
    /// Backdrop line color (tech grid, business guides)
    pub guide: Option<Tint>,
    /// Maximum connector opacity (tech only)
    pub connector_factor: f64,
    /// Alpha of the connector stroke color, applied on top of the
    /// distance falloff (tech only)
    pub connector_alpha: f64,
}

impl Palette {
    pub fn for_style(style: BackgroundStyle, dark: bool) -> Self {
        use colors::*;

        match style {
            BackgroundStyle::Tech => Self {
                accents: vec![pick(&TECH_BLUE, dark), pick(&TECH_CYAN, dark)],
                guide: Some(Tint::new(pick(&TECH_BLUE, dark), if dark { 0.15 } else { 0.1 })),
                connector_factor: if dark { 0.4 } else { 0.25 },
                connector_alpha: if dark { 0.25 } else { 0.15 },
            },
            BackgroundStyle::Business => Self {
                accents: vec![pick(&SLATE, dark)],
                guide: Some(Tint::new(pick(&SLATE_GUIDE, dark), if dark { 0.15 } else { 0.1 })),
                connector_factor: 0.0,
                connector_alpha: 0.0,
            },
            BackgroundStyle::Creative => Self {
                accents: if dark { CREATIVE_DARK.to_vec() } else { CREATIVE_LIGHT.to_vec() },
                guide: None,
                connector_factor: 0.0,
                connector_alpha: 0.0,
            },
            BackgroundStyle::Minimal => Self {
                accents: vec![pick(&GRAY, dark)],
                guide: None,
                connector_factor: 0.0,
                connector_alpha: 0.0,
            },
            BackgroundStyle::Geometric => Self {
                accents: vec![pick(&INDIGO, dark)],
                guide: None,
                connector_factor: 0.0,
                connector_alpha: 0.0,
            },
            BackgroundStyle::Circuit => Self {
                accents: vec![pick(&TRACE_GREEN, dark)],
                guide: None,
                connector_factor: 0.0,
                connector_alpha: 0.0,
            },
        }
    }

    /// The single accent for monochrome styles
    pub fn primary(&self) -> Color {
        self.accents[0]
    }
}

/// Opacity of the layers a host composites beneath page content
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerStyle {
    /// Whole-canvas opacity of the particle layer
    pub particle_layer: f64,
    /// Opacity of the custom overlay image
    pub overlay_image: f64,
    /// Opacity of the page-background scrim laid over the image
    pub overlay_scrim: f64,
}

impl LayerStyle {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                particle_layer: 0.5,
                overlay_image: 0.1,
                overlay_scrim: 0.9,
            }
        } else {
            Self {
                particle_layer: 0.4,
                overlay_image: 0.15,
                overlay_scrim: 0.85,
            }
        }
    }
}
