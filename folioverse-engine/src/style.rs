//! Background style selector and the preset catalog shown in settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// Which particle model and palette a background uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    /// Network nodes and data packets joined by proximity lines over a grid
    #[default]
    Tech,
    /// Mini bar-charts, arrows and dots drifting over diagonal guides
    Business,
    /// Rotating triangles, circles and squares in an accent palette
    Creative,
    /// Stationary pulsing dots
    Minimal,
    /// Rotating outlined polygons
    Geometric,
    /// Stepped trace paths with pulsing node markers
    Circuit,
}

impl BackgroundStyle {
    pub const ALL: [BackgroundStyle; 6] = [
        BackgroundStyle::Tech,
        BackgroundStyle::Business,
        BackgroundStyle::Creative,
        BackgroundStyle::Minimal,
        BackgroundStyle::Geometric,
        BackgroundStyle::Circuit,
    ];

    /// Wire token (`"tech"`, `"business"`, ...)
    pub fn token(&self) -> &'static str {
        match self {
            BackgroundStyle::Tech => "tech",
            BackgroundStyle::Business => "business",
            BackgroundStyle::Creative => "creative",
            BackgroundStyle::Minimal => "minimal",
            BackgroundStyle::Geometric => "geometric",
            BackgroundStyle::Circuit => "circuit",
        }
    }

    /// Fixed number of particles for this style
    pub fn particle_count(&self) -> usize {
        match self {
            BackgroundStyle::Tech => 80,
            BackgroundStyle::Business => 60,
            BackgroundStyle::Creative => 50,
            BackgroundStyle::Minimal => 30,
            BackgroundStyle::Geometric => 40,
            BackgroundStyle::Circuit => 20,
        }
    }

    /// Human-readable name used by the settings panel
    pub fn display_name(&self) -> &'static str {
        match self {
            BackgroundStyle::Tech => "Tech Grid",
            BackgroundStyle::Business => "Business Lines",
            BackgroundStyle::Creative => "Creative Shapes",
            BackgroundStyle::Minimal => "Minimal Dots",
            BackgroundStyle::Geometric => "Geometric",
            BackgroundStyle::Circuit => "Circuit Board",
        }
    }

    /// Parse a token, falling back to [`BackgroundStyle::Tech`] for anything unknown
    pub fn from_token_lossy(token: &str) -> Self {
        token.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to the tech background");
            BackgroundStyle::default()
        })
    }
}

impl fmt::Display for BackgroundStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for BackgroundStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let token = s.trim();
        BackgroundStyle::ALL
            .into_iter()
            .find(|style| style.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| EngineError::UnknownStyle(s.to_string()))
    }
}

/// Serde helper: deserialize a style token, mapping unknown tokens to tech
pub fn deserialize_lossy<'de, D>(deserializer: D) -> Result<BackgroundStyle, D::Error>
where
    D: Deserializer<'de>,
{
    let token = String::deserialize(deserializer)?;
    Ok(BackgroundStyle::from_token_lossy(&token))
}

/// A selectable entry in the background settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub style: BackgroundStyle,
}

/// The built-in presets, in display order
pub fn presets() -> Vec<Preset> {
    BackgroundStyle::ALL
        .into_iter()
        .map(|style| Preset {
            id: style.token(),
            name: style.display_name(),
            style,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_token() {
        for style in BackgroundStyle::ALL {
            assert_eq!(style.token().parse::<BackgroundStyle>().unwrap(), style);
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(
            " Circuit ".parse::<BackgroundStyle>().unwrap(),
            BackgroundStyle::Circuit
        );
    }

    #[test]
    fn unknown_token_is_an_error_strictly() {
        let err = "vaporwave".parse::<BackgroundStyle>().unwrap_err();
        assert_eq!(err.to_string(), "unknown background style: vaporwave");
    }

    #[test]
    fn unknown_token_falls_back_to_tech_lossily() {
        assert_eq!(
            BackgroundStyle::from_token_lossy("vaporwave"),
            BackgroundStyle::Tech
        );
        assert_eq!(BackgroundStyle::from_token_lossy(""), BackgroundStyle::Tech);
    }

    #[test]
    fn counts_match_each_style() {
        let counts: Vec<usize> = BackgroundStyle::ALL
            .iter()
            .map(|s| s.particle_count())
            .collect();
        assert_eq!(counts, vec![80, 60, 50, 30, 40, 20]);
    }

    #[test]
    fn serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&BackgroundStyle::Geometric).unwrap();
        assert_eq!(json, "\"geometric\"");
        let style: BackgroundStyle = serde_json::from_str("\"business\"").unwrap();
        assert_eq!(style, BackgroundStyle::Business);
    }

    #[test]
    fn presets_follow_display_order() {
        let names: Vec<&str> = presets().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "Tech Grid",
                "Business Lines",
                "Creative Shapes",
                "Minimal Dots",
                "Geometric",
                "Circuit Board"
            ]
        );
        assert!(presets().iter().all(|p| p.id == p.style.token()));
    }
}
