//! Engine configuration and theme resolution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::palette::LayerStyle;
use crate::style::{self, BackgroundStyle};

/// Everything an engine needs to know to render a background.
///
/// Keys are camelCase on the wire so a browser host can pass
/// `{"style": "tech", "overlayImageUrl": "...", "darkMode": true}` as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundConfig {
    #[serde(default, deserialize_with = "style::deserialize_lossy")]
    pub style: BackgroundStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_image_url: Option<String>,

    #[serde(default)]
    pub dark_mode: bool,
}

impl BackgroundConfig {
    pub fn new(style: BackgroundStyle, dark_mode: bool) -> Self {
        Self {
            style,
            overlay_image_url: None,
            dark_mode,
        }
    }

    /// Builder-style overlay setter; blank URLs count as no overlay
    pub fn with_overlay(mut self, url: Option<impl Into<String>>) -> Self {
        self.overlay_image_url = normalize_url(url.map(Into::into));
        self
    }

    /// Parse from the JSON a host hands over
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let mut config: BackgroundConfig = serde_json::from_str(json)?;
        config.overlay_image_url = normalize_url(config.overlay_image_url.take());
        Ok(config)
    }

    /// Whether moving from `self` to `next` needs a fresh simulation.
    ///
    /// Style and mode changes rebuild; overlay changes never do.
    pub fn requires_rebuild(&self, next: &BackgroundConfig) -> bool {
        self.style != next.style || self.dark_mode != next.dark_mode
    }

    /// Layer opacities for the current mode
    pub fn layers(&self) -> LayerStyle {
        LayerStyle::for_mode(self.dark_mode)
    }
}

pub(crate) fn normalize_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

/// User-facing theme choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
    /// Follow the operating system preference
    System,
}

impl ThemeMode {
    /// Resolve to a dark-mode flag given the system preference
    pub fn resolve(&self, system_prefers_dark: bool) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => system_prefers_dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        })
    }
}

impl FromStr for ThemeMode {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(EngineError::UnknownTheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_full_browser_config() {
        let config = BackgroundConfig::from_json(
            r#"{"style":"circuit","overlayImageUrl":"/bg.png","darkMode":true}"#,
        )
        .unwrap();
        assert_eq!(config.style, BackgroundStyle::Circuit);
        assert_eq!(config.overlay_image_url.as_deref(), Some("/bg.png"));
        assert!(config.dark_mode);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = BackgroundConfig::from_json("{}").unwrap();
        assert_eq!(config, BackgroundConfig::default());
        assert_eq!(config.style, BackgroundStyle::Tech);
    }

    #[test]
    fn unknown_style_becomes_tech() {
        let config = BackgroundConfig::from_json(r#"{"style":"neon"}"#).unwrap();
        assert_eq!(config.style, BackgroundStyle::Tech);
    }

    #[test]
    fn blank_overlay_is_dropped() {
        let config = BackgroundConfig::from_json(r#"{"overlayImageUrl":"  "}"#).unwrap();
        assert_eq!(config.overlay_image_url, None);

        let config = BackgroundConfig::new(BackgroundStyle::Minimal, false).with_overlay(Some(""));
        assert_eq!(config.overlay_image_url, None);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = BackgroundConfig::from_json("{style:").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let config = BackgroundConfig::new(BackgroundStyle::Tech, true).with_overlay(Some("/a.jpg"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"style":"tech","overlayImageUrl":"/a.jpg","darkMode":true}"#
        );
    }

    #[test]
    fn only_style_and_mode_force_a_rebuild() {
        let base = BackgroundConfig::new(BackgroundStyle::Tech, true);
        assert!(!base.requires_rebuild(&base.clone().with_overlay(Some("/x.png"))));
        assert!(base.requires_rebuild(&BackgroundConfig::new(BackgroundStyle::Tech, false)));
        assert!(base.requires_rebuild(&BackgroundConfig::new(BackgroundStyle::Minimal, true)));
    }

    #[test]
    fn theme_resolution() {
        assert!(!ThemeMode::Light.resolve(true));
        assert!(ThemeMode::Dark.resolve(false));
        assert!(ThemeMode::System.resolve(true));
        assert!(!ThemeMode::System.resolve(false));
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn theme_tokens_parse() {
        assert_eq!("System".parse::<ThemeMode>().unwrap(), ThemeMode::System);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
