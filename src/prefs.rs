//! Preferences file loading and saving
//!
//! The file format is picked from the extension: `.json`, or `.yaml`/`.yml`.

use std::fs;
use std::path::Path;

use folioverse_engine::{BackgroundPreferences, BackgroundStyle, ThemeMode};
use thiserror::Error;

/// Errors that can occur while reading or writing a preferences file
#[derive(Error, Debug)]
pub enum PrefsError {
    /// The file extension is not one we can read
    #[error("unsupported preferences format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON preferences: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML preferences: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for preferences file operations
pub type PrefsResult<T> = Result<T, PrefsError>;

/// On-disk encodings for preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefsFormat {
    Json,
    Yaml,
}

impl PrefsFormat {
    pub fn from_path(path: &Path) -> PrefsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| PrefsError::UnknownExtension(path.display().to_string()))?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(PrefsFormat::Json),
            "yaml" | "yml" => Ok(PrefsFormat::Yaml),
            other => Err(PrefsError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn parse(&self, text: &str) -> PrefsResult<BackgroundPreferences> {
        Ok(match self {
            PrefsFormat::Json => serde_json::from_str(text)?,
            PrefsFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }

    pub fn serialize(&self, prefs: &BackgroundPreferences) -> PrefsResult<String> {
        Ok(match self {
            PrefsFormat::Json => serde_json::to_string_pretty(prefs)? + "\n",
            PrefsFormat::Yaml => serde_yaml::to_string(prefs)?,
        })
    }
}

/// Read preferences from `path`
pub fn load(path: &Path) -> PrefsResult<BackgroundPreferences> {
    let format = PrefsFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    format.parse(&text)
}

/// Read preferences from `path`, or the defaults if the file does not exist yet
pub fn load_or_default(path: &Path) -> PrefsResult<BackgroundPreferences> {
    let format = PrefsFormat::from_path(path)?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no preferences file, using defaults");
        return Ok(BackgroundPreferences::default());
    }
    format.parse(&fs::read_to_string(path)?)
}

/// Write preferences to `path`, creating parent directories as needed
pub fn save(path: &Path, prefs: &BackgroundPreferences) -> PrefsResult<()> {
    let format = PrefsFormat::from_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format.serialize(prefs)?)?;
    Ok(())
}

/// One change a user can make from the settings panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsEdit {
    Preset(BackgroundStyle),
    Image(String),
    ClearImage,
    Theme(ThemeMode),
}

impl PrefsEdit {
    /// Apply to `prefs`; returns whether anything changed
    pub fn apply(&self, prefs: &mut BackgroundPreferences) -> bool {
        match self {
            PrefsEdit::Preset(style) => prefs.choose_preset(*style),
            PrefsEdit::Image(url) => prefs.set_custom_background(url.as_str()),
            PrefsEdit::ClearImage => prefs.clear_custom_background(),
            PrefsEdit::Theme(theme) => prefs.set_theme(*theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> BackgroundPreferences {
        let mut prefs = BackgroundPreferences::default();
        prefs.set_custom_background("/uploads/me.jpg");
        prefs.set_theme(ThemeMode::System);
        prefs
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(PrefsFormat::from_path(Path::new("a.json")).unwrap(), PrefsFormat::Json);
        assert_eq!(PrefsFormat::from_path(Path::new("a.YML")).unwrap(), PrefsFormat::Yaml);
        assert_eq!(PrefsFormat::from_path(Path::new("a.yaml")).unwrap(), PrefsFormat::Yaml);
        assert!(matches!(
            PrefsFormat::from_path(Path::new("a.toml")),
            Err(PrefsError::UnsupportedFormat(ext)) if ext == "toml"
        ));
        assert!(matches!(
            PrefsFormat::from_path(Path::new("prefs")),
            Err(PrefsError::UnknownExtension(_))
        ));
    }

    #[test]
    fn saves_and_loads_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/prefs.json");
        save(&path, &sample()).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn saves_and_loads_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.yaml");
        save(&path, &sample()).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn json_uses_snake_case_keys() {
        let text = PrefsFormat::Json.serialize(&sample()).unwrap();
        assert!(text.contains("\"custom_background\": \"/uploads/me.jpg\""));
        assert!(text.contains("\"theme\": \"system\""));
        assert!(text.contains("\"style\": \"tech\""));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let prefs = load_or_default(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(prefs, BackgroundPreferences::default());
        assert_eq!(prefs.theme, ThemeMode::Dark);
    }

    #[test]
    fn missing_file_is_an_error_for_load() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load(&dir.path().join("absent.json")), Err(PrefsError::Io(_))));
    }

    #[test]
    fn unknown_style_in_file_falls_back_to_tech() {
        let prefs = PrefsFormat::Yaml.parse("style: neon\ntheme: light\n").unwrap();
        assert_eq!(prefs.style, BackgroundStyle::Tech);
        assert_eq!(prefs.theme, ThemeMode::Light);
    }

    #[test]
    fn malformed_yaml_is_reported() {
        assert!(matches!(PrefsFormat::Yaml.parse("theme: [oops"), Err(PrefsError::Yaml(_))));
    }

    #[test]
    fn edits_follow_settings_panel_rules() {
        let mut prefs = BackgroundPreferences::default();
        assert!(PrefsEdit::Preset(BackgroundStyle::Geometric).apply(&mut prefs));
        assert!(!PrefsEdit::Preset(BackgroundStyle::Geometric).apply(&mut prefs));

        assert!(PrefsEdit::Image("/a.png".into()).apply(&mut prefs));
        assert_eq!(prefs.style, BackgroundStyle::Tech);

        assert!(PrefsEdit::ClearImage.apply(&mut prefs));
        assert_eq!(prefs.custom_background, None);
        assert!(!PrefsEdit::ClearImage.apply(&mut prefs));

        assert!(PrefsEdit::Theme(ThemeMode::Light).apply(&mut prefs));
    }
}
