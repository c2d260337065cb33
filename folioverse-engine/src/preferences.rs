//! Background preferences owned by the host application
//!
//! Selecting a preset and uploading a custom image are mutually exclusive:
//! picking a preset clears the image, and setting an image resets the
//! preset to the default style. Changes reach engines through explicit
//! subscriptions on [`PreferenceStore`] instead of a global event channel.

use serde::{Deserialize, Serialize};

use crate::config::{BackgroundConfig, ThemeMode, normalize_url};
use crate::style::BackgroundStyle;

/// Persisted background choice for one portfolio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BackgroundPreferences {
    #[serde(default, deserialize_with = "crate::style::deserialize_lossy")]
    pub style: BackgroundStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_background: Option<String>,

    #[serde(default)]
    pub theme: ThemeMode,
}

impl BackgroundPreferences {
    /// Select a preset; any custom image is discarded
    pub fn choose_preset(&mut self, style: BackgroundStyle) -> bool {
        let changed = self.style != style || self.custom_background.is_some();
        self.style = style;
        self.custom_background = None;
        changed
    }

    /// Use a custom image; the preset selection resets to the default
    pub fn set_custom_background(&mut self, url: impl Into<String>) -> bool {
        let url = normalize_url(Some(url.into()));
        if url.is_none() {
            return self.clear_custom_background();
        }
        let changed = self.custom_background != url || self.style != BackgroundStyle::default();
        self.custom_background = url;
        self.style = BackgroundStyle::default();
        changed
    }

    /// Remove the custom image and return to the default preset
    pub fn clear_custom_background(&mut self) -> bool {
        self.choose_preset(BackgroundStyle::default())
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> bool {
        let changed = self.theme != theme;
        self.theme = theme;
        changed
    }

    /// The engine configuration these preferences describe
    pub fn to_config(&self, system_prefers_dark: bool) -> BackgroundConfig {
        BackgroundConfig {
            style: self.style,
            overlay_image_url: self.custom_background.clone(),
            dark_mode: self.theme.resolve(system_prefers_dark),
        }
    }
}

/// Handle returned by [`PreferenceStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&BackgroundConfig)>;

/// Preferences plus the observers that want to hear about changes
pub struct PreferenceStore {
    prefs: BackgroundPreferences,
    system_prefers_dark: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl PreferenceStore {
    pub fn new(prefs: BackgroundPreferences, system_prefers_dark: bool) -> Self {
        Self {
            prefs,
            system_prefers_dark,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn preferences(&self) -> &BackgroundPreferences {
        &self.prefs
    }

    /// Current resolved engine configuration
    pub fn config(&self) -> BackgroundConfig {
        self.prefs.to_config(self.system_prefers_dark)
    }

    /// Register an observer called with the new configuration after each change
    pub fn subscribe(&mut self, observer: impl FnMut(&BackgroundConfig) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn choose_preset(&mut self, style: BackgroundStyle) {
        self.update(|p| p.choose_preset(style));
    }

    pub fn set_custom_background(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.update(|p| p.set_custom_background(url));
    }

    pub fn clear_custom_background(&mut self) {
        self.update(|p| p.clear_custom_background());
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.update(|p| p.set_theme(theme));
    }

    /// Host reports a change of the operating system color scheme
    pub fn set_system_prefers_dark(&mut self, dark: bool) {
        if self.system_prefers_dark == dark {
            return;
        }
        let before = self.config();
        self.system_prefers_dark = dark;
        if self.config() != before {
            self.notify();
        }
    }

    /// Replace all preferences at once (e.g. after reloading from disk)
    pub fn replace(&mut self, prefs: BackgroundPreferences) {
        self.update(|p| {
            let changed = *p != prefs;
            *p = prefs;
            changed
        });
    }

    fn update(&mut self, change: impl FnOnce(&mut BackgroundPreferences) -> bool) {
        if change(&mut self.prefs) {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let config = self.config();
        tracing::debug!(style = %config.style, dark = config.dark_mode, "background preferences changed");
        for (_, observer) in &mut self.observers {
            observer(&config);
        }
    }
}
