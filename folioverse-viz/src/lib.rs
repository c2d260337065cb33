//! Browser bindings for the FolioVerse animated background
//!
//! This crate provides WASM bindings that mount the particle background
//! behind a page: a fixed full-viewport canvas driven by
//! `requestAnimationFrame`, plus the optional dimmed overlay image.

mod canvas2d;
mod host;

use std::cell::RefCell;
use std::rc::Rc;

use folioverse_engine::{BackgroundConfig, BackgroundEngine, Host, presets};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub use canvas2d::CanvasSurface;
pub use host::BrowserHost;

type SharedEngine = Rc<RefCell<BackgroundEngine<BrowserHost>>>;

/// Initialize WASM panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The six presets as a JSON array of `{id, name, style}`
#[wasm_bindgen(js_name = presetsJson)]
pub fn presets_json() -> Result<String, JsValue> {
    serde_json::to_string(&presets()).map_err(to_js)
}

/// Animated background handle exposed to JavaScript
#[wasm_bindgen]
pub struct AnimatedBackground {
    engine: SharedEngine,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl AnimatedBackground {
    /// Create an idle background from `{"style", "overlayImageUrl", "darkMode"}`
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<AnimatedBackground, JsValue> {
        let config = BackgroundConfig::from_json(config_json).map_err(to_js)?;
        let host = BrowserHost::new()?;
        let frame_slot = host.frame_slot();
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let engine: SharedEngine = Rc::new(RefCell::new(BackgroundEngine::new(host, config, seed)));

        // Weak: the host owns this closure through the frame slot
        let weak = Rc::downgrade(&engine);
        *frame_slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(engine) = weak.upgrade() {
                let mut engine = engine.borrow_mut();
                if let Some(token) = engine.pending_frame() {
                    engine.on_frame(token);
                }
            }
        }) as Box<dyn FnMut()>));

        Ok(Self {
            engine,
            on_resize: None,
        })
    }

    /// Mount the canvas and begin animating
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.engine.borrow_mut().start();
        if self.on_resize.is_none() {
            let weak = Rc::downgrade(&self.engine);
            let on_resize = Closure::wrap(Box::new(move || {
                if let Some(engine) = weak.upgrade() {
                    let mut engine = engine.borrow_mut();
                    let viewport = engine.host().viewport();
                    engine.resize(viewport);
                }
            }) as Box<dyn FnMut()>);
            self.engine
                .borrow()
                .host()
                .window()
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
            self.on_resize = Some(on_resize);
        }
        Ok(())
    }

    /// Cancel the pending frame and remove every layer from the page
    pub fn stop(&mut self) {
        self.engine.borrow_mut().stop();
        self.detach_resize();
    }

    /// Apply a new configuration JSON; style or mode changes restart the animation
    pub fn reconfigure(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = BackgroundConfig::from_json(config_json).map_err(to_js)?;
        self.engine.borrow_mut().reconfigure(config);
        Ok(())
    }

    /// Show, replace or (with `undefined`) remove the overlay image
    #[wasm_bindgen(js_name = setOverlay)]
    pub fn set_overlay(&mut self, url: Option<String>) {
        self.engine.borrow_mut().set_overlay(url);
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.engine.borrow().particle_count()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    /// Current configuration as JSON
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.engine.borrow().config()).map_err(to_js)
    }
}

impl AnimatedBackground {
    fn detach_resize(&mut self) {
        if let Some(on_resize) = self.on_resize.take() {
            self.engine
                .borrow()
                .host()
                .window()
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for AnimatedBackground {
    fn drop(&mut self) {
        self.detach_resize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_json_lists_every_style_in_order() {
        let json = presets_json().unwrap_or_default();
        let presets: serde_json::Value = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = presets
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["id"].as_str())
            .collect();
        assert_eq!(ids, ["tech", "business", "creative", "minimal", "geometric", "circuit"]);
    }
}
