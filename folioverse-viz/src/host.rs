//! Browser host: full-viewport canvas, requestAnimationFrame and the overlay layer

use std::cell::RefCell;
use std::rc::Rc;

use folioverse_engine::{FrameToken, Host, Overlay, Size};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

use crate::canvas2d::CanvasSurface;

/// Shared slot for the frame callback, filled once the engine exists
pub type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

const CANVAS_STYLE: &str = "position:fixed;inset:0;width:100%;height:100%;z-index:-1;pointer-events:none;";
const LAYER_STYLE: &str = "position:fixed;inset:0;z-index:-2;pointer-events:none;";

/// Image plus the page-colored scrim that dims it
struct OverlayLayer {
    image: HtmlElement,
    scrim: HtmlElement,
}

pub struct BrowserHost {
    window: Window,
    document: Document,
    frame_slot: FrameSlot,
    overlay: Option<OverlayLayer>,
}

impl BrowserHost {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        Ok(Self {
            window,
            document,
            frame_slot: Rc::new(RefCell::new(None)),
            overlay: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn frame_slot(&self) -> FrameSlot {
        Rc::clone(&self.frame_slot)
    }

    fn create_layer(&self, style: &str) -> Result<HtmlElement, JsValue> {
        let el = self.document.create_element("div")?.dyn_into::<HtmlElement>()?;
        el.set_attribute("style", style)?;
        el.set_attribute("aria-hidden", "true")?;
        Ok(el)
    }

    fn mount_overlay(&self, overlay: &Overlay) -> Result<OverlayLayer, JsValue> {
        let body = self.document.body().ok_or("no body")?;
        let image = self.create_layer(LAYER_STYLE)?;
        let scrim = self.create_layer(LAYER_STYLE)?;
        scrim.style().set_property("background-color", "var(--background, Canvas)")?;
        body.prepend_with_node_1(&scrim)?;
        body.prepend_with_node_1(&image)?;

        let layer = OverlayLayer { image, scrim };
        update_overlay(&layer, overlay)?;
        Ok(layer)
    }

    fn mount_canvas(&self, size: Size, opacity: f64) -> Result<CanvasSurface, JsValue> {
        let body = self.document.body().ok_or("no body")?;
        let canvas = self
            .document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_attribute("style", CANVAS_STYLE)?;
        canvas.set_attribute("aria-hidden", "true")?;
        canvas.style().set_property("opacity", &opacity.to_string())?;
        body.prepend_with_node_1(&canvas)?;

        CanvasSurface::new(canvas.clone(), size).map_err(|e| {
            canvas.remove();
            JsValue::from_str(&e)
        })
    }
}

fn update_overlay(layer: &OverlayLayer, overlay: &Overlay) -> Result<(), JsValue> {
    let image = layer.image.style();
    image.set_property("background-image", &format!("url(\"{}\")", overlay.url.replace('"', "%22")))?;
    image.set_property("background-size", "cover")?;
    image.set_property("background-position", "center")?;
    image.set_property("opacity", &overlay.image_opacity.to_string())?;
    layer
        .scrim
        .style()
        .set_property("opacity", &overlay.scrim_opacity.to_string())
}

fn viewport_extent(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Host for BrowserHost {
    type Surface = CanvasSurface;

    fn viewport(&self) -> Size {
        Size::new(
            viewport_extent(self.window.inner_width()),
            viewport_extent(self.window.inner_height()),
        )
    }

    fn acquire_surface(&mut self, size: Size, opacity: f64) -> Option<CanvasSurface> {
        self.mount_canvas(size, opacity).ok()
    }

    fn release_surface(&mut self, surface: CanvasSurface) {
        surface.canvas().remove();
    }

    fn request_frame(&mut self) -> Option<FrameToken> {
        let slot = self.frame_slot.borrow();
        let callback = slot.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
            .map(|handle| FrameToken(handle as u64))
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.window.cancel_animation_frame(token.0 as i32).ok();
    }

    fn show_overlay(&mut self, overlay: Option<&Overlay>) {
        let Some(next) = overlay else {
            if let Some(layer) = self.overlay.take() {
                layer.image.remove();
                layer.scrim.remove();
            }
            return;
        };
        match &self.overlay {
            Some(layer) => {
                update_overlay(layer, next).ok();
            }
            None => self.overlay = self.mount_overlay(next).ok(),
        }
    }
}

