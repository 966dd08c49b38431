use crate::lifecycle::ListenerTarget;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window listeners are registered passive; none of ours call preventDefault.
impl<F: ?Sized> ListenerTarget<Closure<F>> for web::Window {
    fn listen(&self, event: &str, callback: &Closure<F>) -> Result<(), String> {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        self.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| format!("addEventListener({event}) failed: {e:?}"))
    }

    fn unlisten(&self, event: &str, callback: &Closure<F>) {
        _ = self.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// `window.innerHeight` in CSS pixels, or 0 when unavailable.
#[inline]
pub fn viewport_height(window: &web::Window) -> f32 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

#[inline]
pub fn data_attr(el: &web::Element, name: &str) -> Option<String> {
    el.get_attribute(name)
}

pub fn data_f32(el: &web::Element, name: &str) -> Option<f32> {
    let raw = el.get_attribute(name)?;
    match raw.trim().parse::<f32>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[dom] ignoring {}=\"{}\"", name, raw);
            None
        }
    }
}

/// Set an inline style property, ignoring failures on detached nodes.
#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}
