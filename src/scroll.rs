use crate::constants::SCROLL_EVENTS;
use crate::dom;
use crate::lifecycle::OwnedListener;
use lookback_core::{ScrollProgress, ScrollTracker};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Passive scroll/resize listener that measures the story container and
/// publishes normalized progress for the frame loop to read.
///
/// The handler only writes the shared cell; it never touches poses. The
/// listeners are removed when this is dropped.
pub struct ScrollSubscription {
    listener: OwnedListener<web::Window, Closure<dyn FnMut()>>,
}

impl ScrollSubscription {
    pub fn attach(
        window: &web::Window,
        container: web::Element,
        max_phases: f32,
        progress: Rc<Cell<ScrollProgress>>,
    ) -> anyhow::Result<Self> {
        let win = window.clone();
        let mut tracker = ScrollTracker::new(max_phases);
        let mut on_scroll = move || {
            // a detached container has no meaningful rect
            if !container.is_connected() {
                return;
            }
            let top = container.get_bounding_client_rect().top() as f32;
            progress.set(tracker.update(top, dom::viewport_height(&win)));
        };
        // Initial measurement so a restored scroll position is honored
        on_scroll();

        let callback = Closure::wrap(Box::new(on_scroll) as Box<dyn FnMut()>);
        let listener = OwnedListener::attach(window.clone(), &SCROLL_EVENTS, callback)
            .map_err(anyhow::Error::msg)?;
        log::info!("[scroll] subscribed (max_phases={})", max_phases);
        Ok(Self { listener })
    }

    /// Measure now, outside of any scroll event.
    pub fn remeasure(&self) {
        let f: &js_sys::Function = self.listener.callback().as_ref().unchecked_ref();
        _ = f.call0(&JsValue::NULL);
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        log::info!("[scroll] unsubscribed");
    }
}
