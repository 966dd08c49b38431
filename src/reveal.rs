use crate::constants::*;
use crate::{dom, style};
use instant::Instant;
use lookback_core::constants::REVEAL_VIEW_THRESHOLD;
use lookback_core::{RevealOptions, RevealTrigger, TextReveal, UnitStyle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Milliseconds since `epoch` on the page's monotonic clock.
#[inline]
pub fn elapsed_ms(epoch: Instant) -> f64 {
    epoch.elapsed().as_secs_f64() * 1000.0
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// Fires a reveal the first time its element intersects the viewport, then
/// stops observing. Disconnects on drop if it never fired.
pub struct RevealObserver {
    observer: web::IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    fn observe(
        el: &web::Element,
        reveal: Rc<RefCell<TextReveal>>,
        epoch: Instant,
    ) -> Result<Self, JsValue> {
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web::IntersectionObserver| {
                let hit = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
                    .any(|e| e.is_intersecting());
                if hit {
                    reveal.borrow_mut().trigger(elapsed_ms(epoch));
                    observer.disconnect();
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_VIEW_THRESHOLD));
        let observer =
            web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(el);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// One `[data-reveal]` element, split into animated units.
pub struct RevealBlock {
    units: Vec<web::HtmlElement>,
    reveal: Rc<RefCell<TextReveal>>,
    _observer: Option<RevealObserver>,
    settled: bool,
}

impl RevealBlock {
    fn mount(
        document: &web::Document,
        el: web::HtmlElement,
        epoch: Instant,
    ) -> Result<Self, JsValue> {
        let options = RevealOptions::from_attributes(
            dom::data_attr(&el, REVEAL_ATTR).as_deref(),
            dom::data_attr(&el, REVEAL_DELAY_ATTR).as_deref(),
            dom::data_attr(&el, REVEAL_DURATION_ATTR).as_deref(),
            dom::data_attr(&el, REVEAL_TRIGGER_ATTR).as_deref(),
        );
        let text = el.text_content().unwrap_or_default();
        let reveal = TextReveal::new(&text, options);

        let units = if options.kind.is_trail() {
            el.set_text_content(None);
            let mut spans = Vec::with_capacity(reveal.units().len());
            for unit in reveal.units() {
                let span = document
                    .create_element("span")?
                    .dyn_into::<web::HtmlElement>()
                    .map_err(JsValue::from)?;
                span.set_text_content(Some(unit));
                dom::set_style(&span, "display", "inline-block");
                dom::set_style(&span, "white-space", "pre");
                el.append_child(&span)?;
                spans.push(span);
            }
            spans
        } else {
            vec![el.clone()]
        };

        let reveal = Rc::new(RefCell::new(reveal));
        let observer = match options.trigger {
            RevealTrigger::Immediate => {
                reveal.borrow_mut().trigger(elapsed_ms(epoch));
                None
            }
            RevealTrigger::OnView => Some(RevealObserver::observe(&el, reveal.clone(), epoch)?),
        };
        let block = Self {
            units,
            reveal,
            _observer: observer,
            settled: false,
        };
        block.write_all(|_| UnitStyle::from_state(options.kind));
        Ok(block)
    }

    fn write_all(&self, style_of: impl Fn(usize) -> UnitStyle) {
        for (i, unit) in self.units.iter().enumerate() {
            let s = style_of(i);
            dom::set_style(unit, "opacity", &style::opacity_value(s.opacity));
            dom::set_style(unit, "transform", &style::unit_transform(s.offset_y, s.scale));
        }
    }

    /// Write the current unit styles. A no-op before the trigger and after
    /// the last unit settles.
    pub fn apply(&mut self, now_ms: f64) {
        if self.settled {
            return;
        }
        let reveal = self.reveal.borrow();
        if !reveal.is_triggered() {
            return;
        }
        self.write_all(|i| reveal.unit_style(i, now_ms));
        if reveal.is_settled(now_ms) {
            log::debug!("[reveal] settled ({} units)", self.units.len());
            drop(reveal);
            self.settled = true;
        }
    }
}

/// Mount every `[data-reveal]` element in the document. Elements that fail to
/// mount are logged and left as authored.
pub fn mount_reveals(document: &web::Document, epoch: Instant) -> Vec<RevealBlock> {
    let selector = format!("[{}]", REVEAL_ATTR);
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return Vec::new();
    };
    let mut blocks = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        match RevealBlock::mount(document, el, epoch) {
            Ok(block) => blocks.push(block),
            Err(e) => log::warn!("[reveal] mount failed: {:?}", e),
        }
    }
    log::info!("[reveal] mounted {} blocks", blocks.len());
    blocks
}
