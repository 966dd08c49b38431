use crate::constants::{CAPTION_ATTR, OPACITY_EPSILON};
use crate::{dom, style};
use fnv::FnvHashMap;
use lookback_core::{CaptionId, FrameVisuals};
use wasm_bindgen::JsCast;
use web_sys as web;

struct CaptionNode {
    el: web::HtmlElement,
    applied: Option<f32>,
}

/// DOM captions layered over the canvas. Reads the same per-frame record as
/// the renderer and only writes styles that changed.
pub struct CaptionOverlay {
    nodes: FnvHashMap<CaptionId, CaptionNode>,
}

impl CaptionOverlay {
    /// Collect `[data-caption]` elements. Unknown names are logged and
    /// skipped; a caption with no element is simply not drawn.
    pub fn collect(document: &web::Document) -> Self {
        let mut nodes = FnvHashMap::default();
        let selector = format!("[{}]", CAPTION_ATTR);
        if let Ok(list) = document.query_selector_all(&selector) {
            for i in 0..list.length() {
                let Some(el) = list
                    .item(i)
                    .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
                else {
                    continue;
                };
                let name = dom::data_attr(&el, CAPTION_ATTR).unwrap_or_default();
                match name.parse::<CaptionId>() {
                    Ok(id) => {
                        nodes.insert(id, CaptionNode { el, applied: None });
                    }
                    Err(()) => log::warn!("[overlay] unknown caption '{}'", name),
                }
            }
        }
        for id in CaptionId::ALL {
            if !nodes.contains_key(&id) {
                log::warn!("[overlay] no element for caption '{}'", id);
            }
        }
        log::info!("[overlay] {} captions bound", nodes.len());
        Self { nodes }
    }

    pub fn apply(&mut self, visuals: &FrameVisuals) {
        for caption in &visuals.captions {
            let Some(node) = self.nodes.get_mut(&caption.id) else {
                continue;
            };
            if !style::opacity_changed(node.applied, caption.opacity, OPACITY_EPSILON) {
                continue;
            }
            dom::set_style(&node.el, "opacity", &style::opacity_value(caption.opacity));
            dom::set_style(&node.el, "visibility", style::visibility_value(caption.opacity));
            node.applied = Some(caption.opacity);
        }
    }
}
