use crate::constants::CANVAS_RESIZE_EVENTS;
use crate::dom;
use crate::frame::{self, FrameContext, FrameLoop};
use crate::lifecycle::OwnedListener;
use crate::overlay::CaptionOverlay;
use crate::render::GpuState;
use crate::reveal;
use crate::scroll::ScrollSubscription;
use instant::Instant;
use lookback_core::{BodyModels, Narrative, ScrollProgress, Timeline};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use web_sys as web;

/// The mounted story: a scroll subscription feeding a frame loop.
///
/// Everything the page registered (listeners, observers, the animation
/// frame callback, GPU resources) is owned here and released on drop.
pub struct StoryView {
    canvas: web::HtmlCanvasElement,
    scroll: ScrollSubscription,
    _canvas_resize: OwnedListener<web::Window, Closure<dyn FnMut()>>,
    _frame_loop: FrameLoop,
}

impl StoryView {
    pub fn mount(
        window: &web::Window,
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
        container: web::Element,
        timeline: Timeline,
        models: BodyModels,
        gpu: Option<GpuState>,
    ) -> anyhow::Result<Self> {
        let max_phases = timeline.max_phases;
        let progress = Rc::new(Cell::new(ScrollProgress::ZERO));
        let scroll = ScrollSubscription::attach(window, container, max_phases, progress.clone())?;

        // Keep the canvas backing store at CSS size * devicePixelRatio
        let canvas_resize = {
            let canvas = canvas.clone();
            let on_resize = Closure::wrap(Box::new(move || {
                dom::sync_canvas_backing_size(&canvas);
            }) as Box<dyn FnMut()>);
            OwnedListener::attach(window.clone(), &CANVAS_RESIZE_EVENTS, on_resize)
                .map_err(anyhow::Error::msg)?
        };

        let epoch = Instant::now();
        let ctx = FrameContext {
            narrative: Narrative::new(timeline),
            progress,
            canvas: canvas.clone(),
            gpu,
            models,
            overlay: CaptionOverlay::collect(document),
            reveals: reveal::mount_reveals(document, epoch),
            epoch,
            last_instant: epoch,
        };
        let frame_loop = frame::start_loop(ctx);
        log::info!("[view] mounted");
        Ok(Self {
            canvas,
            scroll,
            _canvas_resize: canvas_resize,
            _frame_loop: frame_loop,
        })
    }

    /// Re-read layout after the page comes back from the back/forward cache.
    pub fn remeasure(&self) {
        dom::sync_canvas_backing_size(&self.canvas);
        self.scroll.remeasure();
        log::info!("[view] remeasured");
    }
}

impl Drop for StoryView {
    fn drop(&mut self) {
        log::info!("[view] unmounting");
    }
}
