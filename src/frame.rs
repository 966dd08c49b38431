use crate::constants::MAX_FRAME_DT_SEC;
use crate::lifecycle::LoopSlot;
use crate::overlay::CaptionOverlay;
use crate::render;
use crate::reveal::{self, RevealBlock};
use instant::Instant;
use lookback_core::{BodyModels, Narrative, ScrollProgress};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct FrameContext {
    pub narrative: Narrative,
    pub progress: Rc<Cell<ScrollProgress>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub models: BodyModels,
    pub overlay: CaptionOverlay,
    pub reveals: Vec<RevealBlock>,
    pub epoch: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    /// One animation frame. Runs whether or not the page scrolled so the
    /// smoothed poses and idle spins keep converging.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let visuals = self.narrative.advance(self.progress.get());
        self.overlay.apply(&visuals);

        let now_ms = reveal::elapsed_ms(self.epoch);
        for block in &mut self.reveals {
            block.apply(now_ms);
        }

        if let Some(g) = &mut self.gpu {
            let max = self.narrative.timeline().max_phases;
            g.set_story_depth(visuals.progress / max);
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(dt_sec, &visuals, &self.models) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    models: &BodyModels,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, models).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to a running `requestAnimationFrame` loop. Dropping it stops the
/// loop and releases the frame context.
pub struct FrameLoop {
    slot: Rc<LoopSlot<Closure<dyn FnMut()>>>,
    ctx: Rc<RefCell<Option<FrameContext>>>,
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.slot.stop();
        // Outside a frame the context can go right away; otherwise the next
        // tick sees the flag and releases it. The callback itself is still
        // queued with the browser, so only the final tick frees it.
        if let Ok(mut slot) = self.ctx.try_borrow_mut() {
            slot.take();
        }
        log::info!("[frame] loop stopped");
    }
}

pub fn start_loop(frame_ctx: FrameContext) -> FrameLoop {
    let slot: Rc<LoopSlot<Closure<dyn FnMut()>>> = Rc::new(LoopSlot::default());
    let ctx = Rc::new(RefCell::new(Some(frame_ctx)));

    let slot_tick = slot.clone();
    let ctx_tick = ctx.clone();
    slot.install(Closure::wrap(Box::new(move || {
        if !slot_tick.is_running() {
            ctx_tick.borrow_mut().take();
            // this closure is executing; free it once the tick has returned
            if let Some(cb) = slot_tick.release() {
                spawn_local(async move { drop(cb) });
            }
            return;
        }
        if let Some(c) = ctx_tick.borrow_mut().as_mut() {
            c.frame();
        }
        if let Some(w) = web::window() {
            slot_tick.with_callback(|cb| {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            });
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        slot.with_callback(|cb| {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        });
    }
    FrameLoop { slot, ctx }
}
