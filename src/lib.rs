#![cfg(target_arch = "wasm32")]
use lookback_core::{BodyModels, Timeline, TimelineError};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod lifecycle;
mod overlay;
mod render;
mod reveal;
mod scroll;
mod style;
mod view;

use constants::*;
use lifecycle::{action_for, LifecycleAction, OwnedListener, PageTransition, PAGE_TRANSITION_EVENTS};

/// Apply `data-max-phases` / `data-smoothing` overrides from the story
/// container on top of the authored timeline.
fn configure_timeline(container: &web::Element) -> Result<Timeline, TimelineError> {
    let mut timeline = Timeline::default();
    if let Some(max) = dom::data_f32(container, MAX_PHASES_ATTR) {
        timeline.max_phases = max;
    }
    if let Some(smoothing) = dom::data_f32(container, SMOOTHING_ATTR) {
        timeline.smoothing = smoothing;
    }
    timeline.validate()?;
    Ok(timeline)
}

type LifecycleListener = OwnedListener<web::Window, Closure<dyn FnMut(web::Event)>>;

/// Keep the view across back/forward cache round trips and drop it when the
/// page is discarded, which releases the scroll and resize listeners, reveal
/// observers and the frame loop in one place.
fn wire_page_lifecycle(window: &web::Window, view: view::StoryView) -> anyhow::Result<()> {
    let view = Rc::new(RefCell::new(Some(view)));
    let listener: Rc<RefCell<Option<LifecycleListener>>> = Rc::new(RefCell::new(None));

    let listener_slot = listener.clone();
    let on_transition = Closure::wrap(Box::new(move |ev: web::Event| {
        let persisted = ev
            .dyn_ref::<web::PageTransitionEvent>()
            .is_some_and(|e| e.persisted());
        let Some(transition) = PageTransition::from_event(&ev.type_(), persisted) else {
            return;
        };
        log::info!("[lifecycle] {:?}", transition);
        match action_for(transition) {
            LifecycleAction::Keep => {}
            LifecycleAction::Remeasure => {
                if let Some(view) = view.borrow().as_ref() {
                    view.remeasure();
                }
            }
            LifecycleAction::Unmount => {
                drop(view.borrow_mut().take());
                // this closure is executing; free it once the event has returned
                if let Some(own) = listener_slot.borrow_mut().take() {
                    spawn_local(async move { drop(own) });
                }
            }
        }
    }) as Box<dyn FnMut(web::Event)>);

    let own = OwnedListener::attach(window.clone(), &PAGE_TRANSITION_EVENTS, on_transition)
        .map_err(anyhow::Error::msg)?;
    *listener.borrow_mut() = Some(own);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lookback-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let container = document
        .get_element_by_id(STORY_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", STORY_ID))?;

    // Size the backing store before the surface is configured; the view
    // keeps it in sync from here on.
    dom::sync_canvas_backing_size(&canvas);

    let timeline = configure_timeline(&container).unwrap_or_else(|e| {
        log::error!("[timeline] invalid configuration ({e}); using authored defaults");
        Timeline::default()
    });

    // Without WebGPU the captions and reveals still run
    let models = BodyModels::default();
    let gpu = frame::init_gpu(&canvas, &models).await;

    let view =
        view::StoryView::mount(&window, &document, canvas, container, timeline, models, gpu)?;
    wire_page_lifecycle(&window, view)
}
