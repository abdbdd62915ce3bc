#![cfg(target_arch = "wasm32")]
//! WASM entry point wiring the constellation-field engine to the page canvas.

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

use app_core::FieldEngine;
use frame::{FrameContext, RunFlags, Signals};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("constellation canvas starting");

    if let Err(e) = init() {
        log::error!("init error: {e:?}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window document"))?;

    // A missing or context-less surface is a silent no-op: render nothing,
    // schedule nothing.
    let canvas = match document.get_element_by_id(constants::CANVAS_ID) {
        Some(el) => el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {e:?}", constants::CANVAS_ID))?,
        None => {
            log::warn!("missing #{}; canvas disabled", constants::CANVAS_ID);
            return Ok(());
        }
    };
    let ctx2d = match canvas.get_context("2d") {
        Ok(Some(obj)) => obj
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("bad 2d context: {e:?}"))?,
        _ => {
            log::warn!("2d context unavailable; canvas disabled");
            return Ok(());
        }
    };

    let seed = js_sys::Date::now() as u64;
    let engine = Rc::new(RefCell::new(FieldEngine::new(seed)));
    let signals = Rc::new(RefCell::new(Signals::new()));

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        engine: engine.clone(),
        signals: signals.clone(),
        canvas: canvas.clone(),
        painter: render::Painter::new(ctx2d),
        size: (0.0, 0.0, 1.0),
        last_instant: now,
        start_instant: now,
    }));
    frame_ctx.borrow_mut().apply_resize();

    input::wire_pointer_handlers(&canvas, engine.clone());
    events::wire_global_keydown(engine.clone(), signals.clone());
    events::wire_dblclick(&canvas, engine);
    events::wire_scroll(signals);
    frame::wire_resize(frame_ctx.clone());

    let run = RunFlags::new();
    let tick = frame::start_loop(frame_ctx.clone(), run.clone());
    frame::wire_visibility(tick, run, frame_ctx, &canvas);

    log::info!("field loop started");
    Ok(())
}
