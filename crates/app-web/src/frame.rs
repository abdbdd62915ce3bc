//! The per-frame scheduler: decaying signals, the animation-frame chain, and
//! its visibility/viewport suspension.

use crate::constants::{
    BURST_DECAY_PER_SEC, DT_MAX, PULSE_DECAY_PER_SEC, RESIZE_DEBOUNCE_MS, STAT_LINKS_ID,
    STAT_PARTICLES_ID,
};
use crate::dom;
use crate::render::Painter;
use app_core::{Backdrop, FieldEngine, FrameInput, Mode, Theme};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Decaying external signals plus the active presentation selectors.
pub struct Signals {
    pub mode: Mode,
    pub theme: Theme,
    pub backdrop: Backdrop,
    pub pulse: f32,
    pub burst: f32,
    pub scroll: f32,
}

impl Signals {
    pub fn new() -> Self {
        Self {
            mode: Mode::Calm,
            theme: Theme::Neutral,
            backdrop: Backdrop::Grid,
            pulse: 0.0,
            burst: 0.0,
            scroll: 0.0,
        }
    }

    pub fn decay(&mut self, dt: f32) {
        self.pulse = (self.pulse - PULSE_DECAY_PER_SEC * dt).max(0.0);
        self.burst = (self.burst - BURST_DECAY_PER_SEC * dt).max(0.0);
    }

    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            mode: self.mode,
            theme: self.theme,
            pulse: self.pulse,
            burst: self.burst,
            scroll: self.scroll,
        }
    }
}

/// Scheduler gate: frames keep flowing only while both visibility flags hold;
/// `scheduled` guards against duplicate concurrently-running chains.
pub struct RunFlags {
    pub visible: Cell<bool>,
    pub in_viewport: Cell<bool>,
    pub scheduled: Cell<bool>,
}

impl RunFlags {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            visible: Cell::new(true),
            in_viewport: Cell::new(true),
            scheduled: Cell::new(false),
        })
    }

    #[inline]
    pub fn should_run(&self) -> bool {
        self.visible.get() && self.in_viewport.get()
    }
}

pub struct FrameContext {
    pub engine: Rc<RefCell<FieldEngine>>,
    pub signals: Rc<RefCell<Signals>>,
    pub canvas: web::HtmlCanvasElement,
    pub painter: Painter,
    /// CSS width, CSS height, device pixel ratio.
    pub size: (f64, f64, f64),
    pub last_instant: Instant,
    pub start_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(DT_MAX);
        self.last_instant = now;

        // mid-layout surfaces skip the frame's work and retry next tick
        let (w, h, _) = self.size;
        if w <= 0.0 || h <= 0.0 || self.canvas.width() == 0 || self.canvas.height() == 0 {
            return;
        }

        let mut signals = self.signals.borrow_mut();
        signals.decay(dt);
        let input = signals.frame_input();
        let backdrop = signals.backdrop;
        drop(signals);

        let mut engine = self.engine.borrow_mut();
        let stats = engine.step(dt, &input);
        let elapsed = (now - self.start_instant).as_secs_f32();
        self.painter.render(&engine, &input, backdrop, elapsed, self.size);
        drop(engine);

        if let Some(doc) = dom::window_document() {
            dom::set_stat(&doc, STAT_PARTICLES_ID, stats.particles);
            dom::set_stat(&doc, STAT_LINKS_ID, stats.links);
        }
    }

    /// Forget the suspension gap so resume does not produce one huge step.
    pub fn reset_clock(&mut self) {
        self.last_instant = Instant::now();
    }

    pub fn apply_resize(&mut self) {
        let size = dom::sync_canvas_backing_size(&self.canvas);
        self.size = size;
        self.engine
            .borrow_mut()
            .resize(size.0 as f32, size.1 as f32, dom::is_mobile());
    }
}

pub type TickHandle = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &TickHandle) {
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}

/// Kick off the animation-frame chain. The chain stops rescheduling itself
/// when the run flags drop and is restarted through [`resume`].
pub fn start_loop(ctx: Rc<RefCell<FrameContext>>, run: Rc<RunFlags>) -> TickHandle {
    let tick: TickHandle = Rc::new(RefCell::new(None));
    let tick_inner = tick.clone();
    let run_inner = run.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !run_inner.should_run() {
            run_inner.scheduled.set(false);
            return;
        }
        ctx.borrow_mut().frame();
        request_frame(&tick_inner);
    }) as Box<dyn FnMut()>));
    run.scheduled.set(true);
    request_frame(&tick);
    tick
}

/// Restart the chain after a visibility or viewport gap; duplicate-safe.
pub fn resume(tick: &TickHandle, run: &RunFlags, ctx: &Rc<RefCell<FrameContext>>) {
    if run.scheduled.get() || !run.should_run() {
        return;
    }
    ctx.borrow_mut().reset_clock();
    run.scheduled.set(true);
    request_frame(tick);
}

/// Suspend on page hide and when the canvas scrolls out of the viewport;
/// resume cleanly when both conditions clear again.
pub fn wire_visibility(
    tick: TickHandle,
    run: Rc<RunFlags>,
    ctx: Rc<RefCell<FrameContext>>,
    canvas: &web::HtmlCanvasElement,
) {
    if let Some(document) = dom::window_document() {
        let tick_v = tick.clone();
        let run_v = run.clone();
        let ctx_v = ctx.clone();
        let doc_v = document.clone();
        let closure = Closure::wrap(Box::new(move || {
            run_v
                .visible
                .set(doc_v.visibility_state() == web::VisibilityState::Visible);
            resume(&tick_v, &run_v, &ctx_v);
        }) as Box<dyn FnMut()>);
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let observer_cb = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        if let Some(entry) = entries.get(0).dyn_ref::<web::IntersectionObserverEntry>() {
            run.in_viewport.set(entry.is_intersecting());
            resume(&tick, &run, &ctx);
        }
    }) as Box<dyn FnMut(js_sys::Array)>);
    match web::IntersectionObserver::new(observer_cb.as_ref().unchecked_ref()) {
        Ok(observer) => observer.observe(canvas),
        Err(e) => log::warn!("IntersectionObserver unavailable: {e:?}"),
    }
    observer_cb.forget();
}

/// Debounced resize: coalesce to one canvas/engine resize per quiet period.
pub fn wire_resize(ctx: Rc<RefCell<FrameContext>>) {
    let window = match web::window() {
        Some(w) => w,
        None => return,
    };
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let apply = Closure::wrap(Box::new(move || {
        ctx.borrow_mut().apply_resize();
    }) as Box<dyn FnMut()>);

    let window_inner = window.clone();
    let on_resize = Closure::wrap(Box::new(move || {
        if let Some(handle) = pending.take() {
            window_inner.clear_timeout_with_handle(handle);
        }
        if let Ok(handle) = window_inner.set_timeout_with_callback_and_timeout_and_arguments_0(
            apply.as_ref().unchecked_ref(),
            RESIZE_DEBOUNCE_MS,
        ) {
            pending.set(Some(handle));
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
}
