//! Pointer event wiring: canvas-space coordinates, rate-limited sampling,
//! and one- or two-pointer dispatch into the engine's tracker.

use crate::constants::POINTER_THROTTLE_MS;
use app_core::FieldEngine;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Event position in CSS pixels relative to the canvas; the painter's DPR
/// transform keeps simulation coordinates in the same space.
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Active pointers by id; at most two are tracked for pinch/twist gestures.
#[derive(Default)]
struct PointerRegistry {
    active: Vec<(i32, Vec2)>,
    last_sample: Option<Instant>,
}

impl PointerRegistry {
    fn upsert(&mut self, id: i32, pos: Vec2) {
        match self.active.iter_mut().find(|(pid, _)| *pid == id) {
            Some(slot) => slot.1 = pos,
            None if self.active.len() < 2 => self.active.push((id, pos)),
            None => {}
        }
    }

    fn remove(&mut self, id: i32) {
        self.active.retain(|(pid, _)| *pid != id);
    }

    /// True while inside the minimum sampling interval.
    fn throttled(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_sample {
            if (now - last).as_secs_f64() * 1000.0 < POINTER_THROTTLE_MS {
                return true;
            }
        }
        self.last_sample = Some(now);
        false
    }
}

pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<FieldEngine>>) {
    let registry = Rc::new(RefCell::new(PointerRegistry::default()));

    // pointerdown
    {
        let engine_d = engine.clone();
        let registry_d = registry.clone();
        let canvas_d = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = pointer_canvas_px(&ev, &canvas_d);
            let mut reg = registry_d.borrow_mut();
            reg.upsert(ev.pointer_id(), pos);
            let mut engine = engine_d.borrow_mut();
            if reg.active.len() == 2 {
                engine.pointer_pair(reg.active[0].1, reg.active[1].1);
            } else {
                engine.pointer_down(pos);
            }
            let _ = canvas_d.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove, rate-limited
    {
        let engine_m = engine.clone();
        let registry_m = registry.clone();
        let canvas_m = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut reg = registry_m.borrow_mut();
            if reg.throttled() {
                return;
            }
            let pos = pointer_canvas_px(&ev, &canvas_m);
            reg.upsert(ev.pointer_id(), pos);
            let mut engine = engine_m.borrow_mut();
            if reg.active.len() == 2 {
                engine.pointer_pair(reg.active[0].1, reg.active[1].1);
            } else {
                engine.pointer_move(pos);
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(window) = web::window() {
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerup / pointercancel
    {
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut reg = registry.borrow_mut();
            reg.remove(ev.pointer_id());
            let mut engine = engine.borrow_mut();
            if reg.active.len() < 2 {
                engine.pointer_pair_end();
            }
            if reg.active.is_empty() {
                engine.pointer_up();
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(window) = web::window() {
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback(
                "pointercancel",
                closure.as_ref().unchecked_ref(),
            );
        }
        closure.forget();
    }
}
