//! Keyboard shortcuts, double-click constellation drops, and scroll tracking.

use crate::constants::DROP_SCALE;
use crate::dom;
use crate::frame::Signals;
use app_core::FieldEngine;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    engine: &Rc<RefCell<FieldEngine>>,
    signals: &Rc<RefCell<Signals>>,
) {
    if dom::is_form_target(ev) {
        return;
    }
    match ev.key().to_lowercase().as_str() {
        "m" => {
            let mut s = signals.borrow_mut();
            s.mode = s.mode.toggled();
        }
        "s" => signals.borrow_mut().pulse = 1.0,
        "b" => signals.borrow_mut().burst = 1.0,
        "t" => {
            let mut s = signals.borrow_mut();
            s.theme = s.theme.next();
        }
        "g" => {
            let mut s = signals.borrow_mut();
            s.backdrop = s.backdrop.next();
            log::info!("backdrop: {}", s.backdrop.name());
        }
        "n" => {
            let mut e = engine.borrow_mut();
            let center = e.bounds() * 0.5;
            if let Err(err) = e.drop_constellation(None, center, DROP_SCALE) {
                log::warn!("constellation drop failed: {err}");
            }
        }
        _ => {}
    }
}

pub fn wire_global_keydown(engine: Rc<RefCell<FieldEngine>>, signals: Rc<RefCell<Signals>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &engine, &signals);
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Double-click stamps a random constellation template at the pointer.
pub fn wire_dblclick(canvas: &web::HtmlCanvasElement, engine: Rc<RefCell<FieldEngine>>) {
    let canvas_c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let rect = canvas_c.get_bounding_client_rect();
        let pos = Vec2::new(
            ev.client_x() as f32 - rect.left() as f32,
            ev.client_y() as f32 - rect.top() as f32,
        );
        if let Err(err) = engine.borrow_mut().drop_constellation(None, pos, DROP_SCALE) {
            log::warn!("constellation drop failed: {err}");
        }
    }) as Box<dyn FnMut(_)>);
    let _ = canvas.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Track the page scroll ratio feeding the parallax factor and backdrops.
pub fn wire_scroll(signals: Rc<RefCell<Signals>>) {
    let window = match web::window() {
        Some(w) => w,
        None => return,
    };
    let window_s = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let scroll_y = window_s.scroll_y().unwrap_or(0.0);
        let inner_h = window_s
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let doc_h = dom::window_document()
            .and_then(|d| d.document_element())
            .map(|e| e.scroll_height() as f64)
            .unwrap_or(0.0);
        let max_scroll = (doc_h - inner_h).max(1.0);
        signals.borrow_mut().scroll = (scroll_y / max_scroll).clamp(0.0, 1.0) as f32;
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}
