use crate::constants::{DPR_MAX, DPR_MAX_MOBILE, MAX_DIM, MIN_DIM, MOBILE_WIDTH};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn is_mobile() -> bool {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w < MOBILE_WIDTH)
        .unwrap_or(false)
}

/// Resize the canvas backing store to CSS size times the (clamped) device
/// pixel ratio. Returns (css_width, css_height, dpr).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f64, f64, f64) {
    let window = match web::window() {
        Some(w) => w,
        None => return (0.0, 0.0, 1.0),
    };
    let dpr_cap = if is_mobile() { DPR_MAX_MOBILE } else { DPR_MAX };
    let dpr = window.device_pixel_ratio().clamp(1.0, dpr_cap);
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width().clamp(MIN_DIM, MAX_DIM).floor();
    let h = rect.height().clamp(MIN_DIM, MAX_DIM).floor();
    canvas.set_width((w * dpr) as u32);
    canvas.set_height((h * dpr) as u32);
    (w, h, dpr)
}

/// Publish a stat value; silently does nothing when the element is absent.
#[inline]
pub fn set_stat(document: &web::Document, id: &str, value: usize) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(&value.to_string()));
    }
}

/// Keyboard shortcuts must not fire while the user types into a form.
#[inline]
pub fn is_form_target(ev: &web::KeyboardEvent) -> bool {
    match ev.target() {
        Some(target) => {
            target.dyn_ref::<web::HtmlInputElement>().is_some()
                || target.dyn_ref::<web::HtmlTextAreaElement>().is_some()
        }
        None => false,
    }
}
