use hero_core::ElementGeometry;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn device_pixel_ratio() -> f32 {
    web::window().map_or(1.0, |w| w.device_pixel_ratio() as f32)
}

pub fn viewport_height() -> f32 {
    web::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0) as f32
}

#[inline]
pub fn element_geometry(el: &web::Element) -> ElementGeometry {
    let rect = el.get_bounding_client_rect();
    ElementGeometry {
        top: rect.top() as f32,
        height: rect.height() as f32,
    }
}

/// Resize the backing store to CSS size × `pixel_ratio`.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, pixel_ratio: f32) {
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * pixel_ratio as f64) as u32;
    let h_px = (rect.height() * pixel_ratio as f64) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

pub fn data_attr(el: &web::HtmlElement, key: &str) -> Option<String> {
    el.get_attribute(&format!("data-{key}"))
}

pub fn html_element(el: web::Element) -> Option<web::HtmlElement> {
    el.dyn_into::<web::HtmlElement>().ok()
}

pub fn add_listener(target: &web::EventTarget, event: &str, f: &js_sys::Function) {
    if let Err(e) = target.add_event_listener_with_callback(event, f) {
        log::warn!("[dom] could not listen for `{event}`: {e:?}");
    }
}

pub fn remove_listener(target: &web::EventTarget, event: &str, f: &js_sys::Function) {
    _ = target.remove_event_listener_with_callback(event, f);
}
