use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Pointer position in canvas UV space, or `None` for a zero-sized canvas.
#[inline]
pub fn pointer_canvas_uv(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<[f32; 2]> {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let u = (ev.client_x() as f32 - rect.left() as f32) / w;
    let v = (ev.client_y() as f32 - rect.top() as f32) / h;
    Some([u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)])
}

/// Value of `key` in the page's query string.
pub fn query_param(key: &str) -> Option<String> {
    let search = web::window()?.location().search().ok()?;
    web::UrlSearchParams::new_with_str(&search).ok()?.get(key)
}
