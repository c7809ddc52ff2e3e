use crate::app::{command_for_key, HostCommand};
use crate::dom;
use crate::tracker::InputMux;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer fallback: position drives the cursor, a held button is a pinch.
pub fn wire_pointer(
    canvas: &web::HtmlCanvasElement,
    input: Rc<RefCell<InputMux>>,
    audio_ctx: Option<web::AudioContext>,
) {
    let target: &web::EventTarget = canvas.as_ref();

    let canvas_move = canvas.clone();
    let input_move = input.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some([u, v]) = dom::pointer_canvas_uv(&ev, &canvas_move) {
            input_move.borrow_mut().pointer_move(u, v);
        }
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let canvas_down = canvas.clone();
    let input_down = input.clone();
    let on_down = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(ctx) = &audio_ctx {
            _ = ctx.resume();
        }
        if let Some([u, v]) = dom::pointer_canvas_uv(&ev, &canvas_down) {
            let mut mux = input_down.borrow_mut();
            mux.pointer_move(u, v);
            mux.pointer_down();
        }
        _ = canvas_down.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointerdown", on_down.as_ref().unchecked_ref());
    on_down.forget();

    let input_up = input.clone();
    let on_up = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        input_up.borrow_mut().pointer_up();
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    for name in ["pointerup", "pointercancel"] {
        _ = target.add_event_listener_with_callback(name, on_up.as_ref().unchecked_ref());
    }
    on_up.forget();

    let on_leave = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        input.borrow_mut().pointer_leave();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointerleave", on_leave.as_ref().unchecked_ref());
    on_leave.forget();
}

pub fn wire_keyboard(commands: Rc<RefCell<Vec<HostCommand>>>, audio_ctx: Option<web::AudioContext>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        if let Some(ctx) = &audio_ctx {
            _ = ctx.resume();
        }
        if let Some(cmd) = command_for_key(&ev.key()) {
            log::debug!("[key] {} -> {:?}", ev.key(), cmd);
            commands.borrow_mut().push(cmd);
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
