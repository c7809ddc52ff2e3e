#![cfg(target_arch = "wasm32")]
//! Browser front-end: a WebGPU canvas driven by a JS hand tracker (or the
//! pointer until the tracker starts), with WebAudio feedback and a DOM
//! detail overlay.

use crate::app::{GalleryApp, HostCommand};
use crate::constants::*;
use crate::tracker::InputMux;
use carousel_core::Carousel;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod tracker;

// Shared with the exported functions below, which JS may call at any time.
thread_local! {
    static INPUT: Rc<RefCell<InputMux>> = Rc::new(RefCell::new(InputMux::new()));
    static COMMANDS: Rc<RefCell<Vec<HostCommand>>> = Rc::new(RefCell::new(Vec::new()));
    static SELECTED: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));
}

/// Feed one hand-tracker reading. Coordinates are normalized to the video
/// frame with the origin top-left; pass `visible = false` when no hand is
/// detected.
#[wasm_bindgen]
pub fn push_cursor_sample(x: f32, y: f32, pinching: bool, visible: bool) {
    INPUT.with(|input| input.borrow_mut().push_tracker(x, y, pinching, visible));
}

/// Replace the carousel's items with a list of image URLs. Resets scroll,
/// tilt and selection.
#[wasm_bindgen]
pub fn set_items(urls: js_sys::Array) {
    let items: Vec<String> = urls.iter().filter_map(|v| v.as_string()).collect();
    log::info!("[app] set_items: {} items", items.len());
    COMMANDS.with(|c| c.borrow_mut().push(HostCommand::SetItems(items)));
}

/// Index of the item open in the detail view, if any.
#[wasm_bindgen]
pub fn selected_index() -> Option<u32> {
    SELECTED.with(|s| s.get().map(|i| i as u32))
}

#[wasm_bindgen]
pub fn close_detail() {
    COMMANDS.with(|c| c.borrow_mut().push(HostCommand::CloseDetail));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("carousel-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::wire_canvas_resize(&canvas);
    overlay::hide_detail(&document);

    let count = dom::query_param(ITEMS_QUERY_KEY)
        .and_then(|raw| app::parse_item_count(&raw))
        .unwrap_or(DEFAULT_ITEM_COUNT);
    let app = GalleryApp::new(app::placeholder_items(count));
    let carousel = Carousel::new(app.len());

    // Audio is optional; the carousel runs silently without it.
    let audio = match audio::WebAudio::new() {
        Ok(a) => Some(a),
        Err(e) => {
            log::warn!("[audio] unavailable, continuing without sound: {:?}", e);
            None
        }
    };
    let audio_ctx = audio.as_ref().map(|a| a.context().clone());

    let input = INPUT.with(Rc::clone);
    let commands = COMMANDS.with(Rc::clone);
    let selected_out = SELECTED.with(Rc::clone);

    events::wire_pointer(&canvas, input.clone(), audio_ctx.clone());
    events::wire_keyboard(commands.clone(), audio_ctx);
    dom::add_click_listener(&document, DETAIL_CLOSE_ID, close_detail);

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        document,
        carousel,
        app,
        events: Vec::new(),
        input,
        commands,
        selected_out,
        audio,
        gpu,
        mounted_at: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
