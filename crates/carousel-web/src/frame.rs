use crate::app::{step_index, DetailChange, GalleryApp, HostCommand};
use crate::audio::WebAudio;
use crate::overlay;
use crate::render;
use carousel_core::{Carousel, CarouselEvent, FrameInput, NullAudio};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::tracker::InputMux;

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub carousel: Carousel,
    pub app: GalleryApp,
    pub events: Vec<CarouselEvent>,

    pub input: Rc<RefCell<InputMux>>,
    pub commands: Rc<RefCell<Vec<HostCommand>>>,
    pub selected_out: Rc<Cell<Option<usize>>>,

    pub audio: Option<WebAudio>,
    pub gpu: Option<render::GpuState<'a>>,

    pub mounted_at: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let elapsed = self.mounted_at.elapsed();
        let now_ms = elapsed.as_secs_f64() * 1000.0;
        let time_sec = elapsed.as_secs_f32();

        self.apply_commands();

        let w = self.canvas.width().max(1);
        let h = self.canvas.height().max(1);
        self.carousel.set_viewport_aspect(w as f32 / h as f32);

        let sample = self.input.borrow().current();
        let input = FrameInput {
            sample,
            now_ms,
            time_sec,
            selected: self.app.selected(),
        };
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        let out = self.carousel.tick(&input, &mut events);

        match &mut self.audio {
            Some(audio) => out.drive_audio(&events, audio),
            None => out.drive_audio(&events, &mut NullAudio),
        }
        for ev in events.iter().copied() {
            if let Some(change) = self.app.apply(ev) {
                self.show_change(change);
            }
        }
        self.events = events;
        self.selected_out.set(self.app.selected());

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&self.carousel, &out.hud, self.app.tints(), time_sec) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn apply_commands(&mut self) {
        let pending: Vec<HostCommand> = self.commands.borrow_mut().drain(..).collect();
        for cmd in pending {
            match cmd {
                HostCommand::SetItems(items) => {
                    let change = self.app.set_items(items);
                    // a new list always starts from a clean engine
                    if self.carousel.item_count() == self.app.len() {
                        self.carousel.reset();
                    } else {
                        self.carousel.set_item_count(self.app.len());
                    }
                    if let Some(change) = change {
                        self.show_change(change);
                    }
                }
                HostCommand::CloseDetail => {
                    if let Some(change) = self.app.close() {
                        self.show_change(change);
                    }
                }
                HostCommand::Step(delta) => {
                    if self.app.selected().is_some() {
                        continue;
                    }
                    let active = self.carousel.gallery().active_index;
                    if let Some(next) = step_index(active, delta, self.app.len()) {
                        self.carousel.scroll_to_index(next);
                    }
                }
            }
        }
    }

    fn show_change(&self, change: DetailChange) {
        match change {
            DetailChange::Opened(index) => {
                log::info!("[app] open detail {}", index);
                let reference = self.app.item(index).unwrap_or_default();
                overlay::show_detail(&self.document, index, self.app.len(), reference);
            }
            DetailChange::Closed => {
                log::info!("[app] close detail");
                overlay::hide_detail(&self.document);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
