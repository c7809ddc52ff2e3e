//! Desktop front-end. The mouse stands in for the hand tracker: pointer
//! position is the cursor, the left button is a pinch, leaving the window
//! hides the cursor.

use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use carousel_core::gpu::item_tint;
use carousel_core::{Carousel, CarouselEvent, CursorSample, FrameInput, FrameOutput, NullAudio};

mod audio;
mod render;
mod synth;

const DEFAULT_ITEM_COUNT: usize = 12;
const MAX_ITEM_COUNT: usize = 64;
const WINDOW_TITLE: &str = "pinch carousel";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct MouseState {
    u: f32,
    v: f32,
    down: bool,
    inside: bool,
}

impl MouseState {
    fn sample(&self) -> CursorSample {
        if self.inside {
            CursorSample::new(self.u, self.v, self.down, true)
        } else {
            CursorSample::HIDDEN
        }
    }

    fn leave(&mut self) {
        self.inside = false;
        self.down = false;
    }
}

fn parse_item_count(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .map(|n| n.min(MAX_ITEM_COUNT))
        .unwrap_or(DEFAULT_ITEM_COUNT)
}

/// Detail-view toggle: any select while open closes, otherwise opens.
fn apply_event(selected: Option<usize>, event: CarouselEvent, count: usize) -> Option<usize> {
    match event {
        CarouselEvent::Select(_) if selected.is_some() => None,
        CarouselEvent::Select(index) if index < count => Some(index),
        CarouselEvent::Select(_) => selected,
        CarouselEvent::Close => None,
    }
}

struct App {
    carousel: Carousel,
    selected: Option<usize>,
    tints: Vec<[f32; 4]>,
    events: Vec<CarouselEvent>,
    mouse: MouseState,
    audio: Option<audio::NativeAudio>,
    started: Instant,
    time_sec: f32,
}

impl App {
    fn new(count: usize, audio: Option<audio::NativeAudio>) -> Self {
        Self {
            carousel: Carousel::new(count),
            selected: None,
            tints: (0..count)
                .map(|i| item_tint(&format!("item-{}", i + 1)))
                .collect(),
            events: Vec::new(),
            mouse: MouseState::default(),
            audio,
            started: Instant::now(),
            time_sec: 0.0,
        }
    }

    /// Advance one frame. Returns the engine output and whether the detail
    /// selection changed.
    fn frame(&mut self, (width, height): (u32, u32)) -> (FrameOutput, bool) {
        let elapsed = self.started.elapsed();
        self.time_sec = elapsed.as_secs_f32();
        self.carousel
            .set_viewport_aspect(width.max(1) as f32 / height.max(1) as f32);

        let input = FrameInput {
            sample: self.mouse.sample(),
            now_ms: elapsed.as_secs_f64() * 1000.0,
            time_sec: self.time_sec,
            selected: self.selected,
        };
        self.events.clear();
        let out = self.carousel.tick(&input, &mut self.events);
        match &mut self.audio {
            Some(a) => out.drive_audio(&self.events, a),
            None => out.drive_audio(&self.events, &mut NullAudio),
        }

        let before = self.selected;
        for ev in &self.events {
            self.selected = apply_event(self.selected, *ev, self.carousel.item_count());
        }
        (out, before != self.selected)
    }

    /// Returns true when the key closed the detail view.
    fn key(&mut self, key: &Key) -> bool {
        let delta = match key {
            Key::Named(NamedKey::Escape) => return self.selected.take().is_some(),
            Key::Named(NamedKey::ArrowLeft) => -1,
            Key::Named(NamedKey::ArrowRight) => 1,
            _ => return false,
        };
        let n = self.carousel.item_count();
        if self.selected.is_none() && n > 0 {
            let active = self.carousel.gallery().active_index as i64;
            let next = (active + delta).rem_euclid(n as i64) as usize;
            self.carousel.scroll_to_index(next);
        }
        false
    }

    fn title(&self) -> String {
        match self.selected {
            Some(i) => format!("{} - item {} of {}", WINDOW_TITLE, i + 1, self.carousel.item_count()),
            None => WINDOW_TITLE.to_string(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let count = parse_item_count(std::env::var("CAROUSEL_ITEMS").ok().as_deref());
    let audio = match audio::NativeAudio::start() {
        Ok(a) => Some(a),
        Err(e) => {
            log::warn!("[audio] unavailable, continuing without sound: {e:#}");
            None
        }
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .build(&event_loop)?;
    let mut gpu = pollster::block_on(render::GpuState::new(&window))?;
    let mut app = App::new(count, audio);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => gpu.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let size = gpu.window.inner_size();
                app.mouse.u = (position.x / size.width.max(1) as f64) as f32;
                app.mouse.v = (position.y / size.height.max(1) as f64) as f32;
                app.mouse.inside = true;
            }
            WindowEvent::CursorLeft { .. } => app.mouse.leave(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => app.mouse.down = state == ElementState::Pressed,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if app.key(&logical_key) {
                    gpu.window.set_title(&app.title());
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let (out, changed) = app.frame(gpu.size());
            if changed {
                log::info!("[app] detail {:?}", app.selected);
                gpu.window.set_title(&app.title());
            }
            match gpu.render(&app.carousel, &out.hud, &app.tints, app.time_sec) {
                Ok(_) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
