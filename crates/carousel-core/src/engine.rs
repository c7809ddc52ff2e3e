//! The per-frame carousel engine.
//!
//! A host calls [`Carousel::tick`] once per animation frame with the most
//! recent cursor sample. All interaction state lives in the `Carousel` value;
//! there is no shared or global state, and nothing in `tick` can fail.

use crate::camera::CameraRig;
use crate::config::CarouselConfig;
use crate::constants::SCROLL_REBASE_TURNS;
use crate::cursor::CursorSample;
use crate::error::ConfigError;
use crate::input::{target_speed, tilt_target};
use crate::layout::{
    active_index, angle_step, place_items, scene_rotation, ItemAnim, ItemPlacement, ItemStatus,
};
use crate::outputs::{AudioSink, DroneParams, HudParams, HudRing};
use crate::picking::pick;
use crate::selection::{resolve_target, PinchGate, SwipeDetector, Trigger};
use crate::smoothing::{approach, Smoothed};
use glam::Vec2;
use std::f32::consts::TAU;

const REBASE_LIMIT: f32 = SCROLL_REBASE_TURNS * TAU;

/// Everything the host supplies for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub sample: CursorSample,
    /// Monotonic wall-clock milliseconds, used for cooldowns.
    pub now_ms: f64,
    /// Monotonic seconds since mount, forwarded to the HUD.
    pub time_sec: f32,
    /// Item shown in the detail view, owned by the application.
    pub selected: Option<usize>,
}

/// Requests the application should act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// A qualifying pinch fired on this item. The application decides
    /// whether that opens or closes its detail view.
    Select(usize),
    /// A downward swipe was detected while the detail view was open.
    Close,
}

/// Per-frame summary; item transforms are read from [`Carousel::placements`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub pitch: f32,
    pub roll: f32,
    pub target_speed: f32,
    pub hovered: Option<usize>,
    pub active: Option<usize>,
    pub hud: HudParams,
    pub drone: DroneParams,
}

impl FrameOutput {
    /// Push this frame's drone targets and one chirp per fired selection.
    pub fn drive_audio(&self, events: &[CarouselEvent], audio: &mut impl AudioSink) {
        audio.set_drone(&self.drone);
        for ev in events {
            if matches!(ev, CarouselEvent::Select(_)) {
                audio.chirp();
            }
        }
    }
}

/// Scroll and front-item bookkeeping, mutated every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryState {
    pub scroll_current: f32,
    pub scroll_target: f32,
    pub active_index: usize,
    pub current_speed: f32,
}

pub struct Carousel {
    config: CarouselConfig,
    camera: CameraRig,
    gallery: GalleryState,
    anims: Vec<ItemAnim>,
    placements: Vec<ItemPlacement>,
    pitch: Smoothed,
    roll: Smoothed,
    hovered: Option<usize>,
    pinch: PinchGate,
    swipe: SwipeDetector,
    hud: HudRing,
}

impl Carousel {
    pub fn new(item_count: usize) -> Self {
        Self::build(item_count, CarouselConfig::default())
    }

    pub fn with_config(item_count: usize, config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(item_count, config))
    }

    fn build(item_count: usize, config: CarouselConfig) -> Self {
        log::info!("[carousel] mount with {} items", item_count);
        Self {
            camera: CameraRig::from_config(&config.camera, 16.0 / 9.0),
            gallery: GalleryState::default(),
            anims: vec![ItemAnim::NEUTRAL; item_count],
            placements: Vec::with_capacity(item_count),
            pitch: Smoothed::default(),
            roll: Smoothed::default(),
            hovered: None,
            pinch: PinchGate::new(&config.selection),
            swipe: SwipeDetector::new(&config.swipe),
            hud: HudRing::default(),
            config,
        }
    }

    /// Replace the item set. A different length resets scroll, tilt, detectors
    /// and every item's animation to neutral.
    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count != self.anims.len() {
            self.reset_to(item_count);
        }
    }

    /// Full reset, keeping the current item count.
    pub fn reset(&mut self) {
        self.reset_to(self.anims.len());
    }

    fn reset_to(&mut self, item_count: usize) {
        log::info!("[carousel] reset: {} -> {} items", self.anims.len(), item_count);
        self.gallery = GalleryState::default();
        self.anims.clear();
        self.anims.resize(item_count, ItemAnim::NEUTRAL);
        self.placements.clear();
        self.pitch.snap(0.0);
        self.roll.snap(0.0);
        self.hovered = None;
        self.pinch.reset();
        self.swipe.reset();
        self.hud.reset();
    }

    /// Steer the scroll target so `index` ends up in front, taking the
    /// shortest way around the ring. Used for keyboard navigation.
    pub fn scroll_to_index(&mut self, index: usize) {
        let Some(step) = angle_step(self.anims.len()) else {
            return;
        };
        let base = (index % self.anims.len()) as f32 * step;
        let turns = ((self.gallery.scroll_target - base) / TAU).round();
        self.gallery.scroll_target = base + turns * TAU;
    }

    pub fn set_viewport_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    pub fn item_count(&self) -> usize {
        self.anims.len()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn item_anims(&self) -> &[ItemAnim] {
        &self.anims
    }

    /// Item transforms produced by the last `tick`.
    pub fn placements(&self) -> &[ItemPlacement] {
        &self.placements
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_pinching()
    }

    pub fn last_pinch_ms(&self) -> Option<f64> {
        self.pinch.last_fire_ms()
    }

    /// Half extents of an unscaled card, in ring-local units.
    pub fn card_half_extents(&self) -> Vec2 {
        Vec2::new(
            self.config.layout.card_width * 0.5,
            self.config.layout.card_height * 0.5,
        )
    }

    pub fn tick(&mut self, input: &FrameInput, events: &mut Vec<CarouselEvent>) -> FrameOutput {
        let sample = input.sample.sanitized();
        let n = self.anims.len();
        let detail_open = input.selected.is_some();
        let selected = input.selected.filter(|&i| i < n);

        // Input mapping: velocity intent accumulates into the scroll target.
        let speed = target_speed(&sample, detail_open, &self.config.input);
        self.gallery.current_speed = speed;
        self.gallery.scroll_target += speed;

        // Integration runs every frame, visible or not.
        let tilt = tilt_target(&sample, &self.config.input);
        self.pitch.target = tilt.pitch;
        self.roll.target = tilt.roll;
        self.pitch.step(self.config.smoothing.tilt);
        self.roll.step(self.config.smoothing.tilt);
        self.gallery.scroll_current = approach(
            self.gallery.scroll_current,
            self.gallery.scroll_target,
            self.config.smoothing.scroll,
        );
        self.rebase_scroll();

        let mut active = None;
        if n > 0 {
            if !detail_open {
                if let Some(a) = active_index(n, self.gallery.scroll_current) {
                    self.gallery.active_index = a;
                }
            }
            active = Some(self.gallery.active_index.min(n - 1));
        }

        let ring = scene_rotation(self.pitch.value, self.roll.value);
        let hovered = self.hovered;
        place_items(
            &self.anims,
            |i| ItemStatus::resolve(i, selected, hovered),
            self.gallery.scroll_current,
            ring,
            &self.config.layout,
            &mut self.placements,
        );

        self.update_hover(&sample, detail_open);

        match self.pinch.update(&sample, input.now_ms) {
            Trigger::Fired => {
                if let Some(target) = resolve_target(self.hovered, active) {
                    log::info!(
                        "[pinch] select {} (hovered={:?}, active={:?})",
                        target,
                        self.hovered,
                        active
                    );
                    events.push(CarouselEvent::Select(target));
                }
            }
            Trigger::Suppressed => log::debug!("[pinch] suppressed by cooldown"),
            Trigger::None => {}
        }

        // Per-item targets from this frame's selection/hover, then smooth.
        let hovered = self.hovered;
        let layout = &self.config.layout;
        let (item_alpha, glow_alpha) = (self.config.smoothing.item, self.config.smoothing.glow);
        for (i, anim) in self.anims.iter_mut().enumerate() {
            let targets = ItemStatus::resolve(i, selected, hovered).targets(layout);
            anim.step(&targets, item_alpha, glow_alpha);
        }
        place_items(
            &self.anims,
            |i| ItemStatus::resolve(i, selected, hovered),
            self.gallery.scroll_current,
            ring,
            &self.config.layout,
            &mut self.placements,
        );

        match self.swipe.update(&sample, detail_open, input.now_ms) {
            Trigger::Fired => {
                log::info!("[swipe] close");
                events.push(CarouselEvent::Close);
            }
            Trigger::Suppressed => log::debug!("[swipe] suppressed by cooldown"),
            Trigger::None => {}
        }

        FrameOutput {
            pitch: self.pitch.value,
            roll: self.roll.value,
            target_speed: speed,
            hovered: self.hovered,
            active,
            hud: self.hud.step(input.time_sec, speed, &self.config.output),
            drone: DroneParams::from_speed(speed, &self.config.output),
        }
    }

    /// Hover is cleared while hidden or in detail view, held while pinching
    /// (so the pinch lands on what was under the cursor), else re-picked.
    fn update_hover(&mut self, sample: &CursorSample, detail_open: bool) {
        if !sample.is_visible || detail_open || self.placements.is_empty() {
            self.hovered = None;
            return;
        }
        if sample.is_pinching {
            return;
        }
        let ray = self.camera.ray_through(sample.uv());
        self.hovered = pick(&ray, &self.placements, self.card_half_extents());
    }

    /// Shift both scroll values by whole turns once they drift far from zero.
    /// The layout is periodic in a full turn, so nothing visible changes.
    fn rebase_scroll(&mut self) {
        let g = &mut self.gallery;
        if g.scroll_target.abs() < REBASE_LIMIT {
            return;
        }
        let turns = (g.scroll_target / TAU).trunc();
        let shift = turns * TAU;
        g.scroll_target -= shift;
        g.scroll_current -= shift;
    }
}
