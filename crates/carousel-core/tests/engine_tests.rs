// Frame-level behaviour of the carousel engine, driven the way a host would
// drive it: one `tick` per animation frame with a cursor sample and a clock.

use carousel_core::gpu::pack_instances;
use carousel_core::layout::active_index;
use carousel_core::*;
use std::f32::consts::TAU;

fn sample(x: f32, y: f32, pinching: bool) -> CursorSample {
    CursorSample::new(x, y, pinching, true)
}

fn input(sample: CursorSample, now_ms: f64) -> FrameInput {
    FrameInput {
        sample,
        now_ms,
        time_sec: (now_ms / 1000.0) as f32,
        selected: None,
    }
}

fn run_hidden(c: &mut Carousel, frames: usize, selected: Option<usize>) {
    let mut events = Vec::new();
    for f in 0..frames {
        let mut inp = input(CursorSample::HIDDEN, f as f64 * 16.0);
        inp.selected = selected;
        c.tick(&inp, &mut events);
    }
    assert!(events.is_empty());
}

#[test]
fn dead_zone_edges_produce_no_motion() {
    let mut c = Carousel::new(10);
    let mut events = Vec::new();
    for x in [0.35_f32, 0.5, 0.65] {
        let out = c.tick(&input(sample(x, 0.5, false), 0.0), &mut events);
        assert_eq!(out.target_speed, 0.0, "x={x}");
    }
    assert_eq!(c.gallery().scroll_target, 0.0);

    // Just outside the edge the speed is small, not a jump.
    let out = c.tick(&input(sample(0.66, 0.5, false), 16.0), &mut events);
    assert!(out.target_speed > 0.0 && out.target_speed < 0.03);
}

#[test]
fn right_side_speed_follows_eased_curve() {
    let mut c = Carousel::new(10);
    let out = c.tick(&input(sample(0.9, 0.5, false), 0.0), &mut Vec::new());
    let expected = 0.2 * (0.25_f32 / 0.35).powf(0.6);
    assert!((out.target_speed - expected).abs() < 1e-5);
    assert!((out.target_speed - 0.1634).abs() < 1e-3);
    assert!((c.gallery().scroll_target - expected).abs() < 1e-6);
}

#[test]
fn scroll_converges_without_overshoot() {
    let mut c = Carousel::new(6);
    let mut events = Vec::new();
    c.tick(&input(sample(1.0, 0.5, false), 0.0), &mut events);
    let target = c.gallery().scroll_target;
    assert!((target - 0.2).abs() < 1e-6);

    let mut prev = c.gallery().scroll_current;
    for f in 1..200 {
        c.tick(&input(CursorSample::HIDDEN, f as f64 * 16.0), &mut events);
        let cur = c.gallery().scroll_current;
        assert!(cur >= prev, "scroll went backwards at frame {f}");
        assert!(cur <= target + 1e-6, "overshoot at frame {f}");
        prev = cur;
    }
    assert!((prev - target).abs() < 1e-4);
}

#[test]
fn hidden_cursor_decays_to_neutral() {
    let mut c = Carousel::new(6);
    let mut events = Vec::new();
    for f in 0..30 {
        c.tick(&input(sample(0.0, 1.0, false), f as f64 * 16.0), &mut events);
    }
    let target_after_visible = c.gallery().scroll_target;

    let mut out = None;
    for f in 30..600 {
        out = Some(c.tick(&input(CursorSample::HIDDEN, f as f64 * 16.0), &mut events));
    }
    let out = out.unwrap();
    assert_eq!(out.target_speed, 0.0);
    assert_eq!(out.hovered, None);
    assert_eq!(c.gallery().scroll_target, target_after_visible);
    assert!(out.pitch.abs() < 1e-4);
    assert!(out.roll.abs() < 1e-4);
}

#[test]
fn held_pinch_fires_once_and_cooldown_is_inclusive() {
    let mut c = Carousel::new(10);
    let mut events = Vec::new();

    // Held over many frames: one select.
    for f in 0..20 {
        c.tick(&input(sample(0.5, 0.5, true), f as f64 * 16.0), &mut events);
    }
    assert_eq!(events, vec![CarouselEvent::Select(0)]);
    assert_eq!(c.last_pinch_ms(), Some(0.0));

    // Release and re-pinch inside the window: suppressed.
    c.tick(&input(sample(0.5, 0.5, false), 400.0), &mut events);
    c.tick(&input(sample(0.5, 0.5, true), 999.0), &mut events);
    assert_eq!(events.len(), 1);

    // Exactly at the window boundary: fires.
    c.tick(&input(sample(0.5, 0.5, false), 999.5), &mut events);
    c.tick(&input(sample(0.5, 0.5, true), 1000.0), &mut events);
    assert_eq!(events.len(), 2);
}

#[test]
fn pinch_outside_activation_area_is_ignored() {
    let mut c = Carousel::new(10);
    let mut events = Vec::new();
    c.tick(&input(sample(0.1, 0.5, true), 0.0), &mut events);
    c.tick(&input(sample(0.5, 0.9, true), 16.0), &mut events);
    assert!(events.is_empty());

    // Dragging the same pinch into the area is not a new press.
    c.tick(&input(sample(0.5, 0.5, true), 32.0), &mut events);
    assert!(events.is_empty());

    // Releasing and pinching again inside the area selects.
    c.tick(&input(sample(0.5, 0.5, false), 48.0), &mut events);
    c.tick(&input(sample(0.5, 0.5, true), 64.0), &mut events);
    assert_eq!(events.len(), 1);
}

#[test]
fn pinch_at_center_selects_front_item() {
    let mut c = Carousel::new(10);
    c.scroll_to_index(3);
    run_hidden(&mut c, 200, None);
    assert_eq!(c.gallery().active_index, 3);

    let mut events = Vec::new();
    let out = c.tick(&input(sample(0.5, 0.5, true), 5000.0), &mut events);
    assert_eq!(out.active, Some(3));
    assert_eq!(events, vec![CarouselEvent::Select(3)]);
}

#[test]
fn hover_picks_the_card_under_the_cursor() {
    let mut c = Carousel::new(5);
    let out = c.tick(&input(sample(0.5, 0.5, false), 0.0), &mut Vec::new());
    assert_eq!(out.hovered, Some(0));

    // Hover is kept while pinching so the pinch lands on it.
    let mut events = Vec::new();
    let out = c.tick(&input(sample(0.5, 0.5, true), 16.0), &mut events);
    assert_eq!(out.hovered, Some(0));
    assert_eq!(events, vec![CarouselEvent::Select(0)]);

    // Empty space above the ring.
    let out = c.tick(&input(sample(0.5, 0.02, false), 32.0), &mut Vec::new());
    assert_eq!(out.hovered, None);
}

#[test]
fn hovered_card_grows_and_glows() {
    let mut c = Carousel::new(5);
    let mut events = Vec::new();
    for f in 0..300 {
        c.tick(&input(sample(0.5, 0.5, false), f as f64 * 16.0), &mut events);
    }
    let anim = c.item_anims()[0];
    assert!((anim.scale - 1.15).abs() < 1e-3);
    assert!((anim.z_offset - 0.5).abs() < 1e-3);
    assert!((anim.glow - 1.0).abs() < 1e-3);
    assert_eq!(c.placements()[0].status, ItemStatus::Hovered);
    assert_eq!(c.item_anims()[1], carousel_core::layout::ItemAnim::NEUTRAL);
}

#[test]
fn detail_view_brings_selection_forward_and_recedes_others() {
    let mut c = Carousel::new(4);
    run_hidden(&mut c, 300, Some(2));
    let anims = c.item_anims();
    assert!((anims[2].scale - 1.3).abs() < 1e-3);
    assert!((anims[2].z_offset - 2.5).abs() < 1e-3);
    for i in [0, 1, 3] {
        assert!((anims[i].scale - 0.8).abs() < 1e-3);
        assert!((anims[i].z_offset + 1.0).abs() < 1e-3);
        assert!(anims[i].glow < 1e-3);
    }
}

#[test]
fn detail_view_freezes_scrolling_and_front_item() {
    let mut c = Carousel::new(8);
    let mut events = Vec::new();
    let mut inp = input(sample(1.0, 0.5, false), 0.0);
    inp.selected = Some(0);
    let out = c.tick(&inp, &mut events);
    assert_eq!(out.target_speed, 0.0);
    assert_eq!(out.hovered, None);

    c.scroll_to_index(5);
    run_hidden(&mut c, 200, Some(0));
    assert_eq!(c.gallery().active_index, 0);

    run_hidden(&mut c, 1, None);
    assert_eq!(c.gallery().active_index, 5);
}

#[test]
fn downward_swipe_closes_once() {
    let mut c = Carousel::new(4);
    let mut events = Vec::new();
    let frames = [(0.5_f32, 0.0), (0.54, 16.0), (0.58, 32.0), (0.62, 48.0)];
    for (y, t) in frames {
        let mut inp = input(sample(0.5, y, false), t);
        inp.selected = Some(1);
        c.tick(&inp, &mut events);
    }
    assert_eq!(events, vec![CarouselEvent::Close]);
}

#[test]
fn swipe_needs_open_detail_and_a_primed_frame() {
    let mut c = Carousel::new(4);
    let mut events = Vec::new();
    c.tick(&input(sample(0.5, 0.2, false), 0.0), &mut events);
    c.tick(&input(sample(0.5, 0.8, false), 16.0), &mut events);
    assert!(events.is_empty());

    // First open frame only primes, even after a big jump.
    let mut inp = input(sample(0.5, 0.9, false), 32.0);
    inp.selected = Some(0);
    c.tick(&inp, &mut events);
    assert!(events.is_empty());

    // Upward motion never closes.
    let mut inp = input(sample(0.5, 0.5, false), 48.0);
    inp.selected = Some(0);
    c.tick(&inp, &mut events);
    assert!(events.is_empty());
}

fn detail_frame(y: f32, now_ms: f64, visible: bool) -> FrameInput {
    let mut inp = input(CursorSample::new(0.5, y, false, visible), now_ms);
    inp.selected = Some(0);
    inp
}

#[test]
fn swipe_cooldown_is_inclusive() {
    let mut c = Carousel::new(4);
    let mut events = Vec::new();
    c.tick(&detail_frame(0.2, 0.0, true), &mut events);
    c.tick(&detail_frame(0.3, 16.0, true), &mut events);
    assert_eq!(events, vec![CarouselEvent::Close]);

    // Another downward jump inside the window is suppressed.
    c.tick(&detail_frame(0.2, 400.0, true), &mut events);
    c.tick(&detail_frame(0.3, 799.0, true), &mut events);
    assert_eq!(events.len(), 1);

    // Exactly at the window boundary: fires again.
    c.tick(&detail_frame(0.2, 799.5, true), &mut events);
    c.tick(&detail_frame(0.3, 816.0, true), &mut events);
    assert_eq!(events.len(), 2);
}

#[test]
fn hidden_cursor_never_closes_and_reprimes() {
    let mut c = Carousel::new(4);
    let mut events = Vec::new();
    c.tick(&detail_frame(0.1, 0.0, true), &mut events);
    for f in 1..10 {
        let y = 0.1 + f as f32 * 0.1;
        c.tick(&detail_frame(y, f as f64 * 16.0, false), &mut events);
    }
    assert!(events.is_empty());

    // The first visible frame after the gap only primes.
    c.tick(&detail_frame(0.95, 200.0, true), &mut events);
    assert!(events.is_empty());
    c.tick(&detail_frame(0.2, 216.0, true), &mut events);
    c.tick(&detail_frame(0.3, 232.0, true), &mut events);
    assert_eq!(events, vec![CarouselEvent::Close]);
}

#[test]
fn non_finite_sample_fields_do_not_poison_scroll() {
    let mut c = Carousel::new(6);
    let mut events = Vec::new();
    let raw = CursorSample {
        x: f32::NAN,
        y: f32::INFINITY,
        is_pinching: true,
        is_visible: true,
    };
    for f in 0..10 {
        let out = c.tick(&input(raw, f as f64 * 16.0), &mut events);
        assert_eq!(out.target_speed, 0.0);
        assert!(out.pitch.is_finite() && out.roll.is_finite());
    }
    assert!(events.is_empty());
    assert_eq!(c.gallery().scroll_target, 0.0);

    // A normal sample afterwards still scrolls.
    let out = c.tick(&input(sample(1.0, 0.5, false), 200.0), &mut events);
    assert!(out.target_speed > 0.0);
    assert!(c.gallery().scroll_target.is_finite());
}

#[test]
fn empty_carousel_is_inert() {
    let mut c = Carousel::new(0);
    let mut events = Vec::new();
    for f in 0..10 {
        let out = c.tick(&input(sample(0.5, 0.5, f % 2 == 0), f as f64 * 500.0), &mut events);
        assert_eq!(out.active, None);
        assert_eq!(out.hovered, None);
    }
    assert!(events.is_empty());
    assert!(c.placements().is_empty());
}

#[test]
fn active_index_boundaries() {
    let step8 = TAU / 8.0;
    assert_eq!(active_index(8, step8 / 2.0), Some(1));
    assert_eq!(active_index(8, -step8 / 2.0), Some(0));

    let step10 = TAU / 10.0;
    assert_eq!(active_index(10, 0.0), Some(0));
    assert_eq!(active_index(10, step10), Some(1));
    assert_eq!(active_index(10, -step10), Some(9));
    assert_eq!(active_index(10, TAU * 3.0 + step10 * 2.0), Some(2));
}

#[test]
fn front_index_follows_scroll() {
    let mut c = Carousel::new(10);
    run_hidden(&mut c, 1, None);
    assert_eq!(c.gallery().active_index, 0);
    c.scroll_to_index(1);
    run_hidden(&mut c, 200, None);
    assert_eq!(c.gallery().active_index, 1);

    // Shortest way round: 9 is one step backwards from 0.
    c.scroll_to_index(0);
    run_hidden(&mut c, 200, None);
    c.scroll_to_index(9);
    assert!(c.gallery().scroll_target < 0.0);
}

#[test]
fn long_scrolling_stays_bounded() {
    let mut c = Carousel::new(7);
    let mut events = Vec::new();
    for f in 0..3000 {
        c.tick(&input(sample(1.0, 0.5, false), f as f64 * 16.0), &mut events);
    }
    let g = c.gallery();
    assert!(g.scroll_target.abs() < 64.0 * TAU + 1.0);
    assert!((g.scroll_target - g.scroll_current).abs() < 3.0);
    assert_eq!(Some(g.active_index), active_index(7, g.scroll_current));
}

#[test]
fn reset_and_item_count_changes() {
    let mut c = Carousel::new(5);
    let mut events = Vec::new();
    for f in 0..50 {
        c.tick(&input(sample(0.9, 0.2, false), f as f64 * 16.0), &mut events);
    }
    assert!(c.gallery().scroll_target > 0.0);

    // Same length keeps state.
    c.set_item_count(5);
    assert!(c.gallery().scroll_target > 0.0);

    c.set_item_count(3);
    assert_eq!(c.item_count(), 3);
    assert_eq!(*c.gallery(), GalleryState::default());
    assert!(c.placements().is_empty());

    c.tick(&input(sample(0.5, 0.5, true), 10_000.0), &mut events);
    c.reset();
    assert_eq!(c.last_pinch_ms(), None);
    assert!(!c.is_pinching());
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = CarouselConfig::default();
    cfg.smoothing.scroll = 1.5;
    assert!(Carousel::with_config(3, cfg).is_err());

    let mut cfg = CarouselConfig::default();
    cfg.input.dead_zone_half_width = 0.5;
    assert!(matches!(
        Carousel::with_config(3, cfg),
        Err(ConfigError::DeadZone(_))
    ));

    assert!(Carousel::with_config(3, CarouselConfig::default()).is_ok());
}

#[test]
fn hud_and_drone_follow_raw_speed() {
    let mut c = Carousel::new(4);
    let out = c.tick(&input(sample(1.0, 0.5, false), 2000.0), &mut Vec::new());
    assert!((out.hud.speed - 0.2).abs() < 1e-6);
    assert!((out.hud.time - 2.0).abs() < 1e-6);
    assert!((out.hud.rotation - (TAU - 0.1)).abs() < 1e-4);
    assert!((out.drone.frequency_hz - 460.0).abs() < 1e-3);
    assert!((out.drone.gain - 0.05).abs() < 1e-6);

    let idle = c.tick(&input(sample(0.5, 0.5, false), 2016.0), &mut Vec::new());
    assert!((idle.drone.frequency_hz - 60.0).abs() < 1e-6);
    assert!((idle.drone.gain - 0.02).abs() < 1e-6);
    assert_eq!(idle.hud.rotation, out.hud.rotation);
}

#[derive(Default)]
struct RecordingAudio {
    chirps: usize,
    last_drone: Option<DroneParams>,
}

impl AudioSink for RecordingAudio {
    fn set_drone(&mut self, params: &DroneParams) {
        self.last_drone = Some(*params);
    }
    fn chirp(&mut self) {
        self.chirps += 1;
    }
}

#[test]
fn audio_gets_drone_every_frame_and_chirp_per_select() {
    let mut c = Carousel::new(4);
    let mut audio = RecordingAudio::default();
    let mut events = Vec::new();
    let out = c.tick(&input(sample(0.5, 0.5, true), 0.0), &mut events);
    out.drive_audio(&events, &mut audio);
    assert_eq!(audio.chirps, 1);
    assert_eq!(audio.last_drone, Some(out.drone));

    out.drive_audio(&[CarouselEvent::Close], &mut audio);
    assert_eq!(audio.chirps, 1);
}

#[test]
fn instances_are_sorted_back_to_front() {
    let mut c = Carousel::new(6);
    c.tick(&input(CursorSample::HIDDEN, 0.0), &mut Vec::new());
    let mut instances = Vec::new();
    pack_instances(c.placements(), &[], &mut instances);
    assert_eq!(instances.len(), 6);
    let zs: Vec<f32> = instances.iter().map(|i| i.model[3][2]).collect();
    assert!(zs.windows(2).all(|w| w[0] <= w[1]));
    // Front card is drawn last.
    assert!(zs[5].abs() < 1e-4);
    assert_eq!(instances[5].tint, [1.0; 4]);
}
