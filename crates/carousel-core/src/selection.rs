//! Debounced one-shot triggers: pinch-to-select and swipe-to-close.
//!
//! Both detectors are built from two tiny state machines: [`RisingEdge`]
//! (fires once per false -> true transition) and [`Cooldown`] (refuses to
//! fire again until a wall-clock window has passed). Timestamps are host
//! milliseconds from a monotonic clock, so behaviour does not depend on the
//! frame rate.

use crate::config::{SelectionConfig, SwipeConfig};
use crate::cursor::CursorSample;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CooldownState {
    Ready,
    Cooling { until_ms: f64 },
}

#[derive(Clone, Debug)]
pub struct Cooldown {
    window_ms: f64,
    state: CooldownState,
    last_fire_ms: Option<f64>,
}

impl Cooldown {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            state: CooldownState::Ready,
            last_fire_ms: None,
        }
    }

    /// Current state after accounting for `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> CooldownState {
        if let CooldownState::Cooling { until_ms } = self.state {
            if now_ms >= until_ms {
                self.state = CooldownState::Ready;
            }
        }
        self.state
    }

    /// Fire if the window since the last fire has elapsed.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        match self.poll(now_ms) {
            CooldownState::Ready => {
                self.state = CooldownState::Cooling {
                    until_ms: now_ms + self.window_ms,
                };
                self.last_fire_ms = Some(now_ms);
                true
            }
            CooldownState::Cooling { .. } => false,
        }
    }

    pub fn last_fire_ms(&self) -> Option<f64> {
        self.last_fire_ms
    }

    pub fn reset(&mut self) {
        self.state = CooldownState::Ready;
        self.last_fire_ms = None;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RisingEdge {
    held: bool,
}

impl RisingEdge {
    /// Record `level` and report whether it just went from low to high.
    #[inline]
    pub fn update(&mut self, level: bool) -> bool {
        let rising = level && !self.held;
        self.held = level;
        rising
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Result of feeding one frame into a detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    None,
    Fired,
    /// A qualifying gesture arrived inside the cooldown window.
    Suppressed,
}

/// Turns held pinches into single select requests.
#[derive(Clone, Debug)]
pub struct PinchGate {
    edge: RisingEdge,
    cooldown: Cooldown,
    activation_min: f32,
    activation_max: f32,
}

impl PinchGate {
    pub fn new(cfg: &SelectionConfig) -> Self {
        Self {
            edge: RisingEdge::default(),
            cooldown: Cooldown::new(cfg.cooldown_ms),
            activation_min: cfg.activation_min,
            activation_max: cfg.activation_max,
        }
    }

    /// The edge is taken on the visible pinch alone. A press only counts if
    /// it starts inside the central activation rectangle, so a pinch begun
    /// near the border and dragged inward never selects.
    pub fn update(&mut self, sample: &CursorSample, now_ms: f64) -> Trigger {
        let pressed = self.edge.update(sample.is_visible && sample.is_pinching);
        if !pressed || !sample.within(self.activation_min, self.activation_max) {
            return Trigger::None;
        }
        if self.cooldown.try_fire(now_ms) {
            Trigger::Fired
        } else {
            Trigger::Suppressed
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.edge.is_held()
    }

    pub fn last_fire_ms(&self) -> Option<f64> {
        self.cooldown.last_fire_ms()
    }

    pub fn reset(&mut self) {
        self.edge = RisingEdge::default();
        self.cooldown.reset();
    }
}

/// What a fired pinch selects: the hovered item, else the front-most one.
#[inline]
pub fn resolve_target(hovered: Option<usize>, active: Option<usize>) -> Option<usize> {
    hovered.or(active)
}

/// Fires a close request on a fast downward move while a detail view is open.
#[derive(Clone, Debug)]
pub struct SwipeDetector {
    prev_y: Option<f32>,
    threshold: f32,
    cooldown: Cooldown,
}

impl SwipeDetector {
    pub fn new(cfg: &SwipeConfig) -> Self {
        Self {
            prev_y: None,
            threshold: cfg.threshold,
            cooldown: Cooldown::new(cfg.cooldown_ms),
        }
    }

    /// The previous `y` is refreshed on every active frame whether or not the
    /// detector fires. Inactive frames forget it, so the first frame after
    /// the detail view opens (or the hand reappears) only primes the detector.
    pub fn update(&mut self, sample: &CursorSample, detail_open: bool, now_ms: f64) -> Trigger {
        if !detail_open || !sample.is_visible {
            self.prev_y = None;
            return Trigger::None;
        }
        let prev = self.prev_y.replace(sample.y);
        match prev {
            Some(p) if sample.y - p > self.threshold => {
                if self.cooldown.try_fire(now_ms) {
                    Trigger::Fired
                } else {
                    Trigger::Suppressed
                }
            }
            _ => Trigger::None,
        }
    }

    pub fn reset(&mut self) {
        self.prev_y = None;
        self.cooldown.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_window_is_inclusive() {
        let mut c = Cooldown::new(1000.0);
        assert!(c.try_fire(0.0));
        assert!(!c.try_fire(999.0));
        assert!(c.try_fire(1000.0));
        assert_eq!(c.last_fire_ms(), Some(1000.0));
    }

    #[test]
    fn rising_edge_fires_once_per_press() {
        let mut e = RisingEdge::default();
        assert!(e.update(true));
        assert!(!e.update(true));
        assert!(!e.update(false));
        assert!(e.update(true));
    }

    fn gate() -> PinchGate {
        PinchGate::new(&SelectionConfig::default())
    }

    #[test]
    fn pinch_started_outside_the_area_never_selects() {
        let mut g = gate();
        let edge = CursorSample::new(0.05, 0.5, true, true);
        let centre = CursorSample::new(0.5, 0.5, true, true);
        assert_eq!(g.update(&edge, 0.0), Trigger::None);
        assert_eq!(g.update(&centre, 16.0), Trigger::None);
        assert!(g.is_pinching());

        let open = CursorSample::new(0.5, 0.5, false, true);
        assert_eq!(g.update(&open, 32.0), Trigger::None);
        assert_eq!(g.update(&centre, 48.0), Trigger::Fired);
    }

    #[test]
    fn hidden_pinch_is_not_a_press() {
        let mut g = gate();
        let hidden = CursorSample::new(0.5, 0.5, true, false);
        assert_eq!(g.update(&hidden, 0.0), Trigger::None);
        assert!(!g.is_pinching());
        let seen = CursorSample::new(0.5, 0.5, true, true);
        assert_eq!(g.update(&seen, 16.0), Trigger::Fired);
    }

    #[test]
    fn hovered_beats_active() {
        assert_eq!(resolve_target(Some(4), Some(3)), Some(4));
        assert_eq!(resolve_target(None, Some(3)), Some(3));
        assert_eq!(resolve_target(None, None), None);
    }
}
