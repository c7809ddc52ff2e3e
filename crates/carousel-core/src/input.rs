//! Input mapping: cursor sample -> scroll velocity intent and tilt targets.

use crate::config::InputConfig;
use crate::constants::DEAD_ZONE_CENTER;
use crate::cursor::CursorSample;

/// Scroll velocity for a horizontal cursor position, ignoring visibility.
///
/// Zero inside the dead zone; past its edge the distance is normalized
/// against the remaining half-width, eased with `easing_exponent` and scaled
/// by `max_speed`. Left of center is negative.
pub fn dead_zone_speed(x: f32, cfg: &InputConfig) -> f32 {
    let offset = x - DEAD_ZONE_CENTER;
    let dist = offset.abs();
    if dist <= cfg.dead_zone_half_width {
        return 0.0;
    }
    let span = DEAD_ZONE_CENTER - cfg.dead_zone_half_width;
    let norm = ((dist - cfg.dead_zone_half_width) / span).clamp(0.0, 1.0);
    norm.powf(cfg.easing_exponent) * cfg.max_speed * offset.signum()
}

/// Per-frame scroll velocity intent. Suspended while a detail view is open
/// or the cursor is not visible.
pub fn target_speed(sample: &CursorSample, detail_open: bool, cfg: &InputConfig) -> f32 {
    if detail_open || !sample.is_visible {
        return 0.0;
    }
    dead_zone_speed(sample.x, cfg)
}

/// Scene tilt the integrator steers toward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltTarget {
    pub pitch: f32,
    pub roll: f32,
}

/// Linear tilt mapping, independent of the dead zone. Neutral when hidden.
pub fn tilt_target(sample: &CursorSample, cfg: &InputConfig) -> TiltTarget {
    if !sample.is_visible {
        return TiltTarget::default();
    }
    TiltTarget {
        pitch: (sample.y - 0.5) * cfg.pitch_span,
        roll: -(sample.x - 0.5) * cfg.roll_span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_zone_is_symmetric() {
        let cfg = InputConfig::default();
        for x in [0.7_f32, 0.8, 0.95, 1.0] {
            let right = dead_zone_speed(x, &cfg);
            let left = dead_zone_speed(1.0 - x, &cfg);
            assert!(right > 0.0);
            assert!((right + left).abs() < 1e-6, "x={x}: {right} vs {left}");
        }
    }

    #[test]
    fn border_reaches_max_speed() {
        let cfg = InputConfig::default();
        assert!((dead_zone_speed(1.0, &cfg) - cfg.max_speed).abs() < 1e-6);
        assert!((dead_zone_speed(0.0, &cfg) + cfg.max_speed).abs() < 1e-6);
    }

    #[test]
    fn tilt_extremes() {
        let cfg = InputConfig::default();
        let t = tilt_target(&CursorSample::new(0.0, 1.0, false, true), &cfg);
        assert!((t.pitch - 0.75).abs() < 1e-6);
        assert!((t.roll - 0.25).abs() < 1e-6);
        let hidden = tilt_target(&CursorSample::HIDDEN, &cfg);
        assert_eq!(hidden, TiltTarget::default());
    }
}
