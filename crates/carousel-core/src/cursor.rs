use glam::Vec2;

/// One tracking frame's normalized pointer reading.
///
/// `x`/`y` are in \[0, 1\] with the origin at the top-left of the tracked
/// image. When `is_visible` is false the coordinates may be stale and are only
/// used to let targets decay to neutral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorSample {
    pub x: f32,
    pub y: f32,
    pub is_pinching: bool,
    pub is_visible: bool,
}

impl Default for CursorSample {
    fn default() -> Self {
        Self::HIDDEN
    }
}

impl CursorSample {
    /// No hand in view.
    pub const HIDDEN: Self = Self {
        x: 0.5,
        y: 0.5,
        is_pinching: false,
        is_visible: false,
    };

    /// Build a sample from raw tracker output, clamping coordinates into
    /// \[0, 1\]. Non-finite coordinates mark the sample as not visible.
    pub fn new(x: f32, y: f32, is_pinching: bool, is_visible: bool) -> Self {
        if !x.is_finite() || !y.is_finite() {
            return Self {
                is_pinching,
                ..Self::HIDDEN
            };
        }
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
            is_pinching,
            is_visible,
        }
    }

    /// Re-apply the clamping and NaN rules of [`CursorSample::new`] to a
    /// sample that may have been built field by field.
    #[inline]
    pub fn sanitized(self) -> Self {
        Self::new(self.x, self.y, self.is_pinching, self.is_visible)
    }

    #[inline]
    pub fn uv(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Both coordinates inside `[min, max]`.
    #[inline]
    pub fn within(&self, min: f32, max: f32) -> bool {
        (min..=max).contains(&self.x) && (min..=max).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_coordinates() {
        let s = CursorSample::new(-0.2, 1.4, false, true);
        assert_eq!((s.x, s.y), (0.0, 1.0));
        assert!(s.is_visible);
    }

    #[test]
    fn nan_coordinates_hide_the_cursor() {
        let s = CursorSample::new(f32::NAN, 0.5, true, true);
        assert!(!s.is_visible);
        assert!(s.is_pinching);
    }

    #[test]
    fn literal_samples_are_sanitized() {
        let raw = CursorSample {
            x: f32::NAN,
            y: 0.4,
            is_pinching: false,
            is_visible: true,
        };
        assert!(!raw.sanitized().is_visible);

        let wide = CursorSample { x: 3.0, ..raw };
        assert_eq!(wide.sanitized().x, 1.0);
    }
}
