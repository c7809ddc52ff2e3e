/// One first-order low-pass step: move `current` a fraction `alpha` of the
/// way to `target`. With `alpha` in (0, 1) this never overshoots.
#[inline]
pub fn approach(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}

/// A scalar that eases toward a target once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Smoothed {
    pub value: f32,
    pub target: f32,
}

impl Smoothed {
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
        }
    }

    #[inline]
    pub fn step(&mut self, alpha: f32) -> f32 {
        self.value = approach(self.value, self.target, alpha);
        self.value
    }

    /// Jump straight to `value`; only used on full resets.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }
}
