//! Typed tuning parameters for the carousel engine.
//!
//! Every field defaults to the matching value in [`crate::constants`]. Hosts
//! can override individual fields and must then pass the result through
//! [`CarouselConfig::validate`] (done by [`crate::Carousel::with_config`]).

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct InputConfig {
    pub dead_zone_half_width: f32,
    pub max_speed: f32,
    pub easing_exponent: f32,
    pub pitch_span: f32,
    pub roll_span: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dead_zone_half_width: DEAD_ZONE_HALF_WIDTH,
            max_speed: MAX_SCROLL_SPEED,
            easing_exponent: SPEED_EASING_EXPONENT,
            pitch_span: PITCH_SPAN,
            roll_span: ROLL_SPAN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingConfig {
    pub scroll: f32,
    pub tilt: f32,
    pub item: f32,
    pub glow: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            scroll: SCROLL_DAMPING,
            tilt: TILT_DAMPING,
            item: ITEM_DAMPING,
            glow: GLOW_DAMPING,
        }
    }
}

/// Target scale and depth offset for one item state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleDepth {
    pub scale: f32,
    pub z: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub radius: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub selected: ScaleDepth,
    pub receded: ScaleDepth,
    pub hovered: ScaleDepth,
    pub idle: ScaleDepth,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: RING_RADIUS,
            card_width: CARD_WIDTH,
            card_height: CARD_HEIGHT,
            selected: ScaleDepth {
                scale: SELECTED_SCALE,
                z: SELECTED_Z,
            },
            receded: ScaleDepth {
                scale: RECEDED_SCALE,
                z: RECEDED_Z,
            },
            hovered: ScaleDepth {
                scale: HOVER_SCALE,
                z: HOVER_Z,
            },
            idle: ScaleDepth {
                scale: IDLE_SCALE,
                z: IDLE_Z,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionConfig {
    pub activation_min: f32,
    pub activation_max: f32,
    pub cooldown_ms: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            activation_min: ACTIVATION_MIN,
            activation_max: ACTIVATION_MAX,
            cooldown_ms: PINCH_COOLDOWN_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwipeConfig {
    pub threshold: f32,
    pub cooldown_ms: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: SWIPE_DOWN_THRESHOLD,
            cooldown_ms: SWIPE_COOLDOWN_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub distance: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: CAMERA_Z,
            fovy_degrees: CAMERA_FOV_DEG,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputConfig {
    pub hud_rotation_per_speed: f32,
    pub drone_base_hz: f32,
    pub drone_hz_per_speed: f32,
    pub drone_base_gain: f32,
    pub drone_gain_per_speed: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hud_rotation_per_speed: HUD_ROTATION_PER_SPEED,
            drone_base_hz: DRONE_BASE_HZ,
            drone_hz_per_speed: DRONE_HZ_PER_SPEED,
            drone_base_gain: DRONE_BASE_GAIN,
            drone_gain_per_speed: DRONE_GAIN_PER_SPEED,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarouselConfig {
    pub input: InputConfig,
    pub smoothing: SmoothingConfig,
    pub layout: LayoutConfig,
    pub selection: SelectionConfig,
    pub swipe: SwipeConfig,
    pub camera: CameraConfig,
    pub output: OutputConfig,
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("input.max_speed", self.input.max_speed),
            ("input.easing_exponent", self.input.easing_exponent),
            ("input.pitch_span", self.input.pitch_span),
            ("input.roll_span", self.input.roll_span),
            ("layout.selected.scale", self.layout.selected.scale),
            ("layout.selected.z", self.layout.selected.z),
            ("layout.receded.scale", self.layout.receded.scale),
            ("layout.receded.z", self.layout.receded.z),
            ("layout.hovered.scale", self.layout.hovered.scale),
            ("layout.hovered.z", self.layout.hovered.z),
            ("layout.idle.scale", self.layout.idle.scale),
            ("layout.idle.z", self.layout.idle.z),
            ("swipe.threshold", self.swipe.threshold),
            ("output.hud_rotation_per_speed", self.output.hud_rotation_per_speed),
            ("output.drone_base_hz", self.output.drone_base_hz),
            ("output.drone_hz_per_speed", self.output.drone_hz_per_speed),
            ("output.drone_base_gain", self.output.drone_base_gain),
            ("output.drone_gain_per_speed", self.output.drone_gain_per_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite {
                    field,
                    value: value as f64,
                });
            }
        }

        let dampings = [
            ("smoothing.scroll", self.smoothing.scroll),
            ("smoothing.tilt", self.smoothing.tilt),
            ("smoothing.item", self.smoothing.item),
            ("smoothing.glow", self.smoothing.glow),
        ];
        for (field, value) in dampings {
            // NaN fails both comparisons, so it is rejected here too
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::DampingOutOfRange { field, value });
            }
        }

        let dz = self.input.dead_zone_half_width;
        if !(dz > 0.0 && dz < 0.5) {
            return Err(ConfigError::DeadZone(dz));
        }

        let positive = [
            ("layout.radius", self.layout.radius as f64),
            ("layout.card_width", self.layout.card_width as f64),
            ("layout.card_height", self.layout.card_height as f64),
            ("camera.distance", self.camera.distance as f64),
            ("camera.fovy_degrees", self.camera.fovy_degrees as f64),
            ("camera.znear", self.camera.znear as f64),
            ("selection.cooldown_ms", self.selection.cooldown_ms),
            ("swipe.cooldown_ms", self.swipe.cooldown_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.camera.zfar > self.camera.znear) {
            return Err(ConfigError::NotPositive {
                field: "camera.zfar - camera.znear",
                value: (self.camera.zfar - self.camera.znear) as f64,
            });
        }

        let (min, max) = (
            self.selection.activation_min,
            self.selection.activation_max,
        );
        if !(min >= 0.0 && max <= 1.0 && min < max) {
            return Err(ConfigError::ActivationRect { min, max });
        }
        Ok(())
    }
}
