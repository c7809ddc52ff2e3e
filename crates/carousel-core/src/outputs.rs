//! HUD ring and audio drone parameters, both derived from the raw scroll
//! velocity intent each frame.

use crate::config::OutputConfig;

/// Values handed to the HUD ring shader.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HudParams {
    /// Monotonic seconds since mount.
    pub time: f32,
    /// Unsmoothed target speed for this frame.
    pub speed: f32,
    /// Integrated ring rotation, counter to the scroll direction.
    pub rotation: f32,
}

/// Integrates the HUD ring's rotation separately from the scroll integrator.
#[derive(Clone, Debug, Default)]
pub struct HudRing {
    rotation: f32,
}

impl HudRing {
    pub fn step(&mut self, time: f32, speed: f32, cfg: &OutputConfig) -> HudParams {
        self.rotation = (self.rotation - speed * cfg.hud_rotation_per_speed)
            .rem_euclid(std::f32::consts::TAU);
        HudParams {
            time,
            speed,
            rotation: self.rotation,
        }
    }

    pub fn reset(&mut self) {
        self.rotation = 0.0;
    }
}

/// Continuous drone targets. The audio backend applies its own smoothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DroneParams {
    pub frequency_hz: f32,
    pub gain: f32,
}

impl DroneParams {
    pub fn from_speed(speed: f32, cfg: &OutputConfig) -> Self {
        let s = speed.abs();
        Self {
            frequency_hz: cfg.drone_base_hz + s * cfg.drone_hz_per_speed,
            gain: cfg.drone_base_gain + s * cfg.drone_gain_per_speed,
        }
    }
}

/// Audio capability required by the engine. Failures inside an
/// implementation must stay inside it; the visual loop never depends on audio.
pub trait AudioSink {
    fn set_drone(&mut self, params: &DroneParams);
    fn chirp(&mut self);
}

/// Sink used when no audio device is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn set_drone(&mut self, _params: &DroneParams) {}
    fn chirp(&mut self) {}
}
