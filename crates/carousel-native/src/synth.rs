//! Sample-level drone and chirp voices for the cpal output stream.
//!
//! The engine only hands over drone targets once per frame; the voices
//! glide toward them with a one-pole filter so pitch and level changes
//! never step audibly, whatever the frame rate.

use std::f32::consts::TAU;

/// Time constant of the drone glide.
pub const DRONE_GLIDE_SEC: f32 = 0.12;
pub const DRONE_LOWPASS_HZ: f32 = 900.0;
pub const CHIRP_START_HZ: f32 = 880.0;
pub const CHIRP_END_HZ: f32 = 1760.0;
pub const CHIRP_PEAK_GAIN: f32 = 0.18;
pub const CHIRP_DURATION_SEC: f32 = 0.12;
pub const CHIRP_ATTACK_SEC: f32 = 0.01;

#[inline]
fn one_pole_coeff(tau_sec: f32, sample_rate: f32) -> f32 {
    1.0 - (-1.0 / (tau_sec * sample_rate)).exp()
}

#[derive(Clone, Debug)]
pub struct DroneVoice {
    pub frequency_hz: f32,
    pub gain: f32,
    target_hz: f32,
    target_gain: f32,
    phase: f32,
    lowpass_state: f32,
    glide: f32,
    lowpass: f32,
    sample_rate: f32,
}

impl DroneVoice {
    pub fn new(sample_rate: f32, frequency_hz: f32) -> Self {
        let lowpass = 1.0 - (-TAU * DRONE_LOWPASS_HZ / sample_rate).exp();
        Self {
            frequency_hz,
            gain: 0.0,
            target_hz: frequency_hz,
            target_gain: 0.0,
            phase: 0.0,
            lowpass_state: 0.0,
            glide: one_pole_coeff(DRONE_GLIDE_SEC, sample_rate),
            lowpass,
            sample_rate,
        }
    }

    pub fn set_target(&mut self, frequency_hz: f32, gain: f32) {
        self.target_hz = frequency_hz.max(0.0);
        self.target_gain = gain.clamp(0.0, 1.0);
    }

    /// Low-passed sawtooth at the current gliding pitch.
    pub fn next_sample(&mut self) -> f32 {
        self.frequency_hz += (self.target_hz - self.frequency_hz) * self.glide;
        self.gain += (self.target_gain - self.gain) * self.glide;
        self.phase = (self.phase + self.frequency_hz / self.sample_rate).fract();
        let saw = 2.0 * self.phase - 1.0;
        self.lowpass_state += (saw - self.lowpass_state) * self.lowpass;
        self.lowpass_state * self.gain
    }
}

/// Rising sine blip with a linear attack and decay.
#[derive(Clone, Debug)]
pub struct ChirpVoice {
    phase: f32,
    elapsed: u32,
    total: u32,
    attack: u32,
    sample_rate: f32,
}

impl ChirpVoice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            elapsed: 0,
            total: (CHIRP_DURATION_SEC * sample_rate).max(1.0) as u32,
            attack: (CHIRP_ATTACK_SEC * sample_rate).max(1.0) as u32,
            sample_rate,
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.total
    }

    pub fn next_sample(&mut self) -> f32 {
        if self.is_done() {
            return 0.0;
        }
        let t = self.elapsed as f32 / self.total as f32;
        // exponential sweep, matching WebAudio's exponentialRamp
        let hz = CHIRP_START_HZ * (CHIRP_END_HZ / CHIRP_START_HZ).powf(t);
        let env = if self.elapsed < self.attack {
            self.elapsed as f32 / self.attack as f32
        } else {
            1.0 - (self.elapsed - self.attack) as f32 / (self.total - self.attack).max(1) as f32
        };
        self.phase = (self.phase + hz / self.sample_rate).fract();
        self.elapsed += 1;
        (self.phase * TAU).sin() * env * CHIRP_PEAK_GAIN
    }
}

/// Everything the output callback renders.
#[derive(Clone, Debug)]
pub struct Synth {
    pub drone: DroneVoice,
    chirps: Vec<ChirpVoice>,
    sample_rate: f32,
}

impl Synth {
    pub fn new(sample_rate: f32, drone_hz: f32) -> Self {
        Self {
            drone: DroneVoice::new(sample_rate, drone_hz),
            chirps: Vec::new(),
            sample_rate,
        }
    }

    pub fn trigger_chirp(&mut self) {
        self.chirps.push(ChirpVoice::new(self.sample_rate));
    }

    pub fn active_chirps(&self) -> usize {
        self.chirps.len()
    }

    pub fn next_sample(&mut self) -> f32 {
        let mut s = self.drone.next_sample();
        for c in &mut self.chirps {
            s += c.next_sample();
        }
        self.chirps.retain(|c| !c.is_done());
        s.tanh()
    }
}
