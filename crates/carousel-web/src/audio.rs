//! WebAudio drone and selection chirp.
//!
//! Graph: `drone osc -> lowpass -> drone gain -> master -> destination`.
//! Chirps are short-lived oscillators connected straight to the master.
//! Browsers keep a fresh `AudioContext` suspended until a user gesture, so
//! `resume` is called again from pointer and key listeners.

use crate::constants::*;
use carousel_core::{AudioSink, DroneParams};
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

pub struct WebAudio {
    ctx: web::AudioContext,
    master: web::GainNode,
    drone_osc: web::OscillatorNode,
    drone_gain: web::GainNode,
}

impl WebAudio {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        _ = ctx.resume();

        let master = create_gain(&ctx, MASTER_GAIN, "master")?;
        _ = master.connect_with_audio_node(&ctx.destination());

        let drone_osc = web::OscillatorNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("drone OscillatorNode error: {:?}", e))?;
        drone_osc.set_type(web::OscillatorType::Sawtooth);
        drone_osc
            .frequency()
            .set_value(carousel_core::constants::DRONE_BASE_HZ);

        let lowpass = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("BiquadFilterNode error: {:?}", e))?;
        lowpass.set_type(web::BiquadFilterType::Lowpass);
        lowpass.frequency().set_value(DRONE_LOWPASS_HZ);

        let drone_gain = create_gain(&ctx, 0.0, "drone")?;
        _ = drone_osc.connect_with_audio_node(&lowpass);
        _ = lowpass.connect_with_audio_node(&drone_gain);
        _ = drone_gain.connect_with_audio_node(&master);
        drone_osc
            .start()
            .map_err(|e| anyhow::anyhow!("drone start error: {:?}", e))?;

        log::info!("[audio] WebAudio drone ready");
        Ok(Self {
            ctx,
            master,
            drone_osc,
            drone_gain,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }
}

impl AudioSink for WebAudio {
    fn set_drone(&mut self, params: &DroneParams) {
        let now = self.ctx.current_time();
        _ = self.drone_osc.frequency().set_target_at_time(
            params.frequency_hz,
            now,
            DRONE_SMOOTHING_TAU_SEC,
        );
        _ = self
            .drone_gain
            .gain()
            .set_target_at_time(params.gain, now, DRONE_SMOOTHING_TAU_SEC);
    }

    fn chirp(&mut self) {
        let src = match web::OscillatorNode::new(&self.ctx) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[audio] chirp oscillator error: {:?}", e);
                return;
            }
        };
        let gain = match create_gain(&self.ctx, 0.0, "chirp") {
            Ok(g) => g,
            Err(e) => {
                log::warn!("[audio] {}", e);
                return;
            }
        };
        src.set_type(web::OscillatorType::Sine);
        let t0 = self.ctx.current_time() + 0.005;
        src.frequency().set_value(CHIRP_START_HZ);
        _ = src
            .frequency()
            .exponential_ramp_to_value_at_time(CHIRP_END_HZ, t0 + CHIRP_DURATION_SEC);
        _ = gain
            .gain()
            .linear_ramp_to_value_at_time(CHIRP_PEAK_GAIN, t0 + CHIRP_ATTACK_SEC);
        _ = gain
            .gain()
            .linear_ramp_to_value_at_time(0.0, t0 + CHIRP_DURATION_SEC);
        _ = src.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&self.master);
        _ = src.start_with_when(t0);
        _ = src.stop_with_when(t0 + CHIRP_DURATION_SEC + 0.02);
    }
}
