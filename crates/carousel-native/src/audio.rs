//! cpal output stream rendering the drone and chirps.

use crate::synth::Synth;
use carousel_core::constants::DRONE_BASE_HZ;
use carousel_core::{AudioSink, DroneParams};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use std::sync::{Arc, Mutex};

pub struct NativeAudio {
    synth: Arc<Mutex<Synth>>,
    _stream: cpal::Stream,
}

impl NativeAudio {
    pub fn start() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("no default output device"))?;
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0 as f32;
        let synth = Arc::new(Mutex::new(Synth::new(sample_rate, DRONE_BASE_HZ)));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), synth.clone())?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), synth.clone())?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), synth.clone())?,
            other => anyhow::bail!("unsupported sample format {:?}", other),
        };
        stream.play()?;
        log::info!("[audio] cpal output at {} Hz", sample_rate);
        Ok(Self {
            synth,
            _stream: stream,
        })
    }
}

impl AudioSink for NativeAudio {
    fn set_drone(&mut self, params: &DroneParams) {
        if let Ok(mut s) = self.synth.lock() {
            s.drone.set_target(params.frequency_hz, params.gain);
        }
    }

    fn chirp(&mut self) {
        if let Ok(mut s) = self.synth.lock() {
            s.trigger_chirp();
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    synth: Arc<Mutex<Synth>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let Ok(mut s) = synth.lock() else {
                return;
            };
            for frame in data.chunks_mut(channels.max(1)) {
                let v = T::from_sample(s.next_sample());
                for out in frame.iter_mut() {
                    *out = v;
                }
            }
        },
        |err| log::error!("[audio] stream error: {err}"),
        None,
    )
}
