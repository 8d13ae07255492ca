//! Live drone playback on the default output device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info};
use std::sync::{Arc, Mutex};

use super::synth::{DroneBank, VoiceControl};
use super::AudioError;
use crate::params::SoundConfig;

/// Audio output managing the drone bank on the device thread
pub struct AudioSystem {
    /// Voice controls shared with the audio callback
    controls: Arc<Mutex<Vec<VoiceControl>>>,

    /// Device sample rate actually in use (Hz)
    sample_rate_hz: u32,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start `voice_count` silent drones
    pub fn new(sound: &SoundConfig, voice_count: usize) -> Result<Self, AudioError> {
        sound.validate().map_err(AudioError::InvalidConfig)?;

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = device.default_output_config()?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(AudioError::UnsupportedFormat(format!(
                "{:?}",
                supported.sample_format()
            )));
        }

        let config: cpal::StreamConfig = supported.into();
        let channels = config.channels.max(1) as usize;
        let sample_rate_hz = config.sample_rate.0;
        info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz,
            channels
        );

        let controls = Arc::new(Mutex::new(vec![VoiceControl::default(); voice_count]));
        let shared = Arc::clone(&controls);
        let mut bank = DroneBank::new(voice_count, sample_rate_hz, sound.master_gain);
        let mut local = vec![VoiceControl::default(); voice_count];
        let mut stereo = Vec::new();

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                // Keep the last controls if the simulation holds the lock
                if let Ok(latest) = shared.try_lock() {
                    local.clone_from(&latest);
                }

                let frames = data.len() / channels;
                stereo.resize(frames * 2, 0.0);
                bank.render(&local, &mut stereo);

                for (frame, lr) in data.chunks_mut(channels).zip(stereo.chunks(2)) {
                    if channels == 1 {
                        frame[0] = 0.5 * (lr[0] + lr[1]);
                        continue;
                    }
                    frame[0] = lr[0];
                    frame[1] = lr[1];
                    for extra in frame.iter_mut().skip(2) {
                        *extra = 0.0;
                    }
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        Ok(Self {
            controls,
            sample_rate_hz,
            _stream: stream,
        })
    }

    /// Replace the voice controls heard from the next callback on
    pub fn set_controls(&self, controls: &[VoiceControl]) {
        match self.controls.lock() {
            Ok(mut shared) => {
                shared.clear();
                shared.extend_from_slice(controls);
            }
            Err(_) => error!("Audio control lock poisoned, keeping previous voices"),
        }
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}
