//! Drone bank: one slowly pulsing sine voice per planet.

use std::f32::consts::{FRAC_PI_2, TAU};

/// Lowest voice, C3
pub const BASE_MIDI_NOTE: f32 = 48.0;

/// Scale degrees in semitones above the octave root
pub const C_MAJOR_PENTATONIC: [f32; 5] = [0.0, 2.0, 4.0, 7.0, 9.0];

/// Tremolo rate of the first voice (Hz), later voices loop a little faster
pub const BASE_LOOP_HZ: f32 = 0.25;
pub const LOOP_SPREAD_HZ: f32 = 0.05;

/// Hard output limit
pub const OUTPUT_LIMIT: f32 = 0.5;

/// Per-sample approach rate of a voice's level toward its control gain
const GAIN_GLIDE: f32 = 0.002;

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Pitch of voice `index`: ascending pentatonic degrees, one octave up every
/// full pass through the scale
pub fn voice_note(index: usize) -> f32 {
    let degrees = C_MAJOR_PENTATONIC.len();
    let octave = (index / degrees) as f32;
    BASE_MIDI_NOTE + 12.0 * octave + C_MAJOR_PENTATONIC[index % degrees]
}

/// What the simulation asks of one voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceControl {
    /// Linear amplitude, 0 = silent
    pub gain: f32,
    /// Stereo position in [0, 1], 0 = hard left
    pub pan: f32,
}

impl Default for VoiceControl {
    fn default() -> Self {
        Self { gain: 0.0, pan: 0.5 }
    }
}

#[derive(Debug, Clone)]
struct Voice {
    freq_hz: f32,
    loop_hz: f32,
    phase: f32,
    loop_phase: f32,
    level: f32,
}

/// Sine drones mixed to interleaved stereo
#[derive(Debug, Clone)]
pub struct DroneBank {
    sample_rate: f32,
    master_gain: f32,
    voices: Vec<Voice>,
}

impl DroneBank {
    pub fn new(voice_count: usize, sample_rate_hz: u32, master_gain: f32) -> Self {
        let voices = (0..voice_count)
            .map(|i| Voice {
                freq_hz: midi_to_hz(voice_note(i)),
                loop_hz: BASE_LOOP_HZ + LOOP_SPREAD_HZ * i as f32,
                phase: 0.0,
                loop_phase: 0.0,
                level: 0.0,
            })
            .collect();
        Self {
            sample_rate: sample_rate_hz.max(1) as f32,
            master_gain,
            voices,
        }
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn frequency(&self, index: usize) -> Option<f32> {
        self.voices.get(index).map(|v| v.freq_hz)
    }

    /// Fill `out` (interleaved L/R) driven by `controls`; voices without a
    /// control fade out
    pub fn render(&mut self, controls: &[VoiceControl], out: &mut [f32]) {
        let norm = if self.voices.is_empty() {
            0.0
        } else {
            self.master_gain / (self.voices.len() as f32).sqrt()
        };
        let dt = 1.0 / self.sample_rate;

        for frame in out.chunks_mut(2) {
            let (mut left, mut right) = (0.0, 0.0);
            for (i, voice) in self.voices.iter_mut().enumerate() {
                let control = controls.get(i).copied().unwrap_or_default();
                let target = if control.gain.is_finite() {
                    control.gain.max(0.0)
                } else {
                    0.0
                };
                voice.level += (target - voice.level) * GAIN_GLIDE;

                let tremolo = 0.75 + 0.25 * (voice.loop_phase * TAU).sin();
                let sample = (voice.phase * TAU).sin() * voice.level * tremolo;

                let angle = control.pan.clamp(0.0, 1.0) * FRAC_PI_2;
                left += sample * angle.cos();
                right += sample * angle.sin();

                voice.phase = (voice.phase + voice.freq_hz * dt).fract();
                voice.loop_phase = (voice.loop_phase + voice.loop_hz * dt).fract();
            }

            let left = (left * norm).clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);
            let right = (right * norm).clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);
            frame[0] = left;
            if let Some(r) = frame.get_mut(1) {
                *r = right;
            }
        }
    }
}
