//! Sound: volume mapping, drone synthesis, live output and WAV bounce.
//!
//! The mapper turns orbit counts into smoothed per-planet volumes; the drone
//! bank voices them, either on the default device or into a WAV file.

mod mapper;
mod record;
mod synth;
mod system;

pub use mapper::{db_to_gain, AudioMapper, VolumeState};
pub use record::{bounce, record_wav, wav_spec};
pub use synth::{midi_to_hz, voice_note, DroneBank, VoiceControl, C_MAJOR_PENTATONIC};
pub use system::AudioSystem;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoDevice,

    #[error("unsupported output sample format {0}, need f32")]
    UnsupportedFormat(String),

    #[error("failed to get audio config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("invalid sound config: {0}")]
    InvalidConfig(String),

    #[error("WAV write failed: {0}")]
    Wav(#[from] hound::Error),
}
