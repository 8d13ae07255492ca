//! Parameter definitions with units and documented semantics.
//!
//! All tunables of the simulation live here:
//! - Units in the field docs (px, px per tick, dB)
//! - Defaults matching the shipped configuration
//! - One immutable [`Config`] handed to every system at construction

mod audio;
mod effects;
mod file;
mod particles;
mod physics;
mod planets;
mod sound;
mod viewport;

// Re-export all types
pub use audio::AudioParams;
pub use effects::EffectsParams;
pub use file::{ConfigError, MAX_PARTICLES, MAX_PLANETS};
pub use particles::ParticleParams;
pub use physics::PhysicsParams;
pub use planets::{ColorGradient, PlanetParams, VortexParams};
pub use sound::{RecordingConfig, SoundConfig};
pub use viewport::Viewport;

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub planets: PlanetParams,
    pub particles: ParticleParams,
    pub physics: PhysicsParams,
    pub audio: AudioParams,
    pub effects: EffectsParams,
}
