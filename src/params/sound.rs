//! Sound engine and recording configuration.

use std::path::PathBuf;

/// Drone synthesis configuration
#[derive(Debug, Clone)]
pub struct SoundConfig {
    /// Output sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Simulation ticks per second of audio
    pub ticks_per_second: u32,

    /// Gain applied to the mixed voices before the limiter
    pub master_gain: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            ticks_per_second: 60, // One tick per display frame
            master_gain: 0.8,
        }
    }
}

impl SoundConfig {
    /// Audio frames synthesized per simulation tick
    pub fn frames_per_tick(&self) -> usize {
        (self.sample_rate_hz / self.ticks_per_second.max(1)) as usize
    }

    /// Validate configuration (rates must be > 0, gain finite)
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate_hz == 0 {
            return Err("Sample rate must be > 0".to_string());
        }
        if self.ticks_per_second == 0 {
            return Err("Ticks per second must be > 0".to_string());
        }
        if self.ticks_per_second > self.sample_rate_hz {
            return Err(format!(
                "Ticks per second ({}) cannot exceed sample rate ({})",
                self.ticks_per_second, self.sample_rate_hz
            ));
        }
        if !self.master_gain.is_finite() || self.master_gain < 0.0 {
            return Err(format!("Master gain must be >= 0, got {}", self.master_gain));
        }
        Ok(())
    }
}

/// Offline WAV bounce configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output WAV file
    pub output_path: PathBuf,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_path: PathBuf::from("orbitloops.wav"),
        }
    }

    /// Total number of simulation ticks to bounce
    pub fn total_ticks(&self, sound: &SoundConfig) -> usize {
        (self.duration_secs.max(0.0) * sound.ticks_per_second as f32).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_per_tick() {
        let sound = SoundConfig::default();
        assert_eq!(sound.frames_per_tick(), 735);
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        let mut sound = SoundConfig::default();
        assert!(sound.validate().is_ok());
        sound.ticks_per_second = 0;
        assert!(sound.validate().is_err());
        sound.ticks_per_second = 60;
        sound.sample_rate_hz = 0;
        assert!(sound.validate().is_err());
    }

    #[test]
    fn test_total_ticks() {
        let sound = SoundConfig::default();
        assert_eq!(RecordingConfig::new(2.0).total_ticks(&sound), 120);
        assert_eq!(RecordingConfig::new(-1.0).total_ticks(&sound), 0);
    }
}
