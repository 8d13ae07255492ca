//! Orbit-count to volume mapping.

/// Volume mapping (dB)
#[derive(Debug, Clone, PartialEq)]
pub struct AudioParams {
    /// Volume of a planet with no orbiting particles (dB)
    pub min_volume_db: f32,

    /// Loudest a planet can get (dB)
    pub max_volume_db: f32,

    /// Volume increase per orbiting particle (dB)
    /// Formula: target = min_volume + count * volume_step
    pub volume_step_db: f32,

    /// Per-tick smoothing weight (0.1 = gradual, 1 = instant)
    pub smoothing_factor: f32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            min_volume_db: -40.0,
            max_volume_db: 0.0,
            volume_step_db: 1.0,
            smoothing_factor: 0.01,
        }
    }
}

impl AudioParams {
    /// Clamp into [min_volume, max_volume]
    pub fn clamp_db(&self, db: f32) -> f32 {
        db.max(self.min_volume_db).min(self.max_volume_db)
    }

    /// Target volume for a planet with `orbiting` particles
    pub fn target_for(&self, orbiting: usize) -> f32 {
        self.clamp_db(self.min_volume_db + orbiting as f32 * self.volume_step_db)
    }

    /// Position of `db` inside the volume range, in [0, 1]
    pub fn level(&self, db: f32) -> f32 {
        let span = self.max_volume_db - self.min_volume_db;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((db - self.min_volume_db) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_saturates() {
        let audio = AudioParams::default();
        assert_eq!(audio.target_for(0), -40.0);
        assert_eq!(audio.target_for(1), -39.0);
        assert_eq!(audio.target_for(40), 0.0);
        assert_eq!(audio.target_for(10_000), 0.0);
    }

    #[test]
    fn test_level_normalizes() {
        let audio = AudioParams::default();
        assert_eq!(audio.level(-40.0), 0.0);
        assert_eq!(audio.level(-20.0), 0.5);
        assert_eq!(audio.level(10.0), 1.0);
    }
}
