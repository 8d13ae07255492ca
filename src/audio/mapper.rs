//! Orbit counts to smoothed per-planet volumes.

use crate::params::AudioParams;

/// Volume of one planet voice (dB)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeState {
    /// Smoothed volume heard this tick
    pub current_db: f32,
    /// Volume implied by the latest orbit count
    pub target_db: f32,
}

/// Convert decibels to linear amplitude; anything at or below `floor_db`
/// is silent
pub fn db_to_gain(db: f32, floor_db: f32) -> f32 {
    if !db.is_finite() || db <= floor_db {
        return 0.0;
    }
    10.0_f32.powf(db / 20.0)
}

/// Exponentially smoothed volume per planet
#[derive(Debug, Clone)]
pub struct AudioMapper {
    params: AudioParams,
    volumes: Vec<VolumeState>,
}

impl AudioMapper {
    /// All planets start silent at `min_volume_db`
    pub fn new(params: AudioParams, planet_count: usize) -> Self {
        let silent = VolumeState {
            current_db: params.min_volume_db,
            target_db: params.min_volume_db,
        };
        Self {
            params,
            volumes: vec![silent; planet_count],
        }
    }

    /// Advance smoothing one tick. Planets missing from `counts` are treated
    /// as having no orbiting particles.
    pub fn update(&mut self, counts: &[usize]) {
        let smoothing = self.params.smoothing_factor.clamp(0.0, 1.0);
        for (i, volume) in self.volumes.iter_mut().enumerate() {
            let count = counts.get(i).copied().unwrap_or(0);
            volume.target_db = self.params.target_for(count);
            let next = volume.current_db + (volume.target_db - volume.current_db) * smoothing;
            volume.current_db = self.params.clamp_db(next);
        }
    }

    pub fn volumes(&self) -> &[VolumeState] {
        &self.volumes
    }

    /// Current volume of planet `index`, the floor for unknown planets
    pub fn volume_db(&self, index: usize) -> f32 {
        self.volumes
            .get(index)
            .map_or(self.params.min_volume_db, |v| v.current_db)
    }

    /// Linear gain of planet `index`
    pub fn gain(&self, index: usize) -> f32 {
        db_to_gain(self.volume_db(index), self.params.min_volume_db)
    }

    /// Loudest planet and its volume
    pub fn loudest(&self) -> Option<(usize, f32)> {
        self.volumes
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.current_db))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Back to silence
    pub fn reset(&mut self) {
        for volume in &mut self.volumes {
            volume.current_db = self.params.min_volume_db;
            volume.target_db = self.params.min_volume_db;
        }
    }

    pub fn params(&self) -> &AudioParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_floor() {
        let mapper = AudioMapper::new(AudioParams::default(), 3);
        assert_eq!(mapper.volumes().len(), 3);
        for i in 0..3 {
            assert_eq!(mapper.volume_db(i), -40.0);
            assert_eq!(mapper.gain(i), 0.0);
        }
    }

    #[test]
    fn test_single_orbit_converges() {
        let mut mapper = AudioMapper::new(AudioParams::default(), 1);
        for _ in 0..500 {
            mapper.update(&[1]);
        }
        // Residual error is (0.99)^500 of the 1 dB step
        assert!((mapper.volume_db(0) - -39.0).abs() < 0.01);
        assert_eq!(mapper.volumes()[0].target_db, -39.0);
    }

    #[test]
    fn test_smoothing_within_one_percent_after_460_ticks() {
        let mut mapper = AudioMapper::new(AudioParams::default(), 1);
        for _ in 0..460 {
            mapper.update(&[40]);
        }
        let remaining = (0.0 - mapper.volume_db(0)).abs();
        assert!(remaining <= 0.01 * 40.0, "still {remaining} dB away");
    }

    #[test]
    fn test_volume_stays_in_range() {
        let params = AudioParams {
            smoothing_factor: 1.0,
            ..Default::default()
        };
        let mut mapper = AudioMapper::new(params, 2);
        for counts in [[0, 1000], [5, 0], [usize::MAX, 3]] {
            mapper.update(&counts);
            for v in mapper.volumes() {
                assert!(v.current_db >= -40.0 && v.current_db <= 0.0);
            }
        }
    }

    #[test]
    fn test_short_counts_treated_as_zero() {
        let params = AudioParams {
            smoothing_factor: 1.0,
            ..Default::default()
        };
        let mut mapper = AudioMapper::new(params, 3);
        mapper.update(&[10]);
        assert_eq!(mapper.volume_db(0), -30.0);
        assert_eq!(mapper.volume_db(1), -40.0);
        assert_eq!(mapper.volume_db(2), -40.0);
        assert_eq!(mapper.loudest(), Some((0, -30.0)));
    }

    #[test]
    fn test_reset_silences() {
        let mut mapper = AudioMapper::new(AudioParams::default(), 1);
        for _ in 0..50 {
            mapper.update(&[20]);
        }
        assert!(mapper.volume_db(0) > -40.0);
        mapper.reset();
        assert_eq!(mapper.volume_db(0), -40.0);
    }

    #[test]
    fn test_db_to_gain() {
        assert_eq!(db_to_gain(-40.0, -40.0), 0.0);
        assert!((db_to_gain(0.0, -40.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-20.0, -40.0) - 0.1).abs() < 1e-6);
        assert_eq!(db_to_gain(f32::NAN, -40.0), 0.0);
    }
}
