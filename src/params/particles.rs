//! Particle population and motion bounds.

use log::warn;

use crate::color::Rgb;

use super::{Viewport, MAX_PARTICLES};

/// Particle generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleParams {
    /// Population when screen-size scaling is off
    pub count: usize,

    /// Derive the population from the viewport area
    pub use_screen_size_scaling: bool,

    /// Screen area per particle when scaling (px² per particle)
    pub density_factor: f32,

    /// Spawn at the viewport centre instead of random placement
    pub start_in_center: bool,

    pub min_radius_px: f32,
    pub max_radius_px: f32,

    /// mass = radius * mass_factor
    pub mass_factor: f32,

    pub base_color: Rgb,

    /// How quickly speed brightens the base colour toward white
    pub speed_color_factor: f32,

    /// Speed ceiling (px per tick)
    pub max_speed: f32,

    /// Speed floor (px per tick), particles never come to rest
    pub min_speed: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 1000,
            use_screen_size_scaling: true,
            density_factor: 1000.0, // 1280x720 -> 921 particles
            start_in_center: false,
            min_radius_px: 0.5,
            max_radius_px: 2.0,
            mass_factor: 0.1,
            base_color: Rgb::new(0x00, 0x66, 0xFF),
            speed_color_factor: 2.0,
            max_speed: 5.0,
            min_speed: 0.3,
        }
    }
}

impl ParticleParams {
    /// Number of particles to spawn for a viewport, at most `MAX_PARTICLES`
    pub fn population(&self, viewport: &Viewport) -> usize {
        let wanted = if self.use_screen_size_scaling {
            let area = viewport.width_px * viewport.height_px;
            ((area / self.density_factor).floor() as usize).max(1)
        } else {
            self.count
        };
        if wanted > MAX_PARTICLES {
            warn!("{wanted} particles requested, capping at {MAX_PARTICLES}");
            return MAX_PARTICLES;
        }
        wanted
    }

    pub fn mass_for(&self, radius_px: f32) -> f32 {
        radius_px * self.mass_factor
    }

    /// Clamp a speed into [min_speed, max_speed] without panicking on an
    /// inverted range
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.max(self.min_speed).min(self.max_speed)
    }
}
