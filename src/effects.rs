//! Render parameters derived from simulation state.
//!
//! Nothing here draws; the mapper turns volumes, speeds and vortex angles
//! into glow circles, indicator lines and colours for whatever renderer
//! consumes the snapshot.

use glam::Vec2;

use crate::color::Rgb;
use crate::params::{
    AudioParams, Config, EffectsParams, ParticleParams, PhysicsParams, PlanetParams, VortexParams,
};
use crate::world::Planet;

/// Volume-driven glow circle around a planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Opacity in [0, max_volume_opacity]
    pub opacity: f32,
    /// Circle radius (px)
    pub radius: f32,
    pub color: Rgb,
}

/// Spinning vortex indicator line
#[derive(Debug, Clone, PartialEq)]
pub struct VortexLine {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Rgb,
    pub width_px: f32,
    pub dash_px: Vec<f32>,
}

/// Palette colour, then gradient by size, then the palette again
pub fn planet_color(params: &PlanetParams, index: usize, radius: f32) -> Rgb {
    if let Some(color) = params.colors.get(index) {
        return *color;
    }
    if let Some(gradient) = &params.color_gradient {
        return gradient.at(params.normalized_radius(radius));
    }
    if params.colors.is_empty() {
        Rgb::WHITE
    } else {
        params.colors[index % params.colors.len()]
    }
}

/// Maps volumes and motion onto visual parameters
#[derive(Debug, Clone)]
pub struct EffectsMapper {
    effects: EffectsParams,
    audio: AudioParams,
    vortex: VortexParams,
    physics: PhysicsParams,
    particles: ParticleParams,
}

impl EffectsMapper {
    pub fn new(config: &Config) -> Self {
        Self {
            effects: config.effects.clone(),
            audio: config.audio.clone(),
            vortex: config.planets.vortex.clone(),
            physics: config.physics.clone(),
            particles: config.particles.clone(),
        }
    }

    /// Glow for a planet at `volume_db`
    ///
    /// Opacity grows linearly with the normalized volume up to
    /// `max_volume_opacity`; the radius grows from the planet edge to twice
    /// its radius, times `volume_glow_scale`.
    pub fn glow(&self, planet: &Planet, volume_db: f32) -> Glow {
        let level = self.audio.level(volume_db);
        Glow {
            opacity: level * self.effects.max_volume_opacity.clamp(0.0, 1.0),
            radius: planet.radius * (1.0 + level) * self.effects.volume_glow_scale,
            color: self.effects.volume_glow_color,
        }
    }

    /// Fraction of the previous frame faded out each frame
    pub fn trail_fade(&self) -> f32 {
        self.effects.trail_opacity.clamp(0.0, 1.0)
    }

    /// Indicator from the planet centre out to its orbit radius
    pub fn vortex_line(&self, planet: &Planet) -> VortexLine {
        let reach = self.physics.orbit_radius(planet.radius);
        VortexLine {
            start: planet.position,
            end: planet.position + Vec2::from_angle(planet.vortex_angle) * reach,
            color: self.vortex.line_color,
            width_px: self.vortex.line_width_px,
            dash_px: self.vortex.line_dash_px.clone(),
        }
    }

    /// Base colour brightened toward white as the particle speeds up
    pub fn particle_color(&self, speed: f32) -> Rgb {
        let max = self.particles.max_speed.max(f32::EPSILON);
        let t = (speed / max * self.particles.speed_color_factor).clamp(0.0, 1.0);
        self.particles.base_color.lerp(Rgb::WHITE, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ColorGradient;

    fn planet(radius: f32) -> Planet {
        Planet::new(0, Vec2::new(200.0, 200.0), radius, &PlanetParams::default())
    }

    #[test]
    fn test_glow_tracks_volume() {
        let mapper = EffectsMapper::new(&Config::default());
        let p = planet(20.0);

        let quiet = mapper.glow(&p, -40.0);
        assert_eq!(quiet.opacity, 0.0);
        assert!((quiet.radius - 20.0 * 1.01).abs() < 1e-4);

        let loud = mapper.glow(&p, 0.0);
        assert!((loud.opacity - 0.04).abs() < 1e-6);
        assert!((loud.radius - 40.0 * 1.01).abs() < 1e-4);

        let half = mapper.glow(&p, -20.0);
        assert!(half.opacity > quiet.opacity && half.opacity < loud.opacity);
    }

    #[test]
    fn test_glow_opacity_capped() {
        let mapper = EffectsMapper::new(&Config::default());
        let p = planet(20.0);
        for db in [-100.0, -40.0, -10.0, 0.0, 25.0] {
            let glow = mapper.glow(&p, db);
            assert!(glow.opacity >= 0.0 && glow.opacity <= 0.04);
        }
    }

    #[test]
    fn test_vortex_line_points_along_angle() {
        let mapper = EffectsMapper::new(&Config::default());
        let mut p = planet(20.0);
        p.vortex_angle = std::f32::consts::FRAC_PI_2;
        let line = mapper.vortex_line(&p);
        assert_eq!(line.start, p.position);
        assert!((line.end.x - p.position.x).abs() < 1e-3);
        assert!((line.end.y - (p.position.y + 300.0)).abs() < 1e-3);
        assert_eq!(line.dash_px, vec![5.0, 5.0]);
    }

    #[test]
    fn test_particle_color_brightens_with_speed() {
        let mapper = EffectsMapper::new(&Config::default());
        let base = ParticleParams::default().base_color;
        assert_eq!(mapper.particle_color(0.0), base);
        assert_eq!(mapper.particle_color(5.0), Rgb::WHITE);
        let mid = mapper.particle_color(1.0);
        assert!(mid.r > base.r && mid.r < 255);
    }

    #[test]
    fn test_planet_color_selection() {
        let mut params = PlanetParams::default();
        assert_eq!(planet_color(&params, 0, 20.0), params.colors[0]);

        // Past the palette the gradient takes over, keyed by size
        let gradient = ColorGradient::default();
        assert_eq!(planet_color(&params, 4, 20.0), gradient.min_color);
        assert_eq!(planet_color(&params, 5, 35.0), gradient.max_color);

        params.color_gradient = None;
        assert_eq!(planet_color(&params, 5, 35.0), params.colors[1]);

        params.colors.clear();
        assert_eq!(planet_color(&params, 0, 20.0), Rgb::WHITE);
    }
}
