//! Planets, particles and the bounds they live in.

mod spawn;

pub(crate) use spawn::random_direction;

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Rgb;
use crate::effects::planet_color;
use crate::params::{Config, ParticleParams, PlanetParams, Viewport};

/// A gravity well that sings when particles orbit it
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Rgb,
    /// Tangential push of the vortex field
    pub vortex_scale: f32,
    /// Vortex indicator rotation (radians, [0, 2π))
    pub vortex_angle: f32,
    pub label: String,
}

impl Planet {
    /// Build planet `index` with derived mass, colour and vortex strength
    pub fn new(index: usize, position: Vec2, radius: f32, params: &PlanetParams) -> Self {
        let size = params.normalized_radius(radius);
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            mass: params.mass_for(radius),
            color: planet_color(params, index, radius),
            vortex_scale: params.vortex.scale_at(size),
            vortex_angle: 0.0,
            label: format!("Planet {}", index + 1),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, params: &ParticleParams) -> Self {
        Self {
            position,
            velocity,
            radius,
            mass: params.mass_for(radius),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// ½ m v²
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// Complete simulation state, owned by the simulation loop
pub struct World {
    pub planets: Vec<Planet>,
    pub particles: Vec<Particle>,
    pub viewport: Viewport,
    pub(crate) rng: StdRng,
}

impl World {
    /// Spawn planets and particles for `viewport` from a seeded random source
    pub fn new(config: &Config, viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let planets = spawn::spawn_planets(config, &viewport, &mut rng);
        let particles = spawn::spawn_particles(config, &viewport, &planets, &mut rng);
        debug!(
            "spawned {} planets and {} particles in {}x{} (seed {seed})",
            planets.len(),
            particles.len(),
            viewport.width_px,
            viewport.height_px
        );
        Self {
            planets,
            particles,
            viewport,
            rng,
        }
    }

    /// Assemble a world from hand-placed bodies
    pub fn from_parts(
        planets: Vec<Planet>,
        particles: Vec<Particle>,
        viewport: Viewport,
        seed: u64,
    ) -> Self {
        Self {
            planets,
            particles,
            viewport,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replace the particle population, planets are kept
    pub fn respawn_particles(&mut self, config: &Config) {
        self.particles =
            spawn::spawn_particles(config, &self.viewport, &self.planets, &mut self.rng);
        debug!("respawned {} particles", self.particles.len());
    }
}
