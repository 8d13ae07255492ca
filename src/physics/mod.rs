//! Fixed-tick integrator for planets and particles.

mod collision;
mod forces;
mod orbit;

pub use collision::{bounce_off_edges, bounce_off_planet, resolve_planet_contacts};
pub use forces::{EdgeRepel, ForceField, ForceSet, ParticleForce, PlanetGravity, Vortex};
pub use orbit::{is_orbiting, orbit_counts};

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;

use crate::params::{Config, ParticleParams, PhysicsParams};
use crate::world::{random_direction, Planet, World};

/// Distance floor for inverse-square terms (px)
pub const MIN_DISTANCE: f32 = 1.0;

/// Width of the soft edge band for particles (px)
pub const EDGE_MARGIN_PX: f32 = 50.0;

/// Advances a [`World`] one tick at a time
pub struct Integrator {
    physics: PhysicsParams,
    particles: ParticleParams,
    rotation_speed_factor: f32,
    forces: ForceSet,
    /// Per-particle acceleration scratch, reused across ticks
    accels: Vec<Vec2>,
}

impl Integrator {
    pub fn new(config: &Config) -> Self {
        let physics = config.physics.clone();
        let forces = ForceSet::new()
            .with(PlanetGravity {
                constant: physics.gravitational_constant,
            })
            .with(ForceField {
                strength: physics.repel_strength,
                buffer_px: physics.forcefield_buffer_px,
            })
            .with(Vortex {
                reach_factor: physics.orbit_distance * physics.orbit_radius_factor,
            })
            .with(EdgeRepel {
                smoothing: physics.edge_repel_smoothing,
                margin_px: EDGE_MARGIN_PX,
            });

        Self {
            physics,
            particles: config.particles.clone(),
            rotation_speed_factor: config.planets.vortex.rotation_speed_factor,
            forces,
            accels: Vec::new(),
        }
    }

    /// Advance one tick: planets first, then particles against the moved
    /// planets
    pub fn step(&mut self, world: &mut World) {
        self.step_planets(world);
        self.step_particles(world);
    }

    /// Orbiting particle count per planet for the current state
    pub fn orbit_counts(&self, world: &World) -> Vec<usize> {
        orbit_counts(&world.planets, &world.particles, &self.physics)
    }

    fn step_planets(&self, world: &mut World) {
        let n = world.planets.len();
        let mut accels = vec![Vec2::ZERO; n];
        let buffer = self.physics.forcefield_buffer_px.max(0.0);
        let repel_scale = 2.0 * self.physics.effective_buffer();

        for i in 0..n {
            for j in (i + 1)..n {
                let (pi, pj) = (&world.planets[i], &world.planets[j]);
                let r = pj.position - pi.position;
                let dist = r.length();
                let dir = r.try_normalize().unwrap_or(Vec2::X);
                let d = dist.max(MIN_DISTANCE);

                let g = self.physics.planet_gravity_constant / (d * d);
                accels[i] += dir * (g * pj.mass);
                accels[j] -= dir * (g * pi.mass);

                let reach = pi.radius + pj.radius + 2.0 * buffer;
                if dist < reach {
                    let push = self.physics.planet_repel_strength * (reach - dist) / repel_scale;
                    accels[i] -= dir * push;
                    accels[j] += dir * push;
                }
            }
        }

        let max_speed = self.physics.max_planet_speed.max(0.0);
        for (planet, a) in world.planets.iter_mut().zip(accels) {
            planet.velocity += a;
            planet.velocity = planet.velocity.clamp_length_max(max_speed);
            planet.position += planet.velocity;
            bounce_off_edges(
                &mut planet.position,
                &mut planet.velocity,
                planet.radius + buffer,
                &world.viewport,
                self.physics.bounce_reduction,
            );
            advance_vortex(planet, self.rotation_speed_factor);
        }
    }

    fn step_particles(&mut self, world: &mut World) {
        self.accels.resize(world.particles.len(), Vec2::ZERO);
        self.forces.accumulate(world, &mut self.accels);

        let World {
            planets,
            particles,
            viewport,
            rng,
        } = world;
        let bounce = self.physics.bounce_reduction;

        for (p, a) in particles.iter_mut().zip(self.accels.iter()) {
            p.velocity += *a;
            p.velocity = clamp_velocity(p.velocity, &self.particles, rng);
            p.position += p.velocity;

            bounce_off_edges(&mut p.position, &mut p.velocity, p.radius, viewport, bounce);
            // Surfaces go last so nothing after them can push a particle back in
            resolve_planet_contacts(p, planets, bounce);

            p.velocity = clamp_velocity(p.velocity, &self.particles, rng);
        }
    }
}

/// Rescale `velocity` into `[min_speed, max_speed]`; a resting particle
/// picks a random heading
pub fn clamp_velocity(velocity: Vec2, params: &ParticleParams, rng: &mut StdRng) -> Vec2 {
    let speed = velocity.length();
    let target = params.clamp_speed(speed);
    if !speed.is_finite() {
        return random_direction(rng) * params.min_speed.max(0.0);
    }
    if speed <= f32::EPSILON {
        return random_direction(rng) * target;
    }
    if target == speed {
        velocity
    } else {
        velocity * (target / speed)
    }
}

fn advance_vortex(planet: &mut Planet, rotation_speed_factor: f32) {
    let angle = planet.vortex_angle + rotation_speed_factor * planet.vortex_scale;
    planet.vortex_angle = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative angles
    if planet.vortex_angle >= TAU {
        planet.vortex_angle = 0.0;
    }
}
