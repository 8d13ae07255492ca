//! Random placement of planets and particles.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

use super::{Particle, Planet};
use crate::params::{Config, Viewport};

/// Rejection-sampling budget per body before accepting an imperfect spot
const MAX_PLACEMENT_ATTEMPTS: usize = 200;

/// Spread of particles started at the centre (px)
const CENTER_JITTER_PX: f32 = 1.0;

/// Uniform sample in [lo, hi], the midpoint for an empty range
fn uniform(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Uniform point keeping `margin` px from every edge
fn point_inside(rng: &mut StdRng, viewport: &Viewport, margin: f32) -> Vec2 {
    let x = if viewport.width_px > 2.0 * margin {
        uniform(rng, margin, viewport.width_px - margin)
    } else {
        viewport.width_px / 2.0
    };
    let y = if viewport.height_px > 2.0 * margin {
        uniform(rng, margin, viewport.height_px - margin)
    } else {
        viewport.height_px / 2.0
    };
    Vec2::new(x, y)
}

pub(crate) fn random_direction(rng: &mut StdRng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

pub(super) fn spawn_planets(config: &Config, viewport: &Viewport, rng: &mut StdRng) -> Vec<Planet> {
    let params = &config.planets;
    let buffer = config.physics.forcefield_buffer_px;
    let mut planets: Vec<Planet> = Vec::with_capacity(params.count);

    for index in 0..params.count {
        let radius = match params.fixed_radius_px {
            Some(fixed) => fixed,
            None => uniform(rng, params.min_radius_px, params.max_radius_px),
        };
        let margin = radius + buffer;

        // Keep force fields apart; give up gracefully on crowded viewports
        let mut position = point_inside(rng, viewport, margin);
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let clear = planets.iter().all(|other| {
                position.distance(other.position) >= radius + other.radius + 2.0 * buffer
            });
            if clear {
                break;
            }
            position = point_inside(rng, viewport, margin);
        }

        planets.push(Planet::new(index, position, radius, params));
    }

    planets
}

pub(super) fn spawn_particles(
    config: &Config,
    viewport: &Viewport,
    planets: &[Planet],
    rng: &mut StdRng,
) -> Vec<Particle> {
    let params = &config.particles;
    let buffer = config.physics.forcefield_buffer_px;
    let count = params.population(viewport);

    (0..count)
        .map(|_| {
            let radius = uniform(rng, params.min_radius_px, params.max_radius_px);
            let position = if params.start_in_center {
                viewport.center() + random_direction(rng) * uniform(rng, 0.0, CENTER_JITTER_PX)
            } else {
                let mut candidate = point_inside(rng, viewport, radius);
                for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                    let clear = planets.iter().all(|planet| {
                        candidate.distance(planet.position) >= planet.radius + buffer + radius
                    });
                    if clear {
                        break;
                    }
                    candidate = point_inside(rng, viewport, radius);
                }
                candidate
            };
            let position = push_out_of_planets(position, radius, planets);
            let velocity = random_direction(rng) * params.min_speed;
            Particle::new(position, velocity, radius, params)
        })
        .collect()
}

/// Move a point onto the surface of any planet it sits inside
fn push_out_of_planets(mut position: Vec2, radius: f32, planets: &[Planet]) -> Vec2 {
    for planet in planets {
        let contact = planet.radius + radius;
        let offset = position - planet.position;
        if offset.length() < contact {
            let normal = offset.try_normalize().unwrap_or(Vec2::X);
            position = planet.position + normal * contact;
        }
    }
    position
}
