//! Acceleration contributors acting on particles
//!
//! Each term implements [`ParticleForce`] and adds its contribution into a
//! per-particle buffer; [`ForceSet`] sums all registered terms.

use glam::Vec2;

use super::MIN_DISTANCE;
use crate::world::World;

/// Source of particle acceleration (px per tick²)
pub trait ParticleForce {
    /// Add this term's acceleration for every particle into `out[i]`
    fn accelerate(&self, world: &World, out: &mut [Vec2]);
}

/// Collection of particle acceleration terms
pub struct ForceSet {
    terms: Vec<Box<dyn ParticleForce + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ParticleForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Zero `out` and accumulate every term into it
    pub fn accumulate(&self, world: &World, out: &mut [Vec2]) {
        for a in out.iter_mut() {
            *a = Vec2::ZERO;
        }
        for term in &self.terms {
            term.accelerate(world, out);
        }
    }
}

/// Inverse-square pull toward every planet: a = G * m / d²
pub struct PlanetGravity {
    pub constant: f32,
}

impl ParticleForce for PlanetGravity {
    fn accelerate(&self, world: &World, out: &mut [Vec2]) {
        for (p, a) in world.particles.iter().zip(out.iter_mut()) {
            for planet in &world.planets {
                let r = planet.position - p.position;
                let Some(dir) = r.try_normalize() else {
                    continue;
                };
                // Guard against the singularity at the planet centre
                let d = r.length().max(MIN_DISTANCE);
                *a += dir * (self.constant * planet.mass / (d * d));
            }
        }
    }
}

/// Outward push inside the shell `planet.radius + buffer + particle.radius`,
/// growing linearly with penetration depth
pub struct ForceField {
    pub strength: f32,
    pub buffer_px: f32,
}

impl ParticleForce for ForceField {
    fn accelerate(&self, world: &World, out: &mut [Vec2]) {
        let depth_scale = self.buffer_px.max(1.0);
        for (p, a) in world.particles.iter().zip(out.iter_mut()) {
            for planet in &world.planets {
                let offset = p.position - planet.position;
                let d = offset.length();
                let shell = planet.radius + self.buffer_px + p.radius;
                if d < shell {
                    let outward = offset.try_normalize().unwrap_or(Vec2::X);
                    *a += outward * (self.strength * (shell - d) / depth_scale);
                }
            }
        }
    }
}

/// Counter-clockwise swirl within each planet's orbit radius, fading to
/// zero at the rim
pub struct Vortex {
    /// orbit radius = planet radius * reach_factor
    pub reach_factor: f32,
}

impl ParticleForce for Vortex {
    fn accelerate(&self, world: &World, out: &mut [Vec2]) {
        for (p, a) in world.particles.iter().zip(out.iter_mut()) {
            for planet in &world.planets {
                let reach = planet.radius * self.reach_factor;
                let offset = p.position - planet.position;
                let d = offset.length();
                if d >= reach || d < MIN_DISTANCE {
                    continue;
                }
                let tangent = (offset / d).perp();
                *a += tangent * (planet.vortex_scale * (1.0 - d / reach));
            }
        }
    }
}

/// Soft inward push near the viewport edges
pub struct EdgeRepel {
    pub smoothing: f32,
    pub margin_px: f32,
}

impl EdgeRepel {
    /// Push along one axis for a coordinate in [0, size]
    fn axis(&self, coord: f32, size: f32) -> f32 {
        let mut push = 0.0;
        if coord < self.margin_px {
            push += (self.margin_px - coord) * self.smoothing;
        }
        let far_gap = size - coord;
        if far_gap < self.margin_px {
            push -= (self.margin_px - far_gap) * self.smoothing;
        }
        push
    }
}

impl ParticleForce for EdgeRepel {
    fn accelerate(&self, world: &World, out: &mut [Vec2]) {
        let viewport = &world.viewport;
        for (p, a) in world.particles.iter().zip(out.iter_mut()) {
            a.x += self.axis(p.position.x, viewport.width_px);
            a.y += self.axis(p.position.y, viewport.height_px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParticleParams, PlanetParams, Viewport};
    use crate::world::{Particle, Planet};

    fn world_with(planet_at: Vec2, particle_at: Vec2) -> World {
        let planet = Planet::new(0, planet_at, 20.0, &PlanetParams::default());
        let particle = Particle::new(particle_at, Vec2::ZERO, 1.0, &ParticleParams::default());
        World::from_parts(vec![planet], vec![particle], Viewport::default(), 0)
    }

    fn accel(term: impl ParticleForce + Send + Sync + 'static, world: &World) -> Vec2 {
        let mut out = vec![Vec2::ZERO; world.particles.len()];
        ForceSet::new().with(term).accumulate(world, &mut out);
        out[0]
    }

    #[test]
    fn test_gravity_points_toward_planet() {
        let world = world_with(Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0));
        let a = accel(PlanetGravity { constant: 1.0 }, &world);
        assert!(a.x < 0.0);
        assert!(a.y.abs() < 1e-6);
    }

    #[test]
    fn test_gravity_inverse_square() {
        let near = world_with(Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0));
        let far = world_with(Vec2::new(400.0, 300.0), Vec2::new(600.0, 300.0));
        let ratio = accel(PlanetGravity { constant: 1.0 }, &near).length()
            / accel(PlanetGravity { constant: 1.0 }, &far).length();
        assert!((ratio - 4.0).abs() < 1e-3, "Expected ~4x, got {}", ratio);
    }

    #[test]
    fn test_gravity_guarded_at_zero_distance() {
        let world = world_with(Vec2::new(400.0, 300.0), Vec2::new(400.0, 300.0));
        let a = accel(PlanetGravity { constant: 1.0 }, &world);
        assert!(a.is_finite());

        let close = world_with(Vec2::new(400.0, 300.0), Vec2::new(400.0001, 300.0));
        let a = accel(PlanetGravity { constant: 1.0 }, &close);
        assert!(a.is_finite());
        assert!(a.length() <= 60.0 + 1e-3); // G * mass / MIN_DISTANCE²
    }

    #[test]
    fn test_force_field_only_inside_shell() {
        let field = || ForceField {
            strength: 0.5,
            buffer_px: 10.0,
        };
        let outside = world_with(Vec2::new(400.0, 300.0), Vec2::new(440.0, 300.0));
        assert_eq!(accel(field(), &outside), Vec2::ZERO);

        let inside = world_with(Vec2::new(400.0, 300.0), Vec2::new(425.0, 300.0));
        let a = accel(field(), &inside);
        // shell = 20 + 10 + 1 = 31, depth 6 -> 0.5 * 6 / 10
        assert!((a.x - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_vortex_is_tangential() {
        let world = world_with(Vec2::new(400.0, 300.0), Vec2::new(450.0, 300.0));
        let a = accel(Vortex { reach_factor: 15.0 }, &world);
        assert!(a.x.abs() < 1e-6);
        assert!(a.y > 0.0);

        let beyond = world_with(Vec2::new(400.0, 300.0), Vec2::new(720.0, 300.0));
        assert_eq!(accel(Vortex { reach_factor: 15.0 }, &beyond), Vec2::ZERO);
    }

    #[test]
    fn test_edge_repel_pushes_inward() {
        let repel = EdgeRepel {
            smoothing: 0.01,
            margin_px: 50.0,
        };
        assert!((repel.axis(10.0, 1280.0) - 0.4).abs() < 1e-6);
        assert!((repel.axis(1270.0, 1280.0) + 0.4).abs() < 1e-6);
        assert_eq!(repel.axis(640.0, 1280.0), 0.0);
    }
}
