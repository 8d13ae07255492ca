//! Orbit detection.

use glam::Vec2;

use crate::params::PhysicsParams;
use crate::world::{Particle, Planet};

/// True when `position` lies within the orbit radius of `planet`
pub fn is_orbiting(planet: &Planet, position: Vec2, physics: &PhysicsParams) -> bool {
    let reach = physics.orbit_radius(planet.radius);
    position.distance_squared(planet.position) <= reach * reach
}

/// Orbiting particles per planet. Planets count independently, so one
/// particle may count for several overlapping orbits.
pub fn orbit_counts(
    planets: &[Planet],
    particles: &[Particle],
    physics: &PhysicsParams,
) -> Vec<usize> {
    planets
        .iter()
        .map(|planet| {
            particles
                .iter()
                .filter(|p| is_orbiting(planet, p.position, physics))
                .count()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParticleParams, PlanetParams};

    fn particle_at(x: f32) -> Particle {
        Particle::new(Vec2::new(x, 0.0), Vec2::ZERO, 1.0, &ParticleParams::default())
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let physics = PhysicsParams::default();
        let planet = Planet::new(0, Vec2::ZERO, 20.0, &PlanetParams::default());
        assert!(is_orbiting(&planet, Vec2::new(300.0, 0.0), &physics));
        assert!(!is_orbiting(&planet, Vec2::new(300.5, 0.0), &physics));
    }

    #[test]
    fn test_count_monotonic_as_particles_approach() {
        let physics = PhysicsParams::default();
        let planets = vec![Planet::new(0, Vec2::ZERO, 20.0, &PlanetParams::default())];
        let mut particles: Vec<Particle> =
            (0..10).map(|i| particle_at(320.0 + i as f32 * 40.0)).collect();

        let mut previous = orbit_counts(&planets, &particles, &physics)[0];
        assert_eq!(previous, 0);
        for _ in 0..40 {
            for p in &mut particles {
                p.position.x -= 10.0;
            }
            let count = orbit_counts(&planets, &particles, &physics)[0];
            assert!(count >= previous, "count dropped from {previous} to {count}");
            previous = count;
        }
        assert_eq!(previous, particles.len());
    }

    #[test]
    fn test_overlapping_orbits_count_independently() {
        let physics = PhysicsParams::default();
        let params = PlanetParams::default();
        let planets = vec![
            Planet::new(0, Vec2::new(-100.0, 0.0), 20.0, &params),
            Planet::new(1, Vec2::new(100.0, 0.0), 20.0, &params),
        ];
        let particles = vec![particle_at(0.0)];
        assert_eq!(orbit_counts(&planets, &particles, &physics), vec![1, 1]);
    }
}
