//! Hard contacts: planet surfaces and viewport edges.

use glam::Vec2;

use crate::params::Viewport;
use crate::world::{Particle, Planet};

/// Project a particle out of `planet` and reflect its inward velocity,
/// keeping `bounce` of the normal component. Returns true on contact.
pub fn bounce_off_planet(particle: &mut Particle, planet: &Planet, bounce: f32) -> bool {
    let contact = planet.radius + particle.radius;
    let offset = particle.position - planet.position;
    if offset.length_squared() >= contact * contact {
        return false;
    }
    let normal = offset.try_normalize().unwrap_or(Vec2::X);
    particle.position = planet.position + normal * contact;
    let inward = particle.velocity.dot(normal);
    if inward < 0.0 {
        particle.velocity -= normal * (inward * (1.0 + bounce));
    }
    true
}

/// Surface-by-surface passes before falling back to a cluster push-out
pub const MAX_CONTACT_PASSES: usize = 8;

/// Clearance added beyond a contact surface by the cluster push-out (px)
const CLEARANCE_PX: f32 = 1e-3;

/// Bounce `particle` off every planet it touches until it is clear of all
/// of them. Returns true on any contact.
///
/// Overlapping planets can trap a particle between surfaces; after
/// `MAX_CONTACT_PASSES` it is moved straight away from the centroid of the
/// planets still holding it, past every disc on that line.
pub fn resolve_planet_contacts(particle: &mut Particle, planets: &[Planet], bounce: f32) -> bool {
    let mut touched_any = false;
    for _ in 0..MAX_CONTACT_PASSES {
        let mut touched = false;
        for planet in planets {
            touched |= bounce_off_planet(particle, planet, bounce);
        }
        if !touched {
            return touched_any;
        }
        touched_any = true;
    }

    let holding: Vec<&Planet> = planets
        .iter()
        .filter(|planet| overlaps(particle, planet))
        .collect();
    if holding.is_empty() {
        return touched_any;
    }
    let centroid =
        holding.iter().map(|planet| planet.position).sum::<Vec2>() / holding.len() as f32;
    let dir = (particle.position - centroid).try_normalize().unwrap_or(Vec2::X);

    // A ray leaves each disc at most once, so one exit per planet suffices
    let mut t = 0.0;
    for _ in 0..=planets.len() {
        let mut moved = false;
        for planet in planets {
            let contact = planet.radius + particle.radius;
            let offset = particle.position + dir * t - planet.position;
            if offset.length_squared() < contact * contact {
                let b = offset.dot(dir);
                let c = offset.length_squared() - contact * contact;
                t += -b + (b * b - c).max(0.0).sqrt() + CLEARANCE_PX;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }

    particle.position += dir * t;
    let inward = particle.velocity.dot(dir);
    if inward < 0.0 {
        particle.velocity -= dir * (inward * (1.0 + bounce));
    }
    true
}

fn overlaps(particle: &Particle, planet: &Planet) -> bool {
    let contact = planet.radius + particle.radius;
    particle.position.distance_squared(planet.position) < contact * contact
}

/// Keep a disc of `margin` px inside the viewport, reflecting with `bounce`.
/// Returns true when an edge was hit.
pub fn bounce_off_edges(
    position: &mut Vec2,
    velocity: &mut Vec2,
    margin: f32,
    viewport: &Viewport,
    bounce: f32,
) -> bool {
    let hit_x = bounce_axis(&mut position.x, &mut velocity.x, margin, viewport.width_px, bounce);
    let hit_y = bounce_axis(&mut position.y, &mut velocity.y, margin, viewport.height_px, bounce);
    hit_x || hit_y
}

fn bounce_axis(coord: &mut f32, vel: &mut f32, margin: f32, size: f32, bounce: f32) -> bool {
    let (lo, hi) = if size > 2.0 * margin {
        (margin, size - margin)
    } else {
        (size / 2.0, size / 2.0)
    };
    if *coord < lo {
        *coord = lo;
        if *vel < 0.0 {
            *vel = -*vel * bounce;
        }
        true
    } else if *coord > hi {
        *coord = hi;
        if *vel > 0.0 {
            *vel = -*vel * bounce;
        }
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParticleParams, PlanetParams};

    #[test]
    fn test_planet_bounce_projects_and_damps() {
        let planet = Planet::new(0, Vec2::new(100.0, 100.0), 20.0, &PlanetParams::default());
        let mut p = Particle::new(
            Vec2::new(110.0, 100.0),
            Vec2::new(-4.0, 1.0),
            1.0,
            &ParticleParams::default(),
        );
        assert!(bounce_off_planet(&mut p, &planet, 0.2));
        assert!((p.position.distance(planet.position) - 21.0).abs() < 1e-4);
        // Normal component reversed and reduced, tangential untouched
        assert!((p.velocity.x - 0.8).abs() < 1e-5);
        assert!((p.velocity.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_planet_bounce_ignores_clear_particles() {
        let planet = Planet::new(0, Vec2::new(100.0, 100.0), 20.0, &PlanetParams::default());
        let params = ParticleParams::default();
        let mut p = Particle::new(Vec2::new(130.0, 100.0), Vec2::X, 1.0, &params);
        assert!(!bounce_off_planet(&mut p, &planet, 0.2));
        assert_eq!(p.position, Vec2::new(130.0, 100.0));
    }

    #[test]
    fn test_particle_escapes_overlapping_planets() {
        let params = PlanetParams::default();
        let planets = vec![
            Planet::new(0, Vec2::new(600.0, 360.0), 30.0, &params),
            Planet::new(1, Vec2::new(640.0, 360.0), 30.0, &params),
            Planet::new(2, Vec2::new(620.0, 395.0), 30.0, &params),
        ];
        let mut p = Particle::new(
            Vec2::new(620.0, 372.0),
            Vec2::new(0.0, -0.3),
            1.0,
            &ParticleParams::default(),
        );

        assert!(resolve_planet_contacts(&mut p, &planets, 0.2));
        for planet in &planets {
            let gap = p.position.distance(planet.position) - (planet.radius + p.radius);
            assert!(gap >= -1e-3, "still {:.3} px inside planet {}", -gap, planet.label);
        }
    }

    #[test]
    fn test_contacts_untouched_when_clear() {
        let planets = vec![Planet::new(0, Vec2::ZERO, 20.0, &PlanetParams::default())];
        let mut p = Particle::new(Vec2::new(50.0, 0.0), Vec2::X, 1.0, &ParticleParams::default());
        assert!(!resolve_planet_contacts(&mut p, &planets, 0.2));
        assert_eq!(p.position, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_edge_bounce_clamps_and_reflects() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut pos = Vec2::new(-5.0, 50.0);
        let mut vel = Vec2::new(-2.0, 0.5);
        assert!(bounce_off_edges(&mut pos, &mut vel, 1.0, &viewport, 0.5));
        assert_eq!(pos.x, 1.0);
        assert_eq!(vel.x, 1.0);
        assert_eq!(vel.y, 0.5);

        let mut pos = Vec2::new(50.0, 50.0);
        let mut vel = Vec2::new(2.0, 2.0);
        assert!(!bounce_off_edges(&mut pos, &mut vel, 1.0, &viewport, 0.5));
    }
}
