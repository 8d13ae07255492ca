//! Integrator tuning.

/// Force and collision constants (px, ticks)
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsParams {
    /// Gravity of planets acting on particles
    /// Formula: a = G * planet_mass / d²
    pub gravitational_constant: f32,

    /// Gravity between planets
    pub planet_gravity_constant: f32,

    /// Repel shell beyond a planet's radius (px)
    pub forcefield_buffer_px: f32,

    /// Fraction of normal velocity kept on a bounce (1 = no loss)
    pub bounce_reduction: f32,

    /// Orbit threshold as a multiple of planet radius
    pub orbit_distance: f32,

    /// Particle repel strength inside the force field
    pub repel_strength: f32,

    /// Repel strength between overlapping planet fields
    pub planet_repel_strength: f32,

    /// Inward push per px of edge margin intrusion (lower = smoother)
    pub edge_repel_smoothing: f32,

    /// Extra multiplier on the orbit threshold
    pub orbit_radius_factor: f32,

    /// Planet speed ceiling (px per tick)
    pub max_planet_speed: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            planet_gravity_constant: 0.0001,
            forcefield_buffer_px: 10.0,
            bounce_reduction: 0.2,
            orbit_distance: 5.0,
            repel_strength: 0.5,
            planet_repel_strength: 0.3,
            edge_repel_smoothing: 0.01,
            orbit_radius_factor: 3.0,
            max_planet_speed: 0.3,
        }
    }
}

impl PhysicsParams {
    /// Distance within which a particle counts as orbiting a planet (px)
    pub fn orbit_radius(&self, planet_radius_px: f32) -> f32 {
        planet_radius_px * self.orbit_distance * self.orbit_radius_factor
    }

    /// Buffer used as a divisor, never below 1 px
    pub fn effective_buffer(&self) -> f32 {
        self.forcefield_buffer_px.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_radius_combines_factors() {
        let physics = PhysicsParams::default();
        assert_eq!(physics.orbit_radius(20.0), 300.0);
    }

    #[test]
    fn test_effective_buffer_floor() {
        let physics = PhysicsParams {
            forcefield_buffer_px: 0.0,
            ..Default::default()
        };
        assert_eq!(physics.effective_buffer(), 1.0);
    }
}
