//! One simulation run: world, integrator and the mappers reading it.

use glam::Vec2;
use log::debug;
use std::fmt;

use crate::audio::{AudioMapper, VoiceControl};
use crate::color::Rgb;
use crate::effects::{EffectsMapper, Glow, VortexLine};
use crate::params::{Config, Viewport};
use crate::physics::Integrator;
use crate::world::World;

/// Render-ready view of a planet
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetView {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Present only when labels are enabled
    pub label: Option<String>,
    pub orbiting: usize,
    pub volume_db: f32,
    pub glow: Glow,
    pub vortex: VortexLine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

/// Owned copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub viewport: Viewport,
    pub trail_fade: f32,
    pub planets: Vec<PlanetView>,
    pub particles: Vec<ParticleView>,
}

/// Aggregate numbers for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub tick: u64,
    /// Sum of per-planet orbit counts
    pub orbiting_total: usize,
    /// Mean particle speed (px per tick)
    pub mean_speed: f32,
    /// Σ ½ m v² over all particles
    pub kinetic_energy: f32,
    /// Index and volume (dB) of the loudest planet
    pub loudest: Option<(usize, f32)>,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {:>6} | orbiting {:>5} | mean speed {:.3} | KE {:.2}",
            self.tick, self.orbiting_total, self.mean_speed, self.kinetic_energy
        )?;
        if let Some((index, db)) = self.loudest {
            write!(f, " | loudest planet {} at {:.1} dB", index + 1, db)?;
        }
        Ok(())
    }
}

pub struct Simulation {
    config: Config,
    world: World,
    integrator: Integrator,
    audio: AudioMapper,
    effects: EffectsMapper,
    counts: Vec<usize>,
    tick: u64,
}

impl Simulation {
    pub fn new(config: Config, viewport: Viewport, seed: u64) -> Self {
        let world = World::new(&config, viewport, seed);
        Self::from_world(config, world)
    }

    /// Run an existing world, e.g. one assembled by hand
    pub fn from_world(config: Config, world: World) -> Self {
        let planet_count = world.planets.len();
        Self {
            integrator: Integrator::new(&config),
            audio: AudioMapper::new(config.audio.clone(), planet_count),
            effects: EffectsMapper::new(&config),
            counts: vec![0; planet_count],
            tick: 0,
            world,
            config,
        }
    }

    /// Physics step, then orbit counts, then volumes
    pub fn tick(&mut self) {
        self.integrator.step(&mut self.world);
        self.counts = self.integrator.orbit_counts(&self.world);
        self.audio.update(&self.counts);
        self.tick += 1;
    }

    /// Respawn particles and silence every planet; planets keep their state
    pub fn reset(&mut self) {
        self.world.respawn_particles(&self.config);
        self.audio.reset();
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.tick = 0;
        debug!("simulation reset");
    }

    /// New bounds. With screen-size scaling the particle population follows
    /// the new area.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.world.viewport {
            return;
        }
        self.world.viewport = viewport;
        if self.config.particles.use_screen_size_scaling {
            self.world.respawn_particles(&self.config);
        }
        debug!(
            "resized to {}x{}, {} particles",
            viewport.width_px,
            viewport.height_px,
            self.world.particles.len()
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        let show_labels = self.config.planets.show_labels;
        let planets = self
            .world
            .planets
            .iter()
            .enumerate()
            .map(|(i, planet)| {
                let volume_db = self.audio.volume_db(i);
                PlanetView {
                    position: planet.position,
                    radius: planet.radius,
                    color: planet.color,
                    label: show_labels.then(|| planet.label.clone()),
                    orbiting: self.counts.get(i).copied().unwrap_or(0),
                    volume_db,
                    glow: self.effects.glow(planet, volume_db),
                    vortex: self.effects.vortex_line(planet),
                }
            })
            .collect();

        let particles = self
            .world
            .particles
            .iter()
            .map(|p| ParticleView {
                position: p.position,
                radius: p.radius,
                color: self.effects.particle_color(p.speed()),
            })
            .collect();

        Snapshot {
            tick: self.tick,
            viewport: self.world.viewport,
            trail_fade: self.effects.trail_fade(),
            planets,
            particles,
        }
    }

    pub fn stats(&self) -> Stats {
        let particles = &self.world.particles;
        let (speed_sum, kinetic_energy) = particles
            .iter()
            .fold((0.0, 0.0), |(s, e), p| (s + p.speed(), e + p.kinetic_energy()));
        let mean_speed = if particles.is_empty() {
            0.0
        } else {
            speed_sum / particles.len() as f32
        };
        Stats {
            tick: self.tick,
            orbiting_total: self.counts.iter().sum(),
            mean_speed,
            kinetic_energy,
            loudest: self.audio.loudest(),
        }
    }

    /// Drone controls: gain from each planet's volume, pan from its x
    pub fn voice_controls(&self) -> Vec<VoiceControl> {
        let width = self.world.viewport.width_px.max(1.0);
        self.world
            .planets
            .iter()
            .enumerate()
            .map(|(i, planet)| VoiceControl {
                gain: self.audio.gain(i),
                pan: (planet.position.x / width).clamp(0.0, 1.0),
            })
            .collect()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn audio(&self) -> &AudioMapper {
        &self.audio
    }

    /// Orbit counts from the latest tick
    pub fn orbit_counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn planet_count(&self) -> usize {
        self.world.planets.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
