//! YAML configuration file.
//!
//! The file mirrors the section layout of [`Config`] with camelCase keys.
//! Every key is optional. A value with the wrong type or outside its range
//! is replaced by its default and reported with `warn!`; only unreadable
//! files and malformed YAML are errors.
//!
//! ```yaml
//! planets:
//!   count: 4
//!   minRadius: 20
//!   maxRadius: 35
//!   fixedRadius: ~          # set a number to give every planet this radius
//!   massFactor: 3
//!   colors: ['#e8daef', '#8e44ad', '#8e44ad', '#4a235a']
//!   showLabels: false
//!   colorGradient: { minColor: '#8B0000', maxColor: '#FFA500' }
//!   vortex:
//!     minScale: 0.01
//!     maxScale: 0.1
//!     lineColor: '#FFFFFF'
//!     lineWidth: 1
//!     lineDash: [5, 5]
//!     rotationSpeedFactor: 0.5
//! particles:
//!   count: 1000
//!   useScreenSizeScaling: true
//!   densityFactor: 1000
//!   startInCenter: false
//!   minRadius: 0.5
//!   maxRadius: 2
//!   massFactor: 0.1
//!   baseColor: '#0066FF'
//!   speedColorFactor: 2
//!   maxSpeed: 5
//!   minSpeed: 0.3
//! physics:
//!   gravitationalConstant: 1
//!   planetGravityConstant: 0.0001
//!   forcefieldBuffer: 10
//!   bounceReduction: 0.2
//!   orbitDistance: 5
//!   repelStrength: 0.5
//!   planetRepelStrength: 0.3
//!   edgeRepelSmoothing: 0.01
//!   orbitRadiusFactor: 3
//!   maxPlanetSpeed: 0.3
//! audio:
//!   minVolume: -40
//!   maxVolume: 0
//!   volumeStep: 1
//!   smoothingFactor: 0.01
//! effects:
//!   trailOpacity: 0.05
//!   volumeGlowScale: 1.01
//!   maxVolumeOpacity: 0.04
//!   volumeGlowColor: '#00f3ff'
//! ```

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use super::{
    AudioParams, ColorGradient, Config, EffectsParams, ParticleParams, PhysicsParams,
    PlanetParams, VortexParams,
};
use crate::color::Rgb;

/// Upper bound on `planets.count`
pub const MAX_PLANETS: usize = 64;

/// Upper bound on `particles.count`
pub const MAX_PARTICLES: usize = 100_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config root must be a mapping of sections")]
    NotAMapping,
}

impl Config {
    /// Load a configuration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("loading config from {}", path.display());
        Self::from_yaml_str(&text)
    }

    /// Parse a configuration document; an empty document yields the defaults
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let root: Value = serde_yaml::from_str(text)?;
        match root {
            Value::Null => return Ok(Config::default()),
            Value::Mapping(_) => {}
            _ => return Err(ConfigError::NotAMapping),
        }
        let file: ConfigFile = serde_yaml::from_value(root)?;
        Ok(file.resolve())
    }
}

/// One key of the file: absent, well-typed, or unusable (kept as YAML text
/// for the warning)
enum Field<T> {
    Missing,
    Valid(T),
    Invalid(String),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match serde_yaml::from_value::<T>(raw.clone()) {
            Ok(value) => Field::Valid(value),
            Err(_) => Field::Invalid(
                serde_yaml::to_string(&raw)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|_| format!("{raw:?}")),
            ),
        })
    }
}

/// Accept a field through `accept`, falling back to `default`
fn convert<T: Debug, U: Debug>(
    key: &str,
    field: Field<T>,
    default: U,
    accept: impl FnOnce(T) -> Option<U>,
) -> U {
    match field {
        Field::Missing => default,
        Field::Invalid(raw) => {
            warn!("config {key}: '{raw}' has the wrong type, using default {default:?}");
            default
        }
        Field::Valid(value) => {
            let shown = format!("{value:?}");
            match accept(value) {
                Some(v) => v,
                None => {
                    warn!("config {key}: {shown} is out of range, using default {default:?}");
                    default
                }
            }
        }
    }
}

fn resolve<T: Debug>(key: &str, field: Field<T>, default: T, valid: impl FnOnce(&T) -> bool) -> T {
    convert(key, field, default, |v| valid(&v).then_some(v))
}

/// Unwrap a section, a non-mapping section falls back entirely
fn section<T: Default>(key: &str, field: Field<T>) -> T {
    match field {
        Field::Valid(section) => section,
        Field::Missing => T::default(),
        Field::Invalid(raw) => {
            warn!("config {key}: '{raw}' is not a section, using defaults");
            T::default()
        }
    }
}

fn any<T>(_: &T) -> bool {
    true
}

fn finite(v: &f32) -> bool {
    v.is_finite()
}

fn positive(v: &f32) -> bool {
    v.is_finite() && *v > 0.0
}

fn non_negative(v: &f32) -> bool {
    v.is_finite() && *v >= 0.0
}

fn unit(v: &f32) -> bool {
    v.is_finite() && (0.0..=1.0).contains(v)
}

/// (0, 1]
fn fraction(v: &f32) -> bool {
    v.is_finite() && *v > 0.0 && *v <= 1.0
}

fn color(s: String) -> Option<Rgb> {
    Rgb::from_hex(&s)
}

/// Keep an ordered pair, or fall back to both defaults
fn ordered_pair(key: &str, min: f32, max: f32, defaults: (f32, f32)) -> (f32, f32) {
    if min <= max {
        (min, max)
    } else {
        warn!(
            "config {key}: minimum {min} exceeds maximum {max}, using defaults {} and {}",
            defaults.0, defaults.1
        );
        defaults
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    planets: Field<PlanetsFile>,
    particles: Field<ParticlesFile>,
    physics: Field<PhysicsFile>,
    audio: Field<AudioFile>,
    effects: Field<EffectsFile>,
}

impl ConfigFile {
    fn resolve(self) -> Config {
        Config {
            planets: section("planets", self.planets).resolve(),
            particles: section("particles", self.particles).resolve(),
            physics: section("physics", self.physics).resolve(),
            audio: section("audio", self.audio).resolve(),
            effects: section("effects", self.effects).resolve(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GradientFile {
    min_color: String,
    max_color: String,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PlanetsFile {
    count: Field<usize>,
    min_radius: Field<f32>,
    max_radius: Field<f32>,
    fixed_radius: Field<Option<f32>>,
    mass_factor: Field<f32>,
    colors: Field<Vec<String>>,
    show_labels: Field<bool>,
    color_gradient: Field<Option<GradientFile>>,
    vortex: Field<VortexFile>,
}

impl PlanetsFile {
    fn resolve(self) -> PlanetParams {
        let d = PlanetParams::default();
        let (min_radius_px, max_radius_px) = ordered_pair(
            "planets.minRadius/maxRadius",
            resolve("planets.minRadius", self.min_radius, d.min_radius_px, positive),
            resolve("planets.maxRadius", self.max_radius, d.max_radius_px, positive),
            (d.min_radius_px, d.max_radius_px),
        );
        let color_gradient = convert(
            "planets.colorGradient",
            self.color_gradient,
            d.color_gradient,
            |gradient| match gradient {
                None => Some(None),
                Some(g) => Some(Some(ColorGradient {
                    min_color: color(g.min_color)?,
                    max_color: color(g.max_color)?,
                })),
            },
        );
        PlanetParams {
            count: resolve("planets.count", self.count, d.count, |c| {
                (1..=MAX_PLANETS).contains(c)
            }),
            min_radius_px,
            max_radius_px,
            fixed_radius_px: resolve(
                "planets.fixedRadius",
                self.fixed_radius,
                d.fixed_radius_px,
                |r| r.map_or(true, |r| positive(&r)),
            ),
            mass_factor: resolve("planets.massFactor", self.mass_factor, d.mass_factor, positive),
            colors: convert("planets.colors", self.colors, d.colors, |list| {
                list.into_iter().map(color).collect()
            }),
            show_labels: resolve("planets.showLabels", self.show_labels, d.show_labels, any),
            color_gradient,
            vortex: section("planets.vortex", self.vortex).resolve(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct VortexFile {
    min_scale: Field<f32>,
    max_scale: Field<f32>,
    line_color: Field<String>,
    line_width: Field<f32>,
    line_dash: Field<Vec<f32>>,
    rotation_speed_factor: Field<f32>,
}

impl VortexFile {
    fn resolve(self) -> VortexParams {
        let d = VortexParams::default();
        let (min_scale, max_scale) = ordered_pair(
            "planets.vortex.minScale/maxScale",
            resolve("planets.vortex.minScale", self.min_scale, d.min_scale, non_negative),
            resolve("planets.vortex.maxScale", self.max_scale, d.max_scale, non_negative),
            (d.min_scale, d.max_scale),
        );
        VortexParams {
            min_scale,
            max_scale,
            line_color: convert("planets.vortex.lineColor", self.line_color, d.line_color, color),
            line_width_px: resolve(
                "planets.vortex.lineWidth",
                self.line_width,
                d.line_width_px,
                non_negative,
            ),
            line_dash_px: resolve(
                "planets.vortex.lineDash",
                self.line_dash,
                d.line_dash_px,
                |dash| dash.iter().all(non_negative),
            ),
            rotation_speed_factor: resolve(
                "planets.vortex.rotationSpeedFactor",
                self.rotation_speed_factor,
                d.rotation_speed_factor,
                finite,
            ),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ParticlesFile {
    count: Field<usize>,
    use_screen_size_scaling: Field<bool>,
    density_factor: Field<f32>,
    start_in_center: Field<bool>,
    min_radius: Field<f32>,
    max_radius: Field<f32>,
    mass_factor: Field<f32>,
    base_color: Field<String>,
    speed_color_factor: Field<f32>,
    max_speed: Field<f32>,
    min_speed: Field<f32>,
}

impl ParticlesFile {
    fn resolve(self) -> ParticleParams {
        let d = ParticleParams::default();
        let (min_radius_px, max_radius_px) = ordered_pair(
            "particles.minRadius/maxRadius",
            resolve("particles.minRadius", self.min_radius, d.min_radius_px, positive),
            resolve("particles.maxRadius", self.max_radius, d.max_radius_px, positive),
            (d.min_radius_px, d.max_radius_px),
        );
        let (min_speed, max_speed) = ordered_pair(
            "particles.minSpeed/maxSpeed",
            resolve("particles.minSpeed", self.min_speed, d.min_speed, non_negative),
            resolve("particles.maxSpeed", self.max_speed, d.max_speed, positive),
            (d.min_speed, d.max_speed),
        );
        ParticleParams {
            count: resolve("particles.count", self.count, d.count, |c| {
                (1..=MAX_PARTICLES).contains(c)
            }),
            use_screen_size_scaling: resolve(
                "particles.useScreenSizeScaling",
                self.use_screen_size_scaling,
                d.use_screen_size_scaling,
                any,
            ),
            density_factor: resolve(
                "particles.densityFactor",
                self.density_factor,
                d.density_factor,
                positive,
            ),
            start_in_center: resolve(
                "particles.startInCenter",
                self.start_in_center,
                d.start_in_center,
                any,
            ),
            min_radius_px,
            max_radius_px,
            mass_factor: resolve("particles.massFactor", self.mass_factor, d.mass_factor, positive),
            base_color: convert("particles.baseColor", self.base_color, d.base_color, color),
            speed_color_factor: resolve(
                "particles.speedColorFactor",
                self.speed_color_factor,
                d.speed_color_factor,
                non_negative,
            ),
            max_speed,
            min_speed,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PhysicsFile {
    gravitational_constant: Field<f32>,
    planet_gravity_constant: Field<f32>,
    forcefield_buffer: Field<f32>,
    bounce_reduction: Field<f32>,
    orbit_distance: Field<f32>,
    repel_strength: Field<f32>,
    planet_repel_strength: Field<f32>,
    edge_repel_smoothing: Field<f32>,
    orbit_radius_factor: Field<f32>,
    max_planet_speed: Field<f32>,
}

impl PhysicsFile {
    fn resolve(self) -> PhysicsParams {
        let d = PhysicsParams::default();
        PhysicsParams {
            gravitational_constant: resolve(
                "physics.gravitationalConstant",
                self.gravitational_constant,
                d.gravitational_constant,
                non_negative,
            ),
            planet_gravity_constant: resolve(
                "physics.planetGravityConstant",
                self.planet_gravity_constant,
                d.planet_gravity_constant,
                non_negative,
            ),
            forcefield_buffer_px: resolve(
                "physics.forcefieldBuffer",
                self.forcefield_buffer,
                d.forcefield_buffer_px,
                non_negative,
            ),
            bounce_reduction: resolve(
                "physics.bounceReduction",
                self.bounce_reduction,
                d.bounce_reduction,
                unit,
            ),
            orbit_distance: resolve(
                "physics.orbitDistance",
                self.orbit_distance,
                d.orbit_distance,
                positive,
            ),
            repel_strength: resolve(
                "physics.repelStrength",
                self.repel_strength,
                d.repel_strength,
                non_negative,
            ),
            planet_repel_strength: resolve(
                "physics.planetRepelStrength",
                self.planet_repel_strength,
                d.planet_repel_strength,
                non_negative,
            ),
            edge_repel_smoothing: resolve(
                "physics.edgeRepelSmoothing",
                self.edge_repel_smoothing,
                d.edge_repel_smoothing,
                unit,
            ),
            orbit_radius_factor: resolve(
                "physics.orbitRadiusFactor",
                self.orbit_radius_factor,
                d.orbit_radius_factor,
                positive,
            ),
            max_planet_speed: resolve(
                "physics.maxPlanetSpeed",
                self.max_planet_speed,
                d.max_planet_speed,
                non_negative,
            ),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct AudioFile {
    min_volume: Field<f32>,
    max_volume: Field<f32>,
    volume_step: Field<f32>,
    smoothing_factor: Field<f32>,
}

impl AudioFile {
    fn resolve(self) -> AudioParams {
        let d = AudioParams::default();
        let min = resolve("audio.minVolume", self.min_volume, d.min_volume_db, finite);
        let max = resolve("audio.maxVolume", self.max_volume, d.max_volume_db, finite);
        let (min_volume_db, max_volume_db) = if min < max {
            (min, max)
        } else {
            warn!(
                "config audio.minVolume/maxVolume: {min} is not below {max}, \
                 using defaults {} and {}",
                d.min_volume_db,
                d.max_volume_db
            );
            (d.min_volume_db, d.max_volume_db)
        };
        AudioParams {
            min_volume_db,
            max_volume_db,
            volume_step_db: resolve(
                "audio.volumeStep",
                self.volume_step,
                d.volume_step_db,
                non_negative,
            ),
            smoothing_factor: resolve(
                "audio.smoothingFactor",
                self.smoothing_factor,
                d.smoothing_factor,
                fraction,
            ),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct EffectsFile {
    trail_opacity: Field<f32>,
    volume_glow_scale: Field<f32>,
    max_volume_opacity: Field<f32>,
    volume_glow_color: Field<String>,
}

impl EffectsFile {
    fn resolve(self) -> EffectsParams {
        let d = EffectsParams::default();
        EffectsParams {
            trail_opacity: resolve(
                "effects.trailOpacity",
                self.trail_opacity,
                d.trail_opacity,
                unit,
            ),
            volume_glow_scale: resolve(
                "effects.volumeGlowScale",
                self.volume_glow_scale,
                d.volume_glow_scale,
                positive,
            ),
            max_volume_opacity: resolve(
                "effects.maxVolumeOpacity",
                self.max_volume_opacity,
                d.max_volume_opacity,
                unit,
            ),
            volume_glow_color: convert(
                "effects.volumeGlowColor",
                self.volume_glow_color,
                d.volume_glow_color,
                color,
            ),
        }
    }
}
