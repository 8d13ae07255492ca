//! Planet generation and vortex parameters.

use crate::color::Rgb;

/// Planet generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetParams {
    /// Number of planets created per session
    pub count: usize,

    /// Smallest random planet radius (px)
    pub min_radius_px: f32,

    /// Largest random planet radius (px)
    pub max_radius_px: f32,

    /// Use this radius for every planet instead of a random one (px)
    pub fixed_radius_px: Option<f32>,

    /// mass = radius * mass_factor
    pub mass_factor: f32,

    /// Palette indexed by planet number
    pub colors: Vec<Rgb>,

    /// Publish planet labels in snapshots
    pub show_labels: bool,

    /// Gradient by normalized radius, used once the palette runs out
    pub color_gradient: Option<ColorGradient>,

    pub vortex: VortexParams,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            count: 4,
            min_radius_px: 20.0,
            max_radius_px: 35.0,
            fixed_radius_px: None,
            mass_factor: 3.0,
            colors: vec![
                Rgb::new(0xe8, 0xda, 0xef),
                Rgb::new(0x8e, 0x44, 0xad),
                Rgb::new(0x8e, 0x44, 0xad),
                Rgb::new(0x4a, 0x23, 0x5a),
            ],
            show_labels: false,
            color_gradient: Some(ColorGradient::default()),
            vortex: VortexParams::default(),
        }
    }
}

impl PlanetParams {
    /// Where `radius_px` sits inside the random radius range, in [0, 1].
    /// A fixed radius or a degenerate range maps to the middle.
    pub fn normalized_radius(&self, radius_px: f32) -> f32 {
        let span = self.max_radius_px - self.min_radius_px;
        if self.fixed_radius_px.is_some() || span <= f32::EPSILON {
            return 0.5;
        }
        ((radius_px - self.min_radius_px) / span).clamp(0.0, 1.0)
    }

    pub fn mass_for(&self, radius_px: f32) -> f32 {
        radius_px * self.mass_factor
    }
}

/// Two-stop colour gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGradient {
    pub min_color: Rgb,
    pub max_color: Rgb,
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self {
            min_color: Rgb::new(0x8B, 0x00, 0x00), // Dark red
            max_color: Rgb::new(0xFF, 0xA5, 0x00), // Bright orange
        }
    }
}

impl ColorGradient {
    pub fn at(&self, t: f32) -> Rgb {
        self.min_color.lerp(self.max_color, t)
    }
}

/// Vortex field strength and indicator styling
#[derive(Debug, Clone, PartialEq)]
pub struct VortexParams {
    /// Tangential push of the smallest planet (px per tick², at the centre)
    pub min_scale: f32,

    /// Tangential push of the largest planet
    pub max_scale: f32,

    pub line_color: Rgb,
    pub line_width_px: f32,

    /// Dash pattern [dash, gap, ...] (px)
    pub line_dash_px: Vec<f32>,

    /// Indicator spin per tick = rotation_speed_factor * vortex scale (radians)
    pub rotation_speed_factor: f32,
}

impl Default for VortexParams {
    fn default() -> Self {
        Self {
            min_scale: 0.01,
            max_scale: 0.1,
            line_color: Rgb::WHITE,
            line_width_px: 1.0,
            line_dash_px: vec![5.0, 5.0],
            rotation_speed_factor: 0.5,
        }
    }
}

impl VortexParams {
    /// Vortex strength for a planet at normalized size `t`
    pub fn scale_at(&self, t: f32) -> f32 {
        self.min_scale + (self.max_scale - self.min_scale) * t.clamp(0.0, 1.0)
    }
}
