//! Trail and glow parameters.

use crate::color::Rgb;

/// Visual effect parameters
#[derive(Debug, Clone, PartialEq)]
pub struct EffectsParams {
    /// Per-frame fade of the previous frame (lower = longer trails)
    pub trail_opacity: f32,

    /// Glow radius multiplier on top of the volume-driven growth
    pub volume_glow_scale: f32,

    /// Glow opacity at maximum volume
    pub max_volume_opacity: f32,

    pub volume_glow_color: Rgb,
}

impl Default for EffectsParams {
    fn default() -> Self {
        Self {
            trail_opacity: 0.05,
            volume_glow_scale: 1.01,
            max_volume_opacity: 0.04,
            volume_glow_color: Rgb::new(0x00, 0xf3, 0xff),
        }
    }
}
