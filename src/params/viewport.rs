//! Simulation bounds.

/// Viewport the simulation runs in (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 1280.0,
            height_px: 720.0,
        }
    }
}

impl Viewport {
    /// Sizes below 1 px are raised to 1 px
    pub fn new(width_px: f32, height_px: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width_px: sane(width_px),
            height_px: sane(height_px),
        }
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width_px / 2.0, self.height_px / 2.0)
    }
}
