//! Pattern generation parameters

use crate::io::configuration::{
    DEFAULT_CANVAS_SIZE, DEFAULT_OFFSET_INTENSITY, DEFAULT_SHAPE_COUNT, MAX_SHAPE_COUNT,
};

/// Parameters controlling placement density, jitter and rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternOptions {
    /// Number of placed shapes
    pub shape_count: u32,
    /// Fraction of a grid cell used for positional jitter, in `[0, 1]`
    pub offset_intensity: f64,
    /// Whether shapes receive a random rotation
    pub enable_rotation: bool,
    /// Output square side length
    pub canvas_size: u32,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            shape_count: DEFAULT_SHAPE_COUNT,
            offset_intensity: DEFAULT_OFFSET_INTENSITY,
            enable_rotation: true,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl PatternOptions {
    /// Copy with every field forced into its valid range
    ///
    /// Shape count is held to `[1, MAX_SHAPE_COUNT]`, offset intensity to `[0, 1]`
    /// (NaN becomes 0) and canvas size to at least 1.
    pub fn clamped(&self) -> Self {
        let offset_intensity = if self.offset_intensity.is_nan() {
            0.0
        } else {
            self.offset_intensity.clamp(0.0, 1.0)
        };
        Self {
            shape_count: self.shape_count.clamp(1, MAX_SHAPE_COUNT),
            offset_intensity,
            enable_rotation: self.enable_rotation,
            canvas_size: self.canvas_size.max(1),
        }
    }

    /// Side length of the square placement grid
    pub fn grid_size(&self) -> u32 {
        let count = self.shape_count.max(1);
        let mut side = f64::from(count).sqrt().ceil() as u32;
        // Guard against float rounding at perfect squares
        while side.saturating_mul(side) < count {
            side += 1;
        }
        while side > 1 && (side - 1) * (side - 1) >= count {
            side -= 1;
        }
        side
    }

    /// Side length of one grid cell in canvas units
    pub fn cell_size(&self) -> f64 {
        f64::from(self.canvas_size) / f64::from(self.grid_size())
    }
}
