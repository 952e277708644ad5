//! Layout constants and runtime configuration defaults

// Default values for configurable parameters
/// Default number of placed shapes
pub const DEFAULT_SHAPE_COUNT: u32 = 60;
/// Default fraction of a grid cell used for positional jitter
pub const DEFAULT_OFFSET_INTENSITY: f64 = 0.3;
/// Default output square side length in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 1080;

// Safety limit to prevent runaway render cost
/// Maximum number of placed shapes
pub const MAX_SHAPE_COUNT: u32 = 10_000;

/// Intrinsic dimension used when an asset's size cannot be resolved
pub const FALLBACK_DIMENSION: f64 = 100.0;

/// Fraction of a grid cell covered by each shape's larger intrinsic dimension
pub const TARGET_CELL_FRACTION: f64 = 0.6;

// Vector output precision
/// Decimal places for translation and rotation values
pub const POSITION_DECIMALS: usize = 2;
/// Decimal places for scale values
pub const SCALE_DECIMALS: usize = 4;

// Output settings
/// Prefix for exported artifact file names
pub const ARTIFACT_PREFIX: &str = "brand-pattern";
/// Background color shared by both renderers
pub const BACKGROUND_HEX: &str = "#ffffff";
