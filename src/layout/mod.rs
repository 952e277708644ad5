//! Pattern layout
//!
//! Derives placement, rotation and scale for every shape from a small set of
//! parameters. The grid is a scaffold only; it never clips what renderers draw.

/// Placement generation and the placement record
pub mod engine;
/// Generation parameters and their valid ranges
pub mod options;

pub use engine::{PlacedShape, generate_layout};
pub use options::PatternOptions;
