//! Dual-backend rendering of one placement sequence
//!
//! Both backends take their per-placement frame from
//! [`PlacedShape::transform`](crate::layout::PlacedShape::transform), which keeps pixel
//! and vector output aligned.

/// Pixel compositing into an RGBA buffer
pub mod raster;
/// Standalone SVG document output
pub mod vector;

pub use raster::RasterRenderer;
pub use vector::{VectorDocument, render_vector};
