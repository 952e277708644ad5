//! Randomized tiled pattern generation with matching raster and vector output
//!
//! Uploaded SVG and PNG shapes are normalized to a common intrinsic-size model, laid out
//! on a jittered grid, and drawn either by pixel compositing or as an SVG document using
//! one shared placement transform.

#![forbid(unsafe_code)]

/// Asset normalization and the asset pool
pub mod assets;
/// Input/output operations and error handling
pub mod io;
/// Placement generation and its parameters
pub mod layout;
/// Affine transforms and number formatting
pub mod math;
/// Raster and vector renderers
pub mod render;
/// Session state for interactive front ends
pub mod session;

pub use io::error::{PatternError, Result};
