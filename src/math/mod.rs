//! Mathematical utilities shared by layout and rendering

/// Fixed-precision number formatting for vector output
pub mod format;
/// Affine placement transform used by both renderers
pub mod transform;
