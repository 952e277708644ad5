//! Uploaded shape handling
//!
//! This module contains asset-related functionality including:
//! - Normalizing SVG and PNG uploads into shape assets
//! - The asset pool sampled by the layout engine
//! - SVG markup inspection shared with the vector renderer

/// Upload normalization and identifier synthesis
pub mod normalize;
/// Shape assets and the asset pool
pub mod shape;
/// SVG size resolution and content extraction
pub mod svg;

pub use normalize::{AssetNormalizer, NormalizeReport, UploadedFile};
pub use shape::{AssetKind, AssetPayload, AssetPool, ShapeAsset};
