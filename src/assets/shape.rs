//! Normalized shape assets and the pool they are sampled from

use std::sync::Arc;

/// Accepted asset families
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// SVG markup
    Vector,
    /// Encoded PNG image
    Raster,
}

impl AssetKind {
    /// Classifies a declared media type or file extension
    ///
    /// Anything mentioning `svg` is vector markup and anything mentioning `png` is a
    /// raster image; every other kind is unsupported.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let lowered = media_type.to_ascii_lowercase();
        if lowered.contains("svg") {
            Some(Self::Vector)
        } else if lowered.contains("png") {
            Some(Self::Raster)
        } else {
            None
        }
    }
}

/// Renderable content of an asset, immutable once created
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetPayload {
    /// Verbatim SVG markup
    Markup(String),
    /// Encoded image bytes as uploaded
    Encoded(Vec<u8>),
}

/// An uploaded shape normalized to a known intrinsic size
#[derive(Debug, PartialEq)]
pub struct ShapeAsset {
    id: String,
    payload: AssetPayload,
    width: f64,
    height: f64,
}

impl ShapeAsset {
    /// Create an asset, replacing a non-positive or non-finite dimension with `fallback`
    pub fn new(id: String, payload: AssetPayload, width: f64, height: f64, fallback: f64) -> Self {
        let resolve = |value: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            id,
            payload,
            width: resolve(width),
            height: resolve(height),
        }
    }

    /// Unique identifier within the pool
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Asset family, derived from the payload
    pub const fn kind(&self) -> AssetKind {
        match self.payload {
            AssetPayload::Markup(_) => AssetKind::Vector,
            AssetPayload::Encoded(_) => AssetKind::Raster,
        }
    }

    /// Renderable content
    pub const fn payload(&self) -> &AssetPayload {
        &self.payload
    }

    /// Intrinsic width in the asset's own units
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Intrinsic height in the asset's own units
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Larger of the two intrinsic dimensions
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Ordered collection of shapes available for placement
///
/// Assets are shared by reference count, so placements keep removed assets alive.
#[derive(Debug, Default, Clone)]
pub struct AssetPool {
    assets: Vec<Arc<ShapeAsset>>,
}

impl AssetPool {
    /// Create an empty pool
    pub const fn new() -> Self {
        Self { assets: Vec::new() }
    }

    /// Append an asset, refusing identifiers already present
    ///
    /// Returns `false` when the identifier collides and the asset was not added.
    pub fn insert(&mut self, asset: Arc<ShapeAsset>) -> bool {
        if self.contains(asset.id()) {
            return false;
        }
        self.assets.push(asset);
        true
    }

    /// Remove an asset by identifier
    pub fn remove(&mut self, id: &str) -> Option<Arc<ShapeAsset>> {
        let position = self.assets.iter().position(|asset| asset.id() == id)?;
        Some(self.assets.remove(position))
    }

    /// Look up an asset by identifier
    pub fn get(&self, id: &str) -> Option<&Arc<ShapeAsset>> {
        self.assets.iter().find(|asset| asset.id() == id)
    }

    /// Whether an identifier is present
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Assets in insertion order
    pub fn assets(&self) -> &[Arc<ShapeAsset>] {
        &self.assets
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the pool holds no assets
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
