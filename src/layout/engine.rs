//! Grid-scaffolded random placement of pool assets

use crate::assets::{AssetPool, ShapeAsset};
use crate::io::configuration::TARGET_CELL_FRACTION;
use crate::layout::options::PatternOptions;
use crate::math::transform::PlacementTransform;
use rand::Rng;
use std::sync::Arc;

/// One positioned, rotated and scaled instance of an asset
#[derive(Clone, Debug)]
pub struct PlacedShape {
    /// Shared handle to the placed asset
    pub asset: Arc<ShapeAsset>,
    /// Canvas-space center x
    pub x: f64,
    /// Canvas-space center y
    pub y: f64,
    /// Rotation in degrees, in `[0, 360)`
    pub rotation: f64,
    /// Uniform scale factor
    pub scale: f64,
}

impl PlacedShape {
    /// Transform shared by both renderers for this placement
    pub fn transform(&self) -> PlacementTransform {
        PlacementTransform {
            center: (self.x, self.y),
            rotation: self.rotation,
            scale: self.scale,
            intrinsic: (self.asset.width(), self.asset.height()),
        }
    }
}

/// Geometric center of the grid cell holding placement `index`
pub fn cell_center(index: u32, grid_size: u32, cell_size: f64) -> (f64, f64) {
    let grid_size = grid_size.max(1);
    let row = index / grid_size;
    let col = index % grid_size;
    (
        f64::from(col).mul_add(cell_size, cell_size / 2.0),
        f64::from(row).mul_add(cell_size, cell_size / 2.0),
    )
}

/// Scale mapping an asset's larger dimension onto the target fraction of a cell
pub fn fit_scale(asset: &ShapeAsset, cell_size: f64) -> f64 {
    cell_size * TARGET_CELL_FRACTION / asset.max_dimension()
}

/// Generate a placement sequence covering the canvas
///
/// Options are clamped first (see [`PatternOptions::clamped`]). Each placement samples
/// an asset uniformly with replacement, sits at its grid cell's center plus jitter
/// drawn from `[-0.5, 0.5) · cell · offset_intensity` per axis, takes a rotation from
/// `[0, 360)` when enabled, and is scaled so its larger side spans 60% of a cell.
///
/// An empty pool yields an empty sequence.
pub fn generate_layout<R: Rng>(
    pool: &AssetPool,
    options: &PatternOptions,
    rng: &mut R,
) -> Vec<PlacedShape> {
    let assets = pool.assets();
    if assets.is_empty() {
        return Vec::new();
    }

    let options = options.clamped();
    let grid_size = options.grid_size();
    let cell_size = options.cell_size();
    let jitter_span = cell_size * options.offset_intensity;

    let mut placements = Vec::with_capacity(options.shape_count as usize);
    for index in 0..options.shape_count {
        let Some(asset) = assets.get(rng.random_range(0..assets.len())) else {
            continue;
        };

        let (base_x, base_y) = cell_center(index, grid_size, cell_size);
        let offset_x = (rng.random::<f64>() - 0.5) * jitter_span;
        let offset_y = (rng.random::<f64>() - 0.5) * jitter_span;

        let rotation = if options.enable_rotation {
            rng.random_range(0.0..360.0)
        } else {
            0.0
        };

        placements.push(PlacedShape {
            asset: Arc::clone(asset),
            x: base_x + offset_x,
            y: base_y + offset_y,
            rotation,
            scale: fit_scale(asset, cell_size),
        });
    }
    placements
}
