//! Session state tying the asset pool, options and current pattern together

use crate::assets::{AssetNormalizer, AssetPool, NormalizeReport, ShapeAsset, UploadedFile};
use crate::io::error::{PatternError, Result, invalid_parameter};
use crate::layout::{PatternOptions, PlacedShape, generate_layout};
use crate::render::{RasterRenderer, VectorDocument, render_vector};
use image::RgbaImage;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

/// Render output tagged with the generation it was produced from
#[derive(Debug)]
pub struct Rendered<T> {
    /// Generation counter value of the placement sequence that was drawn
    pub generation: u64,
    /// The rendered artifact
    pub output: T,
}

/// Owns the asset pool, current options and the latest placement sequence
///
/// Every successful [`generate`](Self::generate) replaces the sequence wholesale and
/// bumps a generation counter; render results carry that counter so a caller can
/// discard output from a superseded pattern.
pub struct PatternSession {
    pool: AssetPool,
    options: PatternOptions,
    placements: Arc<[PlacedShape]>,
    pattern_size: u32,
    generation: u64,
    normalizer: AssetNormalizer,
    raster: RasterRenderer,
    rng: StdRng,
}

impl Default for PatternSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSession {
    /// Create a session drawing randomness from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a session whose layouts are reproducible for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pool: AssetPool::new(),
            options: PatternOptions::default(),
            placements: Arc::from(Vec::new()),
            pattern_size: 0,
            generation: 0,
            normalizer: AssetNormalizer::new(),
            raster: RasterRenderer::new(),
            rng,
        }
    }

    /// Normalize a batch of uploads into the pool
    pub fn add_files(&mut self, files: &[UploadedFile]) -> NormalizeReport {
        self.normalizer.normalize_batch(files, &mut self.pool)
    }

    /// Remove an asset from the pool; existing placements keep their reference
    pub fn remove_asset(&mut self, id: &str) -> Option<Arc<ShapeAsset>> {
        self.pool.remove(id)
    }

    /// Current asset pool
    pub const fn assets(&self) -> &AssetPool {
        &self.pool
    }

    /// Current generation options
    pub const fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Replace the generation options; the current pattern is kept until regenerated
    pub fn set_options(&mut self, options: PatternOptions) {
        self.options = options;
    }

    /// Generate a new pattern from the pool and current options
    ///
    /// # Errors
    ///
    /// Returns `EmptyAssetPool` if no assets are loaded; the previous pattern is kept
    pub fn generate(&mut self) -> Result<Arc<[PlacedShape]>> {
        if self.pool.is_empty() {
            return Err(PatternError::EmptyAssetPool);
        }
        let placements = generate_layout(&self.pool, &self.options, &mut self.rng);
        self.placements = Arc::from(placements);
        self.pattern_size = self.options.clamped().canvas_size;
        self.generation += 1;
        Ok(Arc::clone(&self.placements))
    }

    /// Latest placement sequence
    pub fn placements(&self) -> Arc<[PlacedShape]> {
        Arc::clone(&self.placements)
    }

    /// Generation counter of the latest placement sequence, 0 before the first
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether output tagged with `generation` still reflects the latest pattern
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Rasterize the latest pattern at the canvas size it was generated for
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` before the first generation, or
    /// `RenderDecodeFailure` if any placed asset cannot be decoded
    pub fn render_raster(&mut self) -> Result<Rendered<RgbaImage>> {
        self.ensure_generated()?;
        let output = self.raster.render(&self.placements, self.pattern_size)?;
        Ok(Rendered {
            generation: self.generation,
            output,
        })
    }

    /// Build the vector document of the latest pattern at the canvas size it was generated for
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` before the first generation
    pub fn render_vector(&self) -> Result<Rendered<VectorDocument>> {
        self.ensure_generated()?;
        Ok(Rendered {
            generation: self.generation,
            output: render_vector(&self.placements, self.pattern_size),
        })
    }

    fn ensure_generated(&self) -> Result<()> {
        if self.generation == 0 {
            Err(invalid_parameter(
                "placements",
                &"none",
                &"generate a pattern before rendering",
            ))
        } else {
            Ok(())
        }
    }
}
