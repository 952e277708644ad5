//! Pixel compositing of a placement sequence

use crate::assets::{AssetPayload, ShapeAsset};
use crate::io::error::{PatternError, Result, invalid_parameter};
use crate::layout::PlacedShape;
use crate::math::transform::Affine;
use crate::render::vector::asset_document;
use image::RgbaImage;
use resvg::tiny_skia::{Color, ColorU8, FilterQuality, IntSize, Pixmap, PixmapPaint};
use resvg::usvg;
use std::collections::HashMap;

// Decoded form of one asset, drawn under many transforms
enum DecodedAsset {
    Vector(usvg::Tree),
    Raster(Pixmap),
}

impl DecodedAsset {
    // Size of the decoded content in its own units
    fn natural_size(&self) -> (f64, f64) {
        match self {
            Self::Vector(tree) => (
                f64::from(tree.size().width()),
                f64::from(tree.size().height()),
            ),
            Self::Raster(pixmap) => (f64::from(pixmap.width()), f64::from(pixmap.height())),
        }
    }
}

/// Draws placement sequences into pixel buffers
///
/// Decoded assets are cached by identifier for the renderer's lifetime; asset payloads
/// never change, so a cached decode stays valid across renders.
pub struct RasterRenderer {
    cache: HashMap<String, DecodedAsset>,
    svg_options: usvg::Options<'static>,
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterRenderer {
    /// Create a renderer with an empty decode cache
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            svg_options: usvg::Options::default(),
        }
    }

    /// Number of distinct assets decoded so far
    pub fn decoded_count(&self) -> usize {
        self.cache.len()
    }

    /// Render `placements` onto a white `size × size` canvas
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `size` is zero
    /// - Any referenced asset fails to decode (`RenderDecodeFailure`); nothing is drawn
    pub fn render(&mut self, placements: &[PlacedShape], size: u32) -> Result<RgbaImage> {
        let mut canvas = Pixmap::new(size, size)
            .ok_or_else(|| invalid_parameter("size", &size, &"canvas must be at least 1×1"))?;
        self.draw_into(placements, &mut canvas)?;
        to_rgba_image(&canvas)
    }

    /// Clear `canvas` to white and draw `placements` in sequence order
    ///
    /// Every distinct asset is decoded before the canvas is touched, so a decode
    /// failure leaves the buffer unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RenderDecodeFailure` for the first asset that fails to decode
    pub fn draw_into(&mut self, placements: &[PlacedShape], canvas: &mut Pixmap) -> Result<()> {
        for placement in placements {
            self.ensure_decoded(&placement.asset)?;
        }

        canvas.fill(Color::WHITE);
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };

        for placement in placements {
            let Some(decoded) = self.cache.get(placement.asset.id()) else {
                continue;
            };
            let (natural_width, natural_height) = decoded.natural_size();
            // Absorbs rounding of the intrinsic box in the decoded document
            let fit = Affine::scale(
                placement.asset.width() / natural_width,
                placement.asset.height() / natural_height,
            );
            let transform = placement.transform().matrix().then_local(&fit).to_skia();

            match decoded {
                DecodedAsset::Vector(tree) => {
                    resvg::render(tree, transform, &mut canvas.as_mut());
                }
                DecodedAsset::Raster(pixmap) => {
                    canvas.draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, None);
                }
            }
        }
        Ok(())
    }

    fn ensure_decoded(&mut self, asset: &ShapeAsset) -> Result<()> {
        if self.cache.contains_key(asset.id()) {
            return Ok(());
        }
        let decoded = self.decode(asset).map_err(|reason| PatternError::RenderDecodeFailure {
            asset_id: asset.id().to_string(),
            reason,
        })?;
        self.cache.insert(asset.id().to_string(), decoded);
        Ok(())
    }

    fn decode(&self, asset: &ShapeAsset) -> std::result::Result<DecodedAsset, String> {
        match asset.payload() {
            AssetPayload::Markup(_) => {
                // Decode the nested form the vector output embeds, so both backends
                // map the asset's viewbox onto its intrinsic box the same way
                let document = asset_document(asset)?;
                let tree = usvg::Tree::from_str(&document, &self.svg_options)
                    .map_err(|e| e.to_string())?;
                Ok(DecodedAsset::Vector(tree))
            }
            AssetPayload::Encoded(bytes) => {
                let rgba = image::load_from_memory(bytes)
                    .map_err(|e| e.to_string())?
                    .to_rgba8();
                let size = IntSize::from_wh(rgba.width(), rgba.height())
                    .ok_or_else(|| "image has zero size".to_string())?;
                let premultiplied = rgba
                    .pixels()
                    .flat_map(|pixel| {
                        let [r, g, b, a] = pixel.0;
                        let color = ColorU8::from_rgba(r, g, b, a).premultiply();
                        [color.red(), color.green(), color.blue(), color.alpha()]
                    })
                    .collect();
                let pixmap = Pixmap::from_vec(premultiplied, size)
                    .ok_or_else(|| "pixel buffer does not match image size".to_string())?;
                Ok(DecodedAsset::Raster(pixmap))
            }
        }
    }
}

/// Converts a premultiplied canvas into a straight-alpha RGBA image
///
/// # Errors
///
/// Returns an error if the pixel data does not fill the canvas dimensions
pub fn to_rgba_image(canvas: &Pixmap) -> Result<RgbaImage> {
    let data = canvas
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    RgbaImage::from_raw(canvas.width(), canvas.height(), data).ok_or_else(|| {
        invalid_parameter(
            "canvas",
            &format!("{}x{}", canvas.width(), canvas.height()),
            &"pixel data does not match canvas size",
        )
    })
}
