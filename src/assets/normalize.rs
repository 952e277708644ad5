//! Converts uploaded files into shape assets with resolved intrinsic sizes

use crate::assets::shape::{AssetKind, AssetPayload, AssetPool, ShapeAsset};
use crate::assets::svg;
use crate::io::configuration::FALLBACK_DIMENSION;
use crate::io::error::{PatternError, Result};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Raw upload as handed over by the surrounding interface
#[derive(Clone, Debug)]
pub struct UploadedFile {
    /// Display name, used in error reports
    pub name: String,
    /// Declared media type or extension
    pub media_type: String,
    /// File content
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload record
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Outcome of normalizing one batch
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Assets appended to the pool, in batch order
    pub added: Vec<Arc<ShapeAsset>>,
    /// Per-file failures, in batch order
    pub failures: Vec<PatternError>,
}

/// Turns batches of uploads into pool entries
///
/// Identifiers combine the batch timestamp, a per-normalizer batch sequence and the
/// file's index within the batch.
#[derive(Debug, Default)]
pub struct AssetNormalizer {
    batches: u64,
}

impl AssetNormalizer {
    /// Create a normalizer
    pub const fn new() -> Self {
        Self { batches: 0 }
    }

    /// Normalize a batch and append every success to `pool`
    ///
    /// Files are processed sequentially in order. A failing file is recorded in the
    /// report and skipped; it never aborts the rest of the batch.
    pub fn normalize_batch(&mut self, files: &[UploadedFile], pool: &mut AssetPool) -> NormalizeReport {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        let batch = self.batches;
        self.batches += 1;

        let mut report = NormalizeReport::default();
        for (index, file) in files.iter().enumerate() {
            let mut id = format!("asset-{stamp:x}-{batch}-{index}");
            // Another normalizer feeding the same pool can produce the same stamp and sequence
            let mut attempt = 0;
            while pool.contains(&id) {
                attempt += 1;
                id = format!("asset-{stamp:x}-{batch}-{index}-{attempt}");
            }

            match normalize_file(file, id) {
                Ok(asset) => {
                    let asset = Arc::new(asset);
                    if pool.insert(Arc::clone(&asset)) {
                        report.added.push(asset);
                    }
                }
                Err(error) => report.failures.push(error),
            }
        }
        report
    }
}

/// Normalize a single upload under the given identifier
///
/// # Errors
///
/// Returns an error if:
/// - The media type is neither SVG nor PNG (`UnsupportedAssetKind`)
/// - SVG content is not valid UTF-8 or PNG content cannot be decoded (`AssetDecodeFailure`)
pub fn normalize_file(file: &UploadedFile, id: String) -> Result<ShapeAsset> {
    match AssetKind::from_media_type(&file.media_type) {
        Some(AssetKind::Vector) => {
            let markup =
                String::from_utf8(file.bytes.clone()).map_err(|e| PatternError::AssetDecodeFailure {
                    name: file.name.clone(),
                    reason: e.to_string(),
                })?;
            let (width, height) = svg::intrinsic_size(&markup);
            Ok(ShapeAsset::new(
                id,
                AssetPayload::Markup(markup),
                width,
                height,
                FALLBACK_DIMENSION,
            ))
        }
        Some(AssetKind::Raster) => {
            let image = image::load_from_memory(&file.bytes).map_err(|e| {
                PatternError::AssetDecodeFailure {
                    name: file.name.clone(),
                    reason: e.to_string(),
                }
            })?;
            Ok(ShapeAsset::new(
                id,
                AssetPayload::Encoded(file.bytes.clone()),
                f64::from(image.width()),
                f64::from(image.height()),
                FALLBACK_DIMENSION,
            ))
        }
        None => Err(PatternError::UnsupportedAssetKind {
            name: file.name.clone(),
            media_type: file.media_type.clone(),
        }),
    }
}
