//! Artifact naming and PNG/SVG export

use crate::io::configuration::ARTIFACT_PREFIX;
use crate::io::error::{PatternError, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, used to qualify artifact names
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
}

/// Artifact file name such as `brand-pattern-1700000000000.png`
pub fn artifact_name(extension: &str, timestamp: u128) -> String {
    format!("{ARTIFACT_PREFIX}-{timestamp}.{extension}")
}

fn ensure_directory(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory).map_err(|e| PatternError::FileSystem {
        path: directory.to_path_buf(),
        operation: "create directory",
        source: e,
    })
}

/// Encode the raster pattern as PNG into `directory`
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The image cannot be encoded or written
pub fn export_raster(image: &RgbaImage, directory: &Path, timestamp: u128) -> Result<PathBuf> {
    ensure_directory(directory)?;
    let path = directory.join(artifact_name("png", timestamp));

    image
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| PatternError::ImageExport {
            path: path.clone(),
            source: e,
        })?;

    Ok(path)
}

/// Write the vector pattern document into `directory`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written
pub fn export_vector(markup: &str, directory: &Path, timestamp: u128) -> Result<PathBuf> {
    ensure_directory(directory)?;
    let path = directory.join(artifact_name("svg", timestamp));

    std::fs::write(&path, markup).map_err(|e| PatternError::FileSystem {
        path: path.clone(),
        operation: "write vector document",
        source: e,
    })?;

    Ok(path)
}
