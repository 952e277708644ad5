//! Error taxonomy for asset normalization, layout and rendering

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pattern operations
#[derive(Debug)]
pub enum PatternError {
    /// Uploaded file is neither vector markup nor a raster image
    ///
    /// Reported per file; the rest of the batch still normalizes
    UnsupportedAssetKind {
        /// Name of the rejected file
        name: String,
        /// Declared media type of the rejected file
        media_type: String,
    },

    /// Uploaded content could not be decoded while normalizing
    AssetDecodeFailure {
        /// Name of the file that failed to decode
        name: String,
        /// Description of the decode failure
        reason: String,
    },

    /// Generation was requested while the asset pool holds no shapes
    EmptyAssetPool,

    /// An asset referenced by the placement sequence could not be decoded for drawing
    ///
    /// Aborts the whole raster render
    RenderDecodeFailure {
        /// Identifier of the asset that failed
        asset_id: String,
        /// Description of the decode failure
        reason: String,
    },

    /// Stored vector markup could not be embedded into the vector document
    ///
    /// Only the affected placement is omitted
    MalformedAssetMarkup {
        /// Identifier of the asset with broken markup
        asset_id: String,
        /// Position of the omitted placement within the sequence
        placement: usize,
        /// Description of the parse failure
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode or save a raster artifact
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl PatternError {
    /// Whether processing may continue after reporting this error
    ///
    /// Normalization failures skip one file and vector markup failures skip one
    /// placement; everything else aborts the operation that raised it.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAssetKind { .. }
                | Self::AssetDecodeFailure { .. }
                | Self::MalformedAssetMarkup { .. }
        )
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAssetKind { name, media_type } => {
                write!(
                    f,
                    "Unsupported asset '{name}' ({media_type}): only SVG and PNG files are accepted"
                )
            }
            Self::AssetDecodeFailure { name, reason } => {
                write!(f, "Failed to decode asset '{name}': {reason}")
            }
            Self::EmptyAssetPool => {
                write!(f, "No assets loaded: add at least one shape before generating")
            }
            Self::RenderDecodeFailure { asset_id, reason } => {
                write!(f, "Failed to decode asset '{asset_id}' for rendering: {reason}")
            }
            Self::MalformedAssetMarkup {
                asset_id,
                placement,
                reason,
            } => {
                write!(
                    f,
                    "Omitted placement {placement}: markup of asset '{asset_id}' is malformed: {reason}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pattern results
pub type Result<T> = std::result::Result<T, PatternError>;

impl From<std::io::Error> for PatternError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PatternError {
    PatternError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
