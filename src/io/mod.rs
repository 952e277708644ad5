/// Command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Artifact naming and writing
pub mod export;
/// Stage progress display
pub mod progress;
