//! Command-line interface generating a pattern from asset files

use crate::assets::UploadedFile;
use crate::io::configuration::{
    DEFAULT_CANVAS_SIZE, DEFAULT_OFFSET_INTENSITY, DEFAULT_SHAPE_COUNT, MAX_SHAPE_COUNT,
};
use crate::io::error::{PatternError, Result, invalid_parameter};
use crate::io::export::{export_raster, export_vector, timestamp_millis};
use crate::io::progress::{ProgressManager, Stage};
use crate::layout::PatternOptions;
use crate::session::PatternSession;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Artifacts written by a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PNG only
    Png,
    /// SVG only
    Svg,
    /// PNG and SVG
    Both,
}

impl OutputFormat {
    /// Whether a PNG artifact is written
    pub const fn includes_png(self) -> bool {
        matches!(self, Self::Png | Self::Both)
    }

    /// Whether an SVG artifact is written
    pub const fn includes_svg(self) -> bool {
        matches!(self, Self::Svg | Self::Both)
    }
}

#[derive(Parser)]
#[command(name = "brandpattern")]
#[command(
    author,
    version,
    about = "Generate randomized tiled patterns from SVG and PNG shapes"
)]
/// Command-line arguments for the pattern generation tool
pub struct Cli {
    /// SVG/PNG files or directories containing them
    #[arg(value_name = "ASSETS", required = true)]
    pub assets: Vec<PathBuf>,

    /// Number of shapes to place
    #[arg(short, long, default_value_t = DEFAULT_SHAPE_COUNT,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SHAPE_COUNT)))]
    pub count: u32,

    /// Positional jitter as a fraction of a grid cell (0 to 1)
    #[arg(short, long, default_value_t = DEFAULT_OFFSET_INTENSITY, value_parser = parse_intensity)]
    pub offset: f64,

    /// Keep every shape upright
    #[arg(long)]
    pub no_rotation: bool,

    /// Output square side length in pixels
    #[arg(short, long, default_value_t = DEFAULT_CANVAS_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Random seed for reproducible layouts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory receiving the exported artifacts
    #[arg(short = 'd', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Artifacts to write
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,

    /// Suppress progress and warning output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_intensity(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("{parsed} is outside 0..=1"))
    }
}

impl Cli {
    /// Generation options described by the arguments
    pub const fn pattern_options(&self) -> PatternOptions {
        PatternOptions {
            shape_count: self.count,
            offset_intensity: self.offset,
            enable_rotation: !self.no_rotation,
            canvas_size: self.size,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Declared media type for a path, taken from its extension
pub fn media_type_for_path(path: &Path) -> String {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("svg") => "image/svg+xml".to_string(),
        Some("png") => "image/png".to_string(),
        Some(other) => format!("application/x-{other}"),
        None => "application/octet-stream".to_string(),
    }
}

/// Runs one generate-and-export pass for the parsed arguments
pub struct PatternRunner {
    cli: Cli,
    progress: ProgressManager,
}

// Loading, layout, raster, vector, export
const STAGE_COUNT: usize = 5;

impl PatternRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressManager::new(STAGE_COUNT)
        } else {
            ProgressManager::hidden(STAGE_COUNT)
        };
        Self { cli, progress }
    }

    /// Expand directories into their SVG/PNG children
    ///
    /// Explicit files are kept regardless of extension so that unsupported files are
    /// reported rather than ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a path does not exist or a directory cannot be read
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for target in &self.cli.assets {
            if target.is_file() {
                files.push(target.clone());
            } else if target.is_dir() {
                let mut children = Vec::new();
                for entry in std::fs::read_dir(target).map_err(|e| PatternError::FileSystem {
                    path: target.clone(),
                    operation: "read directory",
                    source: e,
                })? {
                    let path = entry?.path();
                    let media_type = media_type_for_path(&path);
                    if path.is_file()
                        && (media_type.contains("svg") || media_type.contains("png"))
                    {
                        children.push(path);
                    }
                }
                children.sort();
                files.extend(children);
            } else {
                return Err(invalid_parameter(
                    "assets",
                    &target.display(),
                    &"path is neither a file nor a directory",
                ));
            }
        }
        Ok(files)
    }

    /// Load assets, generate a layout and write the requested artifacts
    ///
    /// Returns the paths of the written artifacts. Per-file and per-placement
    /// problems are reported as warnings and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An asset path cannot be read
    /// - No asset could be loaded (`EmptyAssetPool`)
    /// - The PNG render fails to decode an asset
    /// - An artifact cannot be written
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        let mut session = self
            .cli
            .seed
            .map_or_else(PatternSession::new, PatternSession::with_seed);
        session.set_options(self.cli.pattern_options());

        self.progress.start(Stage::Loading);
        let mut uploads = Vec::new();
        for path in self.collect_files()? {
            let bytes = std::fs::read(&path).map_err(|e| PatternError::FileSystem {
                path: path.clone(),
                operation: "read asset",
                source: e,
            })?;
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            uploads.push(UploadedFile::new(name, media_type_for_path(&path), bytes));
        }
        let report = session.add_files(&uploads);
        for failure in &report.failures {
            self.warn(failure);
        }
        self.progress.complete();

        self.progress.start(Stage::Layout);
        session.generate()?;
        self.progress.complete();

        let timestamp = timestamp_millis();
        let mut written = Vec::new();

        self.progress.start(Stage::Raster);
        let raster = if self.cli.format.includes_png() {
            Some(session.render_raster()?.output)
        } else {
            None
        };
        self.progress.complete();

        self.progress.start(Stage::Vector);
        let vector = if self.cli.format.includes_svg() {
            let document = session.render_vector()?.output;
            for warning in &document.warnings {
                self.warn(warning);
            }
            Some(document)
        } else {
            None
        };
        self.progress.complete();

        self.progress.start(Stage::Export);
        if let Some(image) = raster {
            written.push(export_raster(&image, &self.cli.output_dir, timestamp)?);
        }
        if let Some(document) = vector {
            written.push(export_vector(
                &document.markup,
                &self.cli.output_dir,
                timestamp,
            )?);
        }
        self.progress.complete();
        self.progress.finish();

        Ok(written)
    }

    fn warn(&self, error: &PatternError) {
        if !self.cli.quiet {
            self.progress.warn(&error.to_string());
        }
    }
}
