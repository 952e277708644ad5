//! Pipeline stage progress with a single terminal bar

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Pipeline stages reported by the command-line tool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Reading and normalizing asset files
    Loading,
    /// Computing placements
    Layout,
    /// Compositing the PNG artifact
    Raster,
    /// Building the SVG document
    Vector,
    /// Writing artifacts to disk
    Export,
}

impl Stage {
    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "Loading assets",
            Self::Layout => "Generating layout",
            Self::Raster => "Rendering PNG",
            Self::Vector => "Rendering SVG",
            Self::Export => "Writing files",
        }
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg:<18} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks completed pipeline stages on one progress bar
pub struct ProgressManager {
    bar: ProgressBar,
    completed: usize,
}

impl ProgressManager {
    /// Create a bar expecting `stages` stages
    pub fn new(stages: usize) -> Self {
        let bar = ProgressBar::new(stages as u64);
        bar.set_style(STAGE_STYLE.clone());
        Self { bar, completed: 0 }
    }

    /// Create a bar that draws nothing
    pub fn hidden(stages: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(stages as u64);
        Self { bar, completed: 0 }
    }

    /// Announce the stage now running
    pub fn start(&self, stage: Stage) {
        self.bar.set_message(stage.label());
    }

    /// Mark the running stage as done
    pub fn complete(&mut self) {
        self.completed += 1;
        self.bar.set_position(self.completed as u64);
    }

    /// Number of stages completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Write a diagnostic to stderr above the bar without disturbing it
    // Allow print for user-visible warnings that must survive a hidden bar
    #[allow(clippy::print_stderr)]
    pub fn warn(&self, message: &str) {
        self.bar.suspend(|| eprintln!("warning: {message}"));
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
