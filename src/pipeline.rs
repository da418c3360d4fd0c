use std::path::Path;

use image::{DynamicImage, ImageReader, Rgba};
use tracing::{error, info, info_span};

use crate::artifacts::{
    ArtifactReport, ArtifactStrategy, DEFAULT_HIGHLIGHT, DEFAULT_STROKE_WIDTH, MarkStrategy,
    SplitStrategy,
};
use crate::detection::ContourProvider;
use crate::error::{Result, TrainsetError};
use crate::geometry;
use crate::models::{BatchItem, Mode};

pub const DEFAULT_MARGIN: u32 = 20;

/// Settings shared by every item of a batch
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Pixels added around each shape before clipping
    pub margin: u32,
    /// Outline thickness in mark mode
    pub stroke_width: u32,
    /// Outline colour in mark mode
    pub highlight: Rgba<u8>,
    /// Write black and white cutouts in split mode
    pub binary_crops: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            stroke_width: DEFAULT_STROKE_WIDTH,
            highlight: DEFAULT_HIGHLIGHT,
            binary_crops: false,
        }
    }
}

/// Result of one batch item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Done(ArtifactReport),
    Failed(String),
}

/// Outcome of every item, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub items: Vec<(BatchItem, ItemOutcome)>,
}

impl BatchReport {
    pub fn failed_items(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ItemOutcome::Failed(_)))
            .count()
    }

    pub fn artifacts_written(&self) -> usize {
        self.items
            .iter()
            .map(|(_, outcome)| match outcome {
                ItemOutcome::Done(report) => report.written.len(),
                ItemOutcome::Failed(_) => 0,
            })
            .sum()
    }

    pub fn artifacts_failed(&self) -> usize {
        self.items
            .iter()
            .map(|(_, outcome)| match outcome {
                ItemOutcome::Done(report) => report.failed,
                ItemOutcome::Failed(_) => 0,
            })
            .sum()
    }
}

/// Decode an image file
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decode = || -> std::result::Result<DynamicImage, image::ImageError> {
        Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
    };
    decode().map_err(|source| TrainsetError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create `dir` and its parents. An existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| TrainsetError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })
}

/// Runs detection and artifact generation over a list of images, one at a time
pub struct BatchProcessor<P: ContourProvider> {
    provider: P,
    config: BatchConfig,
}

impl<P: ContourProvider> BatchProcessor<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: BatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.config.margin = margin;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.config.stroke_width = stroke_width;
        self
    }

    pub fn with_highlight(mut self, highlight: Rgba<u8>) -> Self {
        self.config.highlight = highlight;
        self
    }

    pub fn with_binary_crops(mut self, binary_crops: bool) -> Self {
        self.config.binary_crops = binary_crops;
        self
    }

    fn strategy(&self, mode: Mode) -> Box<dyn ArtifactStrategy> {
        match mode {
            Mode::Split => Box::new(SplitStrategy {
                binary_crops: self.config.binary_crops,
            }),
            Mode::Mark => Box::new(
                MarkStrategy::new()
                    .with_stroke_width(self.config.stroke_width)
                    .with_highlight(self.config.highlight),
            ),
        }
    }

    /// Process every item in order. A failing item is logged and skipped;
    /// the batch always runs to the end.
    pub fn run(&self, mode: Mode, items: &[BatchItem]) -> BatchReport {
        let strategy = self.strategy(mode);
        let mut report = BatchReport::default();

        for item in items {
            info!(
                "Processing image: {} -> {}; Action: {}",
                item.input.display(),
                item.output.display(),
                mode
            );
            let _span = info_span!("item", input = %item.input.display()).entered();

            let outcome = match self.process_item(mode, strategy.as_ref(), item) {
                Ok(artifacts) => ItemOutcome::Done(artifacts),
                Err(err) => {
                    error!("Skipping {}: {}", item.input.display(), err);
                    ItemOutcome::Failed(err.to_string())
                }
            };
            report.items.push((item.clone(), outcome));
        }

        report
    }

    fn process_item(
        &self,
        mode: Mode,
        strategy: &dyn ArtifactStrategy,
        item: &BatchItem,
    ) -> Result<ArtifactReport> {
        let image = load_image(&item.input)?;
        let contours = self.provider.detect_contours(&image)?;
        let (width, height) = (image.width(), image.height());
        let rects = geometry::visible_rectangles(&contours, self.config.margin, width, height)?;

        if mode == Mode::Split {
            info!("Creating directory (recursively): {}", item.output.display());
            ensure_dir(&item.output)?;
        }

        let artifacts = strategy.generate(&image, &rects, &item.output)?;
        info!(
            "{}: {} written, {} failed",
            strategy.name(),
            artifacts.written.len(),
            artifacts.failed
        );
        Ok(artifacts)
    }
}
