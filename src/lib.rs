pub mod artifacts;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod models;
pub mod pipeline;

pub use artifacts::{ArtifactReport, ArtifactStrategy, MarkStrategy, SplitStrategy};
pub use detection::{ContourProvider, ThresholdContourProvider};
pub use error::{Result, TrainsetError};
pub use geometry::{clip_to_image, enclosing_rectangle};
pub use models::{BatchItem, Contour, Mode, Rectangle};
pub use pipeline::{BatchConfig, BatchProcessor, BatchReport, ItemOutcome};
