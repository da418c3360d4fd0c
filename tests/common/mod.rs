mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from mktrainset for tests
pub use mktrainset::{
    BatchItem, BatchProcessor, BatchReport, Contour, ContourProvider, ItemOutcome, Mode, Rectangle,
    ThresholdContourProvider, TrainsetError,
};
