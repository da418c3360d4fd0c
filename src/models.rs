use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use imageproc::point::Point;

use crate::error::TrainsetError;

/// Closed outline of a detected shape. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` pairs
    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }
}

/// Axis-aligned box in image coordinates.
///
/// Coordinates may lie outside the image until the rectangle has been clipped
/// with [`crate::geometry::clip_to_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// A rectangle with non-positive width or height produces no artifact
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// What to produce for every input image
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Cut every detected shape into its own numbered BMP file
    Split,
    /// Outline every detected shape on a PNG copy of the input
    Mark,
}

impl FromStr for Mode {
    type Err = TrainsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(Mode::Split),
            "mark" => Ok(Mode::Mark),
            other => Err(TrainsetError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Split => write!(f, "split"),
            Mode::Mark => write!(f, "mark"),
        }
    }
}

/// One unit of batch work: an input image and where its artifacts go.
///
/// For [`Mode::Split`] the output is a directory, for [`Mode::Mark`] a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl BatchItem {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Pair inputs with outputs by position. Callers are expected to pass lists
    /// of equal length; surplus entries of the longer list are ignored.
    pub fn pair<I, O>(inputs: I, outputs: O) -> Vec<BatchItem>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
        O: IntoIterator,
        O::Item: Into<PathBuf>,
    {
        inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| BatchItem::new(input, output))
            .collect()
    }
}
