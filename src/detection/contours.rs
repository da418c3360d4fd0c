use image::{DynamicImage, GrayImage};
use imageproc::contours::{BorderType, find_contours};
use tracing::{debug, info};

use crate::detection::{ContourProvider, preprocessing};
use crate::error::Result;
use crate::models::Contour;

/// Trace the outer border of every foreground blob in a binary image.
///
/// Holes are skipped. Contours come back in the order the borders are met
/// scanning rows top to bottom.
pub fn find_outer_contours(binary: &GrayImage, min_points: usize) -> Vec<Contour> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .filter(|c| c.points.len() >= min_points.max(1))
        .map(|c| Contour::new(c.points))
        .collect()
}

/// Locates dark polygons on a light scan with a global threshold and border following
#[derive(Debug, Clone)]
pub struct ThresholdContourProvider {
    /// Fixed binarization level; Otsu's method picks one per image when `None`
    pub threshold: Option<u8>,
    /// Contours with fewer points are dropped as noise
    pub min_points: usize,
}

impl ThresholdContourProvider {
    pub fn new() -> Self {
        Self {
            threshold: None,
            min_points: 1,
        }
    }

    pub fn with_threshold(mut self, threshold: Option<u8>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }
}

impl Default for ThresholdContourProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourProvider for ThresholdContourProvider {
    fn detect_contours(&self, image: &DynamicImage) -> Result<Vec<Contour>> {
        info!("Looking for polygons");
        let gray = preprocessing::to_grayscale(image);
        if self.threshold.is_none() && preprocessing::is_uniform(&gray) {
            // Otsu has nothing to separate on a blank page
            info!("Found 0 polygons");
            return Ok(Vec::new());
        }
        let level = preprocessing::threshold_level(&gray, self.threshold);
        debug!(level, "binarizing");

        let binary = preprocessing::binarize_dark_foreground(&gray, level);
        let contours = find_outer_contours(&binary, self.min_points);

        info!("Found {} polygons", contours.len());
        Ok(contours)
    }
}
