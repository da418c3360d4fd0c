pub mod preprocessing;
pub mod contours;

use image::DynamicImage;

use crate::error::Result;
use crate::models::Contour;

pub use contours::ThresholdContourProvider;

/// Finds the outlines of shapes in a raster image.
///
/// Implementations must be deterministic for a given image; the order of the
/// returned contours decides artifact numbering.
pub trait ContourProvider {
    fn detect_contours(&self, image: &DynamicImage) -> Result<Vec<Contour>>;
}

impl<P: ContourProvider + ?Sized> ContourProvider for &P {
    fn detect_contours(&self, image: &DynamicImage) -> Result<Vec<Contour>> {
        (**self).detect_contours(image)
    }
}

impl<P: ContourProvider + ?Sized> ContourProvider for Box<P> {
    fn detect_contours(&self, image: &DynamicImage) -> Result<Vec<Contour>> {
        (**self).detect_contours(image)
    }
}
