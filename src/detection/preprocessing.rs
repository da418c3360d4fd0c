use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Global threshold level, either fixed or picked by Otsu's method
pub fn threshold_level(gray: &GrayImage, fixed: Option<u8>) -> u8 {
    fixed.unwrap_or_else(|| otsu_level(gray))
}

/// True when every pixel has the same intensity
pub fn is_uniform(gray: &GrayImage) -> bool {
    let mut pixels = gray.pixels();
    match pixels.next() {
        Some(first) => pixels.all(|p| p == first),
        None => true,
    }
}

/// Binarize so that dark shapes on a light background become foreground (255).
/// Pixels at or below `level` are foreground.
pub fn binarize_dark_foreground(gray: &GrayImage, level: u8) -> GrayImage {
    threshold(gray, level, ThresholdType::BinaryInverted)
}

/// Black shapes on white, as used for monochrome training crops
pub fn to_monochrome(img: &DynamicImage) -> GrayImage {
    let gray = to_grayscale(img);
    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::Binary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_binarize_dark_foreground() {
        let gray = GrayImage::from_fn(4, 1, |x, _| Luma([(x * 80) as u8]));
        let binary = binarize_dark_foreground(&gray, 100);
        let values: Vec<u8> = binary.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![255, 255, 0, 0]);
    }

    #[test]
    fn test_fixed_level_wins_over_otsu() {
        let gray = GrayImage::from_pixel(3, 3, Luma([42]));
        assert_eq!(threshold_level(&gray, Some(7)), 7);
    }

    #[test]
    fn test_is_uniform() {
        assert!(is_uniform(&GrayImage::from_pixel(4, 4, Luma([200]))));
        assert!(!is_uniform(&GrayImage::from_fn(4, 4, |x, _| Luma([x as u8]))));
    }

    #[test]
    fn test_to_monochrome() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(10, 1, |x, _| {
            Luma([if x < 5 { 20 } else { 230 }])
        }));
        let mono = to_monochrome(&img);
        assert_eq!(mono.get_pixel(0, 0)[0], 0);
        assert_eq!(mono.get_pixel(9, 0)[0], 255);
    }
}
