use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb};
use mktrainset::{Contour, ContourProvider};

/// Hands out the same contours for every image
pub struct ScriptedProvider {
    pub contours: Vec<Contour>,
}

impl ScriptedProvider {
    pub fn new(coords: &[&[(i32, i32)]]) -> Self {
        Self {
            contours: coords.iter().map(|c| Contour::from_coords(c)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self { contours: vec![] }
    }
}

impl ContourProvider for ScriptedProvider {
    fn detect_contours(&self, _image: &DynamicImage) -> mktrainset::Result<Vec<Contour>> {
        Ok(self.contours.clone())
    }
}

/// Three shapes on a 100x100 image; with margin 5 they give
/// 30x30, 20x30 and 15x13 cutouts.
pub fn three_shapes() -> ScriptedProvider {
    ScriptedProvider::new(&[
        &[(10, 10), (10, 30), (30, 30), (30, 10)],
        &[(50, 50), (60, 70)],
        &[(90, 5), (95, 8)],
    ])
}

/// Writes a gradient PNG and returns its path
pub fn create_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128u8])
    });
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// Writes a white page with black filled squares `(x, y, size)`
pub fn create_scan(dir: &Path, name: &str, squares: &[(u32, u32, u32)]) -> PathBuf {
    let mut img = GrayImage::from_pixel(120, 100, Luma([255u8]));
    for &(x0, y0, size) in squares {
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save scan");
    path
}

/// Sorted file names inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
