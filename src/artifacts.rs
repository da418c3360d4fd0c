use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgba};
use imageproc::drawing::{Canvas, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use tracing::{info, warn};

use crate::detection::preprocessing;
use crate::error::{Result, TrainsetError};
use crate::models::Rectangle;

/// Outline colour used when marking shapes
pub const DEFAULT_HIGHLIGHT: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const DEFAULT_STROKE_WIDTH: u32 = 9;

/// What a strategy wrote for one source image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactReport {
    pub written: Vec<PathBuf>,
    pub failed: usize,
}

/// Turns the rectangles found on one image into output files
pub trait ArtifactStrategy {
    /// `target` is a directory or a file path, depending on the strategy
    fn generate(
        &self,
        image: &DynamicImage,
        rects: &[Rectangle],
        target: &Path,
    ) -> Result<ArtifactReport>;

    /// Human-readable name for this strategy (used in log output)
    fn name(&self) -> &str;
}

/// Writes every rectangle as its own `<N>.bmp` inside the target directory
#[derive(Debug, Clone, Default)]
pub struct SplitStrategy {
    /// Reduce crops to black and white before writing
    pub binary_crops: bool,
}

impl SplitStrategy {
    pub fn cutout_path(dir: &Path, index: usize) -> PathBuf {
        dir.join(format!("{}.bmp", index))
    }

    fn cut(&self, image: &DynamicImage, rect: &Rectangle) -> DynamicImage {
        let (x, y) = (rect.x as u32, rect.y as u32);
        let crop = image.crop_imm(x, y, rect.width as u32, rect.height as u32);
        if self.binary_crops {
            DynamicImage::ImageLuma8(preprocessing::to_monochrome(&crop))
        } else {
            // BMP has no encoder for 16-bit or float pixels
            DynamicImage::ImageRgb8(crop.to_rgb8())
        }
    }
}

impl ArtifactStrategy for SplitStrategy {
    fn generate(
        &self,
        image: &DynamicImage,
        rects: &[Rectangle],
        target: &Path,
    ) -> Result<ArtifactReport> {
        let mut report = ArtifactReport::default();

        // numbers stay contiguous over rectangles with area; a failed write keeps its number
        for (index, rect) in rects.iter().filter(|r| r.has_area()).enumerate() {
            let path = Self::cutout_path(target, index);
            info!("Saving cutout {}", index);

            // one bad cutout must not stop the rest of the image
            match self.cut(image, rect).save_with_format(&path, ImageFormat::Bmp) {
                Ok(()) => report.written.push(path),
                Err(source) => {
                    let err = TrainsetError::ArtifactWrite { path, source };
                    warn!("{}", err);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    fn name(&self) -> &str {
        "Split"
    }
}

/// Draws all rectangles onto one PNG copy of the source image
#[derive(Debug, Clone)]
pub struct MarkStrategy {
    pub stroke_width: u32,
    pub highlight: Rgba<u8>,
}

impl MarkStrategy {
    pub fn new() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            highlight: DEFAULT_HIGHLIGHT,
        }
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_highlight(mut self, highlight: Rgba<u8>) -> Self {
        self.highlight = highlight;
        self
    }

    /// Annotated copy of `image`; the source is left untouched.
    ///
    /// The copy gains colour and alpha channels but keeps the source bit depth,
    /// so an image without rectangles comes back with the same pixel values.
    /// Float images are stored as 16-bit since PNG has no float encoding.
    pub fn annotate(&self, image: &DynamicImage, rects: &[Rectangle]) -> DynamicImage {
        let rects: Vec<&Rectangle> = rects.iter().filter(|r| r.has_area()).collect();
        match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => {
                let mut canvas = image.to_rgba8();
                for rect in rects {
                    draw_outline(&mut canvas, rect, self.stroke_width, self.highlight);
                }
                DynamicImage::ImageRgba8(canvas)
            }
            _ => {
                let mut canvas = image.to_rgba16();
                let color = Rgba(self.highlight.0.map(|c| u16::from(c) * 257));
                for rect in rects {
                    draw_outline(&mut canvas, rect, self.stroke_width, color);
                }
                DynamicImage::ImageRgba16(canvas)
            }
        }
    }
}

impl Default for MarkStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStrategy for MarkStrategy {
    fn generate(
        &self,
        image: &DynamicImage,
        rects: &[Rectangle],
        target: &Path,
    ) -> Result<ArtifactReport> {
        self.annotate(image, rects)
            .save_with_format(target, ImageFormat::Png)
            .map_err(|source| TrainsetError::ArtifactWrite {
                path: target.to_path_buf(),
                source,
            })?;

        Ok(ArtifactReport {
            written: vec![target.to_path_buf()],
            failed: 0,
        })
    }

    fn name(&self) -> &str {
        "Mark"
    }
}

/// Stroke of `stroke_width` pixels centred on the rectangle edge
fn draw_outline<C: Canvas>(canvas: &mut C, rect: &Rectangle, stroke_width: u32, color: C::Pixel) {
    let stroke = stroke_width.min(i32::MAX as u32) as i32;
    let inner = -(stroke / 2);
    let outer = stroke - 1 - stroke / 2;

    for offset in inner..=outer {
        let width = rect.width + 2 * offset;
        let height = rect.height + 2 * offset;
        if width <= 0 || height <= 0 {
            continue;
        }
        let ring =
            Rect::at(rect.x - offset, rect.y - offset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, ring, color);
    }
}
