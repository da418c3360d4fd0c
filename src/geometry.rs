use crate::error::{Result, TrainsetError};
use crate::models::{Contour, Rectangle};

/// Smallest axis-aligned rectangle holding every contour point, grown by
/// `margin` pixels on each side.
///
/// The result is not bounded by any image and may have negative coordinates.
pub fn enclosing_rectangle(contour: &Contour, margin: u32) -> Result<Rectangle> {
    let first = contour.points.first().ok_or(TrainsetError::InvalidContour)?;
    let margin = i32::try_from(margin).unwrap_or(i32::MAX);

    let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
    for p in &contour.points[1..] {
        left = left.min(p.x);
        top = top.min(p.y);
        right = right.max(p.x);
        bottom = bottom.max(p.y);
    }

    let left = left.saturating_sub(margin);
    let top = top.saturating_sub(margin);
    let right = right.saturating_add(margin);
    let bottom = bottom.saturating_add(margin);

    // a huge margin saturates to a box covering everything
    Ok(Rectangle::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top)))
}

/// Constrain `rect` to `[0, image_width] x [0, image_height]`.
///
/// A negative origin moves to zero without growing the size, so only the part
/// of the margin that hangs off the near edge is lost. Sizes that would run
/// past the far edge are cut back, and anything left non-positive becomes 0.
pub fn clip_to_image(rect: Rectangle, image_width: u32, image_height: u32) -> Rectangle {
    let image_width = i32::try_from(image_width).unwrap_or(i32::MAX);
    let image_height = i32::try_from(image_height).unwrap_or(i32::MAX);

    let (x, width) = clip_axis(rect.x, rect.width, image_width);
    let (y, height) = clip_axis(rect.y, rect.height, image_height);

    Rectangle::new(x, y, width, height)
}

fn clip_axis(origin: i32, size: i32, limit: i32) -> (i32, i32) {
    let origin = origin.clamp(0, limit);
    let size = if origin.saturating_add(size) > limit {
        limit - origin
    } else {
        size
    };
    (origin, size.max(0))
}

/// Enclosing rectangles for all contours, clipped to the image.
///
/// Order follows the contour order. Rectangles without area are dropped.
pub fn visible_rectangles(
    contours: &[Contour],
    margin: u32,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<Rectangle>> {
    let mut rects = Vec::with_capacity(contours.len());
    for contour in contours {
        let rect = clip_to_image(enclosing_rectangle(contour, margin)?, image_width, image_height);
        if rect.has_area() {
            rects.push(rect);
        }
    }
    Ok(rects)
}
