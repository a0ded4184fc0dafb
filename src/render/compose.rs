/// Compositing stage of the render pipeline
///
/// Rotates the source by quarter turns, then pads it onto a background
/// canvas expanded to the requested aspect ratio. Rotation runs first so
/// the canvas is sized from the rotated dimensions.

use image::{imageops, Rgba, RgbaImage};
use std::borrow::Cow;

use crate::render::geometry;
use crate::state::params::{AspectRatio, ProcessParams, Rotation};

/// Rotate a bitmap clockwise by the given number of quarter turns.
/// Odd turns swap width and height.
pub fn rotate_quarter_turns(image: &RgbaImage, turns: Rotation) -> RgbaImage {
    match turns {
        Rotation::None => image.clone(),
        Rotation::Quarter => imageops::rotate90(image),
        Rotation::Half => imageops::rotate180(image),
        Rotation::ThreeQuarters => imageops::rotate270(image),
    }
}

/// Draw a bitmap centered on a fresh canvas filled with the given color.
///
/// Offsets truncate toward zero, so an odd padding delta leaves the extra
/// pixel on the right/bottom edge.
pub fn pad_to_canvas(image: &RgbaImage, canvas: (u32, u32), color: [u8; 4]) -> RgbaImage {
    let (target_w, target_h) = canvas;
    assert!(target_w > 0 && target_h > 0, "canvas dimensions must be positive");

    let mut padded = RgbaImage::from_pixel(target_w, target_h, Rgba(color));

    let offset_x = (target_w as i64 - image.width() as i64) / 2;
    let offset_y = (target_h as i64 - image.height() as i64) / 2;
    imageops::overlay(&mut padded, image, offset_x, offset_y);

    padded
}

/// Run the full-resolution pipeline: rotate, then pad to the target ratio.
///
/// `Original` (and an unresolved `Auto`, which never reaches this point)
/// skip the padding step entirely. With no rotation the input is passed
/// through without an intermediate copy.
pub fn render_hires(input: &RgbaImage, params: &ProcessParams) -> RgbaImage {
    let rotated: Cow<'_, RgbaImage> = if params.turns == Rotation::None {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(rotate_quarter_turns(input, params.turns))
    };

    match params.aspect_ratio {
        AspectRatio::Value { width, height } => {
            let canvas =
                geometry::expanded_dimensions(rotated.width(), rotated.height(), width, height);
            pad_to_canvas(&rotated, canvas, params.bg_color.rgba)
        }
        _ => rotated.into_owned(),
    }
}
