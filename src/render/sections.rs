/// Section slicing for export
///
/// Partitions the composited bitmap into equal-width vertical strips, each
/// spanning the full height. The strip width floors, and half of any
/// leftover margin is trimmed from the left edge, the rest from the right.

use image::{imageops, RgbaImage};

/// Cut the bitmap into `section_count` strips, returned left to right.
///
/// Concatenating the strips in order reproduces the central
/// `section_count * strip_width` band of the input.
pub fn slice_sections(hires: &RgbaImage, section_count: u32) -> Vec<RgbaImage> {
    assert!(section_count >= 1, "section count must be at least 1");
    let side = hires.width() / section_count;
    assert!(side > 0, "bitmap narrower than the section count");

    let margin = hires.width() - section_count * side;
    let margin_start = margin / 2;

    (0..section_count)
        .map(|i| {
            let x = margin_start + i * side;
            imageops::crop_imm(hires, x, 0, side, hires.height()).to_image()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Bitmap whose pixel at (x, y) encodes x in the red channel
    fn column_coded(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| Rgba([(x % 256) as u8, 0, 0, 255]))
    }

    #[test]
    fn test_exact_division_has_no_margin() {
        let hires = column_coded(900, 300);
        let strips = slice_sections(&hires, 3);

        assert_eq!(strips.len(), 3);
        for (i, strip) in strips.iter().enumerate() {
            assert_eq!(strip.dimensions(), (300, 300));
            // first column of each strip continues where the previous ended
            assert_eq!(strip.get_pixel(0, 0)[0], ((i as u32 * 300) % 256) as u8);
        }
    }

    #[test]
    fn test_single_section_keeps_dimensions() {
        let hires = column_coded(250, 100);
        let strips = slice_sections(&hires, 1);
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].dimensions(), (250, 100));
        assert_eq!(strips[0], hires);
    }

    #[test]
    fn test_margin_is_trimmed_half_from_the_left() {
        // 10 wide in 3 sections: side 3, margin 1, nothing trimmed left
        let hires = column_coded(10, 4);
        let strips = slice_sections(&hires, 3);
        assert_eq!(strips[0].get_pixel(0, 0)[0], 0);

        // 11 wide in 3 sections: side 3, margin 2, one pixel trimmed left
        let hires = column_coded(11, 4);
        let strips = slice_sections(&hires, 3);
        assert_eq!(strips[0].get_pixel(0, 0)[0], 1);
    }

    #[test]
    fn test_strips_reproduce_the_central_band() {
        let hires = column_coded(23, 5);
        let section_count = 4;
        let strips = slice_sections(&hires, section_count);

        let side = 23 / section_count; // 5
        let margin_start = (23 - section_count * side) / 2; // 1
        for (i, strip) in strips.iter().enumerate() {
            assert_eq!(strip.height(), 5);
            for x in 0..side {
                let source_x = margin_start + i as u32 * side + x;
                assert_eq!(strip.get_pixel(x, 0)[0], source_x as u8);
            }
        }

        let total: u32 = strips.iter().map(|s| s.width()).sum();
        assert!(total <= hires.width());
    }

    #[test]
    #[should_panic]
    fn test_more_sections_than_pixels_fails_fast() {
        let hires = column_coded(2, 2);
        slice_sections(&hires, 3);
    }
}
