/// Preview generation from the full-resolution output
///
/// Scales the composited bitmap uniformly to fit the viewport and draws the
/// section separators so the user can see where export-time slicing will
/// cut. The scale factor may exceed 1:1 when the viewport is larger than
/// the image; this is a fit, not a strict downscale.

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::state::params::ProcessParams;

/// Scale the hires bitmap to the viewport and overlay the section lines.
///
/// Separators are single-pixel vertical strokes at `out_w·i/n`, drawn in
/// `line_color` (the app background, so they read as gaps between panels).
pub fn downsize_for_viewport(
    hires: &RgbaImage,
    params: &ProcessParams,
    line_color: [u8; 4],
) -> RgbaImage {
    assert!(hires.width() > 0 && hires.height() > 0, "hires bitmap must be non-empty");
    let (screen_w, screen_h) = params.screen_dimensions;
    assert!(screen_w > 0.0 && screen_h > 0.0, "viewport must be positive");

    let scale = (screen_w / hires.width() as f32).min(screen_h / hires.height() as f32);
    let out_w = ((hires.width() as f32 * scale) as u32).max(1);
    let out_h = ((hires.height() as f32 * scale) as u32).max(1);

    let mut preview = imageops::resize(hires, out_w, out_h, FilterType::Triangle);

    if params.section_count > 1 {
        let stroke = Rgba(line_color);
        for i in 1..params.section_count {
            let x = (out_w as f32 * i as f32 / params.section_count as f32) as u32;
            if x >= out_w {
                continue;
            }
            for y in 0..out_h {
                preview.put_pixel(x, y, stroke);
            }
        }
    }

    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);
    const LINE: [u8; 4] = [255, 0, 255, 255];

    fn params_for(viewport: (f32, f32), section_count: u32) -> ProcessParams {
        ProcessParams {
            screen_dimensions: viewport,
            section_count,
            ..ProcessParams::default()
        }
    }

    #[test]
    fn test_fits_inside_viewport() {
        let hires = RgbaImage::from_pixel(200, 100, GREY);
        let preview = downsize_for_viewport(&hires, &params_for((100.0, 100.0), 1), LINE);
        assert_eq!(preview.dimensions(), (100, 50));
    }

    #[test]
    fn test_upscales_when_viewport_is_larger() {
        let hires = RgbaImage::from_pixel(10, 10, GREY);
        let preview = downsize_for_viewport(&hires, &params_for((40.0, 80.0), 1), LINE);
        assert_eq!(preview.dimensions(), (40, 40));
    }

    #[test]
    fn test_single_section_draws_no_lines() {
        let hires = RgbaImage::from_pixel(100, 100, GREY);
        let preview = downsize_for_viewport(&hires, &params_for((50.0, 50.0), 1), LINE);
        for (_, _, pixel) in preview.enumerate_pixels() {
            assert_eq!(*pixel, GREY);
        }
    }

    #[test]
    fn test_separators_at_even_spacing() {
        let hires = RgbaImage::from_pixel(200, 100, GREY);
        let preview = downsize_for_viewport(&hires, &params_for((100.0, 100.0), 3), LINE);

        // output is 100x50, lines at x = 33 and x = 66
        for y in 0..50 {
            assert_eq!(*preview.get_pixel(33, y), Rgba(LINE));
            assert_eq!(*preview.get_pixel(66, y), Rgba(LINE));
        }
        assert_eq!(*preview.get_pixel(10, 25), GREY);
        assert_eq!(*preview.get_pixel(50, 25), GREY);
    }
}
