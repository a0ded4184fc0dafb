/// Aspect-fit geometry
///
/// Pure math for expanding a canvas around a source image until it reaches a
/// target width:height ratio without cropping. Exactly one dimension grows
/// beyond its original size (whichever the ratio demands more of).

use crate::state::params::AspectRatio;

/// Compute the expanded canvas size for a source image and a target ratio.
///
/// `W = floor(max(w, h·rw/rh))`, `H = floor(max(h, w·rh/rw))`. This
/// guarantees `W >= w` and `H >= h`, so the source always fits uncropped.
///
/// Zero dimensions are programming errors, not user input; they fail fast.
pub fn expanded_dimensions(width: u32, height: u32, ratio_w: u32, ratio_h: u32) -> (u32, u32) {
    assert!(width > 0 && height > 0, "source dimensions must be positive");
    assert!(ratio_w > 0 && ratio_h > 0, "aspect ratio must be positive");

    let w = width as f64;
    let h = height as f64;
    let rw = ratio_w as f64;
    let rh = ratio_h as f64;

    let expanded_w = w.max(h * rw / rh).floor() as u32;
    let expanded_h = h.max(w * rh / rw).floor() as u32;

    (expanded_w, expanded_h)
}

/// Pick the enumerated ratio that needs the least padding for this image.
///
/// Minimizes the squared distance between the source size and the expanded
/// canvas each candidate would produce. Ties keep the first candidate in
/// enumeration order (an explicit loop: `Iterator::min_by_key` would keep
/// the last).
pub fn best_fit_ratio(width: u32, height: u32) -> AspectRatio {
    let mut best: Option<(i64, AspectRatio)> = None;

    for ratio in AspectRatio::ALL {
        let AspectRatio::Value {
            width: ratio_w,
            height: ratio_h,
        } = ratio
        else {
            continue;
        };

        let (expanded_w, expanded_h) = expanded_dimensions(width, height, ratio_w, ratio_h);
        let dx = width as i64 - expanded_w as i64;
        let dy = height as i64 - expanded_h as i64;
        let error = dx * dx + dy * dy;

        if best.as_ref().map_or(true, |(least, _)| error < *least) {
            best = Some((error, ratio));
        }
    }

    best.map(|(_, ratio)| ratio).unwrap_or(AspectRatio::SQUARE)
}
