//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or pixels.

/// Resolve the output dimensions of a resize request against the current
/// buffer dimensions.
///
/// - Both bounds given: taken verbatim — aspect ratio is the caller's problem.
/// - One bound given: the other is derived from the current aspect ratio,
///   rounded to nearest and floored at 1 so extreme ratios never collapse a
///   dimension to zero.
/// - Neither given: `None`, meaning the resize is a no-op.
///
/// Bounds of zero are treated as absent. The log layer rejects them at append
/// time; tolerating them here keeps replay total over any log.
///
/// # Examples
/// ```
/// # use darkroom::imaging::resolve_resize_dimensions;
/// // 400x300 bounded to width 150 → height 113 (150 * 300/400 = 112.5)
/// assert_eq!(resolve_resize_dimensions((400, 300), Some(150), None), Some((150, 113)));
///
/// // Explicit bounds pass through untouched
/// assert_eq!(resolve_resize_dimensions((400, 300), Some(100), Some(100)), Some((100, 100)));
/// ```
pub fn resolve_resize_dimensions(
    current: (u32, u32),
    width: Option<u32>,
    height: Option<u32>,
) -> Option<(u32, u32)> {
    let (cur_w, cur_h) = current;
    let width = width.filter(|&w| w > 0);
    let height = height.filter(|&h| h > 0);

    match (width, height) {
        (Some(w), Some(h)) => Some((w, h)),
        (Some(w), None) => {
            let h = (w as f64 * cur_h as f64 / cur_w as f64).round() as u32;
            Some((w, h.max(1)))
        }
        (None, Some(h)) => {
            let w = (h as f64 * cur_w as f64 / cur_h as f64).round() as u32;
            Some((w.max(1), h))
        }
        (None, None) => None,
    }
}

/// Compute a centered crop window, clamped to the source bounds.
///
/// Origin is `((w - tw) / 2, (h - th) / 2)` with integer (floor) division.
/// When the source is smaller than the target in a dimension, the origin
/// clamps to 0 and the window shrinks to the full source extent — the result
/// is always a valid sub-rectangle, never a panic.
///
/// Returns `(x, y, width, height)`.
pub fn crop_window(source: (u32, u32), target: (u32, u32)) -> (u32, u32, u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let w = tgt_w.min(src_w);
    let h = tgt_h.min(src_h);
    let x = (src_w - w) / 2;
    let y = (src_h - h) / 2;

    (x, y, w, h)
}
