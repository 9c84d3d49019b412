//! Pure transform primitives over pixel buffers.
//!
//! Every function takes a buffer by reference and returns a new buffer; the
//! input is never mutated. Dimension math lives in
//! [`calculations`](super::calculations) so it stays testable without pixels.

use super::calculations::{crop_window, resolve_resize_dimensions};
use image::DynamicImage;
use image::imageops::FilterType;

/// Rotate 90° clockwise. Width and height swap; pixel-exact, no interpolation.
pub fn rotate_right(buffer: &DynamicImage) -> DynamicImage {
    buffer.rotate90()
}

/// Rotate 90° counter-clockwise. Width and height swap.
pub fn rotate_left(buffer: &DynamicImage) -> DynamicImage {
    buffer.rotate270()
}

/// Mirror along the vertical axis. Dimensions unchanged.
pub fn flip_horizontal(buffer: &DynamicImage) -> DynamicImage {
    buffer.fliph()
}

/// Mirror along the horizontal axis. Dimensions unchanged.
pub fn flip_vertical(buffer: &DynamicImage) -> DynamicImage {
    buffer.flipv()
}

/// Resize with bilinear interpolation.
///
/// Both bounds given: output is exactly that size, aspect ratio not
/// preserved. One bound given: the other is derived from the current aspect
/// ratio (see [`resolve_resize_dimensions`]). Neither given: the buffer is
/// returned unchanged.
pub fn resize(buffer: &DynamicImage, width: Option<u32>, height: Option<u32>) -> DynamicImage {
    match resolve_resize_dimensions((buffer.width(), buffer.height()), width, height) {
        Some((w, h)) => buffer.resize_exact(w, h, FilterType::Triangle),
        None => buffer.clone(),
    }
}

/// Center-crop to at most `target_width` x `target_height`.
///
/// The window clamps to the source bounds, so a source smaller than the
/// target yields the full source extent in that dimension rather than
/// panicking (see [`crop_window`]).
pub fn crop_center(buffer: &DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
    let (x, y, w, h) = crop_window(
        (buffer.width(), buffer.height()),
        (target_width, target_height),
    );
    buffer.crop_imm(x, y, w, h)
}
