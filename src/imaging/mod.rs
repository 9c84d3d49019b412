//! Pixel-level layer: codecs and pure transform primitives.
//!
//! | Concern | Module |
//! |---|---|
//! | **Bytes ↔ buffer** | [`codec`] — [`ImageCodec`] trait + [`RasterCodec`] |
//! | **Dimension math** | [`calculations`] — pure functions, no pixels |
//! | **Buffer → buffer** | [`transform`] — rotate, flip, resize, center-crop |
//! | **Encoding knobs** | [`params`] — [`Quality`] |
//!
//! Pixel buffers are `image::DynamicImage` throughout. Buffers are created by
//! decode, replaced (never mutated in place) by transforms, and dropped after
//! the final encode — nothing at this layer retains them.

pub mod calculations;
pub mod codec;
mod params;
pub mod transform;

pub use calculations::{crop_window, resolve_resize_dimensions};
pub use codec::{CodecError, Encoded, ImageCodec, RasterCodec, detect_format, inspect_dimensions};
pub use params::Quality;
