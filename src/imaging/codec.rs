//! Decoding and encoding between raw bytes and pixel buffers.
//!
//! The [`ImageCodec`] trait is the seam between the replay machinery and the
//! actual codecs: everything above it (pipeline, thumbnails, session) is
//! codec-agnostic, which is also what lets tests observe codec traffic with
//! a counting wrapper instead of inspecting pixels.
//!
//! The production implementation is [`RasterCodec`] — the `image` crate's
//! pure-Rust codecs, statically linked, with exactly the five supported
//! formats compiled in.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, GIF, WEBP) | `image::ImageReader` with guessed format |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality applies) |
//! | Encode → PNG, BMP, GIF | `DynamicImage::write_to` |
//! | Encode → WEBP | `image::codecs::webp::WebPEncoder` (lossless) |
//!
//! GIF input decodes to its **first frame only**; animated editing is out of
//! scope and multi-frame inputs collapse to a static image.

use super::params::Quality;
use crate::format::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Bytes produced by an encode, tagged with the format actually written.
///
/// The tag matters: a WEBP request may come back as `Png` (see
/// [`ImageCodec::encode`]), and extension/MIME labelling must follow this
/// field, not the requested format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

/// Trait for pixel codecs.
///
/// `Sync` so a single codec can back concurrent pipeline runs and the
/// parallel thumbnail batch path.
pub trait ImageCodec: Sync {
    /// Decode bytes of unknown raster format into a pixel buffer.
    ///
    /// Fails with [`CodecError::Decode`] on empty, truncated, or
    /// unrecognized input — never a silent default.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError>;

    /// Encode a pixel buffer to the requested format.
    ///
    /// `quality` applies to JPEG only and is ignored elsewhere. If WEBP
    /// writing is not compiled in, the codec substitutes a PNG encode and
    /// reports it via [`Encoded::format`] — the substitution is surfaced,
    /// never silent. Zero-dimension buffers fail with
    /// [`CodecError::Encode`].
    fn encode(
        &self,
        buffer: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Encoded, CodecError>;
}

/// Production codec on the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RasterCodec;

impl RasterCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RasterCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Read width and height from the image header without a full decode.
pub fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), CodecError> {
    reader_for(bytes)?
        .into_dimensions()
        .map_err(|e| CodecError::Decode(format!("failed to read dimensions: {e}")))
}

/// Identify the input's format, if it is one of the supported five.
pub fn detect_format(bytes: &[u8]) -> Result<OutputFormat, CodecError> {
    let format = image::guess_format(bytes)
        .map_err(|e| CodecError::Decode(format!("unrecognized image data: {e}")))?;
    OutputFormat::from_image_format(format)
        .ok_or_else(|| CodecError::Decode(format!("unsupported input format: {format:?}")))
}

fn reader_for(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::Decode("empty input".into()));
    }
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(format!("failed to probe format: {e}")))?;
    if reader.format().is_none() {
        return Err(CodecError::Decode("unrecognized image data".into()));
    }
    Ok(reader)
}

impl ImageCodec for RasterCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError> {
        reader_for(bytes)?
            .decode()
            .map_err(|e| CodecError::Decode(format!("failed to decode: {e}")))
    }

    fn encode(
        &self,
        buffer: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Encoded, CodecError> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(CodecError::Encode(format!(
                "cannot encode zero-dimension buffer ({}x{})",
                buffer.width(),
                buffer.height()
            )));
        }

        match format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel; flatten to RGB first.
                let rgb = DynamicImage::ImageRgb8(buffer.to_rgb8());
                let mut bytes = Vec::new();
                rgb.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut bytes,
                    quality.as_u8(),
                ))
                .map_err(|e| CodecError::Encode(format!("JPEG encode failed: {e}")))?;
                Ok(Encoded {
                    bytes,
                    format: OutputFormat::Jpeg,
                })
            }
            OutputFormat::Webp if ImageFormat::WebP.writing_enabled() => {
                let rgba = DynamicImage::ImageRgba8(buffer.to_rgba8());
                let mut bytes = Vec::new();
                rgba.write_with_encoder(WebPEncoder::new_lossless(&mut bytes))
                    .map_err(|e| CodecError::Encode(format!("WEBP encode failed: {e}")))?;
                Ok(Encoded {
                    bytes,
                    format: OutputFormat::Webp,
                })
            }
            // WEBP writing not compiled in: substitute PNG, surfaced via the
            // returned format so callers never mislabel the bytes.
            OutputFormat::Webp => encode_via_image_format(buffer, OutputFormat::Png),
            OutputFormat::Png | OutputFormat::Bmp | OutputFormat::Gif => {
                encode_via_image_format(buffer, format)
            }
        }
    }
}

fn encode_via_image_format(
    buffer: &DynamicImage,
    format: OutputFormat,
) -> Result<Encoded, CodecError> {
    let rgba = DynamicImage::ImageRgba8(buffer.to_rgba8());
    let mut cursor = Cursor::new(Vec::new());
    rgba.write_to(&mut cursor, format.image_format())
        .map_err(|e| CodecError::Encode(format!("{format} encode failed: {e}")))?;
    Ok(Encoded {
        bytes: cursor.into_inner(),
        format,
    })
}
