//! Output format enumeration and the extension/MIME mapping tables.
//!
//! Every format the editor can export maps to exactly one canonical file
//! extension and one canonical MIME type, in both directions, via exhaustive
//! matches. Input aliases are wider than the canonical pair: `jpg` and `jpeg`
//! both resolve to [`OutputFormat::Jpeg`], and either spelling of the MIME
//! type quirks (`image/jpg`) is accepted on the way in.
//!
//! The enum is closed on purpose. Adding a format means the compiler walks
//! you through every match in this file, the codec, and the CLI — there is no
//! dynamic fallback that quietly relabels unknown formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An export target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
    Webp,
}

impl OutputFormat {
    /// All formats, in display order.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Jpeg,
        OutputFormat::Png,
        OutputFormat::Bmp,
        OutputFormat::Gif,
        OutputFormat::Webp,
    ];

    /// Canonical file extension (no leading dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Gif => "gif",
            OutputFormat::Webp => "webp",
        }
    }

    /// Canonical MIME type.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Bmp => "image/bmp",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Resolve a file extension (case-insensitive, no leading dot).
    ///
    /// `jpg` and `jpeg` both alias to [`OutputFormat::Jpeg`].
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "bmp" => Some(OutputFormat::Bmp),
            "gif" => Some(OutputFormat::Gif),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    /// Resolve a MIME type (case-insensitive).
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(OutputFormat::Jpeg),
            "image/png" => Some(OutputFormat::Png),
            "image/bmp" => Some(OutputFormat::Bmp),
            "image/gif" => Some(OutputFormat::Gif),
            "image/webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    /// The `image` crate format this variant encodes through.
    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::Gif => image::ImageFormat::Gif,
            OutputFormat::Webp => image::ImageFormat::WebP,
        }
    }

    /// Map a decoder-reported format back to the enum, if it is one of ours.
    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(OutputFormat::Jpeg),
            image::ImageFormat::Png => Some(OutputFormat::Png),
            image::ImageFormat::Bmp => Some(OutputFormat::Bmp),
            image::ImageFormat::Gif => Some(OutputFormat::Gif),
            image::ImageFormat::WebP => Some(OutputFormat::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Gif => "gif",
            OutputFormat::Webp => "webp",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_extension(value.trim()).ok_or_else(|| {
            format!("unknown format '{value}'. Expected jpeg, png, bmp, gif, or webp")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping_is_bidirectional() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn mime_mapping_is_bidirectional() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_mime(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn jpeg_extension_aliases() {
        assert_eq!(OutputFormat::from_extension("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("JPG"), Some(OutputFormat::Jpeg));
        // Canonical direction is singular
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert_eq!(OutputFormat::from_extension("tiff"), None);
        assert_eq!(OutputFormat::from_extension(""), None);
    }

    #[test]
    fn from_str_accepts_aliases_and_trims() {
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!(" webp ".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
        assert!("avif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn serde_round_trips_lowercase_tags() {
        let json = serde_json::to_string(&OutputFormat::Webp).unwrap();
        assert_eq!(json, "\"webp\"");
        let back: OutputFormat = serde_json::from_str("\"jpeg\"").unwrap();
        assert_eq!(back, OutputFormat::Jpeg);
    }

    #[test]
    fn display_matches_serde_tag() {
        for format in OutputFormat::ALL {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{format}\""));
        }
    }
}
