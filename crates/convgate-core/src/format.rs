//! Output formats and the allow-list the batch converter is configured with.

use std::fmt;
use std::str::FromStr;

use image::ImageFormat;

use crate::error::ConvertError;

/// A raster format the batch converter can encode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Jpeg,
    Png,
    Webp,
    Tiff,
    Bmp,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 5] = [
        TargetFormat::Jpeg,
        TargetFormat::Png,
        TargetFormat::Webp,
        TargetFormat::Tiff,
        TargetFormat::Bmp,
    ];

    /// Canonical file extension, without the dot. JPEG is always `jpeg`.
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::Webp => "webp",
            TargetFormat::Tiff => "tiff",
            TargetFormat::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "image/jpeg",
            TargetFormat::Png => "image/png",
            TargetFormat::Webp => "image/webp",
            TargetFormat::Tiff => "image/tiff",
            TargetFormat::Bmp => "image/bmp",
        }
    }

    /// Whether a quality setting affects the encoded output.
    pub fn is_lossy(self) -> bool {
        matches!(self, TargetFormat::Jpeg)
    }

    pub(crate) fn image_format(self) -> ImageFormat {
        match self {
            TargetFormat::Jpeg => ImageFormat::Jpeg,
            TargetFormat::Png => ImageFormat::Png,
            TargetFormat::Webp => ImageFormat::WebP,
            TargetFormat::Tiff => ImageFormat::Tiff,
            TargetFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    /// Case-insensitive, surrounding whitespace ignored. `jpg` is accepted as `jpeg`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            "webp" => Ok(TargetFormat::Webp),
            "tiff" | "tif" => Ok(TargetFormat::Tiff),
            "bmp" => Ok(TargetFormat::Bmp),
            _ => Err(ConvertError::InvalidFormat(s.trim().to_owned())),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Immutable set of formats a converter accepts.
///
/// Built once at startup and handed to the converter; parsing a requested
/// format goes through [`FormatAllowList::resolve`] so that a deployment can
/// narrow the list without touching the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatAllowList {
    formats: Vec<TargetFormat>,
}

impl FormatAllowList {
    pub fn new(formats: impl IntoIterator<Item = TargetFormat>) -> Self {
        let mut list: Vec<TargetFormat> = Vec::new();
        for format in formats {
            if !list.contains(&format) {
                list.push(format);
            }
        }
        Self { formats: list }
    }

    pub fn contains(&self, format: TargetFormat) -> bool {
        self.formats.contains(&format)
    }

    pub fn formats(&self) -> &[TargetFormat] {
        &self.formats
    }

    /// Parse `requested` and check it against the list.
    pub fn resolve(&self, requested: &str) -> Result<TargetFormat, ConvertError> {
        let format: TargetFormat = requested.parse()?;
        if self.contains(format) {
            Ok(format)
        } else {
            Err(ConvertError::InvalidFormat(requested.trim().to_owned()))
        }
    }
}

impl Default for FormatAllowList {
    fn default() -> Self {
        Self::new(TargetFormat::ALL)
    }
}
