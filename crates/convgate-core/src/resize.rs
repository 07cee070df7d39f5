//! Exact-size resize of a single uploaded image.

use image::imageops::FilterType;

use crate::error::{ConvertError, Result};
use crate::format::TargetFormat;
use crate::raster::{self, Quality};

/// Default cap on either side of a resize target.
pub const DEFAULT_MAX_DIMENSION: u32 = 10_000;

/// A resized image ready to be sent back.
#[derive(Debug, Clone)]
pub struct ResizedImage {
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    /// Extension of the uploaded file, kept as the caller wrote it (`jpg` stays `jpg`).
    pub extension: String,
}

impl ResizedImage {
    pub fn download_name(&self) -> String {
        format!("resized.{}", self.extension)
    }
}

/// Map an uploaded filename onto the format family used for the output.
pub fn source_format(filename: &str) -> Result<(String, TargetFormat)> {
    let extension = filename.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    let format = match extension.as_str() {
        "jpeg" | "jpg" => TargetFormat::Jpeg,
        "png" => TargetFormat::Png,
        "webp" => TargetFormat::Webp,
        _ => return Err(ConvertError::UnsupportedFormat(extension)),
    };
    Ok((extension, format))
}

/// Resize to exactly `width` x `height`, ignoring the source aspect ratio.
pub fn resize_image(
    filename: &str,
    data: &[u8],
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Result<ResizedImage> {
    let (extension, format) = source_format(filename)?;
    let in_range = |side: u32| (1..=max_dimension).contains(&side);
    if !in_range(width) || !in_range(height) {
        return Err(ConvertError::InvalidDimensions { width, height, max: max_dimension });
    }

    let img = raster::decode(data)?;
    let resized = img.resize_exact(width, height, FilterType::CatmullRom);
    let data = raster::encode(&resized, format, Quality::DEFAULT)?;

    Ok(ResizedImage { data, mime_type: format.mime_type(), extension })
}
