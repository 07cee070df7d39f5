//! Decoding and re-encoding of single raster images.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::{ConvertError, Result};
use crate::format::TargetFormat;

/// Lossy-encoding quality, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const DEFAULT: Quality = Quality(80);

    /// Clamp an arbitrary caller value into range.
    pub fn new(value: i64) -> Self {
        Quality(value.clamp(1, 100) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decode bytes by sniffing their content.
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(data).map_err(|e| ConvertError::Decode(e.to_string()))
}

/// Encode `img` as `format`. `quality` only matters for lossy formats.
pub fn encode(img: &DynamicImage, format: TargetFormat, quality: Quality) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let written = match format {
        TargetFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.get()))
        }
        other => normalize(img).write_to(&mut buf, other.image_format()),
    };
    written.map_err(|e| ConvertError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Decode `data` and re-encode it as `format`.
pub fn convert_image(data: &[u8], format: TargetFormat, quality: Quality) -> Result<Vec<u8>> {
    let img = decode(data)?;
    encode(&img, format, quality)
}

// 8-bit RGB(A) is the one layout every enabled encoder accepts.
fn normalize(img: &DynamicImage) -> DynamicImage {
    if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([255, 0, 0]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .expect("encode png fixture");
        buf.into_inner()
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(Quality::new(0).get(), 1);
        assert_eq!(Quality::new(-20).get(), 1);
        assert_eq!(Quality::new(250).get(), 100);
        assert_eq!(Quality::new(55).get(), 55);
        assert_eq!(Quality::default().get(), 80);
    }

    #[test]
    fn png_to_jpeg_and_back_round_trips() {
        let jpeg = convert_image(&png_bytes(10, 10), TargetFormat::Jpeg, Quality::new(90))
            .expect("png -> jpeg");
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);

        let png = convert_image(&jpeg, TargetFormat::Png, Quality::DEFAULT).expect("jpeg -> png");
        let back = decode(&png).expect("decode png");
        assert_eq!((back.width(), back.height()), (10, 10));
    }

    #[test]
    fn alpha_source_encodes_to_every_format() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([0, 0, 255, 128])));
        for format in TargetFormat::ALL {
            let out = encode(&img, format, Quality::DEFAULT)
                .unwrap_or_else(|e| panic!("{format} failed: {e}"));
            let decoded = decode(&out).expect("re-decode");
            assert_eq!((decoded.width(), decoded.height()), (4, 3), "{format}");
        }
    }

    #[test]
    fn garbage_fails_to_decode() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }
}
