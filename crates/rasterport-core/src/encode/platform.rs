//! Platform encoders for formats with mature codec libraries.
//!
//! The default implementation uses the `image` crate's encoders. Hosts with
//! a native encoder (a browser canvas, an OS codec) implement
//! [`PlatformEncoder`] themselves.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;
use crate::{EncodedImage, ImageFormat, Raster};

/// Encodes a raster into PNG, JPEG, WEBP or HEIC.
///
/// `quality` is in `[0, 1]`. The returned mime is whatever the encoder
/// actually produced, which may differ from `format` if it substituted
/// another output type.
pub trait PlatformEncoder {
    fn encode(
        &self,
        raster: &Raster,
        format: ImageFormat,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError>;
}

/// Map a `[0, 1]` quality to the 1-100 scale JPEG encoders use.
pub fn jpeg_quality_percent(quality: f32) -> u8 {
    let percent = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
    percent.clamp(1, 100)
}

/// [`PlatformEncoder`] backed by the `image` crate.
///
/// - PNG: lossless RGBA8
/// - JPEG: alpha is dropped
/// - WEBP: lossless, quality is ignored
/// - HEIC: unsupported
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateEncoder;

impl ImageCrateEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformEncoder for ImageCrateEncoder {
    fn encode(
        &self,
        raster: &Raster,
        format: ImageFormat,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError> {
        let mut buffer = Cursor::new(Vec::new());
        let (width, height) = (raster.width(), raster.height());

        let result = match format {
            ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(
                raster.pixels(),
                width,
                height,
                ExtendedColorType::Rgba8,
            ),
            ImageFormat::Jpeg => {
                let rgb: Vec<u8> = raster
                    .pixels()
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                JpegEncoder::new_with_quality(&mut buffer, jpeg_quality_percent(quality))
                    .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
            }
            ImageFormat::Webp => WebPEncoder::new_lossless(&mut buffer).write_image(
                raster.pixels(),
                width,
                height,
                ExtendedColorType::Rgba8,
            ),
            ImageFormat::Heic | ImageFormat::Bmp | ImageFormat::Ico => {
                return Err(EncodeError::UnsupportedTarget(format));
            }
        };
        result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        Ok(EncodedImage::new(buffer.into_inner(), format.mime()))
    }
}
