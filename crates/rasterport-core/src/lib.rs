//! Rasterport Core - raster-to-container encoding engine
//!
//! This crate turns a decoded RGBA raster into the bytes of a chosen image
//! container. BMP and ICO are written byte-exactly here; PNG, JPEG, WEBP and
//! HEIC are delegated to a [`PlatformEncoder`]. The [`ConversionOrchestrator`]
//! ties the pieces together and hands out output filenames.

pub mod config;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod format;
pub mod naming;

pub use config::ConversionSettings;
pub use convert::{ConversionError, ConversionOrchestrator, ConversionOutcome, ConversionRequest};
pub use decode::{DecodeError, DecodeHint, Decoder, FilterType, ImageCrateDecoder};
pub use encode::{EncodeError, ImageCrateEncoder, PlatformEncoder};
pub use format::{detect_format, FormatToken, ImageFormat, UnsupportedFormatError};
pub use naming::NameAllocator;

use thiserror::Error;

/// Errors raised when pixel data does not describe a valid raster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    PixelLengthMismatch { expected: usize, actual: usize },
}

/// A decoded image with straight-alpha RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster, checking that `pixels` holds exactly
    /// `width * height` RGBA pixels in row-major, top-to-bottom order.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(RasterError::PixelLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster of `width * height` copies of one pixel.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, RasterError> {
        let count = (width as usize) * (height as usize);
        let pixels = rgba.iter().copied().cycle().take(count * 4).collect();
        Self::new(width, height, pixels)
    }

    /// Create a raster from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, RasterError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert to an image::RgbaImage for resampling or codec hand-off.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        // Dimensions and length were validated on construction.
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes, 4 per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Encoded container bytes together with the mime type they are advertised as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    mime: String,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Relabel the image with `mime`, leaving the bytes untouched.
    pub fn with_mime(self, mime: &str) -> Self {
        if self.mime == mime {
            return self;
        }
        Self {
            bytes: self.bytes,
            mime: mime.to_string(),
        }
    }

    /// Split into bytes and mime.
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.mime)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Format a byte count for display, e.g. `"512 B"` or `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
