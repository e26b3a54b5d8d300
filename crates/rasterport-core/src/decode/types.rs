//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RasterError;

/// Error types for image decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Neither the hint nor the content identified a container format.
    #[error("Invalid or unsupported image format")]
    UnrecognizedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded pixels did not form a valid raster.
    #[error("Decoded image is not a valid raster: {0}")]
    InvalidRaster(#[from] RasterError),

    /// Both decode strategies failed.
    #[error("Could not decode image (primary: {primary}; fallback: {fallback})")]
    AllStrategiesFailed { primary: String, fallback: String },
}

/// Hints the host has about an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeHint {
    /// Mime type reported by the host, e.g. `image/png`.
    pub mime: Option<String>,
    /// Original filename, e.g. `photo.jpeg`.
    pub filename: Option<String>,
}

impl DecodeHint {
    pub fn new(mime: Option<&str>, filename: Option<&str>) -> Self {
        Self {
            mime: mime.filter(|m| !m.is_empty()).map(str::to_string),
            filename: filename.filter(|f| !f.is_empty()).map(str::to_string),
        }
    }

    /// Filename to use for format detection; empty if none was given.
    pub fn filename_or_empty(&self) -> &str {
        self.filename.as_deref().unwrap_or("")
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_decode_hint_drops_empty_values() {
        let hint = DecodeHint::new(Some(""), Some("photo.png"));
        assert_eq!(hint.mime, None);
        assert_eq!(hint.filename_or_empty(), "photo.png");
        assert_eq!(DecodeHint::default().filename_or_empty(), "");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnrecognizedFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");

        let err = DecodeError::AllStrategiesFailed {
            primary: "a".to_string(),
            fallback: "b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not decode image (primary: a; fallback: b)"
        );
    }
}
