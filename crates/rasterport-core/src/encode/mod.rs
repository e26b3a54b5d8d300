//! Image encoding pipeline for Rasterport.
//!
//! This module provides functionality for:
//! - Writing uncompressed 32-bit top-down BMP files byte for byte
//! - Wrapping a 256x256 PNG in a single-entry ICO container
//! - Delegating PNG, JPEG, WEBP and HEIC to a [`PlatformEncoder`]
//!
//! # Examples
//!
//! ```ignore
//! use rasterport_core::{encode, Raster};
//!
//! let raster = Raster::filled(16, 16, [255, 0, 0, 255]).unwrap();
//! let bmp = encode::encode_bmp(&raster);
//! assert_eq!(&bmp.bytes()[0..2], b"BM");
//! ```

mod bmp;
mod ico;
mod platform;

pub use bmp::{encode_bmp, BMP_HEADER_LEN};
pub use ico::{encode_ico, icon_placement, IconPlacement, ICON_HEADER_LEN, ICON_SIZE};
pub use platform::{jpeg_quality_percent, ImageCrateEncoder, PlatformEncoder};

use thiserror::Error;

use crate::ImageFormat;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The encoder has no way to produce this format.
    #[error("Encoding to {0} is not supported")]
    UnsupportedTarget(ImageFormat),

    /// The underlying codec failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Converting from or to HEIC failed at any step.
    #[error("HEIC conversion failed")]
    HeicConversionFailed,
}
