//! Image decoding for Rasterport.
//!
//! This module provides functionality for:
//! - Turning uploaded file bytes into an RGBA [`Raster`](crate::Raster)
//! - A two-strategy fallback chain: hinted container first, content sniffing second
//! - EXIF orientation correction, as a browser bitmap decode would apply
//!
//! # Architecture
//!
//! The orchestrator only sees the [`Decoder`] trait. Each strategy is a plain
//! function `(&[u8], &DecodeHint) -> Result<Raster, DecodeError>` so that a
//! host can build its own chain with [`FallbackDecoder`].
//!
//! # Examples
//!
//! ```ignore
//! use rasterport_core::decode::{DecodeHint, Decoder, ImageCrateDecoder};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let hint = DecodeHint::new(Some("image/png"), Some("photo.png"));
//! let raster = ImageCrateDecoder::new().decode(&bytes, &hint).unwrap();
//! println!("Decoded {}x{} image", raster.width(), raster.height());
//! ```

mod fallback;
mod orientation;
mod strategy;
mod types;

pub use fallback::{DecodeStrategy, FallbackDecoder, ImageCrateDecoder};
pub use orientation::get_orientation;
pub use strategy::{decode_sniffed, decode_with_hint};
pub use types::{DecodeError, DecodeHint, FilterType, Orientation};

use crate::Raster;

/// Turns an input file into a raster.
pub trait Decoder {
    fn decode(&self, bytes: &[u8], hint: &DecodeHint) -> Result<Raster, DecodeError>;
}
