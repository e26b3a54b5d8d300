//! Decode strategies built on the `image` crate.
//!
//! Both strategies correct EXIF orientation and normalize to RGBA8.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use super::orientation::{apply_orientation, get_orientation};
use super::{DecodeError, DecodeHint};
use crate::Raster;

/// Decode using the container named by the hint.
///
/// The mime type is consulted first, then the filename extension.
///
/// # Errors
///
/// Returns `DecodeError::UnrecognizedFormat` if neither hint names a
/// container the `image` crate knows, and `DecodeError::CorruptedFile` if
/// the bytes do not decode as that container.
pub fn decode_with_hint(bytes: &[u8], hint: &DecodeHint) -> Result<Raster, DecodeError> {
    let format = hinted_format(hint).ok_or(DecodeError::UnrecognizedFormat)?;
    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    finish(bytes, img)
}

/// Decode by sniffing the container from the leading bytes.
///
/// The hint is ignored.
pub fn decode_sniffed(bytes: &[u8], _hint: &DecodeHint) -> Result<Raster, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::UnrecognizedFormat);
    }
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    finish(bytes, img)
}

fn hinted_format(hint: &DecodeHint) -> Option<image::ImageFormat> {
    hint.mime
        .as_deref()
        .and_then(image::ImageFormat::from_mime_type)
        .or_else(|| {
            hint.filename
                .as_deref()
                .and_then(|name| name.rsplit_once('.'))
                .and_then(|(_, ext)| image::ImageFormat::from_extension(ext))
        })
}

fn finish(bytes: &[u8], img: DynamicImage) -> Result<Raster, DecodeError> {
    let oriented = apply_orientation(img, get_orientation(bytes));
    Ok(Raster::from_rgba_image(oriented.into_rgba8())?)
}
