//! BMP encoding: uncompressed 32-bit top-down bitmaps.
//!
//! Layout (all fields little-endian):
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 14   | BITMAPFILEHEADER                        |
//! | 14     | 40   | BITMAPINFOHEADER, negative height       |
//! | 54     | w*h*4| BGRA pixels, first row is the top row   |
//!
//! 32-bit rows are always a multiple of four bytes, so there is no row padding.

use crate::{EncodedImage, ImageFormat, Raster};

/// Combined size of the file header and info header.
pub const BMP_HEADER_LEN: usize = 54;

/// Pixels per metre written to both resolution fields (about 72 DPI).
const PIXELS_PER_METRE: i32 = 2835;

/// Encode a raster as a 32bpp BI_RGB bitmap.
///
/// Never fails: every valid raster has a representable bitmap.
pub fn encode_bmp(raster: &Raster) -> EncodedImage {
    let data_size = raster.pixel_count() * 4;
    let file_size = BMP_HEADER_LEN + data_size;

    let mut out = Vec::with_capacity(file_size);
    write_header(&mut out, raster, file_size, data_size);

    for px in raster.pixels().chunks_exact(4) {
        out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }

    EncodedImage::new(out, ImageFormat::Bmp.mime())
}

fn write_header(out: &mut Vec<u8>, raster: &Raster, file_size: usize, data_size: usize) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&(BMP_HEADER_LEN as u32).to_le_bytes());

    // Info header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(raster.width() as i32).to_le_bytes());
    out.extend_from_slice(&(-(raster.height() as i32)).to_le_bytes()); // negative = top-down
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(data_size as u32).to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors in palette
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}


// ============================================================================
// Property-Based Tests
// ============================================================================
