//! ICO encoding: one 256x256 PNG in a single-entry icon container.
//!
//! The raster is shrunk (never enlarged) to fit the canvas, centred on a
//! fully transparent background, PNG-encoded through the platform encoder,
//! and prefixed with a 6-byte ICONDIR and a 16-byte ICONDIRENTRY.

use image::imageops;
use tracing::debug;

use super::{EncodeError, PlatformEncoder};
use crate::decode::FilterType;
use crate::{EncodedImage, ImageFormat, Raster};

/// Icon canvas edge length in pixels.
pub const ICON_SIZE: u32 = 256;

/// ICONDIR plus one ICONDIRENTRY; the embedded PNG starts here.
pub const ICON_HEADER_LEN: usize = 22;

/// Where a raster lands on the icon canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPlacement {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Compute the scaled size and centred offset for a `width x height` source.
pub fn icon_placement(width: u32, height: u32) -> IconPlacement {
    let edge = f64::from(ICON_SIZE);
    let scale = (edge / f64::from(width))
        .min(edge / f64::from(height))
        .min(1.0);
    let scaled_width = ((f64::from(width) * scale).round() as u32).min(ICON_SIZE);
    let scaled_height = ((f64::from(height) * scale).round() as u32).min(ICON_SIZE);
    IconPlacement {
        width: scaled_width,
        height: scaled_height,
        offset_x: (ICON_SIZE - scaled_width) / 2,
        offset_y: (ICON_SIZE - scaled_height) / 2,
    }
}

/// Encode a raster as a 256x256 icon.
///
/// # Errors
///
/// Only fails if the embedded PNG encode fails.
pub fn encode_ico(
    raster: &Raster,
    encoder: &dyn PlatformEncoder,
    filter: FilterType,
) -> Result<EncodedImage, EncodeError> {
    let canvas = render_canvas(raster, filter)?;
    let png = encoder.encode(&canvas, ImageFormat::Png, 1.0)?;
    let png = png.bytes();

    let mut out = Vec::with_capacity(ICON_HEADER_LEN + png.len());

    // ICONDIR
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // type: icon
    out.extend_from_slice(&1u16.to_le_bytes()); // image count

    // ICONDIRENTRY
    out.push(0); // width, 0 means 256
    out.push(0); // height, 0 means 256
    out.push(0); // palette colors
    out.push(0); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bit count
    out.extend_from_slice(&(png.len() as u32).to_le_bytes());
    out.extend_from_slice(&(ICON_HEADER_LEN as u32).to_le_bytes());

    out.extend_from_slice(png);

    Ok(EncodedImage::new(out, ImageFormat::Ico.mime()))
}

fn render_canvas(raster: &Raster, filter: FilterType) -> Result<Raster, EncodeError> {
    let placement = icon_placement(raster.width(), raster.height());
    debug!(
        src_width = raster.width(),
        src_height = raster.height(),
        width = placement.width,
        height = placement.height,
        offset_x = placement.offset_x,
        offset_y = placement.offset_y,
        "icon placement"
    );

    let mut canvas = image::RgbaImage::new(ICON_SIZE, ICON_SIZE);

    // A dimension that rounds to zero draws nothing.
    if placement.width > 0 && placement.height > 0 {
        let source = raster.to_rgba_image();
        let scaled = if (placement.width, placement.height) == source.dimensions() {
            source
        } else {
            imageops::resize(
                &source,
                placement.width,
                placement.height,
                filter.to_image_filter(),
            )
        };
        imageops::replace(
            &mut canvas,
            &scaled,
            i64::from(placement.offset_x),
            i64::from(placement.offset_y),
        );
    }

    Raster::from_rgba_image(canvas).map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageCrateEncoder;

    /// Returns a fixed payload so container bytes can be checked exactly.
    struct FixedPng(Vec<u8>);

    impl PlatformEncoder for FixedPng {
        fn encode(&self, raster: &Raster, format: ImageFormat, _: f32) -> Result<EncodedImage, EncodeError> {
            assert_eq!(format, ImageFormat::Png);
            assert_eq!((raster.width(), raster.height()), (ICON_SIZE, ICON_SIZE));
            Ok(EncodedImage::new(self.0.clone(), "image/png"))
        }
    }

    struct FailingPng;

    impl PlatformEncoder for FailingPng {
        fn encode(&self, _: &Raster, _: ImageFormat, _: f32) -> Result<EncodedImage, EncodeError> {
            Err(EncodeError::EncodingFailed("declined".to_string()))
        }
    }

    #[test]
    fn test_container_layout() {
        let raster = Raster::filled(16, 16, [255, 0, 0, 255]).unwrap();
        let payload = vec![0xAA, 0xBB, 0xCC];
        let encoded = encode_ico(&raster, &FixedPng(payload.clone()), FilterType::Bilinear).unwrap();
        let bytes = encoded.bytes();

        assert_eq!(
            &bytes[0..22],
            &[
                0, 0, 1, 0, 1, 0, // ICONDIR
                0, 0, 0, 0, 1, 0, 32, 0, // size, palette, planes, bit count
                3, 0, 0, 0, // bytes in resource
                22, 0, 0, 0, // image offset
            ]
        );
        assert_eq!(&bytes[22..], &payload[..]);
        assert_eq!(encoded.mime(), "image/x-icon");
    }

    #[test]
    fn test_png_failure_propagates() {
        let raster = Raster::filled(4, 4, [0, 0, 0, 255]).unwrap();
        let result = encode_ico(&raster, &FailingPng, FilterType::Bilinear);
        assert_eq!(result, Err(EncodeError::EncodingFailed("declined".to_string())));
    }

    #[test]
    fn test_placement_small_image_is_centred() {
        assert_eq!(
            icon_placement(10, 4),
            IconPlacement {
                width: 10,
                height: 4,
                offset_x: 123,
                offset_y: 126
            }
        );
        assert_eq!(icon_placement(255, 1).offset_x, 0);
    }

    #[test]
    fn test_placement_large_image_is_shrunk() {
        assert_eq!(
            icon_placement(512, 256),
            IconPlacement {
                width: 256,
                height: 128,
                offset_x: 0,
                offset_y: 64
            }
        );
        assert_eq!(
            icon_placement(300, 1000),
            IconPlacement {
                width: 77,
                height: 256,
                offset_x: 89,
                offset_y: 0
            }
        );
    }

    #[test]
    fn test_placement_exact_fit() {
        let placement = icon_placement(256, 256);
        assert_eq!((placement.width, placement.height), (256, 256));
        assert_eq!((placement.offset_x, placement.offset_y), (0, 0));
    }

    #[test]
    fn test_placement_rounding_to_zero() {
        let placement = icon_placement(10_000, 1);
        assert_eq!((placement.width, placement.height), (256, 0));
        assert_eq!(placement.offset_y, 128);
    }

    #[test]
    fn test_canvas_content_centred_and_transparent() {
        let raster = Raster::filled(10, 4, [255, 0, 0, 255]).unwrap();
        let encoded = encode_ico(&raster, &ImageCrateEncoder::new(), FilterType::Bilinear).unwrap();
        let png = image::load_from_memory(&encoded.bytes()[ICON_HEADER_LEN..])
            .unwrap()
            .into_rgba8();

        assert_eq!(png.dimensions(), (256, 256));
        assert_eq!(png.get_pixel(123, 126).0, [255, 0, 0, 255]);
        assert_eq!(png.get_pixel(132, 129).0, [255, 0, 0, 255]);
        assert_eq!(png.get_pixel(122, 126).0[3], 0);
        assert_eq!(png.get_pixel(133, 126).0[3], 0);
        assert_eq!(png.get_pixel(123, 125).0[3], 0);
        assert_eq!(png.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_degenerate_strip_leaves_canvas_empty() {
        let raster = Raster::filled(10_000, 1, [0, 255, 0, 255]).unwrap();
        let encoded = encode_ico(&raster, &ImageCrateEncoder::new(), FilterType::Nearest).unwrap();
        let png = image::load_from_memory(&encoded.bytes()[ICON_HEADER_LEN..])
            .unwrap()
            .into_rgba8();
        assert!(png.pixels().all(|p| p.0[3] == 0));
    }
}
