//! EXIF orientation lookup and correction.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::Orientation;

/// Extract EXIF orientation from container bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
pub(crate) fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one() -> DynamicImage {
        // Red (left), green (right)
        let pixels = vec![255, 0, 0, 255, 0, 255, 0, 255];
        DynamicImage::ImageRgba8(image::RgbaImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
        assert_eq!(get_orientation(&[]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_normal() {
        let result = apply_orientation(two_by_one(), Orientation::Normal).into_rgba8();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let result = apply_orientation(two_by_one(), Orientation::Rotate90CW).into_rgba8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let result = apply_orientation(two_by_one(), Orientation::FlipHorizontal).into_rgba8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
