//! WASM-compatible wrapper types for conversion results.

use rasterport_core::{ConversionOutcome, Raster};
use wasm_bindgen::prelude::*;

/// The result of a successful conversion.
///
/// `bytes` and `mime` are ready to wrap in a `Blob`; `filename` is the
/// download name allocated for this conversion.
#[wasm_bindgen]
pub struct JsConversionResult {
    bytes: Vec<u8>,
    mime: String,
    filename: String,
}

#[wasm_bindgen]
impl JsConversionResult {
    /// Encoded container bytes.
    ///
    /// Note: This creates a copy of the bytes in JavaScript memory.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.mime.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// Get the number of encoded bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl JsConversionResult {
    pub(crate) fn from_outcome(outcome: ConversionOutcome) -> Self {
        let (bytes, mime) = outcome.image.into_parts();
        Self {
            bytes,
            mime,
            filename: outcome.filename,
        }
    }
}

/// Build a raster from canvas `ImageData` bytes.
pub(crate) fn raster_from_image_data(
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<Raster, rasterport_core::RasterError> {
    Raster::new(width, height, pixels)
}
