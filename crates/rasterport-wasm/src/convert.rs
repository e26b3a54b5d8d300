//! Conversion session bindings.
//!
//! A [`Converter`] is one browser session: it owns the orchestrator and the
//! name counters, so filenames keep incrementing across conversions until
//! the page is reloaded.
//!
//! # Example
//!
//! ```typescript
//! import { Converter } from '@rasterport/wasm';
//!
//! const converter = new Converter({ jpegQuality: 0.92 });
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = converter.convert(bytes, file.type, file.name, 'ico');
//! const blob = new Blob([result.bytes], { type: result.mime });
//! // result.filename === 'converted_1.ico'
//! ```

use crate::types::{raster_from_image_data, JsConversionResult};
use rasterport_core::{
    detect_format, ConversionOrchestrator, ConversionSettings, DecodeHint, FormatToken,
    ImageFormat, NameAllocator,
};
use wasm_bindgen::prelude::*;

/// A conversion session.
#[wasm_bindgen]
pub struct Converter {
    orchestrator: ConversionOrchestrator,
    names: NameAllocator,
}

#[wasm_bindgen]
impl Converter {
    /// Create a session.
    ///
    /// `settings` is an optional object such as
    /// `{ jpegQuality: 0.92, defaultQuality: 1, iconFilter: "bilinear" }`;
    /// missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<Converter, JsValue> {
        let settings = if settings.is_undefined() || settings.is_null() {
            ConversionSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings).map_err(to_js_error)?
        };
        Ok(Self::with_settings(settings))
    }

    /// Convert an uploaded file to `target`.
    ///
    /// The source format is detected from `mime` and `filename`, the file is
    /// decoded, and the result is encoded to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source or target format is unsupported, the
    /// formats are the same, the file cannot be decoded, or encoding fails.
    pub fn convert(
        &self,
        bytes: &[u8],
        mime: Option<String>,
        filename: Option<String>,
        target: &str,
    ) -> Result<JsConversionResult, JsValue> {
        let target = FormatToken::parse(target).map_err(to_js_error)?;
        let hint = DecodeHint::new(mime.as_deref(), filename.as_deref());
        self.orchestrator
            .convert_file(bytes, &hint, target, &self.names)
            .map(JsConversionResult::from_outcome)
            .map_err(to_js_error)
    }

    /// Convert RGBA pixels (e.g. canvas `ImageData.data`) from `source` to `target`.
    pub fn convert_pixels(
        &self,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        source: &str,
        target: &str,
    ) -> Result<JsConversionResult, JsValue> {
        let source = FormatToken::parse(source).map_err(to_js_error)?;
        let target = FormatToken::parse(target).map_err(to_js_error)?;
        let raster = raster_from_image_data(width, height, pixels).map_err(to_js_error)?;
        let request = self.orchestrator.request(raster, source.format(), target);
        self.orchestrator
            .convert(request, &self.names)
            .map(JsConversionResult::from_outcome)
            .map_err(to_js_error)
    }

    /// Number of files converted to `format` in this session.
    pub fn conversion_count(&self, format: &str) -> Result<u32, JsValue> {
        let format = FormatToken::parse(format).map_err(to_js_error)?;
        Ok(self.names.count(format.format()))
    }
}

impl Converter {
    pub(crate) fn with_settings(settings: ConversionSettings) -> Self {
        Self {
            orchestrator: ConversionOrchestrator::new(settings),
            names: NameAllocator::new(),
        }
    }
}

/// Detect the source format token of an uploaded file.
///
/// Returns the canonical extension, e.g. `"jpg"` for `photo.jpeg`.
#[wasm_bindgen]
pub fn detect_source_format(mime: Option<String>, filename: &str) -> Result<String, JsValue> {
    detect_format(mime.as_deref(), filename)
        .map(|token| token.format().extension().to_string())
        .map_err(to_js_error)
}

/// Formats a file of `source` format can be converted to, in picker order.
#[wasm_bindgen]
pub fn target_options(source: &str) -> Result<js_sys::Array, JsValue> {
    let source = FormatToken::parse(source).map_err(to_js_error)?;
    Ok(ImageFormat::targets_for(source.format())
        .map(|format| JsValue::from_str(format.extension()))
        .collect())
}

/// Log an error to the browser console and wrap it for JavaScript.
fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Tests for conversion bindings.
///
/// Anything producing a `JsValue` only works on wasm32 targets, so the
/// native tests drive the session state directly.
#[cfg(test)]
mod tests {
    use super::*;
    use rasterport_core::Raster;

    #[test]
    fn test_session_counters_persist() {
        let converter = Converter::with_settings(ConversionSettings::default());
        let raster = Raster::filled(2, 2, [1, 2, 3, 255]).unwrap();
        let target = FormatToken::parse("bmp").unwrap();

        for expected in ["converted_1.bmp", "converted_2.bmp"] {
            let request = converter
                .orchestrator
                .request(raster.clone(), ImageFormat::Png, target);
            let outcome = converter
                .orchestrator
                .convert(request, &converter.names)
                .unwrap();
            assert_eq!(outcome.filename, expected);
        }
        assert_eq!(converter.names.count(ImageFormat::Bmp), 2);
    }

    #[test]
    fn test_settings_are_applied() {
        let mut settings = ConversionSettings::default();
        settings.jpeg_quality = 0.5;
        let converter = Converter::with_settings(settings);
        assert_eq!(converter.orchestrator.settings().jpeg_quality, 0.5);
    }
}
