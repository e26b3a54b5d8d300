//! Rasterport WASM - WebAssembly bindings for Rasterport
//!
//! This crate provides WASM bindings to expose the rasterport-core converter
//! to the browser page.
//!
//! # Module Structure
//!
//! - `convert` - The `Converter` session plus format detection helpers
//! - `types` - WASM-compatible wrapper types for conversion results
//!
//! # Usage
//!
//! ```typescript
//! import init, { Converter, format_file_size } from '@rasterport/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const converter = new Converter();
//! const result = converter.convert(bytes, file.type, file.name, 'bmp');
//! console.log(`${result.filename}: ${format_file_size(result.byte_length)}`);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod types;

// Re-export public types
pub use convert::{detect_source_format, target_options, Converter};
pub use types::JsConversionResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Format a byte count for display, e.g. `"1.5 KB"`.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    rasterport_core::format_file_size(bytes.max(0.0) as u64)
}

/// Every format token the converter accepts, in picker order.
#[wasm_bindgen]
pub fn supported_formats() -> js_sys::Array {
    rasterport_core::format::SUPPORTED_TOKENS
        .iter()
        .map(|token| JsValue::from_str(token))
        .collect()
}
