//! Conversion settings.
//!
//! Quality policy lives here rather than inside the encoders: every request
//! carries an explicit quality taken from [`ConversionSettings::quality_for`].

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::ImageFormat;

/// Per-session conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionSettings {
    /// Quality for JPEG targets (0.0 to 1.0)
    pub jpeg_quality: f32,
    /// Quality for every other platform-encoded target (0.0 to 1.0)
    pub default_quality: f32,
    /// Resampling filter used when shrinking a raster into an icon
    pub icon_filter: FilterType,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 0.92,
            default_quality: 1.0,
            icon_filter: FilterType::Bilinear,
        }
    }
}

impl ConversionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quality to request when encoding to `format`, clamped to `[0, 1]`.
    pub fn quality_for(&self, format: ImageFormat) -> f32 {
        let quality = match format {
            ImageFormat::Jpeg => self.jpeg_quality,
            _ => self.default_quality,
        };
        if quality.is_nan() {
            return 1.0;
        }
        quality.clamp(0.0, 1.0)
    }
}
