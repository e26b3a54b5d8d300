//! Two-strategy decoder chain.

use std::fmt;

use tracing::debug;

use super::strategy::{decode_sniffed, decode_with_hint};
use super::{DecodeError, DecodeHint, Decoder};
use crate::Raster;

/// A single decode attempt.
pub type DecodeStrategy = fn(&[u8], &DecodeHint) -> Result<Raster, DecodeError>;

/// Runs `primary`, and `fallback` only if `primary` fails.
#[derive(Clone, Copy)]
pub struct FallbackDecoder {
    primary: DecodeStrategy,
    fallback: DecodeStrategy,
}

impl fmt::Debug for FallbackDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackDecoder").finish_non_exhaustive()
    }
}

impl FallbackDecoder {
    pub fn new(primary: DecodeStrategy, fallback: DecodeStrategy) -> Self {
        Self { primary, fallback }
    }
}

impl Decoder for FallbackDecoder {
    fn decode(&self, bytes: &[u8], hint: &DecodeHint) -> Result<Raster, DecodeError> {
        let primary = match (self.primary)(bytes, hint) {
            Ok(raster) => return Ok(raster),
            Err(e) => e,
        };
        debug!(error = %primary, "primary decode failed, trying fallback");
        (self.fallback)(bytes, hint).map_err(|fallback| DecodeError::AllStrategiesFailed {
            primary: primary.to_string(),
            fallback: fallback.to_string(),
        })
    }
}

/// The default decoder: hinted container first, content sniffing second.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateDecoder(FallbackDecoder);

impl ImageCrateDecoder {
    pub fn new() -> Self {
        Self(FallbackDecoder::new(decode_with_hint, decode_sniffed))
    }
}

impl Default for ImageCrateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8], hint: &DecodeHint) -> Result<Raster, DecodeError> {
        self.0.decode(bytes, hint)
    }
}
