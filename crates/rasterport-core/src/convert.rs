//! Conversion orchestration.
//!
//! [`ConversionOrchestrator::convert`] validates a request, dispatches to the
//! BMP, ICO or platform encoder, forces the advertised mime to match the
//! target, and only then allocates an output filename. A failed conversion
//! never touches the name counters.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ConversionSettings;
use crate::decode::{DecodeError, DecodeHint, Decoder, ImageCrateDecoder};
use crate::encode::{encode_bmp, encode_ico, EncodeError, ImageCrateEncoder, PlatformEncoder};
use crate::format::{detect_format, FormatToken, ImageFormat, UnsupportedFormatError};
use crate::naming::NameAllocator;
use crate::{EncodedImage, Raster};

/// Errors returned by a conversion attempt. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    /// Source and target resolve to the same canonical format.
    #[error("Source and target are both {format}")]
    NoOpConversion { format: ImageFormat },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// A raster to convert, with the quality its target should be encoded at.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub raster: Raster,
    pub source: ImageFormat,
    pub target: FormatToken,
    /// Encoder quality in `[0, 1]`.
    pub quality: f32,
}

impl ConversionRequest {
    /// Build a request whose quality follows `settings`.
    pub fn new(
        raster: Raster,
        source: ImageFormat,
        target: FormatToken,
        settings: &ConversionSettings,
    ) -> Self {
        let quality = settings.quality_for(target.format());
        Self::with_quality(raster, source, target, quality)
    }

    pub fn with_quality(
        raster: Raster,
        source: ImageFormat,
        target: FormatToken,
        quality: f32,
    ) -> Self {
        Self {
            raster,
            source,
            target,
            quality,
        }
    }
}

/// The encoded result and the filename allocated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub image: EncodedImage,
    pub filename: String,
}

/// Top-level entry point tying decoder, encoders and naming together.
#[derive(Debug, Clone)]
pub struct ConversionOrchestrator<E = ImageCrateEncoder, D = ImageCrateDecoder> {
    encoder: E,
    decoder: D,
    settings: ConversionSettings,
}

impl ConversionOrchestrator {
    /// Orchestrator using the `image` crate for decoding and platform encoding.
    pub fn new(settings: ConversionSettings) -> Self {
        Self::with_parts(ImageCrateEncoder::new(), ImageCrateDecoder::new(), settings)
    }
}

impl Default for ConversionOrchestrator {
    fn default() -> Self {
        Self::new(ConversionSettings::default())
    }
}

impl<E: PlatformEncoder, D: Decoder> ConversionOrchestrator<E, D> {
    pub fn with_parts(encoder: E, decoder: D, settings: ConversionSettings) -> Self {
        Self {
            encoder,
            decoder,
            settings,
        }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Build a request with this orchestrator's quality policy.
    pub fn request(
        &self,
        raster: Raster,
        source: ImageFormat,
        target: FormatToken,
    ) -> ConversionRequest {
        ConversionRequest::new(raster, source, target, &self.settings)
    }

    /// Convert an already-decoded raster.
    ///
    /// # Errors
    ///
    /// - `NoOpConversion` if source and target normalize to the same format
    /// - `Encode` if the chosen encoder fails; a HEIC source or target
    ///   reports this as `EncodeError::HeicConversionFailed`
    pub fn convert(
        &self,
        request: ConversionRequest,
        names: &NameAllocator,
    ) -> Result<ConversionOutcome, ConversionError> {
        let source = request.source;
        let target = request.target.format();
        if source == target {
            return Err(ConversionError::NoOpConversion { format: target });
        }

        debug!(%source, %target, quality = request.quality, "dispatching conversion");
        let encoded = self
            .encode(&request.raster, target, request.quality)
            .map_err(|e| {
                warn!(%source, %target, error = %e, "conversion failed");
                if source == ImageFormat::Heic || target == ImageFormat::Heic {
                    EncodeError::HeicConversionFailed
                } else {
                    e
                }
            })?;

        let expected = target.mime();
        if encoded.mime() != expected {
            debug!(reported = encoded.mime(), expected, "coercing mime");
        }
        let image = encoded.with_mime(expected);

        let filename = names.allocate(&request.target);
        debug!(%filename, bytes = image.len(), "conversion succeeded");
        Ok(ConversionOutcome { image, filename })
    }

    /// Detect, decode and convert an input file.
    ///
    /// The source format comes from the hint (see [`detect_format`]). The
    /// same-format check runs before decoding. For a HEIC source, a decode
    /// failure is reported as `EncodeError::HeicConversionFailed`.
    pub fn convert_file(
        &self,
        bytes: &[u8],
        hint: &DecodeHint,
        target: FormatToken,
        names: &NameAllocator,
    ) -> Result<ConversionOutcome, ConversionError> {
        let source = detect_format(hint.mime.as_deref(), hint.filename_or_empty())?.format();
        if source == target.format() {
            return Err(ConversionError::NoOpConversion { format: source });
        }

        let raster = match self.decoder.decode(bytes, hint) {
            Ok(raster) => raster,
            Err(e) => {
                warn!(%source, error = %e, "decode failed");
                if source == ImageFormat::Heic {
                    return Err(EncodeError::HeicConversionFailed.into());
                }
                return Err(e.into());
            }
        };

        self.convert(self.request(raster, source, target), names)
    }

    fn encode(
        &self,
        raster: &Raster,
        target: ImageFormat,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError> {
        match target {
            ImageFormat::Bmp => Ok(encode_bmp(raster)),
            ImageFormat::Ico => encode_ico(raster, &self.encoder, self.settings.icon_filter),
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Webp | ImageFormat::Heic => {
                self.encoder.encode(raster, target, quality)
            }
        }
    }
}
