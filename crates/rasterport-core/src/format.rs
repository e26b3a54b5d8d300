//! Canonical image formats, token aliasing and the mime table.
//!
//! Format tokens arrive as strings from the host (a picker value, a file
//! extension, a mime subtype). They are resolved once into a closed
//! [`ImageFormat`] so nothing downstream branches on raw strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every token accepted by [`normalize`], in catalog order.
pub const SUPPORTED_TOKENS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "bmp", "ico", "heic"];

/// A format token outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported image format: {token:?}")]
pub struct UnsupportedFormatError {
    /// The token as it was supplied.
    pub token: String,
}

/// Canonical image format identity.
///
/// `jpg` and `jpeg` both resolve to [`ImageFormat::Jpeg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Bmp,
    Ico,
    Heic,
}

impl ImageFormat {
    /// All formats in catalog order.
    pub const ALL: [ImageFormat; 6] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Webp,
        ImageFormat::Bmp,
        ImageFormat::Ico,
        ImageFormat::Heic,
    ];

    /// Mime type advertised for encoded output of this format.
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Ico => "image/x-icon",
            ImageFormat::Heic => "image/heic",
        }
    }

    /// Canonical short extension.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Ico => "ico",
            ImageFormat::Heic => "heic",
        }
    }

    /// Position in [`ImageFormat::ALL`], used as a dense table index.
    pub(crate) fn index(self) -> usize {
        match self {
            ImageFormat::Jpeg => 0,
            ImageFormat::Png => 1,
            ImageFormat::Webp => 2,
            ImageFormat::Bmp => 3,
            ImageFormat::Ico => 4,
            ImageFormat::Heic => 5,
        }
    }

    /// Formats a file of `source` format may be converted to.
    ///
    /// Same-format targets are excluded, since converting to them always
    /// fails with a no-op error.
    pub fn targets_for(source: ImageFormat) -> impl Iterator<Item = ImageFormat> {
        Self::ALL.into_iter().filter(move |f| *f != source)
    }

    /// First valid target for `source` in catalog order.
    pub fn default_target_for(source: ImageFormat) -> ImageFormat {
        // ALL has six entries, so at least five survive the filter.
        Self::targets_for(source).next().unwrap_or(ImageFormat::Png)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = UnsupportedFormatError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        normalize(token)
    }
}

/// Resolve a format token to its canonical format.
///
/// Tokens are trimmed and compared ASCII case-insensitively.
pub fn normalize(token: &str) -> Result<ImageFormat, UnsupportedFormatError> {
    let lowered = token.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        "webp" => Ok(ImageFormat::Webp),
        "bmp" => Ok(ImageFormat::Bmp),
        "ico" => Ok(ImageFormat::Ico),
        "heic" => Ok(ImageFormat::Heic),
        _ => Err(UnsupportedFormatError {
            token: token.to_string(),
        }),
    }
}

/// Whether `token` resolves to one of the supported formats.
pub fn is_supported(token: &str) -> bool {
    normalize(token).is_ok()
}

/// Mime type for a canonical format.
pub fn mime_of(format: ImageFormat) -> &'static str {
    format.mime()
}

/// Extension used in output filenames.
///
/// A raw token spelled `jpeg` keeps that spelling; everything else uses
/// the canonical short extension.
pub fn extension_of(raw_token: &str, format: ImageFormat) -> &'static str {
    if format == ImageFormat::Jpeg && raw_token.trim().eq_ignore_ascii_case("jpeg") {
        "jpeg"
    } else {
        format.extension()
    }
}

/// A resolved format together with the spelling it was requested with.
///
/// Equality compares the canonical format only, so `jpg` and `jpeg` tokens
/// are equal.
#[derive(Debug, Clone, Copy)]
pub struct FormatToken {
    format: ImageFormat,
    extension: &'static str,
}

impl FormatToken {
    /// Parse a raw token, remembering its spelling.
    pub fn parse(raw: &str) -> Result<Self, UnsupportedFormatError> {
        let format = normalize(raw)?;
        Ok(Self {
            format,
            extension: extension_of(raw, format),
        })
    }

    /// Canonical format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Extension to use in output filenames.
    pub fn extension(&self) -> &'static str {
        self.extension
    }
}

impl From<ImageFormat> for FormatToken {
    fn from(format: ImageFormat) -> Self {
        Self {
            format,
            extension: format.extension(),
        }
    }
}

impl PartialEq for FormatToken {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
    }
}

impl Eq for FormatToken {}

impl FromStr for FormatToken {
    type Err = UnsupportedFormatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// Work out the source format of an uploaded file.
///
/// The mime subtype wins when it is itself a supported token (`image/png`).
/// Otherwise the last `.`-separated part of the filename is used, which
/// covers hosts that report an empty or vendor-specific mime such as
/// `image/x-icon`.
pub fn detect_format(
    mime: Option<&str>,
    filename: &str,
) -> Result<FormatToken, UnsupportedFormatError> {
    if let Some(subtype) = mime.and_then(|m| m.split('/').nth(1)) {
        let subtype = subtype.trim();
        if SUPPORTED_TOKENS.contains(&subtype) {
            return FormatToken::parse(subtype);
        }
    }

    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => FormatToken::parse(ext),
        _ => Err(UnsupportedFormatError {
            token: filename.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize("jpg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(normalize("jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(normalize("JPEG").unwrap(), ImageFormat::Jpeg);
        assert_eq!(normalize(" png ").unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_normalize_every_supported_token() {
        for token in SUPPORTED_TOKENS {
            assert!(is_supported(token), "{token} should be supported");
        }
    }

    #[test]
    fn test_normalize_unknown_token() {
        let err = normalize("gif").unwrap_err();
        assert_eq!(err.token, "gif");
        assert!(!is_supported("tiff"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_mime_table() {
        assert_eq!(mime_of(ImageFormat::Jpeg), "image/jpeg");
        assert_eq!(mime_of(ImageFormat::Png), "image/png");
        assert_eq!(mime_of(ImageFormat::Webp), "image/webp");
        assert_eq!(mime_of(ImageFormat::Bmp), "image/bmp");
        assert_eq!(mime_of(ImageFormat::Ico), "image/x-icon");
        assert_eq!(mime_of(ImageFormat::Heic), "image/heic");
    }

    #[test]
    fn test_extension_preserves_jpeg_spelling() {
        assert_eq!(extension_of("jpeg", ImageFormat::Jpeg), "jpeg");
        assert_eq!(extension_of("jpg", ImageFormat::Jpeg), "jpg");
        assert_eq!(extension_of("png", ImageFormat::Png), "png");
    }

    #[test]
    fn test_format_token_equality_ignores_spelling() {
        let short = FormatToken::parse("jpg").unwrap();
        let long = FormatToken::parse("jpeg").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.extension(), "jpg");
        assert_eq!(long.extension(), "jpeg");
        assert_ne!(short, FormatToken::from(ImageFormat::Png));
    }

    #[test]
    fn test_index_matches_catalog_order() {
        for (i, format) in ImageFormat::ALL.iter().enumerate() {
            assert_eq!(format.index(), i);
        }
    }

    #[test]
    fn test_targets_exclude_source() {
        let targets: Vec<_> = ImageFormat::targets_for(ImageFormat::Jpeg).collect();
        assert_eq!(targets.len(), 5);
        assert!(!targets.contains(&ImageFormat::Jpeg));
        assert_eq!(ImageFormat::default_target_for(ImageFormat::Jpeg), ImageFormat::Png);
        assert_eq!(ImageFormat::default_target_for(ImageFormat::Png), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_format_prefers_mime() {
        let token = detect_format(Some("image/webp"), "photo.png").unwrap();
        assert_eq!(token.format(), ImageFormat::Webp);
    }

    #[test]
    fn test_detect_format_falls_back_to_extension() {
        // x-icon is not itself a supported token
        let token = detect_format(Some("image/x-icon"), "favicon.ICO").unwrap();
        assert_eq!(token.format(), ImageFormat::Ico);

        let token = detect_format(None, "holiday.JPEG").unwrap();
        assert_eq!(token.format(), ImageFormat::Jpeg);

        let token = detect_format(Some(""), "scan.heic").unwrap();
        assert_eq!(token.format(), ImageFormat::Heic);
    }

    #[test]
    fn test_detect_format_rejects_unknown() {
        assert!(detect_format(Some("image/gif"), "anim.gif").is_err());
        assert!(detect_format(None, "no_extension").is_err());
        assert!(detect_format(None, "trailing.").is_err());
    }

    #[test]
    fn test_format_display_and_parse() {
        assert_eq!(ImageFormat::Ico.to_string(), "ico");
        assert_eq!("webp".parse::<ImageFormat>().unwrap(), ImageFormat::Webp);
    }
}
