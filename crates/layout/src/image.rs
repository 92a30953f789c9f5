//! Decoding of base64 logo payloads.
//!
//! Logos arrive either as bare base64 or as a data URI (`data:image/png;base64,...`).
//! Nothing here is fatal to a document: every failure is reported as an [`ImageSkip`]
//! and the caller leaves the image out.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use thiserror::Error;

/// Raster formats that can be embedded into a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Classifies a raster by its leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<ImageFormat> {
        match bytes {
            [0xFF, 0xD8, ..] => Some(ImageFormat::Jpeg),
            [0x89, 0x50, ..] => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Jpeg => f.write_str("JPEG"),
            ImageFormat::Png => f.write_str("PNG"),
        }
    }
}

/// Why an embedded image was left out of the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageSkip {
    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("image payload is not a JPEG or PNG raster")]
    UnsupportedFormat,
}

/// A raster that passed format sniffing, still in its encoded form.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("format", &self.format)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Strips an optional data-URI prefix, decodes the base64 payload and sniffs its format.
pub fn decode_image(payload: &str) -> Result<DecodedImage, ImageSkip> {
    let encoded = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };

    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|e| ImageSkip::InvalidBase64(e.to_string()))?;

    let format = ImageFormat::sniff(&data).ok_or(ImageSkip::UnsupportedFormat)?;
    log::debug!("Decoded {} logo image ({} bytes)", format, data.len());
    Ok(DecodedImage { format, data })
}
