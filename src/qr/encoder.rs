//! QR code encoder

use crate::config::EccLevel;
use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use std::path::Path;

/// Scheme prefix of every data URL produced by [`QrEncoder::data_url`]
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// QR code encoder
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: qrcode::EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (High ECC)
    pub fn new() -> Self {
        Self {
            ecc_level: qrcode::EcLevel::H,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EccLevel) -> Self {
        Self {
            ecc_level: ecc_level.to_ec_level(),
        }
    }

    /// Encode text into a QR code image
    pub fn encode(&self, text: &str) -> Result<DynamicImage> {
        let code = QrCode::with_error_correction_level(text, self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))?;

        // Render to image with a reasonable module size
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(400, 400) // Minimum size for reliable scanning
            .build();

        Ok(DynamicImage::ImageLuma8(image))
    }

    /// Encode text into PNG bytes held in memory
    pub fn png_bytes(&self, text: &str) -> Result<Vec<u8>> {
        let image = self.encode(text)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Encode text into a `data:image/png;base64,...` string for inline embedding
    pub fn data_url(&self, text: &str) -> Result<String> {
        let bytes = self.png_bytes(text)?;
        Ok(format!("{}{}", DATA_URL_PREFIX, BASE64.encode(bytes)))
    }

    /// Encode text and write the resulting PNG to `path`
    pub fn write_png(&self, path: &Path, text: &str) -> Result<()> {
        let image = self.encode(text)?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_url() {
        let encoder = QrEncoder::new();
        let result = encoder.encode("https://example.com/x");
        assert!(result.is_ok());
    }

    #[test]
    fn png_bytes_have_png_signature() {
        let encoder = QrEncoder::new();
        let bytes = encoder.png_bytes("https://example.com/x").unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }

    #[test]
    fn data_url_has_scheme_prefix() {
        let encoder = QrEncoder::with_ecc_level(EccLevel::High);
        let url = encoder.data_url("https://example.com/x").unwrap();
        assert!(url.starts_with("data:image/"));
        assert!(url.starts_with(DATA_URL_PREFIX));
        assert!(url.len() > DATA_URL_PREFIX.len());
    }

    #[test]
    fn data_url_payload_is_the_png() {
        use base64::Engine as _;

        let encoder = QrEncoder::new();
        let url = encoder.data_url("round trip").unwrap();
        let encoded = url.strip_prefix(DATA_URL_PREFIX).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(&decoded[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn round_trip_through_decoder() {
        use crate::qr::QrDecoder;

        let encoder = QrEncoder::with_ecc_level(EccLevel::High);
        let decoder = QrDecoder::new();

        let original = "https://example.com/x";
        let qr_image = encoder.encode(original).unwrap();
        let decoded = decoder.decode(&qr_image).unwrap();

        assert_eq!(decoded.as_str(), Some(original));
    }

    #[test]
    fn all_ecc_levels_encode() {
        for level in [
            EccLevel::Low,
            EccLevel::Medium,
            EccLevel::Quartile,
            EccLevel::High,
        ] {
            let encoder = QrEncoder::with_ecc_level(level);
            assert!(encoder.encode("https://example.com/x").is_ok());
        }
    }
}
