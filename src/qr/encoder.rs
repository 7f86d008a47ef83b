//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{DEFAULT_SIZE, PNG_DATA_URL_PREFIX};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use qrcode::render::unicode;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::str::FromStr;

/// Error correction level, serializable for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum EccLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl From<EccLevel> for qrcode::EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::L => qrcode::EcLevel::L,
            EccLevel::M => qrcode::EcLevel::M,
            EccLevel::Q => qrcode::EcLevel::Q,
            EccLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for EccLevel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(Error::Config(format!(
                "Unknown error correction level '{other}', expected L, M, Q or H"
            ))),
        }
    }
}

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    ecc_level: EccLevel,
    size: u32,
    quiet_zone: bool,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, 200px)
    pub fn new() -> Self {
        Self {
            ecc_level: EccLevel::M,
            size: DEFAULT_SIZE,
            quiet_zone: true,
        }
    }

    /// Use a specific error correction level
    pub fn with_ecc_level(mut self, ecc_level: EccLevel) -> Self {
        self.ecc_level = ecc_level;
        self
    }

    /// Set the minimum edge length of rendered images
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    /// Toggle the blank border around the code
    pub fn with_quiet_zone(mut self, quiet_zone: bool) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    fn code(&self, payload: &str) -> Result<QrCode> {
        QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level.into())
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))
    }

    /// Encode a payload into a grayscale QR code image
    pub fn encode(&self, payload: &str) -> Result<DynamicImage> {
        let code = self.code(payload)?;

        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(self.quiet_zone)
            .min_dimensions(self.size, self.size)
            .build();

        tracing::debug!(
            version = ?code.version(),
            width = image.width(),
            payload_len = payload.len(),
            "Rendered QR image"
        );

        Ok(DynamicImage::ImageLuma8(image))
    }

    /// Encode a payload into PNG bytes
    pub fn encode_png(&self, payload: &str) -> Result<Vec<u8>> {
        let image = self.encode(payload)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Encode a payload into a `data:image/png;base64,` URL
    pub fn encode_data_url(&self, payload: &str) -> Result<String> {
        let png = self.encode_png(payload)?;
        Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }

    /// Render a payload as unicode half blocks for a terminal
    pub fn encode_terminal(&self, payload: &str) -> Result<String> {
        let code = self.code(payload)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(self.quiet_zone)
            .build())
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
    fn test_encode_respects_min_size() {
        let image = QrEncoder::new().encode("WIFI:S:HomeNet;T:WPA;P:secret;;").unwrap();
        assert!(image.width() >= DEFAULT_SIZE);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_encode_png_signature() {
        let png = QrEncoder::new().encode_png("https://example.com").unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_data_url_decodes_to_png() {
        let url = QrEncoder::new().encode_data_url("tel:555").unwrap();
        let encoded = url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap();
        let png = STANDARD.decode(encoded).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_terminal_rendering() {
        let text = QrEncoder::new().encode_terminal("hello").unwrap();
        assert!(text.lines().count() > 10);
        assert!(text.contains('\u{2588}') || text.contains('\u{2580}') || text.contains('\u{2584}'));
    }

    #[test]
    fn test_oversized_payload_fails() {
        let huge = "x".repeat(8000);
        let err = QrEncoder::new()
            .with_ecc_level(EccLevel::H)
            .encode(&huge)
            .unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
    }

    #[test]
    fn test_ecc_level_parse() {
        assert_eq!("q".parse::<EccLevel>().unwrap(), EccLevel::Q);
        assert!("Z".parse::<EccLevel>().is_err());
    }
}
