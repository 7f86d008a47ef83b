//! QR code rendering
//!
//! Turns a payload string into an image. The matrix itself comes from the
//! `qrcode` crate; this module only picks the rendering target (raster image,
//! PNG bytes, base64 data URL or terminal text).

mod encoder;

pub use encoder::{EccLevel, QrEncoder};

/// Minimum rendered edge length in pixels
pub const DEFAULT_SIZE: u32 = 200;

/// MIME prefix of data URLs produced by [`QrEncoder::encode_data_url`]
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
