//! Error types for qrform operations

use crate::payload::Category;
use thiserror::Error;

/// Result type alias using qrform's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrform operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required text field was empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Storage permission was refused or the request was dismissed
    #[error("Storage permission denied")]
    PermissionDenied,

    /// Writing the image or registering it in the gallery failed
    #[error("Failed to save image: {0}")]
    WriteFailed(String),

    /// The platform could not open the requested URI
    #[error("Unable to open {scheme}: URI: {reason}")]
    DispatchFailed {
        /// URI scheme that was refused (`sms`, `mailto`)
        scheme: &'static str,
        /// Reason reported by the opener
        reason: String,
    },

    /// A category is already selected; the session must be reset first
    #[error("Category '{0}' is already selected, reset to change it")]
    CategoryLocked(Category),

    /// No category has been selected yet
    #[error("No category selected")]
    NoCategory,

    /// The selected category has no such field
    #[error("Field not supported for this category: {0}")]
    UnsupportedField(String),

    /// Category name could not be parsed
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// Image data handed to the exporter could not be decoded
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::InvalidImage(format!("base64 decode error: {}", e))
    }
}
