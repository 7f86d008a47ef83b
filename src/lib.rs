//! qrform - category-aware QR payloads with gallery export
//!
//! This library turns structured form input (WiFi credentials, phone
//! numbers, email and SMS messages, links, social profiles) into the
//! canonical string a QR scanner expects, renders it, and saves the
//! rendered code into a gallery album.
//!
//! # Features
//!
//! - **Payload building**: one exhaustive rule per [`Category`]
//! - **Form session**: category lock, field gating, reset
//! - **Rendering**: PNG, data URL and terminal output via `qrcode`
//! - **Export**: permission, stage, register, with pluggable storage
//! - **Dispatch**: hand `sms:` / `mailto:` URIs to the platform
//!
//! # Example
//!
//! ```no_run
//! use qrform::export::{ExportPipeline, FixedPermission, FsMediaStore, ImageSource};
//! use qrform::{Category, QrEncoder, build_payload};
//!
//! #[tokio::main]
//! async fn main() -> qrform::Result<()> {
//!     let payload = build_payload(Category::Wifi, "HomeNet", "secret");
//!     let png = QrEncoder::new().encode_png(&payload)?;
//!
//!     let store = FsMediaStore::new("/tmp/qrform", "/tmp/gallery");
//!     let mut pipeline = ExportPipeline::new(FixedPermission::granted(), store);
//!     let saved = pipeline.export(ImageSource::Png(png)).await?;
//!
//!     println!("Saved to {}", saved.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod payload;
pub mod qr;
pub mod session;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{
    DispatchOptions, ExportOptions, LogRotation, LoggingOptions, PermissionMode, QrformConfig,
    RenderOptions,
};
pub use dispatch::{SystemOpener, UriOpener, send_email, send_sms};
pub use export::{ExportPipeline, ExportState, ExportedImage, ImageSource};
pub use payload::{Category, FormState, build_payload};
pub use qr::{EccLevel, QrEncoder};
pub use session::FormSession;
