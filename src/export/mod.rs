//! Export of rendered codes to shared media storage
//!
//! [`ExportPipeline::export`] runs a fixed protocol: acquire write
//! permission, stage the image in private storage, then register it in a
//! named album. Every step is terminal on failure; nothing is retried and a
//! denied permission means no write is ever attempted.

mod fs;
mod permission;

pub use fs::FsMediaStore;
pub use permission::{FixedPermission, PermissionGate, PermissionStatus, PromptPermission};

use crate::error::{Error, Result};
use crate::qr::PNG_DATA_URL_PREFIX;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Album images are registered into unless configured otherwise
pub const DEFAULT_ALBUM: &str = "Download";

/// File name used in private storage
pub const DEFAULT_FILE_NAME: &str = "qrcode.png";

/// Durable storage behind the export pipeline
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `bytes` to the app's private working location
    async fn write_private(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;

    /// Register a staged file into `album`, creating the album if needed
    async fn register(&self, staged: &Path, album: &str) -> io::Result<PathBuf>;
}

/// Image handed over by the encoder
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Raw PNG bytes
    Png(Vec<u8>),
    /// Base64 data, with or without a `data:<mime>;base64,` prefix
    Base64(String),
}

impl ImageSource {
    /// Decode into raw image bytes
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            ImageSource::Png(bytes) if bytes.is_empty() => {
                Err(Error::InvalidImage("empty image data".to_string()))
            }
            ImageSource::Png(bytes) => Ok(bytes),
            ImageSource::Base64(data) => {
                let encoded = strip_data_url(&data);
                if encoded.is_empty() {
                    return Err(Error::InvalidImage("empty image data".to_string()));
                }
                Ok(STANDARD.decode(encoded)?)
            }
        }
    }
}

fn strip_data_url(data: &str) -> &str {
    let data = data.trim();
    if let Some(rest) = data.strip_prefix(PNG_DATA_URL_PREFIX) {
        return rest;
    }
    match (data.starts_with("data:"), data.find(";base64,")) {
        (true, Some(idx)) => &data[idx + ";base64,".len()..],
        _ => data,
    }
}

/// An image saved to the gallery
#[derive(Debug, Clone, Serialize)]
pub struct ExportedImage {
    /// Path of the registered gallery asset
    pub path: PathBuf,
    /// Album the asset was registered into
    pub album: String,
    /// Bytes written
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Progress of one export attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    /// Nothing attempted yet
    NotRequested,
    /// Waiting on the user to answer a permission request
    Requesting,
    /// Permission held
    Granted,
    /// Permission refused; terminal
    Denied,
    /// Staging and registering the image
    Writing,
    /// Image is in the gallery; terminal
    Registered,
    /// A write step failed; terminal
    Failed,
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportState::NotRequested => "not_requested",
            ExportState::Requesting => "requesting",
            ExportState::Granted => "granted",
            ExportState::Denied => "denied",
            ExportState::Writing => "writing",
            ExportState::Registered => "registered",
            ExportState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Permission-then-write-then-register pipeline
pub struct ExportPipeline<P, S> {
    permissions: P,
    store: S,
    album: String,
    file_name: String,
    state: ExportState,
}

impl<P, S> ExportPipeline<P, S>
where
    P: PermissionGate,
    S: MediaStore,
{
    /// Create a pipeline using the default album and file name
    pub fn new(permissions: P, store: S) -> Self {
        Self {
            permissions,
            store,
            album: DEFAULT_ALBUM.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            state: ExportState::NotRequested,
        }
    }

    /// Register into a different album
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Stage under a different file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// State reached by the most recent export attempt
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// The permission gate
    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist an image to the gallery.
    pub async fn export(&mut self, image: ImageSource) -> Result<ExportedImage> {
        self.transition(ExportState::NotRequested);

        if !self.permissions.status().await.is_granted() {
            self.transition(ExportState::Requesting);
            if !self.permissions.request().await.is_granted() {
                self.transition(ExportState::Denied);
                return Err(Error::PermissionDenied);
            }
        }
        self.transition(ExportState::Granted);

        let bytes = match image.into_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                self.transition(ExportState::Failed);
                return Err(err);
            }
        };

        self.transition(ExportState::Writing);
        let staged = match self.store.write_private(&self.file_name, &bytes).await {
            Ok(path) => path,
            Err(err) => return Err(self.fail("write to private storage", err)),
        };

        let path = match self.store.register(&staged, &self.album).await {
            Ok(path) => path,
            Err(err) => return Err(self.fail("register in album", err)),
        };

        self.transition(ExportState::Registered);
        tracing::info!(path = %path.display(), album = %self.album, "QR code saved to gallery");

        Ok(ExportedImage {
            path,
            album: self.album.clone(),
            bytes,
        })
    }

    fn fail(&mut self, step: &str, err: io::Error) -> Error {
        self.transition(ExportState::Failed);
        tracing::warn!(step, error = %err, "export failed");
        Error::WriteFailed(format!("{step}: {err}"))
    }

    fn transition(&mut self, next: ExportState) {
        tracing::debug!(from = %self.state, to = %next, "export state");
        self.state = next;
    }
}
