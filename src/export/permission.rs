//! Storage permission gates

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Answer to a permission query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Writing to shared storage is allowed
    Granted,
    /// The user refused or dismissed the request
    Denied,
    /// Not asked yet
    Undetermined,
}

impl PermissionStatus {
    /// Whether writes may proceed
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Source of write permission for shared media storage
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Current status without prompting
    async fn status(&self) -> PermissionStatus;

    /// Ask the user; suspends until they answer
    async fn request(&self) -> PermissionStatus;
}

#[async_trait]
impl<T: PermissionGate + ?Sized> PermissionGate for Box<T> {
    async fn status(&self) -> PermissionStatus {
        (**self).status().await
    }

    async fn request(&self) -> PermissionStatus {
        (**self).request().await
    }
}

/// Gate with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub PermissionStatus);

impl FixedPermission {
    /// Always granted
    pub fn granted() -> Self {
        Self(PermissionStatus::Granted)
    }

    /// Always denied
    pub fn denied() -> Self {
        Self(PermissionStatus::Denied)
    }
}

#[async_trait]
impl PermissionGate for FixedPermission {
    async fn status(&self) -> PermissionStatus {
        self.0
    }

    async fn request(&self) -> PermissionStatus {
        self.0
    }
}

/// Interactive yes/no prompt; a grant is remembered for the gate's lifetime.
pub struct PromptPermission<R, W> {
    io: Mutex<(R, W)>,
    granted: AtomicBool,
}

impl<R, W> PromptPermission<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Prompt on `writer` and read the answer from `reader`
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
            granted: AtomicBool::new(false),
        }
    }
}

impl PromptPermission<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stderr> {
    /// Prompt on stderr, answer on stdin
    pub fn stdio() -> Self {
        Self::new(
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stderr(),
        )
    }
}

#[async_trait]
impl<R, W> PermissionGate for PromptPermission<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn status(&self) -> PermissionStatus {
        if self.granted.load(Ordering::Acquire) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Undetermined
        }
    }

    async fn request(&self) -> PermissionStatus {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        let prompt = b"Allow qrform to save images to your gallery? [y/N] ";
        if let Err(err) = writer.write_all(prompt).await {
            tracing::warn!(error = %err, "failed to write permission prompt");
            return PermissionStatus::Denied;
        }
        if let Err(err) = writer.flush().await {
            tracing::warn!(error = %err, "failed to flush permission prompt");
            return PermissionStatus::Denied;
        }

        let mut answer = String::new();
        match reader.read_line(&mut answer).await {
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "failed to read permission answer");
                return PermissionStatus::Denied;
            }
        }

        // EOF or anything but an explicit yes counts as a dismissal.
        let granted = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        if granted {
            self.granted.store(true, Ordering::Release);
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }
}
