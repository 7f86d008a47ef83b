//! Filesystem-backed media store

use crate::export::MediaStore;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on `name-N.ext` candidates tried when registering
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Writes staged images into a private directory and registers them by
/// copying into `<gallery>/<album>/`.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    private_dir: PathBuf,
    gallery_dir: PathBuf,
}

impl FsMediaStore {
    /// Create a store rooted at the given private and gallery directories
    pub fn new(private_dir: impl Into<PathBuf>, gallery_dir: impl Into<PathBuf>) -> Self {
        Self {
            private_dir: private_dir.into(),
            gallery_dir: gallery_dir.into(),
        }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn write_private(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.private_dir).await?;
        let path = self.private_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    async fn register(&self, staged: &Path, album: &str) -> io::Result<PathBuf> {
        let album_dir = self.gallery_dir.join(album);
        tokio::fs::create_dir_all(&album_dir).await?;

        let file_name = staged.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("staged path {} has no file name", staged.display()),
            )
        })?;
        let target = unique_target(&album_dir, Path::new(file_name)).await?;

        copy_or_discard(staged, &target).await?;
        Ok(target)
    }
}

/// Copy `staged` to `target`; on failure nothing is left at `target`.
///
/// `target` must be a fresh name, anything found there after a failed copy
/// is treated as a partial write.
async fn copy_or_discard(staged: &Path, target: &Path) -> io::Result<()> {
    if let Err(err) = tokio::fs::copy(staged, target).await {
        if let Err(cleanup) = tokio::fs::remove_file(target).await {
            if cleanup.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %target.display(), error = %cleanup, "failed to remove partial gallery file");
            }
        }
        return Err(err);
    }
    Ok(())
}

async fn unique_target(dir: &Path, file_name: &Path) -> io::Result<PathBuf> {
    let candidate = dir.join(file_name);
    if !tokio::fs::try_exists(&candidate).await? {
        return Ok(candidate);
    }

    let stem = file_name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("qrcode");
    let extension = file_name.extension().and_then(|e| e.to_str());

    for n in 1..MAX_NAME_ATTEMPTS {
        let name = match extension {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        let candidate = dir.join(name);
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name left in {}", dir.display()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_register() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(tmp.path().join("private"), tmp.path().join("gallery"));

        let staged = store.write_private("qrcode.png", b"png").await.unwrap();
        assert_eq!(staged, tmp.path().join("private/qrcode.png"));

        let asset = store.register(&staged, "Download").await.unwrap();
        assert_eq!(asset, tmp.path().join("gallery/Download/qrcode.png"));
        assert_eq!(std::fs::read(&asset).unwrap(), b"png");
    }

    #[tokio::test]
    async fn test_register_does_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(tmp.path().join("private"), tmp.path().join("gallery"));

        let staged = store.write_private("qrcode.png", b"one").await.unwrap();
        let first = store.register(&staged, "Download").await.unwrap();
        let staged = store.write_private("qrcode.png", b"two").await.unwrap();
        let second = store.register(&staged, "Download").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "qrcode-1.png");
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_register_missing_staged_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(tmp.path().join("private"), tmp.path().join("gallery"));

        let missing = tmp.path().join("private/absent.png");
        assert!(store.register(&missing, "Download").await.is_err());
        assert!(!tmp.path().join("gallery/Download/absent.png").exists());
    }

    #[tokio::test]
    async fn test_failed_copy_discards_partial_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("qrcode.png");
        std::fs::write(&target, b"trunc").unwrap();

        let result = copy_or_discard(&tmp.path().join("absent.png"), &target).await;

        assert!(result.is_err());
        assert!(!target.exists());
    }
}
