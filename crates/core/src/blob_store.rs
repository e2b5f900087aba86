//! Filesystem-backed storage for uploaded media.
//!
//! Files are addressed by bare names inside a single directory. Every name
//! coming from a client passes [`validate_file_name`] before it is joined
//! onto the root, so nothing outside the directory is ever read or written.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::media::{validate_file_name, VIDEO_FILE_NAME};

/// Implemented by request DTOs that name files in the [`BlobStore`].
pub trait BlobRefs {
    /// Every file name referenced by this input. Absent optional fields
    /// contribute nothing.
    fn blob_refs(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Upload directory plus the lock guarding the single video slot.
#[derive(Debug)]
pub struct BlobStore {
    root: PathBuf,
    video_lock: Mutex<()>,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            video_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn init(&self) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Resolve a client-supplied name to a path inside the store.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, CoreError> {
        validate_file_name(name)?;
        Ok(self.root.join(name))
    }

    /// Whether a regular file with this name exists right now.
    pub async fn exists(&self, name: &str) -> Result<bool, CoreError> {
        let path = self.path_for(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Fail with [`CoreError::FileNotFound`] naming the first missing file.
    pub async fn ensure_all_exist(&self, names: &[&str]) -> Result<(), CoreError> {
        for name in names {
            if !self.exists(name).await? {
                return Err(CoreError::FileNotFound((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Write a new file. Returns the number of bytes written.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<u64, CoreError> {
        let path = self.path_for(name)?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(name, size = bytes.len(), "Stored file");
        Ok(bytes.len() as u64)
    }

    /// Replace the single stored video.
    ///
    /// Uploads are serialized, and the new content is written to a temporary
    /// file first and renamed into place, so a concurrent reader sees either
    /// the old video or the new one in full.
    pub async fn replace_video(&self, bytes: &[u8]) -> Result<u64, CoreError> {
        let _guard = self.video_lock.lock().await;

        let target = self.root.join(VIDEO_FILE_NAME);
        let staging = self.root.join(format!(".{VIDEO_FILE_NAME}.partial"));

        if let Err(e) = tokio::fs::write(&staging, bytes).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        tokio::fs::rename(&staging, &target).await?;

        tracing::info!(size = bytes.len(), "Replaced stored video");
        Ok(bytes.len() as u64)
    }

    /// Open a stored file for reading, along with its size.
    pub async fn open(&self, name: &str) -> Result<(tokio::fs::File, u64), CoreError> {
        let path = self.path_for(name)?;
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::FileNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(CoreError::FileNotFound(name.to_string()));
        }
        Ok((file, meta.len()))
    }
}
