//! Filesystem-based object store implementation.
//!
//! Objects are written under a base directory using their upload name as the
//! relative path, and served from a configurable public base URL.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use vitrine_error::{
    UploadError, UploadErrorKind, ValidationError, ValidationErrorKind, VitrineResult,
};
use vitrine_interface::ObjectStore;

/// Filesystem object store.
///
/// Stores each object at `{base_path}/{name}`.
///
/// # Features
///
/// - **Atomic writes**: Uses temp file + rename
/// - **Idempotent re-upload**: Identical bytes under an existing name succeed
/// - **No overwrite**: Different bytes under an existing name are rejected
pub struct FileSystemObjectStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl FileSystemObjectStore {
    /// Create a new filesystem object store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path, public_base_url))]
    pub fn new(
        base_path: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> VitrineResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            UploadError::new(UploadErrorKind::Io(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem object store");
        Ok(Self {
            base_path,
            public_base_url: public_base_url.into(),
        })
    }

    /// Directory objects are written under.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Resolve an object name to a path inside the base directory.
    fn object_path(&self, name: &str) -> VitrineResult<PathBuf> {
        let relative = Path::new(name);
        let contained = !name.is_empty()
            && !name.contains('\\')
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !contained {
            return Err(
                ValidationError::new(ValidationErrorKind::InvalidObjectName(name.to_string()))
                    .into(),
            );
        }

        Ok(self.base_path.join(relative))
    }

    /// Write through a sibling temp file, removing it if the rename fails.
    async fn write_atomically(path: &Path, bytes: &[u8]) -> VitrineResult<()> {
        // Temp name keeps the full file name so distinct objects never share one
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!("{}.tmp", file_name));

        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            UploadError::new(UploadErrorKind::Io(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
            }
            return Err(UploadError::new(UploadErrorKind::Io(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FileSystemObjectStore {
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> VitrineResult<()> {
        let path = self.object_path(name)?;
        let hash = Self::compute_hash(bytes);

        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            UploadError::new(UploadErrorKind::Io(format!("{}: {}", path.display(), e)))
        })?;

        if exists {
            let existing = tokio::fs::read(&path).await.map_err(|e| {
                UploadError::new(UploadErrorKind::Io(format!("{}: {}", path.display(), e)))
            })?;

            if Self::compute_hash(&existing) == hash {
                tracing::debug!(name, hash = %hash, "Object already stored with identical content");
                return Ok(());
            }

            return Err(UploadError::new(UploadErrorKind::AlreadyExists(name.to_string())).into());
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                UploadError::new(UploadErrorKind::Io(format!("{}: {}", parent.display(), e)))
            })?;
        }

        Self::write_atomically(&path, bytes).await?;

        tracing::info!(
            name,
            hash = %hash,
            size = bytes.len(),
            "Stored object"
        );
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file
        let target = dir.path().join("cover.png");
        std::fs::create_dir_all(target.join("inner")).unwrap();

        let err = FileSystemObjectStore::write_atomically(&target, b"bytes")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("rename"));
        assert!(!dir.path().join("cover.png.tmp").exists());
        assert!(target.is_dir());
    }
}
