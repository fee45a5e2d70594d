//! Course thumbnail storage.
//!
//! Thumbnails are uploaded out of band; the API only needs to remove the
//! file when its course is deleted. Paths are relative to the thumbnails
//! root, e.g. `abc/cover.jpg`.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

/// A store that can delete thumbnails by bucket-relative path.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Remove the object at `path`. Removing a missing object is not an error.
    async fn remove(&self, path: &str) -> io::Result<()>;
}

/// Thumbnails stored on the local filesystem under a root directory.
#[derive(Debug, Clone)]
pub struct LocalThumbnailStore {
    root: PathBuf,
}

impl LocalThumbnailStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `path` under the root, refusing anything that could escape it.
    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain || path.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid thumbnail path: {path}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ThumbnailStore for LocalThumbnailStore {
    async fn remove(&self, path: &str) -> io::Result<()> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => {
                tracing::debug!(path = %full.display(), "Removed thumbnail");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("cursos")).unwrap();
        let file = dir.path().join("cursos/portada.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        let store = LocalThumbnailStore::new(dir.path());
        store.remove("cursos/portada.jpg").await.unwrap();

        assert!(!file.exists());
    }

    #[tokio::test]
    async fn missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalThumbnailStore::new(dir.path());
        assert!(store.remove("none.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn parent_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalThumbnailStore::new(dir.path());
        let err = store.remove("../etc/passwd").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
