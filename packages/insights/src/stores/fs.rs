//! Filesystem-backed object store.
//!
//! Stores raw uploaded bytes under a root directory, mirroring the
//! per-owner, timestamp-namespaced paths the upload flow produces.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::traits::store::ObjectStore;

/// Object store rooted at a local directory.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an object path, rejecting anything that would escape the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || relative.as_os_str().is_empty() {
            return Err(PipelineError::Validation(format!(
                "invalid object path: {path}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put_object(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(PipelineError::storage)?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(PipelineError::storage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = FsObjectStore::new("/tmp/insights-objects");
        assert!(store.resolve("owner/1-report.pdf").is_ok());
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("owner/../../etc/passwd").is_err());
        assert!(store.resolve("/absolute").is_err());
        assert!(store.resolve("").is_err());
    }

    #[tokio::test]
    async fn test_put_object_writes_bytes() {
        let root = std::env::temp_dir().join(format!("insights-test-{}", uuid::Uuid::new_v4()));
        let store = FsObjectStore::new(&root);

        store.put_object("owner/1-notes.txt", b"hello").await.unwrap();

        let written = tokio::fs::read(root.join("owner/1-notes.txt")).await.unwrap();
        assert_eq!(written, b"hello");

        tokio::fs::remove_dir_all(&root).await.ok();
    }
}
