//! Filesystem-backed content store for uploaded documents

use crate::domain::BlobStore;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Stores each blob as a file under a root directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        if key.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("invalid blob key '{}'", key);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, content: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create blob dir {}", parent.display()))?;
        }
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("write blob {}", path.display()))?;

        tracing::debug!(key, size = content.len(), "blob written");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("read blob {}", path.display()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove blob {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        store.put("society/doc", b"minutes").await.unwrap();
        assert_eq!(store.get("society/doc").await.unwrap(), b"minutes");

        store.delete("society/doc").await.unwrap();
        assert!(store.get("society/doc").await.is_err());

        // Deleting twice is not an error
        store.delete("society/doc").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        assert!(store.put("../outside", b"x").await.is_err());
        assert!(store.put("/etc/passwd", b"x").await.is_err());
        assert!(store.put("", b"x").await.is_err());
    }
}
