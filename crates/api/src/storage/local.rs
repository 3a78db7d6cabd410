//! Local-filesystem evidence store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{EvidenceStore, StorageError};

/// Stores evidence objects as plain files under a root directory.
pub struct LocalEvidenceStore {
    root: PathBuf,
}

impl LocalEvidenceStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an object key to a path under the root.
    ///
    /// Rejects absolute keys and any key containing `..` components so a
    /// crafted key cannot escape the root directory.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(key);
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if key.is_empty() || escapes {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl EvidenceStore for LocalEvidenceStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalEvidenceStore::new(dir.path());

        store
            .put("incidents/1/acta.pdf", b"contenido")
            .await
            .expect("put should succeed");

        let bytes = store
            .get("incidents/1/acta.pdf")
            .await
            .expect("get should succeed")
            .expect("object should exist");
        assert_eq!(bytes, b"contenido");

        store
            .delete("incidents/1/acta.pdf")
            .await
            .expect("delete should succeed");
        assert!(store.get("incidents/1/acta.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_missing_key_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalEvidenceStore::new(dir.path());
        store.delete("nope/missing.bin").await.expect("no error");
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalEvidenceStore::new(dir.path());

        assert_matches!(
            store.put("../outside.txt", b"x").await,
            Err(StorageError::InvalidKey(_))
        );
        assert_matches!(
            store.get("/etc/passwd").await,
            Err(StorageError::InvalidKey(_))
        );
        assert_matches!(store.delete("").await, Err(StorageError::InvalidKey(_)));
    }
}
