//! Evidence object storage.
//!
//! The hosted object store is an external collaborator; this seam keeps the
//! rest of the application provider-agnostic. [`LocalEvidenceStore`] is the
//! bundled backend, writing under a configured root directory.

mod local;

pub use local::LocalEvidenceStore;

use async_trait::async_trait;

/// Errors surfaced by evidence storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Provider-agnostic evidence store.
///
/// Keys are forward-slash-separated object paths, e.g.
/// `incidents/42/3f1c-acta.pdf`. Implementations must reject keys that
/// escape their root.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Store an object, overwriting any existing one under the same key.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Fetch an object's bytes. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
