//! Blob Storage for Uploaded Documents
//!
//! The wizard core carries [`FileRef`] values; the bytes behind them are
//! staged here. The local filesystem implementation covers development and
//! single-node deployments; anything S3-shaped can implement the same
//! trait.

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use signup_types::FileRef;

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file has no blob reference: {0}")]
    Unstaged(String),

    #[error("invalid blob reference: {0}")]
    InvalidRef(String),

    #[error("blob not found: {0}")]
    NotFound(String),
}

/// Storage for uploaded registration document binaries.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stage an uploaded binary and return the reference the wizard
    /// carries from then on.
    async fn stage(
        &self,
        name: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<FileRef, BlobStoreError>;

    /// Resolve a staged reference back to its bytes.
    async fn fetch(&self, file: &FileRef) -> Result<Vec<u8>, BlobStoreError>;

    /// Whether the reference still resolves.
    async fn exists(&self, file: &FileRef) -> Result<bool, BlobStoreError>;
}

/// Local filesystem store. Uploads are keyed by a fresh UUID so user file
/// names never collide.
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn path_from_ref(&self, file: &FileRef) -> Result<PathBuf, BlobStoreError> {
        let blob_ref = file
            .blob_ref
            .as_deref()
            .ok_or_else(|| BlobStoreError::Unstaged(file.name.clone()))?;
        blob_ref
            .strip_prefix("file://")
            .map(PathBuf::from)
            .ok_or_else(|| {
                BlobStoreError::InvalidRef(format!("expected file:// prefix: {blob_ref}"))
            })
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn stage(
        &self,
        name: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<FileRef, BlobStoreError> {
        let path = self.base_path.join(Uuid::new_v4().to_string()).join(name);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;

        Ok(FileRef::new(name, content_type).with_blob_ref(format!("file://{}", path.display())))
    }

    async fn fetch(&self, file: &FileRef) -> Result<Vec<u8>, BlobStoreError> {
        let path = self.path_from_ref(file)?;
        if !path.exists() {
            return Err(BlobStoreError::NotFound(file.name.clone()));
        }
        Ok(tokio::fs::read(path).await?)
    }

    async fn exists(&self, file: &FileRef) -> Result<bool, BlobStoreError> {
        let path = self.path_from_ref(file)?;
        Ok(path.exists())
    }
}

/// In-memory store for tests.
#[cfg(test)]
pub struct InMemoryBlobStore {
    blobs: tokio::sync::RwLock<std::collections::HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: tokio::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn stage(
        &self,
        name: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<FileRef, BlobStoreError> {
        let blob_ref = format!("memory://{}/{}", Uuid::new_v4(), name);
        self.blobs
            .write()
            .await
            .insert(blob_ref.clone(), content.to_vec());
        Ok(FileRef::new(name, content_type).with_blob_ref(blob_ref))
    }

    async fn fetch(&self, file: &FileRef) -> Result<Vec<u8>, BlobStoreError> {
        let blob_ref = file
            .blob_ref
            .as_deref()
            .ok_or_else(|| BlobStoreError::Unstaged(file.name.clone()))?;
        self.blobs
            .read()
            .await
            .get(blob_ref)
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(file.name.clone()))
    }

    async fn exists(&self, file: &FileRef) -> Result<bool, BlobStoreError> {
        let blob_ref = file
            .blob_ref
            .as_deref()
            .ok_or_else(|| BlobStoreError::Unstaged(file.name.clone()))?;
        Ok(self.blobs.read().await.contains_key(blob_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp_dir.path());

        let content = b"-----BEGIN CERTIFICATE-----";
        let file = store
            .stage("certificate.pem", content, "application/x-pem-file")
            .await
            .unwrap();

        assert_eq!(file.name, "certificate.pem");
        assert!(file.blob_ref.as_deref().unwrap().starts_with("file://"));
        assert!(store.exists(&file).await.unwrap());
        assert_eq!(store.fetch(&file).await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_same_name_uploads_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp_dir.path());

        let first = store.stage("deed.pdf", b"one", "application/pdf").await.unwrap();
        let second = store.stage("deed.pdf", b"two", "application/pdf").await.unwrap();

        assert_ne!(first.blob_ref, second.blob_ref);
        assert_eq!(store.fetch(&first).await.unwrap(), b"one");
        assert_eq!(store.fetch(&second).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_unstaged_reference_is_rejected() {
        let store = InMemoryBlobStore::new();
        let file = FileRef::new("cert.p12", "application/x-pkcs12");
        assert!(matches!(
            store.fetch(&file).await,
            Err(BlobStoreError::Unstaged(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let store = InMemoryBlobStore::new();
        let file =
            FileRef::new("cert.p12", "application/x-pkcs12").with_blob_ref("memory://gone");
        assert!(matches!(
            store.fetch(&file).await,
            Err(BlobStoreError::NotFound(_))
        ));
    }
}
