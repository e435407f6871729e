use crate::keys::generate_blob_key;
use crate::traits::{BlobStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use recibo_core::models::BlobRef;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Process-local blob storage, for tests and throwaway runs.
///
/// Shares its map across clones so gateway and backend handles observe the
/// same blobs.
#[derive(Clone)]
pub struct InMemoryBlobStorage {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
    base_url: String,
}

impl Default for InMemoryBlobStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBlobStorage {
    pub fn new() -> Self {
        InMemoryBlobStorage {
            blobs: Arc::new(RwLock::new(HashMap::new())),
            base_url: "memory://blobs".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        match self.blobs.read() {
            Ok(blobs) => blobs.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn store(
        &self,
        filename: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<BlobRef> {
        let key = generate_blob_key(filename);

        self.blobs
            .write()
            .map_err(|_| StorageError::UploadFailed("blob map lock poisoned".to_string()))?
            .insert(key.clone(), data);

        tracing::debug!(key = %key, "In-memory storage upload");

        Ok(BlobRef(key))
    }

    async fn download(&self, blob_ref: &BlobRef) -> StorageResult<Bytes> {
        self.blobs
            .read()
            .map_err(|_| StorageError::DownloadFailed("blob map lock poisoned".to_string()))?
            .get(blob_ref.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(blob_ref.to_string()))
    }

    async fn download_url(
        &self,
        blob_ref: &BlobRef,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if !self.exists(blob_ref).await? {
            return Err(StorageError::NotFound(blob_ref.to_string()));
        }

        let expires_at =
            chrono::Utc::now() + chrono::Duration::seconds(expires_in.as_secs() as i64);
        Ok(format!(
            "{}/{}?expires={}",
            self.base_url,
            urlencoding::encode(blob_ref.as_str()),
            expires_at.timestamp()
        ))
    }

    async fn exists(&self, blob_ref: &BlobRef) -> StorageResult<bool> {
        Ok(self
            .blobs
            .read()
            .map_err(|_| StorageError::DownloadFailed("blob map lock poisoned".to_string()))?
            .contains_key(blob_ref.as_str()))
    }

    async fn delete(&self, blob_ref: &BlobRef) -> StorageResult<()> {
        self.blobs
            .write()
            .map_err(|_| StorageError::DeleteFailed("blob map lock poisoned".to_string()))?
            .remove(blob_ref.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_download_roundtrip() {
        let storage = InMemoryBlobStorage::new();
        let data = Bytes::from_static(b"%PDF-1.4");

        let blob_ref = storage
            .store("a.pdf", "application/pdf", data.clone())
            .await
            .unwrap();
        assert_eq!(storage.download(&blob_ref).await.unwrap(), data);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let storage = InMemoryBlobStorage::new();
        let missing = BlobRef("receipts/none.pdf".to_string());

        assert!(matches!(
            storage.download(&missing).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.download_url(&missing, Duration::from_secs(60)).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_blobs() {
        let storage = InMemoryBlobStorage::new();
        let clone = storage.clone();

        let blob_ref = clone
            .store("b.pdf", "application/pdf", Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert!(storage.exists(&blob_ref).await.unwrap());
    }
}
