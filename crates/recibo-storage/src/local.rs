use crate::keys::generate_blob_key;
use crate::traits::{BlobStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use recibo_core::models::BlobRef;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem blob storage implementation
#[derive(Clone)]
pub struct LocalBlobStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStorage {
    /// Create a new LocalBlobStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage (e.g., "/var/lib/recibo/blobs")
    /// * `base_url` - Base URL for serving blobs (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path with traversal validation.
    /// Keys containing `..` or starting with `/` could escape the base
    /// directory and are rejected outright.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Time-bounded public URL for a key. Expiry is carried as a query
    /// parameter; the serving layer is expected to enforce it.
    fn signed_url(&self, key: &str, expires_in: Duration) -> String {
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(expires_in.as_secs() as i64);
        format!(
            "{}/{}?expires={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(key),
            expires_at.timestamp()
        )
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn store(
        &self,
        filename: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<BlobRef> {
        let key = generate_blob_key(filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(BlobRef(key))
    }

    async fn download(&self, blob_ref: &BlobRef) -> StorageResult<Bytes> {
        let path = self.key_to_path(blob_ref.as_str())?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(blob_ref.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %blob_ref,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(Bytes::from(data))
    }

    async fn download_url(
        &self,
        blob_ref: &BlobRef,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let path = self.key_to_path(blob_ref.as_str())?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(blob_ref.to_string()));
        }

        Ok(self.signed_url(blob_ref.as_str(), expires_in))
    }

    async fn exists(&self, blob_ref: &BlobRef) -> StorageResult<bool> {
        let path = self.key_to_path(blob_ref.as_str())?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete(&self, blob_ref: &BlobRef) -> StorageResult<()> {
        let path = self.key_to_path(blob_ref.as_str())?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), key = %blob_ref, "Local storage delete successful");

        Ok(())
    }
}
