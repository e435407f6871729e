//! Storage abstraction trait
//!
//! This module defines the BlobStorage trait that all blob backends must
//! implement. The upload gateway and the document backend work against this
//! trait without coupling to a concrete backend.

use async_trait::async_trait;
use bytes::Bytes;
use recibo_core::models::BlobRef;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for recibo_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => recibo_core::AppError::NotFound(key),
            other => recibo_core::AppError::Storage(other.to_string()),
        }
    }
}

/// Blob storage abstraction
///
/// Storing a blob and creating its document record are two separate calls at
/// the gateway level; this trait only covers the blob half. A `BlobRef`
/// returned from `store` is the sole handle through which the bytes are ever
/// read back.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store raw bytes and return the reference used for all later access.
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<BlobRef>;

    /// Read a blob back by its reference.
    async fn download(&self, blob_ref: &BlobRef) -> StorageResult<Bytes>;

    /// Derive a time-bounded direct-access URL for a blob.
    ///
    /// Fails with `StorageError::NotFound` when the reference no longer
    /// resolves; callers surface that as a structured not-found, never a
    /// panic.
    async fn download_url(&self, blob_ref: &BlobRef, expires_in: Duration)
        -> StorageResult<String>;

    /// Check whether a blob still exists.
    async fn exists(&self, blob_ref: &BlobRef) -> StorageResult<bool>;

    /// Delete a blob. Deleting a missing blob is not an error.
    async fn delete(&self, blob_ref: &BlobRef) -> StorageResult<()>;
}
