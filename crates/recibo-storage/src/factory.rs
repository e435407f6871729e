use crate::{BlobStorage, InMemoryBlobStorage, LocalBlobStorage, StorageResult};
use recibo_core::config::{Config, StorageBackendKind};
use std::sync::Arc;

/// Create a blob storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn BlobStorage>> {
    match config.storage_backend {
        StorageBackendKind::Local => {
            let storage = LocalBlobStorage::new(
                config.local_storage_path.clone(),
                config.local_storage_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(storage))
        }
        StorageBackendKind::Memory => Ok(Arc::new(InMemoryBlobStorage::new())),
    }
}
