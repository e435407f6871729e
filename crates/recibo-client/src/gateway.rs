//! Upload gateway
//!
//! One file in, one pending document out. The gateway validates the declared
//! metadata, stores the blob, then creates the document record referencing
//! it. The two steps are not atomic: when record creation fails the caller
//! gets the error and nothing observable is left behind except the stored
//! blob itself, which is logged and retained (no compensating cleanup).

use bytes::Bytes;
use recibo_backend::{NewReceiptDocument, ReceiptBackend};
use recibo_core::models::{FileUpload, UserContext};
use recibo_core::validation::validate_file_metadata;
use recibo_core::AppError;
use recibo_storage::BlobStorage;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UploadGateway {
    storage: Arc<dyn BlobStorage>,
    backend: Arc<dyn ReceiptBackend>,
}

impl UploadGateway {
    pub fn new(storage: Arc<dyn BlobStorage>, backend: Arc<dyn ReceiptBackend>) -> Self {
        UploadGateway { storage, backend }
    }

    /// Upload one receipt for an authenticated user.
    ///
    /// On success the returned id refers to a document whose status is
    /// `pending`; extraction happens asynchronously elsewhere and is never
    /// awaited here.
    pub async fn upload(&self, user: &UserContext, file: FileUpload) -> Result<Uuid, AppError> {
        validate_file_metadata(&file)?;

        let file_name = file.name.clone();
        let mimetype = file.mimetype.clone();
        let size = file.size();

        let blob_ref = self
            .storage
            .store(&file_name, &mimetype, Bytes::from(file.bytes))
            .await
            .map_err(|e| AppError::Upload(format!("Failed to store {}: {}", file_name, e)))?;

        let document = match self
            .backend
            .create_document(NewReceiptDocument {
                file_name: file_name.clone(),
                file_display_name: None,
                mimetype,
                size,
                file_id: blob_ref.clone(),
            })
            .await
        {
            Ok(document) => document,
            Err(e) => {
                // Known gap: the blob is already stored and stays orphaned.
                tracing::warn!(
                    blob_ref = %blob_ref,
                    file_name = %file_name,
                    error = %e,
                    "Document creation failed after blob store; orphaned blob retained"
                );
                return Err(AppError::Upload(format!(
                    "Failed to upload {}: {}",
                    file_name,
                    e.client_message()
                )));
            }
        };

        tracing::info!(
            user_id = %user.user_id,
            document_id = %document.id,
            file_name = %file_name,
            size_bytes = size,
            "Receipt uploaded"
        );

        Ok(document.id)
    }
}
