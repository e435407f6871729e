use async_trait::async_trait;
use chrono::Utc;
use recibo_core::models::{BlobRef, ReceiptDocument, ReceiptStatus};
use recibo_core::AppError;
use recibo_storage::BlobStorage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::feed::DocumentFeed;
use crate::traits::{ExtractionOutcome, NewReceiptDocument, ReceiptBackend};
use crate::DocumentSubscription;

/// In-process realization of the document backend.
///
/// Used for tests and local development; also the executable reference for
/// the backend contract, in particular the exactly-once terminal status
/// transition.
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
    storage: Arc<dyn BlobStorage>,
    download_url_ttl: Duration,
}

#[derive(Default)]
struct BackendState {
    documents: HashMap<Uuid, ReceiptDocument>,
    feeds: HashMap<Uuid, DocumentFeed>,
}

impl InMemoryBackend {
    pub fn new(storage: Arc<dyn BlobStorage>, download_url_ttl: Duration) -> Self {
        InMemoryBackend {
            state: Mutex::new(BackendState::default()),
            storage,
            download_url_ttl,
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        // Lock poisoning would mean a panic inside one of the short critical
        // sections below; recover the guard rather than cascade the panic.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ReceiptBackend for InMemoryBackend {
    async fn create_document(
        &self,
        new: NewReceiptDocument,
    ) -> Result<ReceiptDocument, AppError> {
        let document = ReceiptDocument {
            id: Uuid::new_v4(),
            file_name: new.file_name,
            file_display_name: new.file_display_name,
            mimetype: new.mimetype,
            size: new.size,
            uploaded_at: Utc::now(),
            file_id: new.file_id,
            status: ReceiptStatus::Pending,
            extracted: Default::default(),
        };

        let mut state = self.lock_state();
        state.documents.insert(document.id, document.clone());
        state
            .feeds
            .entry(document.id)
            .or_insert_with(|| DocumentFeed::new(None))
            .publish(document.clone());

        tracing::info!(
            document_id = %document.id,
            file_name = %document.file_name,
            size_bytes = document.size,
            "Receipt document created"
        );

        Ok(document)
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<ReceiptDocument>, AppError> {
        Ok(self.lock_state().documents.get(&id).cloned())
    }

    async fn subscribe(&self, id: Uuid) -> DocumentSubscription {
        let mut state = self.lock_state();
        let current = state.documents.get(&id).cloned();
        state
            .feeds
            .entry(id)
            .or_insert_with(|| DocumentFeed::new(current))
            .subscribe(id)
    }

    async fn apply_extraction(
        &self,
        id: Uuid,
        outcome: ExtractionOutcome,
    ) -> Result<ReceiptDocument, AppError> {
        let mut state = self.lock_state();

        let document = state
            .documents
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Receipt {}", id)))?;

        let next_status = match &outcome {
            ExtractionOutcome::Extracted(_) => ReceiptStatus::Processed,
            ExtractionOutcome::Failed(_) => ReceiptStatus::Error,
        };

        if !document.status.can_transition_to(next_status) {
            return Err(AppError::InvalidTransition(format!(
                "Receipt {} is already {}",
                id, document.status
            )));
        }

        match outcome {
            ExtractionOutcome::Extracted(fields) => {
                document.status = ReceiptStatus::Processed;
                document.extracted = fields;
            }
            ExtractionOutcome::Failed(reason) => {
                document.status = ReceiptStatus::Error;
                tracing::warn!(document_id = %id, reason = %reason, "Extraction failed");
            }
        }

        let snapshot = document.clone();
        if let Some(feed) = state.feeds.get(&id) {
            feed.publish(snapshot.clone());
        }

        tracing::info!(
            document_id = %id,
            status = %snapshot.status,
            "Receipt reached terminal status"
        );

        Ok(snapshot)
    }

    async fn download_url(&self, blob_ref: &BlobRef) -> Result<String, AppError> {
        let url = self
            .storage
            .download_url(blob_ref, self.download_url_ttl)
            .await?;
        Ok(url)
    }
}
