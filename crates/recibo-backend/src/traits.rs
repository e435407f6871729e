//! Document backend abstraction
//!
//! This module defines the ReceiptBackend trait through which the upload
//! gateway and the client views consume the hosted document service. The
//! backend exclusively owns persisted state; clients only ever hold the
//! read-only snapshots it hands out.

use async_trait::async_trait;
use recibo_core::models::{BlobRef, ExtractedFields, ReceiptDocument};
use recibo_core::AppError;
use uuid::Uuid;

use crate::feed::DocumentSubscription;

/// Metadata for a document record created at upload time. The blob must
/// already be stored; `file_id` is its reference.
#[derive(Debug, Clone)]
pub struct NewReceiptDocument {
    pub file_name: String,
    pub file_display_name: Option<String>,
    pub mimetype: String,
    pub size: i64,
    pub file_id: BlobRef,
}

/// Terminal result reported by the external extraction job.
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    /// Extraction finished; zero populated fields is legitimate.
    Extracted(ExtractedFields),
    /// Extraction failed; the reason is logged, not persisted.
    Failed(String),
}

/// The hosted document backend, as consumed by this codebase.
#[async_trait]
pub trait ReceiptBackend: Send + Sync {
    /// Create a document record with `status = pending` referencing an
    /// already-stored blob. Returns the full record including its new id.
    async fn create_document(&self, new: NewReceiptDocument)
        -> Result<ReceiptDocument, AppError>;

    /// One-shot lookup. `Ok(None)` means the id does not resolve, which is
    /// distinct from any lifecycle state.
    async fn get_document(&self, id: Uuid) -> Result<Option<ReceiptDocument>, AppError>;

    /// Open a lifecycle subscription for one document. Restartable per
    /// subscriber; dropping the returned handle unsubscribes.
    async fn subscribe(&self, id: Uuid) -> DocumentSubscription;

    /// Write path for the extraction job: apply the terminal transition.
    /// Rejected with `InvalidTransition` if the document already reached a
    /// terminal state.
    async fn apply_extraction(
        &self,
        id: Uuid,
        outcome: ExtractionOutcome,
    ) -> Result<ReceiptDocument, AppError>;

    /// Derive a time-bounded direct-access URL for a stored blob. Fails with
    /// `NotFound` when the reference no longer resolves.
    async fn download_url(&self, blob_ref: &BlobRef) -> Result<String, AppError>;
}
