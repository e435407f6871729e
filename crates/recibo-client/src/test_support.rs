//! Shared fakes for exercising the client seams in tests.
//!
//! Kept in the library (not `#[cfg(test)]`) so the crate-level integration
//! tests can reuse them.

use async_trait::async_trait;
use recibo_backend::{
    DocumentSubscription, ExtractionOutcome, NewReceiptDocument, ReceiptBackend,
};
use recibo_core::models::{BlobRef, ReceiptDocument};
use recibo_core::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::notify::{Navigator, Notifier};

/// Notifier that records every message for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .filter(|(level, _)| level == "error")
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .filter(|(level, _)| level == "success")
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push(("success".to_string(), message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push(("error".to_string(), message.to_string()));
    }
}

/// Navigator that counts listing navigations.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing_visits(&self) -> usize {
        self.visits.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn goto_receipt_list(&self) {
        self.visits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Backend wrapper that fails `create_document` for one specific file name
/// and counts every create attempt. Everything else is delegated.
pub struct FlakyBackend {
    inner: Arc<dyn ReceiptBackend>,
    failing_file: Option<String>,
    create_calls: AtomicUsize,
}

impl FlakyBackend {
    pub fn passthrough(inner: Arc<dyn ReceiptBackend>) -> Self {
        FlakyBackend {
            inner,
            failing_file: None,
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(inner: Arc<dyn ReceiptBackend>, file_name: &str) -> Self {
        FlakyBackend {
            inner,
            failing_file: Some(file_name.to_string()),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptBackend for FlakyBackend {
    async fn create_document(
        &self,
        new: NewReceiptDocument,
    ) -> Result<ReceiptDocument, AppError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_file.as_deref() == Some(new.file_name.as_str()) {
            return Err(AppError::Upload(format!(
                "Server rejected {}",
                new.file_name
            )));
        }

        self.inner.create_document(new).await
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<ReceiptDocument>, AppError> {
        self.inner.get_document(id).await
    }

    async fn subscribe(&self, id: Uuid) -> DocumentSubscription {
        self.inner.subscribe(id).await
    }

    async fn apply_extraction(
        &self,
        id: Uuid,
        outcome: ExtractionOutcome,
    ) -> Result<ReceiptDocument, AppError> {
        self.inner.apply_extraction(id, outcome).await
    }

    async fn download_url(&self, blob_ref: &BlobRef) -> Result<String, AppError> {
        self.inner.download_url(blob_ref).await
    }
}
