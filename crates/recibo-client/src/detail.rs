//! Receipt detail view model
//!
//! Subscribes to one document and folds each delivered snapshot into an
//! explicit display state. `Loading` (no snapshot yet) and `NotFound`
//! (explicit empty lookup) are deliberately separate states; conflating them
//! is the classic bug this model exists to prevent.

use recibo_backend::{DocumentSubscription, ReceiptBackend};
use recibo_core::format::{format_file_size, format_upload_date};
use recibo_core::models::ReceiptDocument;
use std::sync::Arc;
use uuid::Uuid;

/// What the view should render right now.
#[derive(Debug, Clone)]
pub enum DisplayState {
    /// Subscription opened, no snapshot delivered yet.
    Loading,
    /// The id does not resolve to a document.
    NotFound,
    Present(ReceiptDetail),
}

/// Presentation projection of one snapshot. Rebuilt from scratch on every
/// delivery; nothing here is cached across snapshots.
#[derive(Debug, Clone)]
pub struct ReceiptDetail {
    pub document: ReceiptDocument,
    /// Resolved time-bounded access URL, absent when the blob no longer
    /// resolves.
    pub download_url: Option<String>,
    pub has_extracted_data: bool,
    pub size_label: String,
    pub uploaded_label: String,
}

pub struct ReceiptDetailView {
    backend: Arc<dyn ReceiptBackend>,
    subscription: DocumentSubscription,
    state: DisplayState,
}

impl ReceiptDetailView {
    /// Open the view for one document id. The state is `Loading` until the
    /// first snapshot is pumped.
    pub async fn open(backend: Arc<dyn ReceiptBackend>, document_id: Uuid) -> Self {
        let subscription = backend.subscribe(document_id).await;
        ReceiptDetailView {
            backend,
            subscription,
            state: DisplayState::Loading,
        }
    }

    pub fn document_id(&self) -> Uuid {
        self.subscription.document_id()
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Pump the next snapshot into the display state.
    ///
    /// Returns `false` once the feed is gone; the view keeps its last state
    /// in that case. Dropping the view instead of pumping releases the
    /// subscription.
    pub async fn next_snapshot(&mut self) -> bool {
        match self.subscription.recv().await {
            None => false,
            Some(None) => {
                self.state = DisplayState::NotFound;
                true
            }
            Some(Some(document)) => {
                self.state = DisplayState::Present(self.project(document).await);
                true
            }
        }
    }

    /// Pump snapshots until the document reaches a terminal status or the
    /// lookup comes back empty. Used by headless consumers like the CLI.
    pub async fn wait_for_terminal(&mut self) -> &DisplayState {
        loop {
            if !self.next_snapshot().await {
                return &self.state;
            }
            match &self.state {
                DisplayState::NotFound => return &self.state,
                DisplayState::Present(detail) if detail.document.status.is_terminal() => {
                    return &self.state;
                }
                _ => {}
            }
        }
    }

    async fn project(&self, document: ReceiptDocument) -> ReceiptDetail {
        let download_url = match self.backend.download_url(&document.file_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(
                    document_id = %document.id,
                    blob_ref = %document.file_id,
                    error = %e,
                    "Download URL did not resolve"
                );
                None
            }
        };

        ReceiptDetail {
            download_url,
            has_extracted_data: document.has_extracted_data(),
            size_label: format_file_size(document.size),
            uploaded_label: format_upload_date(document.uploaded_at),
            document,
        }
    }
}
