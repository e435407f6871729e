//! Drop zone controller
//!
//! Turns one user-selected batch of files into a sequence of gateway calls
//! with per-file outcome reporting. The whole operation is gated on an
//! authenticated identity, which the caller passes in explicitly.
//!
//! Batch semantics: uploads run strictly one at a time in selection order; a
//! failure on one file never stops the next, so partial success is a normal
//! terminal outcome. After the batch settles the user is navigated to the
//! receipt listing regardless of failures.

use recibo_core::models::{FileUpload, UserContext};
use recibo_core::validation::is_pdf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::gateway::UploadGateway;
use crate::notify::{Navigator, Notifier};

/// One successfully uploaded file and the document it produced.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub document_id: uuid::Uuid,
}

/// Per-batch result of the sequential upload fold.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successful uploads, in selection order.
    pub succeeded: Vec<UploadedFile>,
    /// File name plus client-facing error message per rejected file.
    pub failed: Vec<(String, String)>,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn succeeded_names(&self) -> Vec<&str> {
        self.succeeded
            .iter()
            .map(|f| f.file_name.as_str())
            .collect()
    }
}

/// Upload a batch one file at a time, folding per-file results into a
/// `BatchOutcome`. Never short-circuits on failure.
pub async fn upload_batch(
    gateway: &UploadGateway,
    user: &UserContext,
    files: Vec<FileUpload>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for file in files {
        let name = file.name.clone();
        match gateway.upload(user, file).await {
            Ok(document_id) => {
                tracing::debug!(document_id = %document_id, file_name = %name, "Batch file uploaded");
                outcome.succeeded.push(UploadedFile {
                    file_name: name,
                    document_id,
                });
            }
            Err(e) => {
                outcome.failed.push((name, e.client_message()));
            }
        }
    }

    outcome
}

pub struct DropZone {
    gateway: UploadGateway,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    /// How long freshly uploaded names stay visible after the batch settles.
    display_window: Duration,
    is_uploading: bool,
    is_dragging_over: bool,
    recent_uploads: Vec<(String, Instant)>,
}

impl DropZone {
    pub fn new(
        gateway: UploadGateway,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        display_window: Duration,
    ) -> Self {
        DropZone {
            gateway,
            notifier,
            navigator,
            display_window,
            is_uploading: false,
            is_dragging_over: false,
            recent_uploads: Vec::new(),
        }
    }

    /// Whether a batch is currently in flight.
    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    // Drag feedback is purely presentational; no business rule hangs off it.

    pub fn drag_enter(&mut self) {
        self.is_dragging_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging_over = false;
    }

    pub fn is_dragging_over(&self) -> bool {
        self.is_dragging_over
    }

    /// File names uploaded recently enough to still be displayed. Expired
    /// entries are pruned on the way out.
    pub fn recent_uploads(&mut self, now: Instant) -> Vec<String> {
        self.recent_uploads.retain(|(_, deadline)| *deadline > now);
        self.recent_uploads
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Entry point for the drop path; clears drag feedback first.
    pub async fn handle_drop(
        &mut self,
        user: Option<&UserContext>,
        files: Vec<FileUpload>,
        now: Instant,
    ) -> BatchOutcome {
        self.is_dragging_over = false;
        self.handle_batch(user, files, now).await
    }

    /// Shared path for drop and file-picker selection.
    ///
    /// Authorization and validation short-circuit before any upload call:
    /// no user means one "sign in" notification and nothing else; a batch
    /// with no PDFs means one "invalid file" notification and nothing else.
    pub async fn handle_batch(
        &mut self,
        user: Option<&UserContext>,
        files: Vec<FileUpload>,
        now: Instant,
    ) -> BatchOutcome {
        let Some(user) = user else {
            self.notifier.error("Please sign in to upload receipts");
            return BatchOutcome::default();
        };

        let pdf_files: Vec<FileUpload> = files
            .into_iter()
            .filter(|f| is_pdf(&f.name, &f.mimetype))
            .collect();

        if pdf_files.is_empty() {
            self.notifier.error("Please upload only PDF files");
            return BatchOutcome::default();
        }

        self.is_uploading = true;
        let batch_size = pdf_files.len();

        let outcome = upload_batch(&self.gateway, user, pdf_files).await;

        for (name, message) in &outcome.failed {
            tracing::warn!(file_name = %name, error = %message, "Batch file rejected");
            self.notifier.error(message);
        }

        let visible_until = now + self.display_window;
        self.recent_uploads.extend(
            outcome
                .succeeded
                .iter()
                .map(|f| (f.file_name.clone(), visible_until)),
        );

        self.is_uploading = false;

        tracing::info!(
            batch_size,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Upload batch settled"
        );

        // listing view shows the batch result, even on partial failure
        self.navigator.goto_receipt_list();

        outcome
    }
}
