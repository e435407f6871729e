//! Recibo Client Library
//!
//! The client half of the upload-and-track lifecycle: the upload gateway
//! (per-file contract against storage and the document backend), the drop
//! zone controller (batch orchestration with authorization gating and
//! per-file outcome reporting), and the receipt detail view model
//! (subscription-driven three-state display).

pub mod detail;
pub mod dropzone;
pub mod gateway;
pub mod notify;
pub mod test_support;

// Re-export commonly used types
pub use detail::{DisplayState, ReceiptDetail, ReceiptDetailView};
pub use dropzone::{upload_batch, BatchOutcome, DropZone, UploadedFile};
pub use gateway::UploadGateway;
pub use notify::{Navigator, Notifier, TracingNavigator, TracingNotifier};
