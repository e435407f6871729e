//! User-facing notification and navigation seams
//!
//! The drop zone reports outcomes through these traits instead of a concrete
//! toast/router so the batch contract stays unit-testable.

/// Toast-style notification sink.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// View navigation sink.
pub trait Navigator: Send + Sync {
    /// Move the user to the receipt listing view.
    fn goto_receipt_list(&self);
}

/// Notifier that forwards to the tracing pipeline. Default for headless runs.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notification = %message, "User notification");
    }

    fn error(&self, message: &str) {
        tracing::warn!(notification = %message, "User notification");
    }
}

/// Navigator that only records the intent in the log stream.
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn goto_receipt_list(&self) {
        tracing::info!("Navigating to receipt list");
    }
}
