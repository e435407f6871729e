//! Error types module
//!
//! All errors are unified under the `AppError` enum: validation, authorization,
//! upload, lookup, storage, and unclassified internal failures. Each variant
//! carries a machine-readable code and a client-facing message; internal
//! details never reach the user.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Non-PDF file, empty batch, malformed metadata. Recovered locally,
    /// surfaced as a notification, never retried.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No authenticated identity. Short-circuits before any network call.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Blob storage or document-record creation failed for one file.
    /// Does not abort the remaining batch.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Document id or blob reference no longer resolves.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A terminal status transition was attempted twice, or a transition
    /// targeted `pending`.
    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation error: {}", err))
    }
}

impl AppError {
    /// Machine-readable error code (e.g. "VALIDATION_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Upload(_) => "UPLOAD_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message (may differ from the internal error message).
    /// Internal and storage failures are collapsed to generic text.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Upload(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidTransition(msg) => msg.clone(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) => "Internal error".to_string(),
            AppError::InternalWithSource { .. } => "Internal error".to_string(),
        }
    }

    /// Whether internal details should be hidden from the user.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            AppError::Storage(_) | AppError::Internal(_) | AppError::InternalWithSource { .. }
        )
    }

    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}
