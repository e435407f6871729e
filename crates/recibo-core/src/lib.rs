//! Recibo Core Library
//!
//! This crate provides the domain models, error types, configuration, validation,
//! and presentation formatting shared across all Recibo components.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use format::{format_currency, format_file_size, format_upload_date};
pub use models::{
    BlobRef, ExtractedFields, FileUpload, ReceiptDocument, ReceiptStatus, UserContext,
};
pub use validation::{is_pdf, validate_file_metadata};
