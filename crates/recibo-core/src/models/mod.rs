//! Domain models

pub mod receipt;
pub mod user;

pub use receipt::{BlobRef, ExtractedFields, FileUpload, ReceiptDocument, ReceiptStatus};
pub use user::UserContext;
