//! Recibo Storage Library
//!
//! Blob storage abstraction and implementations for the receipt upload flow.
//! The gateway talks to the `BlobStorage` trait; the `local` backend keeps
//! bytes on the filesystem, the `memory` backend keeps them in-process for
//! tests and throwaway runs.
//!
//! # Blob key format
//!
//! Every stored blob gets the key `receipts/{uuid}_{sanitized_filename}`.
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalBlobStorage;
pub use memory::InMemoryBlobStorage;
pub use traits::{BlobStorage, StorageError, StorageResult};
