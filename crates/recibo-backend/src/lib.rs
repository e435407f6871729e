//! Recibo Backend Library
//!
//! The hosted document backend as consumed by the rest of the system: record
//! creation, lookup, push-based lifecycle subscriptions, the extraction-job
//! write path, and download-URL derivation. The hosted service itself is a
//! black box; `InMemoryBackend` is the local realization used for tests and
//! development and is the reference for the contract, most importantly the
//! monotonic status transition.

pub mod feed;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use feed::DocumentSubscription;
pub use memory::InMemoryBackend;
pub use traits::{ExtractionOutcome, NewReceiptDocument, ReceiptBackend};
