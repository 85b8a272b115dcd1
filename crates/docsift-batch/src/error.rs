//! Batch-level error types
//!
//! These are the only batch-fatal conditions. Per-document failures never
//! surface here; they become Failure outcomes instead.

use thiserror::Error;

/// Errors that reject a batch call before (or instead of) scheduling it.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The caller submitted an empty document list
    #[error("no documents were provided")]
    EmptyBatch,

    /// The caller submitted more documents than the configured hard cap
    #[error("document count {count} exceeds the configured limit ({limit})")]
    TooManyDocuments {
        /// Number of documents submitted
        count: usize,
        /// Configured `max_documents`
        limit: usize,
    },

    /// The turbo worker pool could not be created
    #[error("worker pool initialization failed: {0}")]
    Pool(String),

    /// The engine was constructed with an invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
