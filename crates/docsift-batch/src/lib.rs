//! docsift Batch
//!
//! Batch orchestration: run the per-document pipeline over many documents,
//! isolate every document's failure from its siblings, and report live
//! progress plus a consolidated summary.
//!
//! # Overview
//!
//! The [`BatchEngine`] is the entry point. For every batch call it picks
//! one of two scheduling strategies:
//!
//! - **Bounded concurrency** — one task per document inside the current
//!   process, admission-limited by a counting semaphore, one progress
//!   event per completed document. Used for batches below the turbo
//!   threshold.
//! - **Turbo** — a long-lived worker pool sized to the machine, fed in
//!   fixed-size batches, one progress event per completed batch. Used for
//!   large volumes.
//!
//! Either way the engine guarantees: at most the configured cap of
//! concurrent pipeline calls, exactly one [`Outcome`](docsift_domain::Outcome)
//! per document, `successes + failures == processed` at every emitted
//! event, and no single document able to abort the batch.
//!
//! # Architecture
//!
//! ```text
//! caller → BatchEngine → {bounded | turbo} → DocumentProcessor per document
//!        → aggregate → (successes, BatchSummary) → caller
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use docsift_batch::{BatchConfig, BatchEngine, BatchOptions};
//! use docsift_domain::Document;
//! use docsift_formats::{DetectionRule, ExtractorRegistry, FormatDetector};
//! use docsift_processor::{DocumentProcessor, TextExtractionError, TextExtractor};
//!
//! struct Utf8Text;
//!
//! impl TextExtractor for Utf8Text {
//!     fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
//!         Ok(String::from_utf8_lossy(bytes).into_owned())
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = FormatDetector::new(vec![DetectionRule::new("CRT", ["TECHNICAL REVIEW"])]);
//! let registry = Arc::new(ExtractorRegistry::new());
//! let processor = Arc::new(DocumentProcessor::new(detector, registry, Arc::new(Utf8Text)));
//!
//! let engine = BatchEngine::new(processor, BatchConfig::default())?;
//!
//! let documents = vec![Document::new("r.pdf", b"Technical Review 2026".to_vec())];
//! let report = engine
//!     .run(documents, BatchOptions::default(), Arc::new(|event| {
//!         println!("{}/{} processed", event.processed, event.total);
//!     }))
//!     .await?;
//!
//! println!("{} ok, {} failed", report.summary.success_count, report.summary.failure_count);
//! engine.shutdown();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod bounded;
mod config;
mod engine;
mod error;
mod pool;
mod progress;
mod scheduler;
mod turbo;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, BatchSummary};
pub use config::BatchConfig;
pub use engine::{BatchEngine, BatchOptions, BatchReport};
pub use error::BatchError;
pub use pool::WorkerPool;
pub use progress::{ProgressEvent, ProgressSink, ProgressStatus, ProgressTracker};
pub use scheduler::{select_mode, SchedulingMode};
