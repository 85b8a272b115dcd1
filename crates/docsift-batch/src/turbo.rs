//! Turbo orchestrator: worker-pool parallelism for large batches
//!
//! Dispatches documents into a long-lived worker pool in consecutive
//! fixed-size batches, awaiting each whole batch before the next, with one
//! progress event per batch rather than per document.

use crate::ProgressTracker;
use docsift_domain::{Document, Outcome};
use docsift_processor::{DocumentProcessor, ProcessOptions};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::error;

/// Process `documents` on the worker pool in batches of `batch_size`.
///
/// Each worker invocation gets its own `Arc` handles and resolves the
/// extractor registry independently; workers share no mutable state. A
/// worker-side panic is caught and converted to a Failure, and a reply
/// channel that drops without delivering is converted to a synthesized
/// Failure on the dispatching side, so no document can ever lose its
/// outcome. Ordering is observable only at batch granularity.
pub async fn run_turbo(
    processor: Arc<DocumentProcessor>,
    documents: Vec<Document>,
    options: Arc<ProcessOptions>,
    batch_size: usize,
    pool: Arc<rayon::ThreadPool>,
    tracker: &ProgressTracker,
) -> Vec<Outcome> {
    let batch_size = batch_size.max(1);
    let mut outcomes = Vec::with_capacity(documents.len());
    let mut batch_index = 0;

    let mut remaining = documents.into_iter().peekable();
    while remaining.peek().is_some() {
        batch_index += 1;
        let batch: Vec<Document> = remaining.by_ref().take(batch_size).collect();

        let mut replies = Vec::with_capacity(batch.len());
        for document in batch {
            let name = document.name().to_string();
            let (tx, rx) = oneshot::channel();
            let processor = processor.clone();
            let options = options.clone();

            pool.spawn(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| {
                    processor.process(&document, &options)
                }))
                .unwrap_or_else(|_| {
                    error!(document = %document.name(), "worker panicked while processing");
                    Outcome::failure(
                        document.name(),
                        "internal error: worker crashed while processing document",
                    )
                });
                // The dispatcher may have given up on this batch; nothing
                // to do if the receiver is gone.
                let _ = tx.send(outcome);
            });

            replies.push((name, rx));
        }

        let mut successes = 0;
        let mut failures = 0;
        for (name, rx) in replies {
            let outcome = match rx.await {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!(document = %name, "worker dropped without reporting an outcome");
                    Outcome::failure(
                        name,
                        "internal error: worker dropped without reporting an outcome",
                    )
                }
            };
            if outcome.is_success() {
                successes += 1;
            } else {
                failures += 1;
            }
            outcomes.push(outcome);
        }

        tracker.record_batch(batch_index, successes, failures);
    }

    outcomes
}
