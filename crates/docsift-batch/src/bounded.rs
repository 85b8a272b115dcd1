//! Bounded-concurrency orchestrator
//!
//! Runs the per-document pipeline over a whole batch inside one process,
//! capped at a fixed number of concurrent in-flight processor calls, with
//! one progress event per completed document.

use crate::ProgressTracker;
use docsift_domain::{Document, Outcome};
use docsift_processor::{DocumentProcessor, ProcessOptions};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

/// Process `documents` with at most `concurrency` pipeline calls in
/// flight at once.
///
/// Admission is gated by a counting semaphore: a permit is acquired
/// *before* each task is spawned and released when the task finishes,
/// regardless of outcome. Acquiring before spawning also bounds
/// outstanding task creation to the cap, so very large batches never pile
/// up idle tasks. The blocking pipeline call runs on the blocking thread
/// pool.
///
/// Every document yields exactly one outcome: a panic anywhere in a unit
/// of work is downgraded to a Failure naming the document. Progress events
/// are emitted in completion order, which may differ from submission
/// order.
pub async fn run_bounded(
    processor: Arc<DocumentProcessor>,
    documents: Vec<Document>,
    options: Arc<ProcessOptions>,
    concurrency: usize,
    tracker: Arc<ProgressTracker>,
) -> Vec<Outcome> {
    let total = documents.len();
    let names: Vec<String> = documents.iter().map(|d| d.name().to_string()).collect();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, document) in documents.into_iter().enumerate() {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("admission semaphore closed");

        let processor = processor.clone();
        let options = options.clone();
        let tracker = tracker.clone();

        tasks.spawn(async move {
            let _permit = permit;
            let name = document.name().to_string();

            let outcome = match tokio::task::spawn_blocking(move || {
                processor.process(&document, &options)
            })
            .await
            {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    error!(document = %name, %join_err, "processing task panicked");
                    Outcome::failure(name, "internal error: processing task panicked")
                }
            };

            tracker.record_outcome(&outcome);
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<Outcome>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(join_err) => {
                // The slot stays empty and is backfilled below.
                error!(%join_err, "batch unit failed to join");
            }
        }
    }

    // Backfill any slot a lost task left empty so the batch still returns
    // exactly one outcome per document.
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                let outcome = Outcome::failure(
                    names[index].clone(),
                    "internal error: processing task was lost",
                );
                tracker.record_outcome(&outcome);
                outcome
            })
        })
        .collect()
}
