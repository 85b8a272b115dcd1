//! Progress events and the per-batch progress tracker

use docsift_domain::Outcome;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::error;

/// What a progress event reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// One document completed successfully (bounded mode)
    Fulfilled,
    /// One document failed (bounded mode)
    Rejected,
    /// One turbo batch finished, successes and failures included
    BatchComplete,
}

/// Point-in-time snapshot of batch progress.
///
/// Events form an append-only sequence ordered by completion time, not
/// submission time. The serialized field names match the wire format the
/// service has always streamed (`progress`, `file`, `elapsedMsSoFar`,
/// `estimatedMsLeft`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Documents processed so far (monotone, terminates at `total`)
    #[serde(rename = "progress")]
    pub processed: usize,

    /// Total documents in this batch call
    pub total: usize,

    /// Document that just completed, or a batch label in turbo mode
    #[serde(rename = "file")]
    pub current_file: String,

    /// What this event reports on
    pub status: ProgressStatus,

    /// Successes so far
    pub successes: usize,

    /// Failures so far
    pub failures: usize,

    /// Milliseconds elapsed since the batch call started
    #[serde(rename = "elapsedMsSoFar")]
    pub elapsed_ms: u64,

    /// Estimated milliseconds remaining, from the running per-document
    /// average
    #[serde(rename = "estimatedMsLeft")]
    pub estimated_ms_left: u64,

    /// Failure message when `status` is `rejected`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Callback invoked once per completed unit of work.
///
/// The core does not persist or transport events itself; the sink is the
/// caller's bridge to SSE, logging, or a test collector.
pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct Counters {
    processed: usize,
    successes: usize,
    failures: usize,
}

/// Serializes progress accounting for one batch call.
///
/// All counter updates and event emission happen inside a single critical
/// section, so two units completing concurrently can never interleave
/// their updates or emit an event that violates
/// `successes + failures == processed`. A tracker is scoped strictly to
/// one batch call and never shared across calls.
pub struct ProgressTracker {
    total: usize,
    started: Instant,
    counters: Mutex<Counters>,
    sink: ProgressSink,
}

impl ProgressTracker {
    /// Create a tracker for a batch of `total` documents.
    pub fn new(total: usize, sink: ProgressSink) -> Self {
        Self {
            total,
            started: Instant::now(),
            counters: Mutex::new(Counters::default()),
            sink,
        }
    }

    /// Record one completed document and emit exactly one event
    /// reflecting the just-updated counters.
    pub fn record_outcome(&self, outcome: &Outcome) {
        let mut counters = self.lock_counters();
        counters.processed += 1;
        let (status, error) = match outcome {
            Outcome::Success(_) => {
                counters.successes += 1;
                (ProgressStatus::Fulfilled, None)
            }
            Outcome::Failure(failure) => {
                counters.failures += 1;
                (ProgressStatus::Rejected, Some(failure.error.clone()))
            }
        };
        let event = self.event(&counters, outcome.name().to_string(), status, error);
        self.emit(event);
    }

    /// Record one completed turbo batch and emit exactly one
    /// `batch_complete` event.
    pub fn record_batch(&self, batch_index: usize, successes: usize, failures: usize) {
        let mut counters = self.lock_counters();
        counters.processed += successes + failures;
        counters.successes += successes;
        counters.failures += failures;
        let event = self.event(
            &counters,
            format!("batch {} complete", batch_index),
            ProgressStatus::BatchComplete,
            None,
        );
        self.emit(event);
    }

    /// Hand an event to the sink. The sink is caller code; a panic inside
    /// it is contained here so it can neither kill the unit of work that
    /// completed nor cause the document to be counted twice through the
    /// lost-task backfill.
    fn emit(&self, event: ProgressEvent) {
        let current_file = event.current_file.clone();
        if catch_unwind(AssertUnwindSafe(|| (self.sink)(event))).is_err() {
            error!(%current_file, "progress sink panicked; event dropped");
        }
    }

    fn lock_counters(&self) -> MutexGuard<'_, Counters> {
        // Counter updates never leave the totals inconsistent, so a
        // poisoned lock is safe to recover.
        match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn event(
        &self,
        counters: &Counters,
        current_file: String,
        status: ProgressStatus,
        error: Option<String>,
    ) -> ProgressEvent {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let estimated_ms_left = if counters.processed > 0 {
            let avg_per_doc = elapsed_ms / counters.processed as u64;
            avg_per_doc * self.total.saturating_sub(counters.processed) as u64
        } else {
            0
        };
        ProgressEvent {
            processed: counters.processed,
            total: self.total,
            current_file,
            status,
            successes: counters.successes,
            failures: counters.failures,
            elapsed_ms,
            estimated_ms_left,
            error,
        }
    }
}
