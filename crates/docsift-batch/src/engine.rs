//! Batch engine: the facade callers drive batches through

use crate::aggregate::{aggregate, BatchSummary};
use crate::bounded::run_bounded;
use crate::pool::WorkerPool;
use crate::scheduler::{select_mode, SchedulingMode};
use crate::turbo::run_turbo;
use crate::{BatchConfig, BatchError, ProgressSink, ProgressTracker};
use docsift_domain::{Document, DocumentData, FormatTag};
use docsift_processor::{DocumentProcessor, ProcessOptions};
use std::sync::Arc;
use tracing::info;

/// Per-call options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Format every document is expected to have; anything else fails
    /// with a format mismatch
    pub expected_format: Option<FormatTag>,

    /// Ask extractors to report pattern diagnostics in their successes
    pub capture_diagnostics: bool,

    /// Concurrency cap for bounded mode; defaults to the configured
    /// `default_concurrency` and is clamped to `max_concurrency`
    pub concurrency: Option<usize>,
}

/// What a finished batch call hands back to the caller.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Successful extractions, ready for rendering
    pub successes: Vec<DocumentData>,

    /// The consolidated summary, failures included
    pub summary: BatchSummary,
}

/// Drives whole batches through the pipeline.
///
/// The engine owns the turbo worker pool (the only resource shared across
/// calls) and a shared [`DocumentProcessor`]. Every call validates its
/// preconditions, selects a scheduling mode from the batch size, runs the
/// chosen orchestrator, and aggregates the outcomes. Batch calls are
/// otherwise independent: progress counters never outlive a call, and no
/// state about previous batches is kept.
pub struct BatchEngine {
    config: BatchConfig,
    processor: Arc<DocumentProcessor>,
    pool: WorkerPool,
}

impl BatchEngine {
    /// Create an engine from a processor and a validated configuration.
    pub fn new(processor: Arc<DocumentProcessor>, config: BatchConfig) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::Config)?;
        let pool = WorkerPool::new(config.max_workers);
        Ok(Self {
            config,
            processor,
            pool,
        })
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// The turbo worker pool (exposed for lifecycle inspection).
    pub fn worker_pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Process a batch of documents, emitting progress to `sink`.
    ///
    /// Fails fast on an empty batch or one exceeding `max_documents`;
    /// every other error stays inside its document's Failure outcome.
    pub async fn run(
        &self,
        documents: Vec<Document>,
        options: BatchOptions,
        sink: ProgressSink,
    ) -> Result<BatchReport, BatchError> {
        if documents.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        if documents.len() > self.config.max_documents {
            return Err(BatchError::TooManyDocuments {
                count: documents.len(),
                limit: self.config.max_documents,
            });
        }

        let total = documents.len();
        let process_options = Arc::new(ProcessOptions {
            expected_format: options.expected_format,
            capture_diagnostics: options.capture_diagnostics,
        });
        let tracker = Arc::new(ProgressTracker::new(total, sink));

        let outcomes = match select_mode(total, self.config.turbo_threshold) {
            SchedulingMode::Turbo => {
                let pool = self.pool.acquire()?;
                info!(
                    documents = total,
                    workers = pool.current_num_threads(),
                    batch_size = self.config.turbo_batch_size,
                    "processing batch in turbo mode"
                );
                run_turbo(
                    self.processor.clone(),
                    documents,
                    process_options,
                    self.config.turbo_batch_size,
                    pool,
                    &tracker,
                )
                .await
            }
            SchedulingMode::Bounded => {
                let concurrency = options
                    .concurrency
                    .unwrap_or(self.config.default_concurrency)
                    .clamp(1, self.config.max_concurrency);
                info!(
                    documents = total,
                    concurrency, "processing batch in bounded mode"
                );
                run_bounded(
                    self.processor.clone(),
                    documents,
                    process_options,
                    concurrency,
                    tracker.clone(),
                )
                .await
            }
        };

        let (successes, summary) = aggregate(outcomes);
        info!(
            total = summary.total,
            successes = summary.success_count,
            failures = summary.failure_count,
            "batch complete"
        );
        Ok(BatchReport { successes, summary })
    }

    /// Release the turbo worker pool; the next turbo batch creates a
    /// fresh one.
    pub fn shutdown(&self) {
        self.pool.shutdown();
    }
}
