//! Hybrid scheduling: pick an orchestrator per batch call

/// The two scheduling strategies a batch can run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingMode {
    /// Single-process bounded concurrency with per-document progress
    Bounded,
    /// Worker-pool parallelism with per-batch progress
    Turbo,
}

/// Select the orchestrator for a batch.
///
/// Stateless rule, re-evaluated independently for every call: batches at
/// or above `turbo_threshold` documents go to the turbo pool, everything
/// smaller stays on bounded concurrency. The threshold is configuration,
/// never derived from runtime measurement.
pub fn select_mode(document_count: usize, turbo_threshold: usize) -> SchedulingMode {
    if document_count >= turbo_threshold {
        SchedulingMode::Turbo
    } else {
        SchedulingMode::Bounded
    }
}
