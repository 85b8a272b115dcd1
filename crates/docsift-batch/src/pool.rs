//! Long-lived worker pool for turbo mode

use crate::BatchError;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// The turbo worker pool: a lazily created, explicitly shutdown-able
/// thread pool reused across batch calls.
///
/// The pool is the only resource shared across calls. It is created on
/// first acquisition, sized `min(available cores, max_workers)`, handed
/// out as a shared handle, and never implicitly duplicated. [`shutdown`]
/// releases it; worker threads exit once the last in-flight handle drops.
/// There is no backpressure of its own: jobs queue inside the pool when
/// all workers are busy.
///
/// [`shutdown`]: WorkerPool::shutdown
pub struct WorkerPool {
    max_workers: usize,
    slot: Mutex<Option<Arc<rayon::ThreadPool>>>,
}

impl WorkerPool {
    /// Create a pool handle; no threads are started until
    /// [`acquire`](WorkerPool::acquire) is first called.
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            slot: Mutex::new(None),
        }
    }

    /// Number of worker threads the pool will run with.
    pub fn target_workers(&self) -> usize {
        num_cpus::get().min(self.max_workers).max(1)
    }

    /// Get the pool, creating it on first use.
    pub fn acquire(&self) -> Result<Arc<rayon::ThreadPool>, BatchError> {
        let mut slot = self.lock_slot();
        if let Some(pool) = slot.as_ref() {
            debug!("reusing turbo worker pool");
            return Ok(pool.clone());
        }

        let workers = self.target_workers();
        info!(workers, "creating turbo worker pool");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("docsift-turbo-{}", i))
            .build()
            .map_err(|e| BatchError::Pool(e.to_string()))?;

        let pool = Arc::new(pool);
        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Release the pool. The next acquisition creates a fresh one.
    pub fn shutdown(&self) {
        if self.lock_slot().take().is_some() {
            info!("turbo worker pool shut down");
        }
    }

    /// Whether a pool currently exists.
    pub fn is_active(&self) -> bool {
        self.lock_slot().is_some()
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<Arc<rayon::ThreadPool>>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("max_workers", &self.max_workers)
            .field("active", &self.is_active())
            .finish()
    }
}
