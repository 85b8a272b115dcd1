//! Configuration for the batch engine

use serde::{Deserialize, Serialize};

/// Configuration for batch processing.
///
/// The defaults are the empirical values the service has run with in
/// production; none of them is derived from runtime measurement, and the
/// turbo threshold in particular is re-evaluated independently for every
/// batch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Concurrency cap used when the caller does not request one
    pub default_concurrency: usize,

    /// Upper bound any caller-requested concurrency is clamped to
    pub max_concurrency: usize,

    /// Documents dispatched per turbo batch (progress granularity in
    /// turbo mode)
    pub turbo_batch_size: usize,

    /// Batch size at or above which the turbo orchestrator is selected
    pub turbo_threshold: usize,

    /// Cap on turbo worker threads; the pool is sized
    /// `min(available cores, max_workers)`
    pub max_workers: usize,

    /// Hard cap on documents per batch call; larger batches are rejected
    /// before scheduling starts
    pub max_documents: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            default_concurrency: 15,
            max_concurrency: 50,
            turbo_batch_size: 50,
            turbo_threshold: 100,
            max_workers: 16,
            max_documents: 15_000,
        }
    }
}

impl BatchConfig {
    /// High-throughput preset: wider concurrency and larger turbo batches
    /// for bulk back-office runs where progress granularity matters less.
    pub fn high_throughput() -> Self {
        Self {
            default_concurrency: 50,
            max_concurrency: 100,
            turbo_batch_size: 200,
            turbo_threshold: 50,
            max_workers: 32,
            max_documents: 50_000,
        }
    }

    /// Conservative preset: tighter caps for small deployments sharing a
    /// host with other services.
    pub fn conservative() -> Self {
        Self {
            default_concurrency: 5,
            max_concurrency: 10,
            turbo_batch_size: 25,
            turbo_threshold: 200,
            max_workers: 4,
            max_documents: 2_000,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_concurrency == 0 {
            return Err("default_concurrency must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.default_concurrency > self.max_concurrency {
            return Err("default_concurrency cannot exceed max_concurrency".to_string());
        }
        if self.turbo_batch_size == 0 {
            return Err("turbo_batch_size must be greater than 0".to_string());
        }
        if self.turbo_threshold == 0 {
            return Err("turbo_threshold must be greater than 0".to_string());
        }
        if self.max_workers == 0 {
            return Err("max_workers must be greater than 0".to_string());
        }
        if self.max_documents == 0 {
            return Err("max_documents must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
