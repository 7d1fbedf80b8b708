//! Harness configuration.

use crate::error::{HarnessError, Result};

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 50;

/// Default number of increments each worker performs.
pub const DEFAULT_INCREMENTS_PER_WORKER: u64 = 1000;

/// How many workers to start and how many increments each one performs.
///
/// # Examples
///
/// ```rust
/// use conteggio::config::HarnessConfig;
///
/// let config = HarnessConfig::default();
/// assert_eq!(config.workers(), 50);
/// assert_eq!(config.increments_per_worker(), 1000);
/// assert_eq!(config.expected_total().unwrap(), 50_000);
///
/// let config = HarnessConfig::new(4, 10).with_workers(8);
/// assert_eq!(config.expected_total().unwrap(), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    workers: usize,
    increments_per_worker: u64,
}

impl HarnessConfig {
    /// Creates a configuration with the given worker and increment counts.
    pub const fn new(workers: usize, increments_per_worker: u64) -> Self {
        Self {
            workers,
            increments_per_worker,
        }
    }

    /// Sets the number of workers, returning `self` for method chaining.
    pub const fn with_workers(self, workers: usize) -> Self {
        Self { workers, ..self }
    }

    /// Sets the number of increments per worker, returning `self` for method chaining.
    pub const fn with_increments_per_worker(self, increments_per_worker: u64) -> Self {
        Self {
            increments_per_worker,
            ..self
        }
    }

    pub const fn workers(&self) -> usize {
        self.workers
    }

    pub const fn increments_per_worker(&self) -> u64 {
        self.increments_per_worker
    }

    /// Returns `true` when the run performs no increments at all, in which
    /// case no worker is spawned.
    pub const fn is_empty(&self) -> bool {
        self.workers == 0 || self.increments_per_worker == 0
    }

    /// The total a correct counter must report: `workers × increments_per_worker`.
    ///
    /// Fails with [`HarnessError::Overflow`] if the product does not fit in a `u64`.
    pub fn expected_total(&self) -> Result<u64> {
        (self.workers as u64)
            .checked_mul(self.increments_per_worker)
            .ok_or(HarnessError::Overflow {
                workers: self.workers,
                increments: self.increments_per_worker,
            })
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS, DEFAULT_INCREMENTS_PER_WORKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = HarnessConfig::default();
        assert_eq!(config.workers(), DEFAULT_WORKERS);
        assert_eq!(config.increments_per_worker(), DEFAULT_INCREMENTS_PER_WORKER);
        assert!(!config.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = HarnessConfig::default()
            .with_workers(3)
            .with_increments_per_worker(7);
        assert_eq!(config, HarnessConfig::new(3, 7));
        assert_eq!(config.expected_total().unwrap(), 21);
    }

    #[test]
    fn test_empty() {
        assert!(HarnessConfig::new(0, 10).is_empty());
        assert!(HarnessConfig::new(10, 0).is_empty());
        assert_eq!(HarnessConfig::new(10, 0).expected_total().unwrap(), 0);
    }

    #[test]
    fn test_overflow() {
        let config = HarnessConfig::new(2, u64::MAX);
        assert!(matches!(
            config.expected_total(),
            Err(HarnessError::Overflow {
                workers: 2,
                increments: u64::MAX
            })
        ));
    }
}
