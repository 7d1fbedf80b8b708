//! Serializable summary of a harness run.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature; [`RunReport::to_json`] also
//! needs `json`:
//!
//! ```toml
//! [dependencies]
//! conteggio = { version = "0.1", features = ["json"] }
//! ```

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;
use crate::counters::Counter;
use crate::harness::Tally;

/// A point-in-time record of one run.
///
/// # Examples
///
/// ```rust
/// use conteggio::config::HarnessConfig;
/// use conteggio::counters::atomic::AtomicCounter;
/// use conteggio::harness::Harness;
/// use conteggio::report::RunReport;
///
/// let config = HarnessConfig::new(4, 25);
/// let counter = AtomicCounter::new().with_name("ops");
/// let tally = Harness::new(config).count(&counter).unwrap();
///
/// let report = RunReport::new(&counter, &config, &tally);
/// assert_eq!(report.counter, "ops");
/// assert_eq!(report.observed, 100);
/// assert_eq!(report.to_string(), "ops: 100");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// Name of the counter that was driven.
    pub counter: String,
    pub workers: usize,
    pub increments_per_worker: u64,
    pub expected: u64,
    pub observed: u64,
    /// Wall-clock duration of the run in microseconds.
    pub elapsed_us: u64,
    /// Optional timestamp in milliseconds since Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp_ms: Option<u64>,
}

impl RunReport {
    /// Builds a report from a finished run.
    pub fn new(counter: &dyn Counter, config: &HarnessConfig, tally: &Tally) -> Self {
        Self {
            counter: if counter.name().is_empty() {
                "(unnamed)".to_string()
            } else {
                counter.name().to_string()
            },
            workers: config.workers(),
            increments_per_worker: config.increments_per_worker(),
            expected: tally.expected,
            observed: tally.observed,
            elapsed_us: u64::try_from(tally.elapsed.as_micros()).unwrap_or(u64::MAX),
            timestamp_ms: None,
        }
    }

    /// Sets the timestamp, returning `self` for method chaining.
    pub fn with_timestamp(self, timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            ..self
        }
    }

    /// Stamps the report with the current system time.
    pub fn stamped_now(self) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        self.with_timestamp(now)
    }

    /// Returns `true` if no update was lost.
    pub fn is_exact(&self) -> bool {
        self.observed == self.expected
    }

    /// Serializes the report to JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Display for RunReport {
    /// Formats the report as the single output line `name: observed`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.counter, self.observed)
    }
}
