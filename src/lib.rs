//! # Conteggio - Atomic Counters Under Concurrent Load
//!
//! A small library built around one guarantee: when many threads increment a
//! shared counter, the final value is exactly the number of increments,
//! whatever the scheduling, interleaving or number of threads.
//!
//! ## The Problem
//!
//! A naive `value = value + 1` on shared memory is a read followed by a write.
//! Two threads can read the same value and both write `value + 1`, and one
//! update disappears. The final count is nondeterministic and usually too low.
//!
//! ## The Solution
//!
//! [`AtomicCounter`](counters::atomic::AtomicCounter) performs the increment
//! with a single hardware read-modify-write (`fetch_add`). No lock, no
//! allocation, no retry loop. The [`Harness`](harness::Harness) fans out
//! workers, waits for all of them on a completion barrier and reads the
//! counter once, after every increment happened-before the read.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               50 workers × 1,000 increments                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  AtomicCounter   fetch_add            ops: 50000 (every run)    │
//! │  ShardedCounter  fetch_add per slot   ops: 50000 (every run)    │
//! │  RacyCounter     load, then store     ops: < 50000 (varies)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use conteggio::config::HarnessConfig;
//! use conteggio::counters::Counter;
//! use conteggio::counters::atomic::AtomicCounter;
//! use conteggio::harness::Harness;
//!
//! // One call: 50 workers, 1000 increments each, verified.
//! assert_eq!(conteggio::harness::run(50, 1000).unwrap(), 50_000);
//!
//! // Or drive a counter you own.
//! let counter = AtomicCounter::new().with_name("ops");
//! let tally = Harness::new(HarnessConfig::new(8, 500)).count(&counter).unwrap();
//! assert_eq!(tally.verify().unwrap(), 4000);
//! assert_eq!(counter.load(), 4000);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `serde` | [`report::RunReport`] |
//! | `json` | `RunReport::to_json` |
//! | `tokio` | `Harness::run_async` / `Harness::count_async` |
//! | `cli` | the `conteggio` binary |
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade: one `debug!` when a run
//! starts, `trace!` per worker transition, an `info!` summary and an `error!`
//! when a run fails verification. Install any logger to see them.

pub mod config;
pub mod counters;
pub mod error;
pub mod harness;

#[cfg(feature = "serde")]
pub mod report;

pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use harness::{run, Harness, Tally};
