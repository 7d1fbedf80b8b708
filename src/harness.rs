//! Concurrent harness that proves a counter never loses an update.
//!
//! The harness fans out `workers` threads, each calling
//! [`Counter::increment`] `increments_per_worker` times, waits for all of them
//! on a completion barrier and then reads the counter exactly once.
//!
//! ```text
//!   Harness                 worker-0 .. worker-N
//!   ───────                 ────────────────────
//!   counter = 0
//!   done = WaitGroup ──clone──► Ready
//!                               Looping(1..=k)   counter.increment()
//!                               Signaled         drop(done)
//!   done.wait() ◄───────────── Terminated
//!   counter.load()
//! ```
//!
//! Each worker drops its [`WaitGroup`] clone right after its last increment,
//! so every increment happens-before `wait()` returns, and the single `load`
//! that follows sees the exact total.
//!
//! A run with zero workers or zero increments spawns nothing and reports `0`.
//! A counter lent to the harness may already hold a value; the tally only
//! counts what the run added on top of it.

#[cfg(feature = "tokio")]
mod task;

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_utils::sync::WaitGroup;
use log::{debug, error, info, trace};

use crate::config::HarnessConfig;
use crate::counters::atomic::AtomicCounter;
use crate::counters::Counter;
use crate::error::{HarnessError, Result};

/// Outcome of a harness run, before it is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// `workers × increments_per_worker`.
    pub expected: u64,
    /// What the counter gained during the run: the value loaded after every
    /// worker finished, minus the value loaded before the first spawn.
    pub observed: u64,
    /// Wall-clock time from the first spawn to the final load.
    pub elapsed: Duration,
}

impl Tally {
    /// Returns `true` if no update was lost.
    pub fn is_exact(&self) -> bool {
        self.observed == self.expected
    }

    /// Number of increments missing from the observed total.
    pub fn lost(&self) -> u64 {
        self.expected.saturating_sub(self.observed)
    }

    /// Returns the observed total, or [`HarnessError::CorrectnessViolation`]
    /// if it differs from the expected one.
    pub fn verify(self) -> Result<u64> {
        if self.is_exact() {
            Ok(self.observed)
        } else {
            error!(
                "correctness violation: expected {}, observed {} ({} lost)",
                self.expected,
                self.observed,
                self.lost()
            );
            Err(HarnessError::CorrectnessViolation {
                expected: self.expected,
                observed: self.observed,
            })
        }
    }
}

/// Runs a fixed number of workers against a counter.
///
/// # Examples
///
/// ```rust
/// use conteggio::config::HarnessConfig;
/// use conteggio::counters::sharded::ShardedCounter;
/// use conteggio::harness::Harness;
///
/// let harness = Harness::new(HarnessConfig::new(8, 1000));
/// assert_eq!(harness.run().unwrap(), 8000);
///
/// let counter = ShardedCounter::new();
/// let tally = harness.count(&counter).unwrap();
/// assert!(tally.is_exact());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub const fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Creates a fresh [`AtomicCounter`], drives it and verifies the total.
    pub fn run(&self) -> Result<u64> {
        let counter = AtomicCounter::new().with_name("ops");
        self.count(&counter)?.verify()
    }

    /// Drives `counter` with OS threads and reports what it gained, without
    /// verifying.
    ///
    /// The counter is borrowed for the duration of the run; the workers are
    /// scoped threads and are all joined before this returns. It need not
    /// start at zero: only the increments made by this run are reported.
    pub fn count<C: Counter + ?Sized>(&self, counter: &C) -> Result<Tally> {
        let expected = self.config.expected_total()?;
        let workers = self.config.workers();
        let increments = self.config.increments_per_worker();
        let started = Instant::now();
        let baseline = counter.load();

        if self.config.is_empty() {
            debug!("{workers} workers × {increments} increments: nothing to spawn");
            return Ok(Tally {
                expected,
                observed: counter.load().wrapping_sub(baseline),
                elapsed: started.elapsed(),
            });
        }

        debug!("spawning {workers} workers × {increments} increments");

        let done = WaitGroup::new();

        let observed = thread::scope(|s| -> Result<u64> {
            let mut handles = Vec::with_capacity(workers);

            for worker in 0..workers {
                let done = done.clone();
                let handle = thread::Builder::new()
                    .name(format!("worker-{worker}"))
                    .spawn_scoped(s, move || {
                        trace!("worker {worker}: ready");
                        trace!("worker {worker}: looping");
                        for _ in 0..increments {
                            counter.increment();
                        }
                        trace!("worker {worker}: signaled");
                        drop(done);
                        trace!("worker {worker}: terminated");
                    })?;
                handles.push(handle);
            }

            done.wait();
            let observed = counter.load().wrapping_sub(baseline);

            // Only to surface panics; the barrier above already ordered every write.
            let mut panicked = None;
            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() && panicked.is_none() {
                    panicked = Some(worker);
                }
            }

            match panicked {
                Some(worker) => Err(HarnessError::WorkerPanicked { worker }),
                None => Ok(observed),
            }
        })?;

        let tally = Tally {
            expected,
            observed,
            elapsed: started.elapsed(),
        };

        info!(
            "{} loaded {} of {} increments in {:?}",
            display_name(counter),
            tally.observed,
            tally.expected,
            tally.elapsed
        );

        Ok(tally)
    }
}

fn display_name<C: Counter + ?Sized>(counter: &C) -> &str {
    match counter.name() {
        "" => "counter",
        name => name,
    }
}

/// Runs `workers` threads that each increment a fresh [`AtomicCounter`]
/// `increments_per_worker` times, and returns the verified total.
///
/// ```rust
/// assert_eq!(conteggio::harness::run(50, 1000).unwrap(), 50_000);
/// assert_eq!(conteggio::harness::run(10, 0).unwrap(), 0);
/// ```
pub fn run(workers: usize, increments_per_worker: u64) -> Result<u64> {
    Harness::new(HarnessConfig::new(workers, increments_per_worker)).run()
}
