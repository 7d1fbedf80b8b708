//! Harness variant running workers as tasks on a multi-threaded tokio runtime.
//!
//! The fan-out is a [`JoinSet`]; draining it to empty is the completion
//! barrier. Tasks are `'static`, so the counter is shared through an [`Arc`]
//! instead of a scoped borrow.
//!
//! A current-thread runtime still gives the right total, but it never runs
//! two increments at the same time and so proves nothing about atomicity.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, trace};
use tokio::task::JoinSet;

use crate::counters::atomic::AtomicCounter;
use crate::counters::Counter;
use crate::error::{HarnessError, Result};
use crate::harness::{display_name, Harness, Tally};

impl Harness {
    /// Creates a fresh [`AtomicCounter`], drives it with tokio tasks and
    /// verifies the total.
    pub async fn run_async(&self) -> Result<u64> {
        let counter = Arc::new(AtomicCounter::new().with_name("ops"));
        self.count_async(counter).await?.verify()
    }

    /// Drives `counter` with one spawned task per worker and reports what it
    /// gained, without verifying.
    ///
    /// Every task is joined before this returns, including after a failure:
    /// the increment loops never await, so aborting the set would not stop
    /// them. The first failure is reported once the set is drained.
    pub async fn count_async<C: Counter + ?Sized + 'static>(
        &self,
        counter: Arc<C>,
    ) -> Result<Tally> {
        let expected = self.config.expected_total()?;
        let workers = self.config.workers();
        let increments = self.config.increments_per_worker();
        let started = Instant::now();
        let baseline = counter.load();

        if self.config.is_empty() {
            debug!("{workers} tasks × {increments} increments: nothing to spawn");
            return Ok(Tally {
                expected,
                observed: counter.load().wrapping_sub(baseline),
                elapsed: started.elapsed(),
            });
        }

        debug!("spawning {workers} tasks × {increments} increments");

        let mut tasks = JoinSet::new();
        for worker in 0..workers {
            let counter = Arc::clone(&counter);
            tasks.spawn(async move {
                trace!("task {worker}: ready");
                trace!("task {worker}: looping");
                for _ in 0..increments {
                    counter.increment();
                }
                trace!("task {worker}: signaled");
                worker
            });
        }

        let mut failed = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(worker) => trace!("task {worker}: terminated"),
                Err(err) => {
                    failed.get_or_insert(HarnessError::TaskFailed(err.to_string()));
                }
            }
        }
        if let Some(err) = failed {
            return Err(err);
        }

        let tally = Tally {
            expected,
            observed: counter.load().wrapping_sub(baseline),
            elapsed: started.elapsed(),
        };

        info!(
            "{} loaded {} of {} increments in {:?} (tokio)",
            display_name(counter.as_ref()),
            tally.observed,
            tally.expected,
            tally.elapsed
        );

        Ok(tally)
    }
}
