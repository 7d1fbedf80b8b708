//! Counter implementations and the shared infrastructure behind them.
//!
//! Every counter in this module implements [`Counter`], the contract the
//! [`Harness`](crate::harness::Harness) drives: `add`/`increment` from any
//! number of threads, then a single `load` once all writers are done.
//!
//! | Type | Storage | Loses updates? |
//! |------|---------|----------------|
//! | [`AtomicCounter`](atomic::AtomicCounter) | one cache-padded `AtomicU64` | never |
//! | [`ShardedCounter`](sharded::ShardedCounter) | 64 cache-padded slots, summed on read | never |
//! | [`RacyCounter`](racy::RacyCounter) | one `AtomicU64`, load then store | yes, under contention |
//!
//! # Thread Slot Assignment
//!
//! The sharded counter needs each thread to write to its own slot:
//!
//! 1. A global atomic counter (`NEXT_SLOT_ID`) assigns sequential IDs to threads
//! 2. Each thread stores its assigned slot index in thread-local storage
//! 3. The slot index is taken modulo `NUM_COMPONENTS` (64)
//!
//! After 64 threads, assignment wraps around (thread 64 shares slot 0 with
//! thread 0). Sharing a slot only costs contention: every slot is itself
//! updated with an atomic read-modify-write.

pub mod atomic;
pub mod racy;
pub mod sharded;

use atomic_traits::Atomic;
use std::{
    fmt::Debug,
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Number of slots used by [`ShardedCounter`](sharded::ShardedCounter).
///
/// Each slot is cache-line padded, so a sharded counter occupies
/// `64 slots × 64 bytes = 4,096 bytes`.
pub(crate) const NUM_COMPONENTS: usize = 64;

static NEXT_SLOT_ID: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    /// Slot index of the current thread, assigned lazily and stable for the
    /// lifetime of the thread.
    pub(crate) static THREAD_SLOT_INDEX: usize = get_next_slot_id();
}

/// Assigns the next slot ID to a thread. The result is in `[0, NUM_COMPONENTS)`.
///
/// `Relaxed` is enough here: only atomicity of the ID itself matters.
pub fn get_next_slot_id() -> usize {
    NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed) % NUM_COMPONENTS
}

/// A shared unsigned accumulator that many threads may update concurrently.
///
/// # Contract
///
/// - `add` is linearizable with respect to every other `add` on the same
///   instance: no update is lost and no intermediate state is visible.
///   It never allocates and never blocks.
/// - `load` has acquire semantics. Once every writer has synchronized with
///   the reader (for example through a [`WaitGroup`](crossbeam_utils::sync::WaitGroup)),
///   it returns the exact sum of all completed `add` calls.
///
/// [`RacyCounter`](racy::RacyCounter) deliberately breaks the first point.
///
/// # Examples
///
/// ```rust
/// use conteggio::counters::Counter;
/// use conteggio::counters::atomic::AtomicCounter;
///
/// let counter = AtomicCounter::new().with_name("ops");
/// counter.increment();
/// counter.add(4);
///
/// assert_eq!(counter.load(), 5);
/// assert_eq!(counter.name(), "ops");
/// ```
pub trait Counter: Debug + Send + Sync {
    /// Returns the name of this counter, or an empty string if unnamed.
    fn name(&self) -> &str;

    /// Atomically adds `delta` to the counter.
    fn add(&self, delta: u64);

    /// Atomically adds one to the counter.
    #[inline]
    fn increment(&self) {
        self.add(1);
    }

    /// Returns the current value.
    fn load(&self) -> u64;
}

impl Display for dyn Counter + '_ {
    /// Formats the counter as `name:value` if named, or just `value` otherwise.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.name().is_empty() {
            write!(f, "{}:{}", self.name(), self.load())
        } else {
            write!(f, "{}", self.load())
        }
    }
}

/// Internal trait for accessing the current thread's slot of a sharded counter.
pub trait GetComponentCounter {
    /// The atomic type used for individual slots.
    type CounterType: Atomic;

    /// Returns a reference to the current thread's slot, selected through
    /// `THREAD_SLOT_INDEX`.
    fn get_component_counter(&self) -> &Self::CounterType;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_in_range() {
        for _ in 0..(NUM_COMPONENTS * 2) {
            assert!(get_next_slot_id() < NUM_COMPONENTS);
        }
    }

    #[test]
    fn test_thread_slot_is_stable() {
        let first = THREAD_SLOT_INDEX.with(|idx| *idx);
        let second = THREAD_SLOT_INDEX.with(|idx| *idx);
        assert_eq!(first, second);
    }
}
