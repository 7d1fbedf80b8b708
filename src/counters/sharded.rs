//! Unsigned counter with sharded atomic storage.
//!
//! This module provides [`ShardedCounter`], a counter with the same contract as
//! [`AtomicCounter`](crate::counters::atomic::AtomicCounter) that spreads
//! updates across 64 cache-line-padded slots to avoid cache line bouncing
//! between cores.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;
use std::fmt::Debug;

use crate::counters::{Counter, GetComponentCounter, NUM_COMPONENTS, THREAD_SLOT_INDEX};

/// An unsigned counter using sharded atomic storage.
///
/// Each thread adds into its own slot; [`load`](Counter::load) sums all slots.
/// Every slot is still updated with an atomic `fetch_add`, so threads that
/// share a slot never lose updates.
///
/// # Memory Usage
///
/// Each `ShardedCounter` uses approximately 4KB of memory (64 slots × 64 bytes).
///
/// # Examples
///
/// ```rust
/// use conteggio::counters::Counter;
/// use conteggio::counters::sharded::ShardedCounter;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(ShardedCounter::new());
/// let mut handles = vec![];
///
/// for _ in 0..4 {
///     let c = Arc::clone(&counter);
///     handles.push(thread::spawn(move || {
///         for _ in 0..1000 {
///             c.increment();
///         }
///     }));
/// }
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(counter.load(), 4000);
/// ```
pub struct ShardedCounter {
    name: &'static str,
    components: [CachePadded<AtomicU64>; NUM_COMPONENTS],
}

impl GetComponentCounter for ShardedCounter {
    type CounterType = AtomicU64;

    #[inline]
    fn get_component_counter(&self) -> &AtomicU64 {
        THREAD_SLOT_INDEX.with(|idx| &self.components[*idx])
    }
}

impl ShardedCounter {
    /// Creates a new counter with all 64 slots at zero and no name.
    pub const fn new() -> Self {
        const ZERO: CachePadded<AtomicU64> = CachePadded::new(AtomicU64::new(0));
        ShardedCounter {
            components: [ZERO; NUM_COMPONENTS],
            name: "",
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    /// Returns the current thread's contribution to the total.
    #[inline]
    pub fn local_value(&self) -> u64 {
        self.get_component_counter().load(Ordering::Acquire)
    }
}

impl Counter for ShardedCounter {
    #[inline]
    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn add(&self, delta: u64) {
        self.get_component_counter()
            .fetch_add(delta, Ordering::Release);
    }

    /// Sums all slots.
    ///
    /// The sum is exact once every writer has synchronized with the caller;
    /// while writers are still running it is only a lower bound.
    #[inline]
    fn load(&self) -> u64 {
        self.components
            .iter()
            .map(|slot| slot.load(Ordering::Acquire))
            .sum()
    }
}

impl Default for ShardedCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ShardedCounter {
    /// Formats the counter showing non-zero slots.
    ///
    /// Output format: `name{ [slot]:value [slot]:value ... }`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{", self.name)?;
        for (i, slot) in self.components.iter().enumerate() {
            let val = slot.load(Ordering::Relaxed);
            if val != 0 {
                write!(f, " [{i}]:{val}")?;
            }
        }
        write!(f, " }}")
    }
}
