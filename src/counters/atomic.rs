//! Single-cell atomic counter.
//!
//! [`AtomicCounter`] is the counter the harness exists to prove correct: one
//! `AtomicU64` updated with a hardware read-modify-write. There is no lock on
//! the increment path, and nothing allocates or branches beyond the
//! `fetch_add` itself.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

use crate::counters::Counter;

/// An unsigned counter backed by a single cache-padded [`AtomicU64`].
///
/// Increments use `fetch_add` with `Release` ordering and reads use
/// `Acquire`, so a `load` observes every increment that happened-before it.
///
/// # Examples
///
/// ```rust
/// use conteggio::counters::Counter;
/// use conteggio::counters::atomic::AtomicCounter;
/// use std::thread;
///
/// let counter = AtomicCounter::new();
///
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| {
///             for _ in 0..1000 {
///                 counter.increment();
///             }
///         });
///     }
/// });
///
/// assert_eq!(counter.load(), 4000);
/// ```
pub struct AtomicCounter {
    name: &'static str,
    value: CachePadded<AtomicU64>,
}

impl AtomicCounter {
    /// Creates a new counter initialized to zero, with no name.
    ///
    /// ```rust
    /// use conteggio::counters::Counter;
    /// use conteggio::counters::atomic::AtomicCounter;
    ///
    /// static OPS: AtomicCounter = AtomicCounter::new();
    /// assert_eq!(OPS.load(), 0);
    /// ```
    pub const fn new() -> Self {
        AtomicCounter {
            name: "",
            value: CachePadded::new(AtomicU64::new(0)),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl Counter for AtomicCounter {
    #[inline]
    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn add(&self, delta: u64) {
        self.value.fetch_add(delta, Ordering::Release);
    }

    #[inline]
    fn load(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}

impl Default for AtomicCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for AtomicCounter {
    /// Output format: `name{ value }`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.load())
    }
}
