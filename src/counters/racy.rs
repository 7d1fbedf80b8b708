//! A counter that loses updates under contention.
//!
//! [`RacyCounter`] performs the increment as two separate steps, an atomic
//! load followed by an atomic store. Each step is well defined, so there is no
//! undefined behaviour, but another thread can store between the two and its
//! update is then overwritten. This is the `value = value + 1` race, expressed
//! without `unsafe`.
//!
//! Use it only to show what the harness catches: the final total is
//! nondeterministic and generally lower than expected.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::counters::Counter;

/// A counter whose `add` is a non-atomic read-modify-write.
///
/// Single-threaded use is exact:
///
/// ```rust
/// use conteggio::counters::Counter;
/// use conteggio::counters::racy::RacyCounter;
///
/// let counter = RacyCounter::new();
/// counter.add(2);
/// counter.increment();
/// assert_eq!(counter.load(), 3);
/// ```
pub struct RacyCounter {
    name: &'static str,
    value: AtomicU64,
}

impl RacyCounter {
    /// Creates a new counter initialized to zero, with no name.
    pub const fn new() -> Self {
        RacyCounter {
            name: "",
            value: AtomicU64::new(0),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl Counter for RacyCounter {
    #[inline]
    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn add(&self, delta: u64) {
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current.wrapping_add(delta), Ordering::Relaxed);
    }

    #[inline]
    fn load(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}

impl Default for RacyCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for RacyCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_single_thread_is_exact() {
        let counter = RacyCounter::new();
        for _ in 0..1000 {
            counter.increment();
        }
        assert_eq!(counter.load(), 1000);
    }

    #[test]
    fn test_concurrent_never_overcounts() {
        let counter = RacyCounter::new();

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..10_000 {
                        counter.increment();
                    }
                });
            }
        });

        assert!(counter.load() <= 40_000);
    }

    #[test]
    fn test_name() {
        let counter = RacyCounter::new().with_name("racy");
        assert_eq!(counter.name(), "racy");
        assert_eq!(format!("{:?}", counter), "racy{ 0 }");
    }
}
