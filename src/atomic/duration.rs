//! Duration cell stored as whole nanoseconds.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A [`Duration`] shared across threads without caller locking.
///
/// The value is kept as nanoseconds in a 64-bit atomic, so it covers about
/// 584 years. Longer durations saturate when stored. [`add`](Self::add)
/// accumulates an increment rather than replacing the value, which makes
/// the cell a natural elapsed-time accumulator.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use syncrs::AtomicDuration;
///
/// let busy = AtomicDuration::default();
/// busy.add(Duration::from_millis(20));
/// assert_eq!(busy.add(Duration::from_millis(5)), Duration::from_millis(25));
/// ```
#[derive(Default)]
pub struct AtomicDuration {
    nanos: AtomicU64,
}

fn to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

impl AtomicDuration {
    /// Creates a cell holding `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(to_nanos(duration)),
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    /// Stores `duration`.
    pub fn set(&self, duration: Duration) {
        self.nanos.store(to_nanos(duration), Ordering::SeqCst);
    }

    /// Stores zero and returns the previous value.
    pub fn reset(&self) -> Duration {
        Duration::from_nanos(self.nanos.swap(0, Ordering::SeqCst))
    }

    /// Adds `delta` and returns the new total. Saturates at the maximum.
    pub fn add(&self, delta: Duration) -> Duration {
        let delta = to_nanos(delta);
        self.update(|current| current.saturating_add(delta))
    }

    /// Subtracts `delta` and returns the new total. Saturates at zero.
    pub fn sub(&self, delta: Duration) -> Duration {
        let delta = to_nanos(delta);
        self.update(|current| current.saturating_sub(delta))
    }

    /// Replaces the value with `new` iff it currently equals `old`.
    ///
    /// An `old` beyond the representable range never matches.
    pub fn compare_and_swap(&self, old: Duration, new: Duration) -> bool {
        let Ok(old) = u64::try_from(old.as_nanos()) else {
            return false;
        };
        self.nanos
            .compare_exchange(
                old,
                to_nanos(new),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    fn update(&self, f: impl Fn(u64) -> u64) -> Duration {
        let mut current = self.nanos.load(Ordering::SeqCst);
        loop {
            let next = f(current);
            match self
                .nanos
                .compare_exchange_weak(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Duration::from_nanos(next),
                Err(actual) => current = actual,
            }
        }
    }
}

impl From<Duration> for AtomicDuration {
    fn from(duration: Duration) -> Self {
        Self::new(duration)
    }
}

impl fmt::Debug for AtomicDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicDuration").field(&self.get()).finish()
    }
}
