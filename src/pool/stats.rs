//! Pool statistics.

use crate::atomic::AtomicInt64;

/// Live counters updated by the pool.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub(crate) created: AtomicInt64,
    pub(crate) reused: AtomicInt64,
    pub(crate) released: AtomicInt64,
    pub(crate) discarded: AtomicInt64,
}

impl PoolCounters {
    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            created: self.created.get() as u64,
            reused: self.reused.get() as u64,
            released: self.released.get() as u64,
            discarded: self.discarded.get() as u64,
        }
    }
}

/// Cumulative pool metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Objects built by the factory.
    pub created: u64,
    /// Acquisitions served from the free list.
    pub reused: u64,
    /// Releases that went back onto the free list.
    pub released: u64,
    /// Releases dropped because the free list was full or the object was rejected.
    pub discarded: u64,
}

impl PoolStats {
    /// Fraction of acquisitions served from the free list, in `[0.0, 1.0]`.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.created + self.reused;
        if total == 0 {
            0.0
        } else {
            self.reused as f64 / total as f64
        }
    }
}
